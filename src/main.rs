use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand, ValueHint};
use tracing_subscriber::EnvFilter;

use doubao_tiku::AnswerClient;
use doubao_tiku::config::DEFAULT_CONFIG_PATH;

#[derive(Parser, Debug)]
#[command(
    name = "tiku",
    version,
    about = "Answer course quiz questions through an LLM gateway.",
    long_about = None,
    propagate_version = true,
    arg_required_else_help = true,
    disable_help_subcommand = true
)]
struct Cli {
    /// Path to the INI file holding the [tiku] section
    #[arg(
        short,
        long,
        value_name = "PATH",
        default_value = DEFAULT_CONFIG_PATH,
        value_hint = ValueHint::FilePath
    )]
    config: PathBuf,
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Ask the gateway a question and print the answer
    Ask {
        /// Question text
        #[arg(value_name = "QUESTION")]
        question: String,
        /// Image to attach to the question
        #[arg(long, value_name = "URL")]
        image: Option<String>,
    },
    /// Classify a reply as true or false using the configured synonyms
    Judge {
        #[arg(value_name = "TEXT")]
        text: String,
    },
    /// Print the submit parameter ("1" saves a draft, empty submits)
    SubmitParams,
}

#[tokio::main]
async fn main() {
    if let Err(err) = run_cli().await {
        eprintln!("{:?}", err);
        std::process::exit(1);
    }
}

fn init_tracing(verbose: u8) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| match verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

async fn run_cli() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let client = AnswerClient::from_path(&cli.config)
        .with_context(|| format!("Failed to initialize from {}", cli.config.display()))?;

    match cli.command {
        Command::Ask { question, image } => {
            let Some(answer) = client.answer_question(&question, image.as_deref()).await else {
                bail!("No answer returned for {question:?}. Re-run with -v for details.");
            };
            println!("{answer}");
        }
        Command::Judge { text } => {
            println!("{}", client.judgement_select(&text));
        }
        Command::SubmitParams => {
            println!("{:?}", client.submit_params());
        }
    }

    Ok(())
}
