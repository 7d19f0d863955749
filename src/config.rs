use std::path::Path;
use std::time::Duration;

use ini::{Ini, ParseOption, Properties};
use tracing::debug;

use crate::error::TikuError;
use crate::utils::{parse_ini_bool, split_list, trim_line};

pub const DEFAULT_CONFIG_PATH: &str = "config.ini";
pub const DEFAULT_BASE_URL: &str = "https://ai-gateway.vei.volces.com/v1";
pub const DEFAULT_MODEL: &str = "doubao-seed-1.6";
pub const DEFAULT_MIN_INTERVAL_SECS: u64 = 1;
pub const MAX_RESPONSE_TOKENS: u32 = 1024;
pub const DEFAULT_COVER_RATE: f64 = 0.8;
pub const DEFAULT_TRUE_LIST: &str = "正确,对,√,是";
pub const DEFAULT_FALSE_LIST: &str = "错误,×,否,不对,不正确";

const SECTION: &str = "tiku";
const DEFAULT_SECTION: &str = "DEFAULT";

const KEY_API_KEY: &str = "doubao_api_key";
const KEY_ENDPOINT: &str = "doubao_endpoint";
const KEY_MODEL: &str = "doubao_model";
const KEY_MIN_INTERVAL: &str = "doubao_min_interval";
const KEY_SUBMIT: &str = "submit";
const KEY_COVER_RATE: &str = "cover_rate";
const KEY_TRUE_LIST: &str = "true_list";
const KEY_FALSE_LIST: &str = "false_list";

/// Connection settings for the LLM gateway.
#[derive(Clone)]
pub struct GatewayConfig {
    pub api_key: String,
    pub base_url: String,
    pub model: String,
    pub min_interval: Duration,
    pub max_tokens: u32,
}

impl GatewayConfig {
    pub fn new(api_key: impl Into<String>) -> Result<Self, TikuError> {
        let api_key = api_key.into();
        if trim_line(&api_key).is_none() {
            return Err(TikuError::MissingCredential);
        }
        Ok(Self {
            api_key: api_key.trim().to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            min_interval: Duration::from_secs(DEFAULT_MIN_INTERVAL_SECS),
            max_tokens: MAX_RESPONSE_TOKENS,
        })
    }
}

impl std::fmt::Debug for GatewayConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GatewayConfig")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("min_interval", &self.min_interval)
            .field("max_tokens", &self.max_tokens)
            .finish()
    }
}

/// Settings consumed by the course-answering workflow around the client.
#[derive(Debug, Clone, PartialEq)]
pub struct BusinessConfig {
    pub auto_submit: bool,
    pub cover_rate: f64,
    pub true_list: Vec<String>,
    pub false_list: Vec<String>,
}

impl Default for BusinessConfig {
    fn default() -> Self {
        Self {
            auto_submit: true,
            cover_rate: DEFAULT_COVER_RATE,
            true_list: split_list(DEFAULT_TRUE_LIST),
            false_list: split_list(DEFAULT_FALSE_LIST),
        }
    }
}

#[derive(Debug, Clone)]
pub struct TikuConfig {
    pub gateway: GatewayConfig,
    pub business: BusinessConfig,
}

impl TikuConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, TikuError> {
        let path = path.as_ref();
        let ini = Ini::load_from_file_opt(path, parse_option()).map_err(|source| {
            TikuError::Configuration {
                path: path.to_path_buf(),
                source,
            }
        })?;
        Self::from_ini(&ini)
    }

    pub fn from_ini_str(contents: &str) -> Result<Self, TikuError> {
        let ini = Ini::load_from_str_opt(contents, parse_option())?;
        Self::from_ini(&ini)
    }

    fn from_ini(ini: &Ini) -> Result<Self, TikuError> {
        let section = SectionView {
            section: ini
                .section(Some(SECTION))
                .ok_or(TikuError::MissingCredential)?,
            defaults: ini.section(Some(DEFAULT_SECTION)),
        };

        let gateway = load_gateway(&section)?;
        let business = load_business(&section)?;
        debug!(
            submit = business.auto_submit,
            cover_rate = business.cover_rate,
            model = %gateway.model,
            "loaded [tiku] config"
        );

        Ok(Self { gateway, business })
    }
}

/// Values are taken literally: no quote stripping, no backslash escapes.
fn parse_option() -> ParseOption {
    ParseOption {
        enabled_quote: false,
        enabled_escape: false,
        ..Default::default()
    }
}

/// The `[tiku]` section with `[DEFAULT]` as fallback. Keys match regardless
/// of case.
struct SectionView<'a> {
    section: &'a Properties,
    defaults: Option<&'a Properties>,
}

impl<'a> SectionView<'a> {
    fn raw(&self, key: &str) -> Option<&'a str> {
        lookup(self.section, key).or_else(|| self.defaults.and_then(|d| lookup(d, key)))
    }
}

fn lookup<'a>(properties: &'a Properties, key: &str) -> Option<&'a str> {
    properties
        .iter()
        .find(|(name, _)| name.trim().eq_ignore_ascii_case(key))
        .map(|(_, value)| value)
}

fn value<'a>(section: &SectionView<'a>, key: &str) -> Option<&'a str> {
    section.raw(key).and_then(trim_line)
}

fn invalid(key: &'static str, raw: &str) -> TikuError {
    TikuError::InvalidValue {
        key,
        value: raw.to_string(),
    }
}

fn load_gateway(section: &SectionView<'_>) -> Result<GatewayConfig, TikuError> {
    let api_key = value(section, KEY_API_KEY).ok_or(TikuError::MissingCredential)?;
    let mut gateway = GatewayConfig::new(api_key)?;

    if let Some(endpoint) = value(section, KEY_ENDPOINT) {
        gateway.base_url = endpoint.to_string();
    }
    if let Some(model) = value(section, KEY_MODEL) {
        gateway.model = model.to_string();
    }
    if let Some(raw) = value(section, KEY_MIN_INTERVAL) {
        let secs: u64 = raw.parse().map_err(|_| invalid(KEY_MIN_INTERVAL, raw))?;
        gateway.min_interval = Duration::from_secs(secs);
    }

    Ok(gateway)
}

fn load_business(section: &SectionView<'_>) -> Result<BusinessConfig, TikuError> {
    let mut business = BusinessConfig::default();

    if let Some(raw) = value(section, KEY_SUBMIT) {
        business.auto_submit = parse_ini_bool(raw).ok_or_else(|| invalid(KEY_SUBMIT, raw))?;
    }
    if let Some(raw) = value(section, KEY_COVER_RATE) {
        let rate: f64 = raw.parse().map_err(|_| invalid(KEY_COVER_RATE, raw))?;
        if !(0.0..=1.0).contains(&rate) {
            return Err(invalid(KEY_COVER_RATE, raw));
        }
        business.cover_rate = rate;
    }
    if let Some(raw) = value(section, KEY_TRUE_LIST) {
        business.true_list = split_list(raw);
    }
    if let Some(raw) = value(section, KEY_FALSE_LIST) {
        business.false_list = split_list(raw);
    }

    Ok(business)
}
