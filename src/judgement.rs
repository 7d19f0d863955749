use rand::Rng;
use tracing::debug;

/// Decides a true/false question from free-form model text.
///
/// Every synonym that occurs in `text` is a candidate and the longest one
/// wins, so `不正确` beats the `正确` it contains. Ties go to `true_list`.
/// When nothing matches the verdict is drawn from `rng`.
pub fn judge<R: Rng>(
    text: &str,
    true_list: &[String],
    false_list: &[String],
    rng: &mut R,
) -> bool {
    match (longest_match(text, true_list), longest_match(text, false_list)) {
        (Some(yes), Some(no)) => yes >= no,
        (Some(_), None) => true,
        (None, Some(_)) => false,
        (None, None) => {
            debug!("no true/false synonym matched {text:?}, guessing");
            rng.random_bool(0.5)
        }
    }
}

fn longest_match(text: &str, synonyms: &[String]) -> Option<usize> {
    synonyms
        .iter()
        .filter(|synonym| !synonym.is_empty() && text.contains(synonym.as_str()))
        .map(|synonym| synonym.chars().count())
        .max()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BusinessConfig;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn judge_default(text: &str) -> bool {
        let business = BusinessConfig::default();
        let mut rng = StdRng::seed_from_u64(0);
        judge(text, &business.true_list, &business.false_list, &mut rng)
    }

    #[test]
    fn true_synonyms_win() {
        assert!(judge_default("这道题正确"));
        assert!(judge_default("√"));
        assert!(judge_default("对"));
    }

    #[test]
    fn false_synonyms_win() {
        assert!(!judge_default("答案是错误的"));
        assert!(!judge_default("×"));
        assert!(!judge_default("这个说法不正确"));
        assert!(!judge_default("不对"));
    }

    #[test]
    fn equal_length_tie_goes_to_true() {
        let true_list = vec!["ok".to_string()];
        let false_list = vec!["no".to_string()];
        let mut rng = StdRng::seed_from_u64(0);
        assert!(judge("ok or no", &true_list, &false_list, &mut rng));
    }

    #[test]
    fn empty_synonyms_never_match() {
        let true_list = vec![String::new()];
        let false_list = vec!["wrong".to_string()];
        let mut rng = StdRng::seed_from_u64(0);
        assert!(!judge("wrong", &true_list, &false_list, &mut rng));
    }

    #[test]
    fn unmatched_text_uses_injected_rng() {
        let business = BusinessConfig::default();
        for seed in 0..16 {
            let mut rng = StdRng::seed_from_u64(seed);
            let mut expected = StdRng::seed_from_u64(seed);
            assert_eq!(
                judge("maybe", &business.true_list, &business.false_list, &mut rng),
                expected.random_bool(0.5)
            );
        }
    }

    use proptest::prelude::*;
    proptest! {
        #[test]
        fn test_judge_never_panics(content in "\\PC*", seed in any::<u64>()) {
            let business = BusinessConfig::default();
            let mut rng = StdRng::seed_from_u64(seed);
            judge(&content, &business.true_list, &business.false_list, &mut rng);
        }
    }
}
