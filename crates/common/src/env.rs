//! Environment variable sources

use std::collections::{BTreeMap, HashMap};
use std::env;

/// Something that can answer "what is the value of this variable?"
///
/// The process environment is the usual source; maps stand in for it in tests.
pub trait EnvSource {
    /// Returns the variable's value, or `None` when it is unset
    fn var(&self, key: &str) -> Option<String>;
}

/// The real process environment
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl EnvSource for ProcessEnv {
    fn var(&self, key: &str) -> Option<String> {
        // Non-unicode values count as unset
        env::var(key).ok()
    }
}

impl EnvSource for HashMap<String, String> {
    fn var(&self, key: &str) -> Option<String> {
        self.get(key).cloned()
    }
}

impl EnvSource for BTreeMap<String, String> {
    fn var(&self, key: &str) -> Option<String> {
        self.get(key).cloned()
    }
}

impl<T: EnvSource + ?Sized> EnvSource for &T {
    fn var(&self, key: &str) -> Option<String> {
        (**self).var(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_map_source_returns_set_values() {
        let mut map = HashMap::new();
        map.insert("GMAIL_API_KEY".to_string(), "abc".to_string());

        assert_eq!(map.var("GMAIL_API_KEY").as_deref(), Some("abc"));
        assert_eq!(map.var("GITHUB_TOKEN"), None);
    }

    #[test]
    fn test_empty_value_is_not_absent() {
        let mut map = BTreeMap::new();
        map.insert("SLACK_WEBHOOK_URL".to_string(), String::new());

        assert_eq!(map.var("SLACK_WEBHOOK_URL"), Some(String::new()));
    }

    #[test]
    fn test_process_env_unset_variable() {
        assert_eq!(
            ProcessEnv.var("INTEGRATIONS_TEST_SURELY_UNSET_VARIABLE"),
            None
        );
    }
}
