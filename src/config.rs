//! Runtime settings.
//!
//! Resolution order, highest priority first: CLI flags (applied by the
//! binary), the TOML file named by `--config`, compiled defaults. Unknown
//! keys in the file are ignored.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::knowledge::{default_rules, ContradictionRule, DEFAULT_WIKIDATA_URL, DEFAULT_WIKIPEDIA_URL};
use crate::redflags::RedFlagRules;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Directory holding the vectorizer/model pair and `metrics.json`.
    pub model_dir: PathBuf,
    pub audit_log: PathBuf,
    pub lookup_timeout_secs: u64,
    pub requests_per_second: u32,
    /// Parallel entity-fact lookups per request.
    pub entity_concurrency: usize,
    pub user_agent: String,
    pub wikidata_url: String,
    pub wikipedia_url: String,
    pub red_flags: RedFlagRules,
    pub contradiction_rules: Vec<ContradictionRule>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            model_dir: PathBuf::from("model"),
            audit_log: PathBuf::from("log/predictions.log"),
            lookup_timeout_secs: 5,
            requests_per_second: 10,
            entity_concurrency: 4,
            user_agent: format!("newsverdict/{}", env!("CARGO_PKG_VERSION")),
            wikidata_url: DEFAULT_WIKIDATA_URL.to_string(),
            wikipedia_url: DEFAULT_WIKIPEDIA_URL.to_string(),
            red_flags: RedFlagRules::default(),
            contradiction_rules: default_rules(),
        }
    }
}

impl Settings {
    /// Defaults when `path` is `None`, otherwise the file layered over them.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let settings = match path {
            None => Self::default(),
            Some(path) => {
                let raw = fs::read_to_string(path)
                    .map_err(|source| ConfigError::Read { path: path.to_path_buf(), source })?;
                toml::from_str(&raw).map_err(|source| ConfigError::Parse { path: path.to_path_buf(), source })?
            }
        };
        settings.validate()?;
        Ok(settings)
    }

    pub fn from_toml(raw: &str) -> Result<Self, ConfigError> {
        let settings: Self =
            toml::from_str(raw).map_err(|source| ConfigError::Parse { path: PathBuf::from("<string>"), source })?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.lookup_timeout_secs == 0 {
            return Err(ConfigError::Invalid { field: "lookup_timeout_secs", message: "must be at least 1".into() });
        }
        if self.entity_concurrency == 0 {
            return Err(ConfigError::Invalid { field: "entity_concurrency", message: "must be at least 1".into() });
        }
        let ratio = self.red_flags.max_malformed_ratio;
        if !(0.0..=1.0).contains(&ratio) {
            return Err(ConfigError::Invalid {
                field: "red_flags.max_malformed_ratio",
                message: format!("{ratio} is outside [0, 1]"),
            });
        }
        Ok(())
    }

    pub fn lookup_timeout(&self) -> Duration {
        Duration::from_secs(self.lookup_timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_without_a_file() {
        let s = Settings::load(None).unwrap();
        assert_eq!(s.lookup_timeout(), Duration::from_secs(5));
        assert_eq!(s.entity_concurrency, 4);
        assert_eq!(s.contradiction_rules.len(), 1);
        assert_eq!(s.red_flags.min_caps_run, 10);
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let s = Settings::from_toml(
            r#"
            model_dir = "/srv/model"
            entity_concurrency = 8

            [red_flags]
            unreliable_domains = ["example.invalid"]
            "#,
        )
        .unwrap();
        assert_eq!(s.model_dir, PathBuf::from("/srv/model"));
        assert_eq!(s.entity_concurrency, 8);
        assert_eq!(s.red_flags.unreliable_domains, vec!["example.invalid"]);
        assert!(!s.red_flags.sensational_terms.is_empty());
        assert_eq!(s.requests_per_second, 10);
    }

    #[test]
    fn rules_table_replaces_defaults() {
        let s = Settings::from_toml(
            r#"
            [[contradiction_rules]]
            name = "flat-earth"
            claim_pattern = "(?i)earth is flat"
            evidence_pattern = "(?i)oblate spheroid"
            reason = "The Earth is an oblate spheroid"
            "#,
        )
        .unwrap();
        assert_eq!(s.contradiction_rules.len(), 1);
        assert_eq!(s.contradiction_rules[0].name, "flat-earth");
    }

    #[test]
    fn zero_concurrency_is_rejected() {
        let err = Settings::from_toml("entity_concurrency = 0").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "entity_concurrency", .. }));
    }

    #[test]
    fn reads_file_and_reports_parse_errors_with_path() {
        let mut good = tempfile::NamedTempFile::new().unwrap();
        writeln!(good, "lookup_timeout_secs = 2").unwrap();
        assert_eq!(Settings::load(Some(good.path())).unwrap().lookup_timeout_secs, 2);

        let mut bad = tempfile::NamedTempFile::new().unwrap();
        writeln!(bad, "lookup_timeout_secs = \"soon\"").unwrap();
        let err = Settings::load(Some(bad.path())).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
        assert!(err.to_string().contains(&bad.path().display().to_string()));
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let err = Settings::load(Some(Path::new("/nonexistent/newsverdict.toml"))).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }
}
