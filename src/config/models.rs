use crate::constants;
use crate::error::Error;
use crate::findings::Severity;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct LintConfig {
    /// How many parsed syntax trees a run keeps.
    #[serde(default = "default_cst_cache_capacity")]
    pub cst_cache_capacity: usize,
    /// Treat warnings like errors when deciding the exit status.
    #[serde(default)]
    pub warnings_as_errors: bool,
    /// Per-rule severity overrides, keyed by rule id
    #[serde(default)]
    pub rules: IndexMap<String, RuleSetting>,
}

const fn default_cst_cache_capacity() -> usize {
    constants::DEFAULT_CST_CACHE_CAPACITY
}

impl Default for LintConfig {
    fn default() -> Self {
        Self {
            cst_cache_capacity: constants::DEFAULT_CST_CACHE_CAPACITY,
            warnings_as_errors: false,
            rules: IndexMap::new(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RuleSetting {
    Off,
    Error,
    Warning,
    Info,
    Hint,
}

impl RuleSetting {
    /// The severity to report at, or `None` when the rule is off.
    #[must_use]
    pub const fn severity(self) -> Option<Severity> {
        match self {
            Self::Off => None,
            Self::Error => Some(Severity::Error),
            Self::Warning => Some(Severity::Warning),
            Self::Info => Some(Severity::Info),
            Self::Hint => Some(Severity::Hint),
        }
    }
}

impl LintConfig {
    /// Effective severity of a rule: the override if one is set, otherwise
    /// `default`. `None` means the rule does not run.
    #[must_use]
    pub fn severity_for(&self, rule_id: &str, default: Severity) -> Option<Severity> {
        self.rules
            .get(rule_id)
            .map_or(Some(default), |setting| setting.severity())
    }

    /// Checks the configuration against the rules that actually exist.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] for an unknown rule id or a zero cache capacity.
    pub fn validate<'a>(&self, known_rules: impl IntoIterator<Item = &'a str>) -> Result<(), Error> {
        if self.cst_cache_capacity == 0 {
            return Err(Error::Config(
                "cst_cache_capacity must be at least 1".to_string(),
            ));
        }
        let known: Vec<&str> = known_rules.into_iter().collect();
        if let Some(unknown) = self.rules.keys().find(|id| !known.contains(&id.as_str())) {
            return Err(Error::Config(format!(
                "unknown rule '{unknown}'. Known rules: {}",
                known.join(", ")
            )));
        }
        Ok(())
    }
}
