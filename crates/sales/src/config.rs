//! Engine configuration.

use core::str::FromStr;

use serde::{Deserialize, Serialize};

use lineforge_core::DomainError;

/// Which changed node wins when several trees in the forest carry one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScanPolicy {
    /// Every tree is scanned; the last tree with a changed node wins.
    #[default]
    LastTree,
    /// The first changed node across the whole forest wins.
    FirstMatch,
}

impl ScanPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            ScanPolicy::LastTree => "last_tree",
            ScanPolicy::FirstMatch => "first_match",
        }
    }
}

impl FromStr for ScanPolicy {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "last_tree" => Ok(ScanPolicy::LastTree),
            "first_match" => Ok(ScanPolicy::FirstMatch),
            other => Err(DomainError::validation(format!(
                "unknown scan policy '{other}' (expected last_tree or first_match)"
            ))),
        }
    }
}

impl core::fmt::Display for ScanPolicy {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    #[serde(default)]
    pub scan_policy: ScanPolicy,
}

impl EngineConfig {
    pub fn with_scan_policy(mut self, scan_policy: ScanPolicy) -> Self {
        self.scan_policy = scan_policy;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_last_tree() {
        assert_eq!(EngineConfig::default().scan_policy, ScanPolicy::LastTree);
        let cfg: EngineConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(cfg.scan_policy, ScanPolicy::LastTree);
    }

    #[test]
    fn parses_policies() {
        assert_eq!("first_match".parse::<ScanPolicy>().unwrap(), ScanPolicy::FirstMatch);
        assert_eq!(" LAST_TREE ".parse::<ScanPolicy>().unwrap(), ScanPolicy::LastTree);
        assert!(matches!(
            "newest".parse::<ScanPolicy>(),
            Err(DomainError::Validation(_))
        ));

        let cfg: EngineConfig = serde_json::from_str(r#"{"scan_policy":"first_match"}"#).unwrap();
        assert_eq!(cfg.scan_policy, ScanPolicy::FirstMatch);
    }
}
