use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown verdict: {0}")]
pub struct ParseVerdictError(pub String);

/// Risk classification assigned to an app or website.
///
/// Ordered by severity: `Safe < Suspicious < Scam`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
    /// Known, regulated and verified.
    Safe,
    /// Not enough evidence either way, or showing warning signs.
    Suspicious,
    /// Known fraudulent.
    Scam,
}

impl Verdict {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Verdict::Safe => "safe",
            Verdict::Suspicious => "suspicious",
            Verdict::Scam => "scam",
        }
    }

    #[must_use]
    pub fn severity(self) -> u8 {
        match self {
            Verdict::Safe => 0,
            Verdict::Suspicious => 1,
            Verdict::Scam => 2,
        }
    }

    /// All verdicts in severity order.
    #[must_use]
    pub fn all() -> [Verdict; 3] {
        [Verdict::Safe, Verdict::Suspicious, Verdict::Scam]
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Verdict {
    type Err = ParseVerdictError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "safe" => Ok(Verdict::Safe),
            "suspicious" => Ok(Verdict::Suspicious),
            "scam" => Ok(Verdict::Scam),
            _ => Err(ParseVerdictError(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_is_case_insensitive() {
        assert_eq!("SCAM".parse::<Verdict>().unwrap(), Verdict::Scam);
        assert_eq!(" safe ".parse::<Verdict>().unwrap(), Verdict::Safe);
        assert!("dangerous".parse::<Verdict>().is_err());
    }

    #[test]
    fn severity_follows_ordering() {
        assert!(Verdict::Safe < Verdict::Suspicious);
        assert!(Verdict::Suspicious < Verdict::Scam);
        assert_eq!(Verdict::Scam.severity(), 2);
    }

    #[test]
    fn serde_uses_lowercase_names() {
        let json = serde_json::to_string(&Verdict::Suspicious).unwrap();
        assert_eq!(json, "\"suspicious\"");
        let back: Verdict = serde_json::from_str("\"scam\"").unwrap();
        assert_eq!(back, Verdict::Scam);
    }
}
