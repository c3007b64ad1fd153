use serde::{Deserialize, Serialize};

/// Identifier of a truth record within its collection
pub type Barcode = i64;

/// PDG Monte Carlo particle code
pub type PdgId = i32;

/// Role a truth record plays in matching
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TruthRole {
    /// Quark directly from the gluino decay
    Parton,
    /// Final-state-radiation quark attributed to a parton lineage
    Fsr,
}

impl TruthRole {
    /// Plural noun used in log messages
    #[must_use]
    pub fn plural(self) -> &'static str {
        match self {
            Self::Parton => "partons",
            Self::Fsr => "FSRs",
        }
    }
}

impl std::fmt::Display for TruthRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Parton => write!(f, "parton"),
            Self::Fsr => write!(f, "FSR"),
        }
    }
}

/// Kind of truth object a jet was matched to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum MatchType {
    /// Jet is not matched
    #[default]
    None,
    /// Jet is matched to a parton
    Parton,
    /// Jet is matched to an FSR quark
    #[serde(rename = "FSR")]
    Fsr,
}

impl From<TruthRole> for MatchType {
    fn from(role: TruthRole) -> Self {
        match role {
            TruthRole::Parton => Self::Parton,
            TruthRole::Fsr => Self::Fsr,
        }
    }
}

impl std::fmt::Display for MatchType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::None => write!(f, "None"),
            Self::Parton => write!(f, "Parton"),
            Self::Fsr => write!(f, "FSR"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_match_type_from_role() {
        assert_eq!(MatchType::from(TruthRole::Parton), MatchType::Parton);
        assert_eq!(MatchType::from(TruthRole::Fsr), MatchType::Fsr);
        assert_eq!(MatchType::default(), MatchType::None);
    }

    #[test]
    fn test_match_type_serde_names() {
        assert_eq!(serde_json::to_string(&MatchType::Fsr).unwrap(), "\"FSR\"");
        assert_eq!(
            serde_json::to_string(&MatchType::Parton).unwrap(),
            "\"Parton\""
        );
        assert_eq!(MatchType::Fsr.to_string(), "FSR");
    }
}
