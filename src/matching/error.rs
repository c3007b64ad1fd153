use thiserror::Error;

use crate::core::types::{Barcode, TruthRole};
use crate::matching::config::MatchingCriteria;

/// Broad class of a [`MatchError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Bad option name or value, or an incompatible combination of options
    Configuration,
    /// Missing collections, incomplete identities or dangling references
    InputIntegrity,
    /// The matching finished but its result breaks a physical invariant
    InvariantViolation,
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum MatchError {
    #[error("Option '{0}' was not recognized")]
    UnknownOption(String),

    #[error("Invalid value for option '{option}': {reason}")]
    InvalidOptionValue { option: String, reason: String },

    #[error("MatchingCriteria '{0}' is not supported")]
    UnsupportedCriteria(String),

    #[error("DeltaRcut was set to {delta_r_cut} but MatchingCriteria is {criteria}, which does not recompute DeltaR")]
    DeltaRCutWithoutRecompute {
        criteria: MatchingCriteria,
        delta_r_cut: f64,
    },

    #[error("DeltaRcut must be a positive finite number, got {0}")]
    InvalidDeltaRCut(f64),

    #[error("No jets were provided")]
    NoJets,

    #[error("No partons were provided")]
    NoPartons,

    #[error("{field} not set for {role} with index {index}")]
    IncompleteTruthRecord {
        role: TruthRole,
        index: usize,
        field: &'static str,
    },

    #[error("Jet {jet_index} refers to {role} with barcode {barcode}, which was not provided")]
    TruthRecordNotFound {
        role: TruthRole,
        barcode: Barcode,
        jet_index: usize,
    },

    #[error("More than {limit} jets are matched ({matched})")]
    TooManyMatchedJets { matched: usize, limit: usize },
}

impl MatchError {
    #[must_use]
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::UnknownOption(_)
            | Self::InvalidOptionValue { .. }
            | Self::UnsupportedCriteria(_)
            | Self::DeltaRCutWithoutRecompute { .. }
            | Self::InvalidDeltaRCut(_) => ErrorCategory::Configuration,
            Self::NoJets
            | Self::NoPartons
            | Self::IncompleteTruthRecord { .. }
            | Self::TruthRecordNotFound { .. } => ErrorCategory::InputIntegrity,
            Self::TooManyMatchedJets { .. } => ErrorCategory::InvariantViolation,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_categories() {
        assert_eq!(
            MatchError::UnknownOption("Foo".to_string()).category(),
            ErrorCategory::Configuration
        );
        assert_eq!(MatchError::NoJets.category(), ErrorCategory::InputIntegrity);
        assert_eq!(
            MatchError::TooManyMatchedJets {
                matched: 7,
                limit: 6
            }
            .category(),
            ErrorCategory::InvariantViolation
        );
    }

    #[test]
    fn test_messages_name_the_record() {
        let err = MatchError::IncompleteTruthRecord {
            role: TruthRole::Fsr,
            index: 2,
            field: "quark_barcode",
        };
        assert_eq!(err.to_string(), "quark_barcode not set for FSR with index 2");

        let err = MatchError::TruthRecordNotFound {
            role: TruthRole::Parton,
            barcode: 7,
            jet_index: 1,
        };
        assert!(err.to_string().contains("barcode 7"));
    }
}
