//! Matcher options.
//!
//! Options carry the names used by the analysis framework (`MatchingCriteria`,
//! `DeltaRcut`, ...) both in serialized form and in [`MatcherConfig::set_property`],
//! so event files and job options written for other tools can be reused as-is.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::matching::error::MatchError;

/// Default maximum ΔR between a jet and its truth match
pub const DEFAULT_DELTA_R_CUT: f64 = 0.4;

/// Names of all recognized options
pub const OPTION_NAMES: [&str; 6] = [
    "MatchingCriteria",
    "DeltaRcut",
    "ReturnOnlyMatched",
    "Debug",
    "DisableNmatchedJetProtection",
    "MatchFSRsFromMatchedGluinoDecays",
];

/// How jets are associated with truth objects
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum MatchingCriteria {
    /// Trust the per-jet match hints computed upstream
    #[serde(rename = "UseFTDeltaRvalues")]
    UseFtDeltaRValues,
    /// Recompute ΔR; FSR lineage collisions keep the highest-pt jet
    #[serde(rename = "RecomputeDeltaRvalues_ptPriority")]
    RecomputePtPriority,
    /// Recompute ΔR; FSR lineage collisions keep the closest jet
    #[default]
    #[serde(rename = "RecomputeDeltaRvalues_drPriority")]
    RecomputeDrPriority,
}

impl MatchingCriteria {
    pub const ALL: [Self; 3] = [
        Self::UseFtDeltaRValues,
        Self::RecomputePtPriority,
        Self::RecomputeDrPriority,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::UseFtDeltaRValues => "UseFTDeltaRvalues",
            Self::RecomputePtPriority => "RecomputeDeltaRvalues_ptPriority",
            Self::RecomputeDrPriority => "RecomputeDeltaRvalues_drPriority",
        }
    }

    /// Whether this criteria computes ΔR itself (and therefore uses `DeltaRcut`)
    #[must_use]
    pub fn recomputes_delta_r(self) -> bool {
        !matches!(self, Self::UseFtDeltaRValues)
    }
}

impl std::fmt::Display for MatchingCriteria {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for MatchingCriteria {
    type Err = MatchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|criteria| criteria.as_str() == s)
            .ok_or_else(|| MatchError::UnsupportedCriteria(s.to_string()))
    }
}

/// A loosely-typed option value, as handed to [`MatcherConfig::set_property`]
#[derive(Debug, Clone, PartialEq)]
pub enum PropertyValue {
    Bool(bool),
    Float(f64),
    Text(String),
}

impl PropertyValue {
    /// Interpret a raw `Name=Value` right-hand side
    pub fn from_text(raw: &str) -> Self {
        let raw = raw.trim();
        match raw {
            "true" | "True" => Self::Bool(true),
            "false" | "False" => Self::Bool(false),
            _ => raw
                .parse::<f64>()
                .map_or_else(|_| Self::Text(raw.to_string()), Self::Float),
        }
    }

    fn kind(&self) -> &'static str {
        match self {
            Self::Bool(_) => "a boolean",
            Self::Float(_) => "a number",
            Self::Text(_) => "a string",
        }
    }
}

impl From<bool> for PropertyValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<f64> for PropertyValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<&str> for PropertyValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<MatchingCriteria> for PropertyValue {
    fn from(value: MatchingCriteria) -> Self {
        Self::Text(value.as_str().to_string())
    }
}

/// Configuration for the matcher
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MatcherConfig {
    #[serde(rename = "MatchingCriteria")]
    pub criteria: MatchingCriteria,

    /// Maximum ΔR for a match; only meaningful when ΔR is recomputed
    #[serde(rename = "DeltaRcut")]
    pub delta_r_cut: f64,

    /// Return only matched jets instead of every jet
    #[serde(rename = "ReturnOnlyMatched")]
    pub return_only_matched: bool,

    /// Emit a per-decision trace
    #[serde(rename = "Debug")]
    pub debug: bool,

    /// Skip the check that at most six jets are matched
    #[serde(rename = "DisableNmatchedJetProtection")]
    pub disable_n_matched_jet_protection: bool,

    /// Allow FSRs to match even when their parton lineage is already matched
    #[serde(rename = "MatchFSRsFromMatchedGluinoDecays")]
    pub match_fsrs_from_matched_gluino_decays: bool,
}

impl Default for MatcherConfig {
    fn default() -> Self {
        Self {
            criteria: MatchingCriteria::default(),
            delta_r_cut: DEFAULT_DELTA_R_CUT,
            return_only_matched: false,
            debug: false,
            disable_n_matched_jet_protection: false,
            match_fsrs_from_matched_gluino_decays: false,
        }
    }
}

impl MatcherConfig {
    /// Set an option by name
    ///
    /// # Errors
    ///
    /// Returns `MatchError::UnknownOption` for names not in [`OPTION_NAMES`],
    /// `MatchError::InvalidOptionValue` when the value has the wrong type, or
    /// `MatchError::UnsupportedCriteria` for an unknown `MatchingCriteria`.
    pub fn set_property(
        &mut self,
        name: &str,
        value: impl Into<PropertyValue>,
    ) -> Result<(), MatchError> {
        let value = value.into();
        match (name, value) {
            ("MatchingCriteria", PropertyValue::Text(text)) => {
                self.criteria = text.parse()?;
            }
            ("DeltaRcut", PropertyValue::Float(cut)) => self.delta_r_cut = cut,
            ("ReturnOnlyMatched", PropertyValue::Bool(flag)) => self.return_only_matched = flag,
            ("Debug", PropertyValue::Bool(flag)) => self.debug = flag,
            ("DisableNmatchedJetProtection", PropertyValue::Bool(flag)) => {
                self.disable_n_matched_jet_protection = flag;
            }
            ("MatchFSRsFromMatchedGluinoDecays", PropertyValue::Bool(flag)) => {
                self.match_fsrs_from_matched_gluino_decays = flag;
            }
            (name, value) if OPTION_NAMES.contains(&name) => {
                return Err(MatchError::InvalidOptionValue {
                    option: name.to_string(),
                    reason: format!("{} is not accepted here", value.kind()),
                });
            }
            (name, _) => return Err(MatchError::UnknownOption(name.to_string())),
        }
        Ok(())
    }

    /// Parse and apply a `Name=Value` assignment
    ///
    /// # Errors
    ///
    /// Returns `MatchError::InvalidOptionValue` if there is no `=`, otherwise
    /// whatever [`MatcherConfig::set_property`] returns.
    pub fn apply_assignment(&mut self, assignment: &str) -> Result<(), MatchError> {
        let (name, raw) =
            assignment
                .split_once('=')
                .ok_or_else(|| MatchError::InvalidOptionValue {
                    option: assignment.to_string(),
                    reason: "expected Name=Value".to_string(),
                })?;
        self.set_property(name.trim(), PropertyValue::from_text(raw))
    }

    pub fn has_default_delta_r_cut(&self) -> bool {
        (self.delta_r_cut - DEFAULT_DELTA_R_CUT).abs() <= f64::EPSILON
    }

    /// Check option combinations before any matching is done
    ///
    /// # Errors
    ///
    /// Returns `MatchError::InvalidDeltaRCut` for a non-positive or non-finite
    /// cut, or `MatchError::DeltaRCutWithoutRecompute` when a non-default cut
    /// is combined with hint-based matching.
    pub fn validate(&self) -> Result<(), MatchError> {
        if !self.delta_r_cut.is_finite() || self.delta_r_cut <= 0.0 {
            return Err(MatchError::InvalidDeltaRCut(self.delta_r_cut));
        }
        if !self.has_default_delta_r_cut() && !self.criteria.recomputes_delta_r() {
            return Err(MatchError::DeltaRCutWithoutRecompute {
                criteria: self.criteria,
                delta_r_cut: self.delta_r_cut,
            });
        }
        Ok(())
    }
}
