use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Lifecycle state of a survey.
///
/// Transitions are caller-directed via the catalog; there is no automatic
/// expiry. Only `Active` surveys accept submissions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SurveyStatus {
    /// Being edited; not yet open for responses.
    Draft,
    /// Open for responses.
    Active,
    /// No longer accepting responses.
    Closed,
}

impl SurveyStatus {
    /// Whether submissions are accepted in this state.
    pub fn is_active(&self) -> bool {
        matches!(self, Self::Active)
    }

    /// The lowercase wire name (`draft`, `active`, `closed`).
    pub fn name(&self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Active => "active",
            Self::Closed => "closed",
        }
    }
}

impl fmt::Display for SurveyStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error for status strings outside the closed `draft`/`active`/`closed` set.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("unknown survey status '{0}', expected one of draft, active, closed")]
pub struct StatusParseError(pub String);

impl FromStr for SurveyStatus {
    type Err = StatusParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "draft" => Ok(Self::Draft),
            "active" => Ok(Self::Active),
            "closed" => Ok(Self::Closed),
            other => Err(StatusParseError(other.to_string())),
        }
    }
}
