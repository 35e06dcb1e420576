//! Learning status of a word.
//!
//! The lower-case names double as the wire values of Fieldbook's
//! `how_well_known` column and as the CSS class painted onto occurrences.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How well the reader knows a word.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum LearningStatus {
    Known,
    Unknown,
    #[default]
    Unverified,
}

impl LearningStatus {
    /// Every status, in display order.
    pub const ALL: [LearningStatus; 3] = [
        LearningStatus::Known,
        LearningStatus::Unknown,
        LearningStatus::Unverified,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            LearningStatus::Known => "known",
            LearningStatus::Unknown => "unknown",
            LearningStatus::Unverified => "unverified",
        }
    }

    /// All statuses other than `self`.
    pub fn others(self) -> impl Iterator<Item = LearningStatus> {
        Self::ALL.into_iter().filter(move |s| *s != self)
    }
}

impl fmt::Display for LearningStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string names no known status.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown learning status '{0}' (expected known, unknown, or unverified)")]
pub struct UnknownStatus(pub String);

impl FromStr for LearningStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "known" => Ok(LearningStatus::Known),
            "unknown" => Ok(LearningStatus::Unknown),
            "unverified" => Ok(LearningStatus::Unverified),
            _ => Err(UnknownStatus(s.to_string())),
        }
    }
}
