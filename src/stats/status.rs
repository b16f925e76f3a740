//! Outcome status classification
//!
//! Raw status strings ("Finished", "+2 Laps", "Collision damage", "Engine",
//! ...) are mapped to a fixed set of categories by an ordered rule table.
//! The first matching rule wins, so a string that mentions both a collision
//! and an engine failure is an accident.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Outcome category of a race entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StatusCategory {
    Finished,
    Accident,
    Mechanical,
    #[serde(rename = "DSQ")]
    Dsq,
    Other,
}

impl StatusCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            StatusCategory::Finished => "Finished",
            StatusCategory::Accident => "Accident",
            StatusCategory::Mechanical => "Mechanical",
            StatusCategory::Dsq => "DSQ",
            StatusCategory::Other => "Other",
        }
    }
}

impl fmt::Display for StatusCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Predicate over a lowercased status string
type StatusPredicate = fn(&str) -> bool;

const ACCIDENT_KEYWORDS: &[&str] = &["accident", "collision", "spun"];

const MECHANICAL_KEYWORDS: &[&str] = &[
    "engine",
    "gearbox",
    "transmission",
    "hydraulics",
    "electrical",
    "brakes",
];

fn contains_any(status: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|keyword| status.contains(keyword))
}

fn is_finished(status: &str) -> bool {
    status.contains("finished") || status.contains("laps") || status == "+1 lap"
}

fn is_accident(status: &str) -> bool {
    contains_any(status, ACCIDENT_KEYWORDS)
}

fn is_mechanical(status: &str) -> bool {
    contains_any(status, MECHANICAL_KEYWORDS)
}

fn is_disqualified(status: &str) -> bool {
    status.contains("disqualified")
}

/// Classification rules in evaluation order
const RULES: &[(StatusPredicate, StatusCategory)] = &[
    (is_finished, StatusCategory::Finished),
    (is_accident, StatusCategory::Accident),
    (is_mechanical, StatusCategory::Mechanical),
    (is_disqualified, StatusCategory::Dsq),
];

/// Classify a raw status string, case-insensitively.
///
/// Unrecognized strings fall through to [`StatusCategory::Other`].
pub fn classify(status: &str) -> StatusCategory {
    let lowered = status.to_lowercase();
    RULES
        .iter()
        .find(|(matches, _)| matches(&lowered))
        .map(|(_, category)| *category)
        .unwrap_or(StatusCategory::Other)
}
