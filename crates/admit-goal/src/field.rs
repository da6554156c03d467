// field.rs - Field paths for attributing missing data and reasons.
//
// Nested resource budgets use dotted notation (`resource_constraints.time`)
// so an editor can map a path back to the specific sub-control. The variant
// order below is the declaration order; `Ord` follows it, and missing-field
// lists are reported in that order.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A dotted identifier locating a goal field or nested sub-field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum FieldPath {
    #[serde(rename = "description")]
    Description,
    #[serde(rename = "observable_return")]
    ObservableReturn,
    #[serde(rename = "external_verification")]
    ExternalVerification,
    #[serde(rename = "time_horizon_days")]
    TimeHorizonDays,
    #[serde(rename = "reversibility")]
    Reversibility,
    #[serde(rename = "resource_constraints")]
    ResourceConstraints,
    #[serde(rename = "resource_constraints.time")]
    ResourceTime,
    #[serde(rename = "resource_constraints.energy")]
    ResourceEnergy,
    #[serde(rename = "resource_constraints.attention")]
    ResourceAttention,
}

impl FieldPath {
    /// Every path, in declaration order.
    pub const ALL: [FieldPath; 9] = [
        FieldPath::Description,
        FieldPath::ObservableReturn,
        FieldPath::ExternalVerification,
        FieldPath::TimeHorizonDays,
        FieldPath::Reversibility,
        FieldPath::ResourceConstraints,
        FieldPath::ResourceTime,
        FieldPath::ResourceEnergy,
        FieldPath::ResourceAttention,
    ];

    /// The six top-level goal fields.
    pub const TOP_LEVEL: [FieldPath; 6] = [
        FieldPath::Description,
        FieldPath::ObservableReturn,
        FieldPath::ExternalVerification,
        FieldPath::TimeHorizonDays,
        FieldPath::Reversibility,
        FieldPath::ResourceConstraints,
    ];

    /// The wire identifier (e.g. `resource_constraints.energy`).
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldPath::Description => "description",
            FieldPath::ObservableReturn => "observable_return",
            FieldPath::ExternalVerification => "external_verification",
            FieldPath::TimeHorizonDays => "time_horizon_days",
            FieldPath::Reversibility => "reversibility",
            FieldPath::ResourceConstraints => "resource_constraints",
            FieldPath::ResourceTime => "resource_constraints.time",
            FieldPath::ResourceEnergy => "resource_constraints.energy",
            FieldPath::ResourceAttention => "resource_constraints.attention",
        }
    }

    /// Human label shown in a "what's left" list.
    pub fn label(&self) -> &'static str {
        match self {
            FieldPath::Description => "Intention",
            FieldPath::ObservableReturn => "Observable return",
            FieldPath::ExternalVerification => "External verification",
            FieldPath::TimeHorizonDays => "Time horizon",
            FieldPath::Reversibility => "Reversibility",
            FieldPath::ResourceConstraints => "Resource constraints",
            FieldPath::ResourceTime => "Time budget",
            FieldPath::ResourceEnergy => "Energy budget",
            FieldPath::ResourceAttention => "Attention budget",
        }
    }

    /// Parse a wire identifier. Returns `None` for anything that isn't a known path.
    pub fn parse(s: &str) -> Option<FieldPath> {
        FieldPath::ALL.into_iter().find(|f| f.as_str() == s)
    }

    /// The enclosing top-level field (`resource_constraints.time` → `resource_constraints`).
    pub fn top_level(&self) -> FieldPath {
        match self {
            FieldPath::ResourceTime | FieldPath::ResourceEnergy | FieldPath::ResourceAttention => {
                FieldPath::ResourceConstraints
            }
            other => *other,
        }
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for FieldPath {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FieldPath::parse(s).ok_or_else(|| format!("unknown field path '{}'", s))
    }
}
