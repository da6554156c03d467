// verdict.rs - The three-way classification result.
//
// Serializes as `{"status": "...", ...}`, the shape editors already consume:
//
//   {"status": "admissible", "goal": {...}}
//   {"status": "ambiguous", "missing": ["description"], "reasons": ["..."]}
//   {"status": "rejected", "reasons": ["resource_constraints.time: cannot be negative"]}

use std::fmt;

use admit_goal::{FieldPath, Goal};
use serde::{Deserialize, Serialize};

use crate::reason::Reason;

/// Exactly one admissibility state.
///
/// Deserialization refuses an Ambiguous or Rejected verdict with no reasons.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case", try_from = "VerdictWire")]
pub enum VerdictState {
    /// Complete and valid; carries the promoted goal.
    Admissible { goal: Goal },

    /// Something is missing or needs sharpening. `missing_fields` is in
    /// declaration order and may be empty when only soft rules fired.
    Ambiguous {
        #[serde(rename = "missing", alias = "missing_fields")]
        missing_fields: Vec<FieldPath>,
        reasons: Vec<Reason>,
    },

    /// Complete, but at least one hard rule failed.
    Rejected { reasons: Vec<Reason> },
}

// Unchecked wire shape; `VerdictState` is built from it through `TryFrom`.
#[derive(Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
enum VerdictWire {
    Admissible {
        goal: Goal,
    },
    Ambiguous {
        #[serde(rename = "missing", alias = "missing_fields")]
        missing_fields: Vec<FieldPath>,
        reasons: Vec<Reason>,
    },
    Rejected {
        reasons: Vec<Reason>,
    },
}

impl TryFrom<VerdictWire> for VerdictState {
    type Error = String;

    fn try_from(wire: VerdictWire) -> Result<Self, Self::Error> {
        match wire {
            VerdictWire::Admissible { goal } => Ok(VerdictState::Admissible { goal }),
            VerdictWire::Ambiguous { reasons, .. } | VerdictWire::Rejected { reasons }
                if reasons.is_empty() =>
            {
                Err("a non-admissible verdict needs at least one reason".to_string())
            }
            VerdictWire::Ambiguous {
                missing_fields,
                reasons,
            } => Ok(VerdictState::Ambiguous {
                missing_fields,
                reasons,
            }),
            VerdictWire::Rejected { reasons } => Ok(VerdictState::Rejected { reasons }),
        }
    }
}

/// The verdict's tag without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerdictStatus {
    Admissible,
    Ambiguous,
    Rejected,
}

impl fmt::Display for VerdictStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VerdictStatus::Admissible => write!(f, "admissible"),
            VerdictStatus::Ambiguous => write!(f, "ambiguous"),
            VerdictStatus::Rejected => write!(f, "rejected"),
        }
    }
}

impl VerdictState {
    /// Build an Ambiguous verdict. With no reasons given, a single reason
    /// listing the missing fields is synthesized so the list is never empty.
    pub fn ambiguous(missing_fields: Vec<FieldPath>, reasons: Vec<Reason>) -> Self {
        let reasons = if reasons.is_empty() {
            vec![Reason::missing_fields(&missing_fields)]
        } else {
            reasons
        };
        VerdictState::Ambiguous {
            missing_fields,
            reasons,
        }
    }

    pub fn status(&self) -> VerdictStatus {
        match self {
            VerdictState::Admissible { .. } => VerdictStatus::Admissible,
            VerdictState::Ambiguous { .. } => VerdictStatus::Ambiguous,
            VerdictState::Rejected { .. } => VerdictStatus::Rejected,
        }
    }

    pub fn is_admissible(&self) -> bool {
        matches!(self, VerdictState::Admissible { .. })
    }

    pub fn goal(&self) -> Option<&Goal> {
        match self {
            VerdictState::Admissible { goal } => Some(goal),
            _ => None,
        }
    }

    /// Reasons in order; empty for an admissible verdict.
    pub fn reasons(&self) -> &[Reason] {
        match self {
            VerdictState::Admissible { .. } => &[],
            VerdictState::Ambiguous { reasons, .. } | VerdictState::Rejected { reasons } => {
                reasons
            }
        }
    }

    pub fn missing_fields(&self) -> &[FieldPath] {
        match self {
            VerdictState::Ambiguous { missing_fields, .. } => missing_fields,
            _ => &[],
        }
    }

    /// Human labels for the "what's left" list.
    pub fn missing_labels(&self) -> Vec<&'static str> {
        self.missing_fields().iter().map(FieldPath::label).collect()
    }

    /// The inline error an input widget for `field` should show, if any.
    pub fn inline_error(&self, field: FieldPath) -> Option<&str> {
        self.reasons()
            .iter()
            .find(|reason| reason.applies_to(field))
            .map(Reason::display_message)
    }

    /// Reasons in their `"<field_path>: <message>"` wire form.
    pub fn reason_strings(&self) -> Vec<String> {
        self.reasons().iter().map(Reason::to_string).collect()
    }
}
