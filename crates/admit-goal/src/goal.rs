// goal.rs - Goal drafts and complete goals.
//
// A PartialGoal is what the editor holds while the user is still typing:
// every field is optional. A Goal is the total value that comes out of an
// admissible verdict. `PartialGoal::to_goal()` is the only way to promote a
// draft, and it succeeds exactly when `absent_fields()` is empty.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::field::FieldPath;

/// Who or what can independently confirm the outcome.
///
/// Three states, because "the user hasn't answered yet" and "the user said
/// nobody can verify this" mean different things to the classifier:
/// only `Unset` counts as missing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Verification {
    /// The field has not been touched (absent from the draft).
    #[default]
    Unset,
    /// Explicitly cleared: no external verifier applies (`null` on the wire).
    NotApplicable,
    /// A named verifier, e.g. "QA test suite report".
    Named(String),
}

impl Verification {
    /// Normalize raw editor text: blank input collapses to `NotApplicable`.
    pub fn from_editor(text: &str) -> Self {
        if text.trim().is_empty() {
            Verification::NotApplicable
        } else {
            Verification::Named(text.to_string())
        }
    }

    pub fn is_unset(&self) -> bool {
        matches!(self, Verification::Unset)
    }

    /// The named verifier text, if any.
    pub fn as_named(&self) -> Option<&str> {
        match self {
            Verification::Named(text) => Some(text),
            _ => None,
        }
    }
}

// Serde helpers: absent → Unset (via `#[serde(default)]`), null → NotApplicable,
// string → Named. Unset is skipped on output so it round-trips as "absent".
fn serialize_verification<S: Serializer>(v: &Verification, s: S) -> Result<S::Ok, S::Error> {
    match v {
        Verification::Named(text) => s.serialize_some(text),
        Verification::NotApplicable | Verification::Unset => s.serialize_none(),
    }
}

fn deserialize_verification<'de, D: Deserializer<'de>>(d: D) -> Result<Verification, D::Error> {
    Ok(match Option::<String>::deserialize(d)? {
        Some(text) => Verification::Named(text),
        None => Verification::NotApplicable,
    })
}

/// Resource budgets as entered in the draft; each sub-field may be absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PartialBudget {
    /// Hours.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<f64>,
    /// 0–100 scale.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub energy: Option<f64>,
    /// 0–100 scale.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attention: Option<f64>,
}

impl PartialBudget {
    /// A budget with all three sub-fields set.
    pub fn new(time: f64, energy: f64, attention: f64) -> Self {
        Self {
            time: Some(time),
            energy: Some(energy),
            attention: Some(attention),
        }
    }

    /// Sum of the three budgets, when all are present.
    pub fn total(&self) -> Option<f64> {
        Some(
            self.get(FieldPath::ResourceTime)?
                + self.get(FieldPath::ResourceEnergy)?
                + self.get(FieldPath::ResourceAttention)?,
        )
    }

    /// Look up a sub-field by its path. Non-budget paths return `None`, and
    /// so do NaN and infinite values: they read as not supplied.
    pub fn get(&self, field: FieldPath) -> Option<f64> {
        let value = match field {
            FieldPath::ResourceTime => self.time,
            FieldPath::ResourceEnergy => self.energy,
            FieldPath::ResourceAttention => self.attention,
            _ => None,
        };
        value.filter(|n| n.is_finite())
    }
}

/// A complete resource budget.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ResourceBudget {
    pub time: f64,
    pub energy: f64,
    pub attention: f64,
}

/// The editable goal draft. Every field is optional until validated.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PartialGoal {
    /// The intention / title.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// The measurable real-world change expected.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub observable_return: Option<String>,

    #[serde(
        default,
        serialize_with = "serialize_verification",
        deserialize_with = "deserialize_verification",
        skip_serializing_if = "Verification::is_unset"
    )]
    pub external_verification: Verification,

    /// Planning window in days.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_horizon_days: Option<i64>,

    /// Whether the effects can be undone.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reversibility: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource_constraints: Option<PartialBudget>,
}

impl PartialGoal {
    /// An empty draft, as the editor creates it.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_description(mut self, text: impl Into<String>) -> Self {
        self.description = Some(text.into());
        self
    }

    pub fn with_observable_return(mut self, text: impl Into<String>) -> Self {
        self.observable_return = Some(text.into());
        self
    }

    pub fn with_verification(mut self, verification: Verification) -> Self {
        self.external_verification = verification;
        self
    }

    pub fn with_time_horizon_days(mut self, days: i64) -> Self {
        self.time_horizon_days = Some(days);
        self
    }

    pub fn with_reversibility(mut self, reversible: bool) -> Self {
        self.reversibility = Some(reversible);
        self
    }

    pub fn with_resources(mut self, budget: PartialBudget) -> Self {
        self.resource_constraints = Some(budget);
        self
    }

    /// Fields that are structurally absent, in declaration order.
    ///
    /// A missing budget object reports `resource_constraints`; a present
    /// object with gaps reports the individual sub-field paths instead.
    pub fn absent_fields(&self) -> Vec<FieldPath> {
        let mut absent = Vec::new();
        if self.description.is_none() {
            absent.push(FieldPath::Description);
        }
        if self.observable_return.is_none() {
            absent.push(FieldPath::ObservableReturn);
        }
        if self.external_verification.is_unset() {
            absent.push(FieldPath::ExternalVerification);
        }
        if self.time_horizon_days.is_none() {
            absent.push(FieldPath::TimeHorizonDays);
        }
        if self.reversibility.is_none() {
            absent.push(FieldPath::Reversibility);
        }
        match &self.resource_constraints {
            None => absent.push(FieldPath::ResourceConstraints),
            Some(budget) => {
                for sub in [
                    FieldPath::ResourceTime,
                    FieldPath::ResourceEnergy,
                    FieldPath::ResourceAttention,
                ] {
                    if budget.get(sub).is_none() {
                        absent.push(sub);
                    }
                }
            }
        }
        absent
    }

    /// Promote the draft to a complete goal. `None` if any field is absent.
    pub fn to_goal(&self) -> Option<Goal> {
        let budget = self.resource_constraints.as_ref()?;
        let external_verification = match &self.external_verification {
            Verification::Unset => return None,
            Verification::NotApplicable => None,
            Verification::Named(text) => Some(text.clone()),
        };
        Some(Goal {
            description: self.description.clone()?,
            observable_return: self.observable_return.clone()?,
            external_verification,
            time_horizon_days: self.time_horizon_days?,
            reversibility: self.reversibility?,
            resource_constraints: ResourceBudget {
                time: budget.get(FieldPath::ResourceTime)?,
                energy: budget.get(FieldPath::ResourceEnergy)?,
                attention: budget.get(FieldPath::ResourceAttention)?,
            },
        })
    }
}

/// A fully-populated goal: every optional draft field resolved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Goal {
    pub description: String,
    pub observable_return: String,
    /// `None` when no external verifier applies.
    pub external_verification: Option<String>,
    pub time_horizon_days: i64,
    pub reversibility: bool,
    pub resource_constraints: ResourceBudget,
}

impl From<Goal> for PartialGoal {
    fn from(goal: Goal) -> Self {
        PartialGoal {
            description: Some(goal.description),
            observable_return: Some(goal.observable_return),
            external_verification: match goal.external_verification {
                Some(text) => Verification::Named(text),
                None => Verification::NotApplicable,
            },
            time_horizon_days: Some(goal.time_horizon_days),
            reversibility: Some(goal.reversibility),
            resource_constraints: Some(PartialBudget::new(
                goal.resource_constraints.time,
                goal.resource_constraints.energy,
                goal.resource_constraints.attention,
            )),
        }
    }
}
