// rules.rs - Declarative field rules.
//
// A Rule is one row of the validation table: which field it looks at, what
// check it runs, what severity a failure has, and the message it produces.
// Checks are deliberately small and typed by the value they inspect:
//
//   Text checks    - Blank, ShorterThan, VagueWithin, NoDigitWithin
//   Numeric checks - AtMost, Below, Above, Equals
//
// A check applied to a value of the other kind never fires. For
// `resource_constraints` the numeric value is the sum of the three budgets,
// available only when all three are present.

use std::fmt;

use admit_goal::{FieldPath, PartialGoal};
use serde::{Deserialize, Serialize};

/// What a failed rule means for the verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    /// The field is treated as not yet supplied.
    Missing,
    /// A quality problem: blocks admission, but the verdict stays Ambiguous.
    Soft,
    /// A hard violation: Rejected once nothing is missing.
    Hard,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Severity::Missing => "missing",
            Severity::Soft => "soft",
            Severity::Hard => "hard",
        };
        // `pad` so column widths like `{:<8}` apply.
        f.pad(name)
    }
}

/// The test a rule applies. A rule *fires* when its check returns true.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Check {
    /// Text is empty after trimming.
    Blank,
    /// Trimmed text has fewer than `chars` characters.
    ShorterThan { chars: usize },
    /// Trimmed text contains one of `words` (case-insensitive substring)
    /// and is shorter than `chars`. Long text is forgiven.
    VagueWithin { words: Vec<String>, chars: usize },
    /// Trimmed text contains no ASCII digit and is shorter than `chars`.
    NoDigitWithin { chars: usize },
    /// Number is ≤ `value`.
    AtMost { value: f64 },
    /// Number is < `value`.
    Below { value: f64 },
    /// Number is > `value`.
    Above { value: f64 },
    /// Number is exactly `value`.
    Equals { value: f64 },
}

/// A field value as seen by a check.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldValue<'a> {
    Text(&'a str),
    Number(f64),
    Flag(bool),
}

impl<'a> FieldValue<'a> {
    /// Read `field` out of a draft. `None` when the field is absent, when a
    /// number is not finite, or for `external_verification` when it is not a
    /// named verifier.
    pub fn of(draft: &'a PartialGoal, field: FieldPath) -> Option<FieldValue<'a>> {
        match field {
            FieldPath::Description => draft.description.as_deref().map(FieldValue::Text),
            FieldPath::ObservableReturn => {
                draft.observable_return.as_deref().map(FieldValue::Text)
            }
            FieldPath::ExternalVerification => {
                draft.external_verification.as_named().map(FieldValue::Text)
            }
            FieldPath::TimeHorizonDays => draft
                .time_horizon_days
                .map(|days| FieldValue::Number(days as f64)),
            FieldPath::Reversibility => draft.reversibility.map(FieldValue::Flag),
            FieldPath::ResourceConstraints => draft
                .resource_constraints
                .as_ref()
                .and_then(|budget| budget.total())
                .map(FieldValue::Number),
            FieldPath::ResourceTime | FieldPath::ResourceEnergy | FieldPath::ResourceAttention => {
                draft
                    .resource_constraints
                    .as_ref()
                    .and_then(|budget| budget.get(field))
                    .map(FieldValue::Number)
            }
        }
    }
}

impl Check {
    /// Whether the check fires for `value`.
    pub fn fires(&self, value: FieldValue<'_>) -> bool {
        match (self, value) {
            (Check::Blank, FieldValue::Text(text)) => text.trim().is_empty(),
            (Check::ShorterThan { chars }, FieldValue::Text(text)) => char_len(text) < *chars,
            (Check::VagueWithin { words, chars }, FieldValue::Text(text)) => {
                if char_len(text) >= *chars {
                    return false;
                }
                let lowered = text.trim().to_lowercase();
                words
                    .iter()
                    .any(|word| lowered.contains(word.to_lowercase().as_str()))
            }
            (Check::NoDigitWithin { chars }, FieldValue::Text(text)) => {
                char_len(text) < *chars && !text.chars().any(|c| c.is_ascii_digit())
            }
            (Check::AtMost { value }, FieldValue::Number(n)) => n <= *value,
            (Check::Below { value }, FieldValue::Number(n)) => n < *value,
            (Check::Above { value }, FieldValue::Number(n)) => n > *value,
            (Check::Equals { value }, FieldValue::Number(n)) => n == *value,
            _ => false,
        }
    }
}

fn char_len(text: &str) -> usize {
    text.trim().chars().count()
}

pub(crate) fn is_false(b: &bool) -> bool {
    !*b
}

/// One row of a rule set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rule {
    /// Stable identifier (e.g. "observable_return.vague"), shown in traces.
    pub id: String,
    pub field: FieldPath,
    pub severity: Severity,
    pub check: Check,
    /// Message without the field prefix.
    pub message: String,
    /// When set, a firing rule stops evaluation of later rules on the same field.
    #[serde(default, skip_serializing_if = "is_false")]
    pub halts: bool,
}

impl Rule {
    pub fn new(
        id: impl Into<String>,
        field: FieldPath,
        severity: Severity,
        check: Check,
        message: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            field,
            severity,
            check,
            message: message.into(),
            halts: false,
        }
    }

    /// Mark the rule as halting (see [`Rule::halts`]).
    pub fn halting(mut self) -> Self {
        self.halts = true;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use admit_goal::{PartialBudget, Verification};

    fn vague() -> Check {
        Check::VagueWithin {
            words: vec!["better".to_string(), "Nice".to_string()],
            chars: 30,
        }
    }

    #[test]
    fn blank_ignores_surrounding_whitespace() {
        assert!(Check::Blank.fires(FieldValue::Text("   \t")));
        assert!(!Check::Blank.fires(FieldValue::Text(" x ")));
    }

    #[test]
    fn shorter_than_counts_trimmed_characters() {
        let check = Check::ShorterThan { chars: 5 };
        assert!(check.fires(FieldValue::Text("  abcd  ")));
        assert!(!check.fires(FieldValue::Text("abcde")));
        // Multi-byte characters count once.
        assert!(!check.fires(FieldValue::Text("ééééé")));
    }

    #[test]
    fn vague_words_are_length_gated() {
        assert!(vague().fires(FieldValue::Text("get better")));
        assert!(vague().fires(FieldValue::Text("a NICE outcome")));
        assert!(!vague().fires(FieldValue::Text("get better at running 5km under 25 minutes")));
        assert!(!vague().fires(FieldValue::Text("run 5km")));
    }

    #[test]
    fn no_digit_within_threshold() {
        let check = Check::NoDigitWithin { chars: 40 };
        assert!(check.fires(FieldValue::Text("get better")));
        assert!(!check.fires(FieldValue::Text("run 5km")));
        assert!(!check.fires(FieldValue::Text(
            "a long description that has no numbers but is detailed"
        )));
    }

    #[test]
    fn numeric_checks() {
        assert!(Check::AtMost { value: 0.0 }.fires(FieldValue::Number(0.0)));
        assert!(!Check::AtMost { value: 0.0 }.fires(FieldValue::Number(1.0)));
        assert!(Check::Below { value: 0.0 }.fires(FieldValue::Number(-0.5)));
        assert!(Check::Above { value: 1000.0 }.fires(FieldValue::Number(1000.5)));
        assert!(!Check::Above { value: 1000.0 }.fires(FieldValue::Number(1000.0)));
        assert!(Check::Equals { value: 0.0 }.fires(FieldValue::Number(0.0)));
    }

    #[test]
    fn mismatched_value_kind_never_fires() {
        assert!(!Check::Blank.fires(FieldValue::Number(0.0)));
        assert!(!Check::Below { value: 0.0 }.fires(FieldValue::Text("-1")));
        assert!(!Check::Equals { value: 0.0 }.fires(FieldValue::Flag(false)));
    }

    #[test]
    fn field_value_reads_budget_total_and_sub_fields() {
        let draft = PartialGoal::new().with_resources(PartialBudget::new(1.0, 2.0, 3.0));
        assert_eq!(
            FieldValue::of(&draft, FieldPath::ResourceConstraints),
            Some(FieldValue::Number(6.0))
        );
        assert_eq!(
            FieldValue::of(&draft, FieldPath::ResourceEnergy),
            Some(FieldValue::Number(2.0))
        );
        assert_eq!(FieldValue::of(&draft, FieldPath::Description), None);
    }

    #[test]
    fn field_value_treats_non_finite_budget_as_absent() {
        let draft = PartialGoal::new().with_resources(PartialBudget::new(f64::NAN, 2.0, 3.0));
        assert_eq!(FieldValue::of(&draft, FieldPath::ResourceTime), None);
        assert_eq!(FieldValue::of(&draft, FieldPath::ResourceConstraints), None);
        assert_eq!(
            FieldValue::of(&draft, FieldPath::ResourceEnergy),
            Some(FieldValue::Number(2.0))
        );
    }

    #[test]
    fn field_value_skips_non_named_verification() {
        let draft = PartialGoal::new().with_verification(Verification::NotApplicable);
        assert_eq!(FieldValue::of(&draft, FieldPath::ExternalVerification), None);
        let draft = PartialGoal::new().with_verification(Verification::Named("QA".into()));
        assert_eq!(
            FieldValue::of(&draft, FieldPath::ExternalVerification),
            Some(FieldValue::Text("QA"))
        );
    }

    #[test]
    fn rule_json_shape() {
        let rule = Rule::new(
            "time_horizon_days.too_long",
            FieldPath::TimeHorizonDays,
            Severity::Hard,
            Check::Above { value: 36500.0 },
            "exceeds human planning horizon",
        );
        let json = serde_json::to_value(&rule).unwrap();
        assert_eq!(json["field"], "time_horizon_days");
        assert_eq!(json["severity"], "hard");
        assert_eq!(json["check"]["kind"], "above");
        assert!(json.get("halts").is_none());
    }
}
