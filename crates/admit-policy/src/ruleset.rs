// ruleset.rs - Named rule tables and rule-set loading.
//
// Two builtin tables exist:
//
//   current - quality problems in the observable return are soft (Ambiguous),
//             a non-positive horizon and an all-zero budget read as missing.
//   legacy  - the earlier behavior: vagueness, short text, a non-positive
//             horizon and an all-zero budget are hard rejections, and a named
//             external verifier must be at least 10 characters. Hard reasons
//             stay on the verdict while other fields are still missing.
//
// Rule sets are plain serde data, so a project can also ship its own table
// as TOML or YAML and select it by path.

use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;

use admit_goal::FieldPath;
use serde::{Deserialize, Serialize};

use crate::error::PolicyError;
use crate::rules::{is_false, Check, Rule, Severity};

/// Words that make a short observable return too vague to verify.
pub const VAGUE_WORDS: [&str; 5] = ["something", "better", "improve", "good", "nice"];

/// 100 years, in days.
pub const MAX_HORIZON_DAYS: f64 = 36500.0;

/// Upper bound on time + energy + attention.
pub const MAX_RESOURCE_TOTAL: f64 = 1000.0;

const BUDGET_FIELDS: [(FieldPath, &str); 3] = [
    (FieldPath::ResourceTime, "time"),
    (FieldPath::ResourceEnergy, "energy"),
    (FieldPath::ResourceAttention, "attention"),
];

/// Builtin rule-set names.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleSetName {
    #[default]
    Current,
    Legacy,
}

impl fmt::Display for RuleSetName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuleSetName::Current => write!(f, "current"),
            RuleSetName::Legacy => write!(f, "legacy"),
        }
    }
}

impl FromStr for RuleSetName {
    type Err = PolicyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "current" => Ok(RuleSetName::Current),
            "legacy" => Ok(RuleSetName::Legacy),
            other => Err(PolicyError::UnknownRuleSet {
                name: other.to_string(),
            }),
        }
    }
}

/// An ordered table of rules. Order matters only within a field: a rule
/// that marks its field missing, or that halts, hides later rules on it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleSet {
    pub name: String,
    #[serde(default)]
    pub rules: Vec<Rule>,
    /// While fields are missing, report hard reasons on the Ambiguous
    /// verdict instead of dropping them.
    #[serde(default, skip_serializing_if = "is_false")]
    pub keep_hard_when_missing: bool,
}

impl Default for RuleSet {
    fn default() -> Self {
        RuleSet::current()
    }
}

impl RuleSet {
    /// The current rule table.
    pub fn current() -> Self {
        let mut rules = vec![
            Rule::new(
                "description.blank",
                FieldPath::Description,
                Severity::Missing,
                Check::Blank,
                "is blank",
            ),
            Rule::new(
                "observable_return.blank",
                FieldPath::ObservableReturn,
                Severity::Missing,
                Check::Blank,
                "is blank",
            ),
            Rule::new(
                "observable_return.too_short",
                FieldPath::ObservableReturn,
                Severity::Soft,
                Check::ShorterThan { chars: 15 },
                "make it specific enough to verify (at least 15 characters)",
            ),
            Rule::new(
                "observable_return.vague",
                FieldPath::ObservableReturn,
                Severity::Soft,
                Check::VagueWithin {
                    words: vague_words(),
                    chars: 30,
                },
                "avoid vague words - say what changes in reality",
            ),
            Rule::new(
                "observable_return.unmeasurable",
                FieldPath::ObservableReturn,
                Severity::Soft,
                Check::NoDigitWithin { chars: 40 },
                "include a measurable indicator (a number, date, or count)",
            ),
            Rule::new(
                "time_horizon_days.non_positive",
                FieldPath::TimeHorizonDays,
                Severity::Missing,
                Check::AtMost { value: 0.0 },
                "must be a positive number of days",
            ),
            Rule::new(
                "time_horizon_days.too_long",
                FieldPath::TimeHorizonDays,
                Severity::Hard,
                Check::Above {
                    value: MAX_HORIZON_DAYS,
                },
                "exceeds human planning horizon (more than 100 years)",
            ),
        ];
        rules.extend(negative_budget_rules());
        rules.push(Rule::new(
            "resource_constraints.zero_total",
            FieldPath::ResourceConstraints,
            Severity::Missing,
            Check::Equals { value: 0.0 },
            "not yet estimated",
        ));
        rules.push(excessive_total_rule("unreasonably high total (more than 1000)"));

        RuleSet {
            name: RuleSetName::Current.to_string(),
            rules,
            keep_hard_when_missing: false,
        }
    }

    /// The earlier, stricter rule table.
    pub fn legacy() -> Self {
        let mut rules = vec![
            Rule::new(
                "description.blank",
                FieldPath::Description,
                Severity::Missing,
                Check::Blank,
                "is blank",
            ),
            Rule::new(
                "observable_return.blank",
                FieldPath::ObservableReturn,
                Severity::Missing,
                Check::Blank,
                "is blank",
            ),
            Rule::new(
                "observable_return.too_short",
                FieldPath::ObservableReturn,
                Severity::Hard,
                Check::ShorterThan { chars: 10 },
                "must be specific and measurable (at least 10 characters)",
            ),
            Rule::new(
                "observable_return.vague",
                FieldPath::ObservableReturn,
                Severity::Hard,
                Check::VagueWithin {
                    words: vague_words(),
                    chars: 30,
                },
                "is too vague - be more specific about what changes in reality",
            ),
            Rule::new(
                "external_verification.blank",
                FieldPath::ExternalVerification,
                Severity::Hard,
                Check::Blank,
                "cannot be an empty string - use null if not applicable",
            )
            .halting(),
            Rule::new(
                "external_verification.too_short",
                FieldPath::ExternalVerification,
                Severity::Hard,
                Check::ShorterThan { chars: 10 },
                "must clearly specify who or what can verify this externally",
            ),
            Rule::new(
                "time_horizon_days.non_positive",
                FieldPath::TimeHorizonDays,
                Severity::Hard,
                Check::AtMost { value: 0.0 },
                "must be greater than 0",
            ),
            Rule::new(
                "time_horizon_days.too_long",
                FieldPath::TimeHorizonDays,
                Severity::Hard,
                Check::Above {
                    value: MAX_HORIZON_DAYS,
                },
                "is unrealistic (more than 100 years)",
            ),
        ];
        rules.extend(negative_budget_rules());
        rules.push(Rule::new(
            "resource_constraints.zero_total",
            FieldPath::ResourceConstraints,
            Severity::Hard,
            Check::Equals { value: 0.0 },
            "must have at least one non-zero value",
        ));
        rules.push(excessive_total_rule(
            "sum is unreasonably high (total > 1000)",
        ));

        RuleSet {
            name: RuleSetName::Legacy.to_string(),
            rules,
            keep_hard_when_missing: true,
        }
    }

    pub fn builtin(name: RuleSetName) -> Self {
        match name {
            RuleSetName::Current => RuleSet::current(),
            RuleSetName::Legacy => RuleSet::legacy(),
        }
    }

    /// Load a rule set from a `.toml`, `.yaml`, or `.yml` file.
    pub fn load(path: &Path) -> Result<Self, PolicyError> {
        let text = fs::read_to_string(path).map_err(|source| PolicyError::IoError {
            path: path.display().to_string(),
            source,
        })?;
        let ruleset: RuleSet = match path.extension().and_then(|ext| ext.to_str()) {
            Some("yaml") | Some("yml") => serde_yaml::from_str(&text)?,
            _ => toml::from_str(&text)?,
        };
        tracing::debug!(
            path = %path.display(),
            name = %ruleset.name,
            rules = ruleset.rules.len(),
            "loaded rule set"
        );
        Ok(ruleset)
    }

    /// Resolve a builtin name (`current`, `legacy`) or a path to a rule-set file.
    pub fn resolve(spec: &str) -> Result<Self, PolicyError> {
        if let Ok(name) = spec.parse::<RuleSetName>() {
            return Ok(RuleSet::builtin(name));
        }
        let path = Path::new(spec);
        if path.is_file() {
            return RuleSet::load(path);
        }
        Err(PolicyError::UnknownRuleSet {
            name: spec.to_string(),
        })
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Rules that inspect `field`, in table order.
    pub fn rules_for(&self, field: FieldPath) -> impl Iterator<Item = &Rule> {
        self.rules.iter().filter(move |rule| rule.field == field)
    }
}

fn vague_words() -> Vec<String> {
    VAGUE_WORDS.iter().map(|w| w.to_string()).collect()
}

fn negative_budget_rules() -> Vec<Rule> {
    BUDGET_FIELDS
        .iter()
        .map(|(field, name)| {
            Rule::new(
                format!("resource_constraints.{}.negative", name),
                *field,
                Severity::Hard,
                Check::Below { value: 0.0 },
                "cannot be negative",
            )
        })
        .collect()
}

fn excessive_total_rule(message: &str) -> Rule {
    Rule::new(
        "resource_constraints.excessive_total",
        FieldPath::ResourceConstraints,
        Severity::Hard,
        Check::Above {
            value: MAX_RESOURCE_TOTAL,
        },
        message,
    )
}
