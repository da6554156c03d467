// engine.rs - Classification engine.
//
// `RuleSet::classify()` walks the rule table once and sorts every firing rule
// into one of three buckets by severity, then decides:
//
// 1. Anything missing?   → Ambiguous (soft reasons, or a synthesized one;
//                          hard reasons too when the rule set keeps them)
// 2. Any hard violation? → Rejected (soft reasons are dropped)
// 3. Any soft reason?    → Ambiguous with no missing fields
// 4. Otherwise           → Admissible, with the draft promoted to a Goal
//
// Structural absence (a field not supplied at all) is always missing,
// whatever the rule set says. Once a field is missing, later rules on it are
// skipped, so a blank text doesn't also collect "too short" reasons.
//
// There is no I/O and no logging on this path: the same draft and rule set
// always give the same verdict.

use admit_goal::{FieldPath, PartialGoal};
use serde::{Deserialize, Serialize};

use crate::reason::Reason;
use crate::rules::{FieldValue, Rule, Severity};
use crate::ruleset::RuleSet;
use crate::verdict::VerdictState;

/// What happened to one rule during classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepOutcome {
    /// The check fired.
    Fired,
    /// The check ran and did not fire.
    Passed,
    /// The field was absent, already missing, or halted by an earlier rule.
    Skipped,
}

/// One evaluated rule.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TraceStep {
    pub rule: String,
    pub field: FieldPath,
    pub severity: Severity,
    pub outcome: StepOutcome,
}

/// The verdict together with every rule evaluation that produced it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassificationTrace {
    /// Name of the rule set used.
    pub ruleset: String,
    /// Fields that were structurally absent before any rule ran.
    pub absent: Vec<FieldPath>,
    /// Rule evaluations in table order.
    pub steps: Vec<TraceStep>,
    pub verdict: VerdictState,
}

impl ClassificationTrace {
    /// Ids of the rules that fired.
    pub fn fired(&self) -> impl Iterator<Item = &str> {
        self.steps
            .iter()
            .filter(|step| step.outcome == StepOutcome::Fired)
            .map(|step| step.rule.as_str())
    }
}

/// Classify a draft with the current rule set.
pub fn classify(draft: &PartialGoal) -> VerdictState {
    RuleSet::current().classify(draft)
}

/// Classify a draft with the current rule set, recording every rule evaluation.
pub fn classify_with_trace(draft: &PartialGoal) -> ClassificationTrace {
    RuleSet::current().classify_with_trace(draft)
}

impl RuleSet {
    /// Classify a draft against this rule set.
    pub fn classify(&self, draft: &PartialGoal) -> VerdictState {
        self.classify_with_trace(draft).verdict
    }

    /// Same as [`RuleSet::classify`], returning the full evaluation trace.
    pub fn classify_with_trace(&self, draft: &PartialGoal) -> ClassificationTrace {
        let absent = draft.absent_fields();
        let mut missing = absent.clone();
        let mut halted: Vec<FieldPath> = Vec::new();
        let mut soft = Vec::new();
        let mut hard = Vec::new();
        // Soft and hard reasons in table order.
        let mut flagged = Vec::new();
        let mut steps = Vec::with_capacity(self.rules.len());

        for rule in &self.rules {
            let blocked = missing.contains(&rule.field) || halted.contains(&rule.field);
            let value = if blocked {
                None
            } else {
                FieldValue::of(draft, rule.field)
            };

            let Some(value) = value else {
                steps.push(step(rule, StepOutcome::Skipped));
                continue;
            };
            if !rule.check.fires(value) {
                steps.push(step(rule, StepOutcome::Passed));
                continue;
            }

            steps.push(step(rule, StepOutcome::Fired));
            if rule.halts {
                halted.push(rule.field);
            }
            let reason = Reason::new(rule.field, rule.message.as_str());
            match rule.severity {
                Severity::Missing => {
                    missing.push(rule.field);
                    continue;
                }
                Severity::Soft => soft.push(reason.clone()),
                Severity::Hard => hard.push(reason.clone()),
            }
            flagged.push(reason);
        }

        missing.sort();
        missing.dedup();

        let missing_phase = if self.keep_hard_when_missing {
            flagged
        } else {
            soft.clone()
        };

        ClassificationTrace {
            ruleset: self.name.clone(),
            absent,
            steps,
            verdict: decide(draft, missing, missing_phase, soft, hard),
        }
    }
}

fn step(rule: &Rule, outcome: StepOutcome) -> TraceStep {
    TraceStep {
        rule: rule.id.clone(),
        field: rule.field,
        severity: rule.severity,
        outcome,
    }
}

fn decide(
    draft: &PartialGoal,
    missing: Vec<FieldPath>,
    missing_phase: Vec<Reason>,
    soft: Vec<Reason>,
    hard: Vec<Reason>,
) -> VerdictState {
    if !missing.is_empty() {
        return VerdictState::ambiguous(missing, missing_phase);
    }
    if !hard.is_empty() {
        return VerdictState::Rejected { reasons: hard };
    }
    if !soft.is_empty() {
        return VerdictState::ambiguous(Vec::new(), soft);
    }
    match draft.to_goal() {
        Some(goal) => VerdictState::Admissible { goal },
        // Unreachable while absent_fields() and to_goal() agree; stay total anyway.
        None => VerdictState::ambiguous(draft.absent_fields(), Vec::new()),
    }
}
