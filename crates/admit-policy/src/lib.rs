//! # admit-policy
//!
//! Goal admissibility classifier.
//!
//! Maps a [`PartialGoal`](admit_goal::PartialGoal) draft to exactly one
//! [`VerdictState`]: admissible, ambiguous (something is missing or too vague),
//! or rejected (complete but invalid). Every non-admissible verdict carries at
//! least one [`Reason`].
//!
//! The rules live in a [`RuleSet`], a plain data table of field checks tagged
//! `missing`, `soft`, or `hard`. The `current` and `legacy` behaviors are two
//! configurations of one engine.
//!
//! ## Key invariants
//!
//! - **Missing beats rejected**: if any field is missing the verdict is
//!   Ambiguous, whatever hard rules also fired.
//! - **Hard beats soft**: a complete draft with a hard violation is Rejected,
//!   and the cosmetic soft reasons are dropped.
//! - **Pure**: same draft + same rule set → same verdict. No I/O, no clock.

pub mod engine;
pub mod error;
pub mod reason;
pub mod rules;
pub mod ruleset;
pub mod verdict;

pub use engine::{classify, classify_with_trace, ClassificationTrace, StepOutcome, TraceStep};
pub use error::PolicyError;
pub use reason::Reason;
pub use rules::{Check, Rule, Severity};
pub use ruleset::{RuleSet, RuleSetName};
pub use verdict::{VerdictState, VerdictStatus};
