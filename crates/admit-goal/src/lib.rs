//! # admit-goal
//!
//! Goal data model for the admissibility classifier.
//!
//! A user edits a [`PartialGoal`] field by field; every field is optional
//! until the classifier promotes the draft to a complete [`Goal`].
//!
//! ## Key components
//!
//! - [`PartialGoal`] - the editable draft (all fields optional)
//! - [`Goal`] - the fully-populated value carried by an admissible verdict
//! - [`Verification`] - tri-state external verification (unset / not applicable / named)
//! - [`FieldPath`] - dotted identifiers used to attribute missing fields and reasons
//! - [`draft`] - loading drafts from JSON or YAML, tolerating wrongly-typed values

pub mod draft;
pub mod error;
pub mod field;
pub mod goal;

pub use draft::{from_value, load_draft, parse_draft, DraftFormat};
pub use error::DraftError;
pub use field::FieldPath;
pub use goal::{Goal, PartialBudget, PartialGoal, ResourceBudget, Verification};
