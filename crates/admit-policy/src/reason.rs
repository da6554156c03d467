// reason.rs - Structured verdict reasons.
//
// Internally a reason is `{ field, message }`. On the wire it is the single
// string `"<field_path>: <message>"`, which is what existing editors parse to
// attach an inline error to the right input. Serde goes through `String` in
// both directions so the structured form never leaks into JSON.
//
// The string form is what round-trips, not the struct: a general reason whose
// message happens to start with a field path (`"description: ..."`) comes
// back attributed to that field.

use std::fmt;

use admit_goal::FieldPath;
use serde::{Deserialize, Serialize};

/// Why a draft is not admissible.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct Reason {
    /// The originating field, when the reason is about one field.
    pub field: Option<FieldPath>,
    /// Human-readable message, without the field prefix.
    pub message: String,
}

impl Reason {
    /// A reason attributed to one field.
    pub fn new(field: FieldPath, message: impl Into<String>) -> Self {
        Self {
            field: Some(field),
            message: message.into(),
        }
    }

    /// A reason not tied to any single field.
    pub fn general(message: impl Into<String>) -> Self {
        Self {
            field: None,
            message: message.into(),
        }
    }

    /// The synthesized reason used when only missing fields block admission.
    pub fn missing_fields(fields: &[FieldPath]) -> Self {
        let names: Vec<&str> = fields.iter().map(FieldPath::as_str).collect();
        Reason::general(format!("Missing required fields: {}", names.join(", ")))
    }

    /// Parse a wire string. The prefix before the first `:` is taken as the
    /// field only if it is a known field path; otherwise the whole string is
    /// the message.
    pub fn parse(s: &str) -> Self {
        if let Some((prefix, rest)) = s.split_once(':') {
            if let Some(field) = FieldPath::parse(prefix.trim()) {
                return Reason::new(field, rest.trim());
            }
        }
        Reason::general(s)
    }

    /// The message to show in a summary list (no field prefix).
    pub fn display_message(&self) -> &str {
        &self.message
    }

    /// Whether this reason should drive an inline error on `field`'s input.
    /// A reason on `resource_constraints` also belongs to each sub-control.
    pub fn applies_to(&self, field: FieldPath) -> bool {
        match self.field {
            Some(origin) => origin == field || origin == field.top_level(),
            None => false,
        }
    }
}

impl fmt::Display for Reason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.field {
            Some(field) => write!(f, "{}: {}", field, self.message),
            None => f.write_str(&self.message),
        }
    }
}

impl From<String> for Reason {
    fn from(s: String) -> Self {
        Reason::parse(&s)
    }
}

impl From<Reason> for String {
    fn from(reason: Reason) -> Self {
        reason.to_string()
    }
}
