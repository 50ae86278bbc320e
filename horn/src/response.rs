use crate::error::HornError;
use crate::term::Substitution;
use crate::HornResult;
use serde::Serialize;

/// Outcome of resolving one query
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Resolution {
    /// A fully ground chain resolved to a definite verdict
    Truth { value: bool },
    /// A non-ground resolution survived validation with candidate rows
    Bindings { bindings: BindingSet },
    /// A non-ground resolution failed, or validation emptied a candidate list
    Failure,
}

/// The validated candidate lists of a successful non-ground resolution
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BindingSet {
    pub substitutions: Vec<Substitution>,
}

impl BindingSet {
    pub fn new(substitutions: Vec<Substitution>) -> Self {
        BindingSet { substitutions }
    }

    pub fn is_empty(&self) -> bool {
        self.substitutions.is_empty()
    }
}

impl Resolution {
    /// True for a positive verdict or any surviving bindings
    pub fn is_success(&self) -> bool {
        match self {
            Resolution::Truth { value } => *value,
            Resolution::Bindings { .. } => true,
            Resolution::Failure => false,
        }
    }

    /// Serialize to a JSON string
    pub fn to_json(&self) -> HornResult<String> {
        serde_json::to_string(self)
            .map_err(|e| HornError::engine(format!("Serialization error: {}", e)))
    }
}
