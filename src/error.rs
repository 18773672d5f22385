use thiserror::Error;

use crate::variable::VariableKind;

#[derive(Clone, Debug, Error, PartialEq)]
pub enum FuzzyError {
    #[error("invalid membership function: {reason}")]
    InvalidShape { reason: String },

    #[error("invalid universe: {reason}")]
    InvalidUniverse { reason: String },

    #[error("term `{term}` already defined on variable `{variable}`")]
    DuplicateTerm { variable: String, term: String },

    #[error("variable `{variable}` has no term `{term}`")]
    UnknownTerm { variable: String, term: String },

    #[error("no variable named `{name}`")]
    UnknownVariable { name: String },

    #[error("variable handle is not registered with this {registry}")]
    UnregisteredVariable { registry: &'static str },

    #[error("variable `{name}` already defined")]
    DuplicateVariable { name: String },

    #[error("variable `{variable}` cannot be used here, expected kind: {expected}")]
    WrongKind { variable: String, expected: VariableKind },

    #[error("rule weight {weight} is outside (0, 1]")]
    InvalidWeight { weight: f64 },

    #[error("input {value} for `{variable}` is outside its universe [{min}, {max}]")]
    OutOfDomain {
        variable: String,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("inputs were created by a different inference engine")]
    ForeignInputs,

    #[error("no input bound for antecedent `{variable}`")]
    MissingInput { variable: String },

    #[error("no rule contributed to `{variable}`, output is undefined")]
    UndefinedOutput { variable: String },
}

pub type Result<T, E = FuzzyError> = std::result::Result<T, E>;

impl FuzzyError {
    pub(crate) fn shape(reason: impl Into<String>) -> Self {
        FuzzyError::InvalidShape { reason: reason.into() }
    }

    pub(crate) fn universe(reason: impl Into<String>) -> Self {
        FuzzyError::InvalidUniverse { reason: reason.into() }
    }
}
