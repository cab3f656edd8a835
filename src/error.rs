use crate::text::Text;
use thiserror::Error;

/// Raised while building literals, dependencies and schemas. A schema that
/// fails any of these checks is never observable.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SchemaError {
    #[error("clause body must contain at least one literal")]
    EmptyBody,

    #[error("tgd head must contain at least one atom")]
    EmptyHead,

    #[error("predicate `{name}` is declared twice")]
    DuplicatePredicate { name: Text },

    /// A dependency or derivation rule refers to a predicate handle that was
    /// not issued by this schema's builder.
    #[error("predicate #{index}/{arity} does not belong to this schema")]
    PredicateOutsideSchema { index: usize, arity: usize },

    #[error("predicate `{name}` is not declared")]
    UnknownPredicate { name: Text },

    #[error("expected {expected} terms, found {found}")]
    ArityMismatch { expected: usize, found: usize },

    #[error("built-in `{op}` takes {expected} terms, found {found}")]
    BuiltInArity { op: String, expected: usize, found: usize },

    #[error("parse error: {0}")]
    Parse(String),
}

/// Raised by analyses that cannot decide their question for the given input.
/// This is distinct from a negative answer.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AnalysisError {
    /// Language checks are defined only over positive atomic bodies.
    #[error("unsupported analysis: {0}")]
    Unsupported(&'static str),

    /// Homomorphisms are only defined over base literals unless a derived
    /// literal criteria is supplied.
    #[error("derived literal over `{predicate}` met without a derived literal criteria")]
    DerivedLiteralWithoutCriteria { predicate: Text },

    #[error("predicate #{index} is not part of the analysed schema")]
    ForeignPredicate { index: usize },
}

pub type Result<T, E = AnalysisError> = std::result::Result<T, E>;
