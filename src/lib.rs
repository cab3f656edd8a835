//! Static analysis of tuple- and equality-generating dependencies.
//!
//! A [`DependencySchema`] holds predicates and the TGDs/EGDs over them. On top
//! of it this crate offers most general unifiers ([`unify`]), homomorphism
//! search and three-valued equivalence ([`homomorphism`], [`equivalence`]),
//! extraction of functional dependencies from EGDs ([`fd`]), the TGD/FD
//! non-conflicting test ([`separability`]) and membership tests for the
//! linear, guarded, weakly guarded and sticky Datalog+/- languages
//! ([`languages`], [`sticky`]).

pub mod ast;
pub mod config;
pub mod debug;
pub mod dependency;
pub mod equivalence;
pub mod error;
pub mod fd;
pub mod homomorphism;
pub mod internalize;
pub mod lang_misc;
pub mod languages;
pub mod parse;
pub mod preprocess;
pub mod pretty;
pub mod schema;
pub mod separability;
pub mod sticky;
pub mod substitution;
pub mod text;
pub mod transform;
pub mod unify;
pub mod util;

#[cfg(test)]
pub mod test;

pub use config::{AnalysisConfig, DerivedPolicy, ANALYSIS_CONFIG};
pub use dependency::{Dependency, Egd, LogicConstraint, Tgd};
pub use equivalence::{Equivalence, EquivalenceAnalyzer};
pub use error::{AnalysisError, SchemaError};
pub use fd::{analyze_egds, EgdAnalysis, FunctionalDependency, FunctionalDependencyWithSources};
pub use homomorphism::{
    DerivedLiteralCriteria, HomomorphismFinder, RuleStructuralCriteria, SameNameCriteria,
};
pub use internalize::{clause_from_text, schema_from_text};
pub use languages::{affected_positions, is_guarded, is_linear, is_weakly_guarded, PredicatePosition};
pub use pretty::Pretty;
pub use schema::{DependencySchema, DerivationRule, Predicate, PredicateRef, SchemaBuilder};
pub use separability::{egds_are_non_conflicting, is_conflicting, is_conflicting_any};
pub use sticky::{is_sticky, sticky_marking, LiteralPosition};
pub use substitution::Substitution;
pub use text::Text;
pub use transform::{SplitHeads, Transform};
pub use unify::{are_unifiable, are_unifiable_atoms, unify_atoms, unify_literals};

#[derive(Hash, PartialOrd, Ord, Eq, PartialEq, Clone, Copy)]
pub struct Variable(pub Text);

#[derive(Hash, PartialOrd, Ord, Eq, PartialEq, Clone, Copy)]
pub struct Constant(pub Text);

#[derive(Hash, PartialOrd, Ord, Eq, PartialEq, Clone, Copy)]
pub enum Term {
    Variable(Variable),
    Constant(Constant),
}

#[derive(Hash, Eq, PartialEq, Clone, Copy, Debug)]
pub enum Comparison {
    Eq,
    Lt,
    Le,
    Gt,
    Ge,
    Ne,
}

#[derive(Hash, Eq, PartialEq, Clone, Copy)]
pub enum BuiltInOp {
    /// Binary comparison between two terms.
    Comparison(Comparison),
    /// `true` or `false`, without terms.
    Boolean(bool),
    /// A named operator with any number of terms.
    Custom(Text),
}

/// Built-in literal. Fields are private: constructors enforce the term count
/// of each operator.
#[derive(Hash, Eq, PartialEq, Clone)]
pub struct BuiltIn {
    op: BuiltInOp,
    terms: Vec<Term>,
}

/// A predicate applied to terms. Invariant: `terms.len() == predicate.arity()`.
#[derive(Hash, Eq, PartialEq, Clone)]
pub struct Atom {
    predicate: PredicateRef,
    terms: Vec<Term>,
}

#[derive(Hash, Eq, PartialEq, Clone)]
pub struct OrdinaryLiteral {
    pub atom: Atom,
    pub positive: bool,
}

#[derive(Hash, Eq, PartialEq, Clone)]
pub enum Literal {
    Ordinary(OrdinaryLiteral),
    BuiltIn(BuiltIn),
}

/// Non-empty, ordered conjunction of literals. Order carries no meaning but
/// keeps results reproducible.
#[derive(Hash, Eq, PartialEq, Clone)]
pub struct Clause {
    literals: Vec<Literal>,
}
