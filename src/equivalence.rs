//! Equivalence as a pair of homomorphisms.
//!
//! Homomorphisms both ways prove equivalence. The converse only holds for
//! conjunctive queries, so without them the answer is [`Equivalence::Unknown`],
//! never `NotEquivalent`.
use crate::config::AnalysisConfig;
use crate::dependency::LogicConstraint;
use crate::error::Result;
use crate::homomorphism::HomomorphismFinder;
use crate::schema::{DependencySchema, DerivationRule};
use crate::Literal;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Equivalence {
    Equivalent,
    NotEquivalent,
    /// Homomorphisms are missing, but that does not prove inequivalence.
    Unknown,
}

impl Equivalence {
    /// `Some(true)` / `Some(false)` when decided.
    pub fn decided(self) -> Option<bool> {
        match self {
            Self::Equivalent => Some(true),
            Self::NotEquivalent => Some(false),
            Self::Unknown => None,
        }
    }
}

#[derive(Clone, Copy)]
pub struct EquivalenceAnalyzer<'s> {
    finder: HomomorphismFinder<'s>,
}

impl<'s> EquivalenceAnalyzer<'s> {
    pub fn new(finder: HomomorphismFinder<'s>) -> Self {
        Self { finder }
    }
    pub fn from_config(schema: &'s DependencySchema, config: &AnalysisConfig) -> Self {
        Self::new(HomomorphismFinder::from_config(schema, config))
    }

    pub fn are_equivalent(&self, a: &[Literal], b: &[Literal]) -> Result<Equivalence> {
        let forward = self.finder.find(a, b)?.is_some();
        let backward = forward && self.finder.reversed().find(b, a)?.is_some();
        if forward && backward {
            return Ok(Equivalence::Equivalent);
        }
        let conjunctive = is_conjunctive_query(self.finder.domain(), a)
            && is_conjunctive_query(self.finder.range(), b);
        Ok(if conjunctive { Equivalence::NotEquivalent } else { Equivalence::Unknown })
    }

    pub fn are_equivalent_constraints(
        &self,
        a: &LogicConstraint,
        b: &LogicConstraint,
    ) -> Result<Equivalence> {
        self.are_equivalent(a.body().literals(), b.body().literals())
    }

    pub fn are_equivalent_rules(
        &self,
        a: &DerivationRule,
        b: &DerivationRule,
    ) -> Result<Equivalence> {
        let forward = self.finder.find_rule(a, b)?.is_some();
        let backward = forward && self.finder.reversed().find_rule(b, a)?.is_some();
        if forward && backward {
            return Ok(Equivalence::Equivalent);
        }
        let conjunctive = is_conjunctive_query(self.finder.domain(), a.body().literals())
            && is_conjunctive_query(self.finder.range(), b.body().literals());
        Ok(if conjunctive { Equivalence::NotEquivalent } else { Equivalence::Unknown })
    }
}

/// Positive ordinary literals over base predicates only.
fn is_conjunctive_query(schema: &DependencySchema, literals: &[Literal]) -> bool {
    literals.iter().all(|literal| match literal.as_positive_atom() {
        Some(atom) => schema.get(atom.predicate()).is_some_and(|p| !p.is_derived()),
        None => false,
    })
}
