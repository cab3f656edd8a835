//! Functional dependencies hidden in EGDs.
//!
//! `P(k, x), P(k, y) -> x = y` says that position 0 of `P` determines
//! position 1. EGDs of that shape are turned into [`FunctionalDependency`]s;
//! EGDs over the same predicate and key accumulate into one.
use crate::dependency::Egd;
use crate::schema::PredicateRef;
use crate::{Atom, Term, Variable};
use std::collections::{BTreeSet, HashSet};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionalDependency {
    predicate: PredicateRef,
    key: BTreeSet<usize>,
    determined: BTreeSet<usize>,
}

impl FunctionalDependency {
    /// `None` unless the two position sets are disjoint and within the arity.
    pub fn new(
        predicate: PredicateRef,
        key: impl IntoIterator<Item = usize>,
        determined: impl IntoIterator<Item = usize>,
    ) -> Option<Self> {
        let key: BTreeSet<usize> = key.into_iter().collect();
        let determined: BTreeSet<usize> = determined.into_iter().collect();
        let in_range = key.iter().chain(&determined).all(|&p| p < predicate.arity());
        if !in_range || !key.is_disjoint(&determined) {
            return None;
        }
        Some(Self { predicate, key, determined })
    }
    pub fn predicate(&self) -> PredicateRef {
        self.predicate
    }
    pub fn key(&self) -> &BTreeSet<usize> {
        &self.key
    }
    pub fn determined(&self) -> &BTreeSet<usize> {
        &self.determined
    }
    /// Key and determined positions together cover the whole predicate.
    pub fn is_key_dependency(&self) -> bool {
        self.key.len() + self.determined.len() == self.predicate.arity()
    }
}

#[derive(Debug, Clone)]
pub struct FunctionalDependencyWithSources {
    pub fd: FunctionalDependency,
    pub sources: Vec<Egd>,
}

#[derive(Debug, Clone, Default)]
pub struct EgdAnalysis {
    pub functional: Vec<FunctionalDependencyWithSources>,
    /// EGDs that do not encode a functional dependency, unchanged.
    pub other: Vec<Egd>,
}

pub fn analyze_egds<'a>(egds: impl IntoIterator<Item = &'a Egd>) -> EgdAnalysis {
    let mut analysis = EgdAnalysis::default();
    for egd in egds {
        let Some((predicate, key, determined)) = functional_shape(egd) else {
            analysis.other.push(egd.clone());
            continue;
        };
        let existing = analysis
            .functional
            .iter_mut()
            .find(|f| f.fd.predicate == predicate && f.fd.key == key);
        match existing {
            Some(f) => {
                f.fd.determined.insert(determined);
                f.sources.push(egd.clone());
            }
            None => analysis.functional.push(FunctionalDependencyWithSources {
                fd: FunctionalDependency { predicate, key, determined: [determined].into() },
                sources: vec![egd.clone()],
            }),
        }
    }
    tracing::debug!(
        functional = analysis.functional.len(),
        other = analysis.other.len(),
        "analysed egds"
    );
    analysis
}

/// Predicate, key positions and determined position, if `egd` has the shape
/// of a functional dependency.
fn functional_shape(egd: &Egd) -> Option<(PredicateRef, BTreeSet<usize>, usize)> {
    let [first, second] = egd.body().literals() else {
        return None;
    };
    let (a, b) = (first.as_positive_atom()?, second.as_positive_atom()?);
    if a.predicate() != b.predicate() {
        return None;
    }
    let (a_vars, b_vars) = (distinct_variables(a)?, distinct_variables(b)?);

    // shared variables sit at the same position in both literals: the key
    let mut key = BTreeSet::new();
    for (i, v) in a_vars.iter().enumerate() {
        match b_vars.iter().position(|w| w == v) {
            Some(j) if j == i => {
                key.insert(i);
            }
            Some(_) => return None,
            None => {}
        }
    }
    if key.is_empty() {
        return None;
    }

    let (left, right) = (egd.left().as_variable()?, egd.right().as_variable()?);
    let determined = a_vars.iter().position(|&v| v == left);
    let same_position = match determined {
        Some(i) => b_vars[i] == right,
        None => {
            // head written the other way round: `left` lives in the second literal
            let i = b_vars.iter().position(|&v| v == left)?;
            a_vars[i] == right
        }
    };
    let position = determined.or_else(|| b_vars.iter().position(|&v| v == left))?;
    if !same_position || key.contains(&position) {
        return None;
    }
    Some((a.predicate(), key, position))
}

/// The atom's variables, if its terms are pairwise-distinct variables.
fn distinct_variables(atom: &Atom) -> Option<Vec<Variable>> {
    let mut seen = HashSet::new();
    atom.terms()
        .iter()
        .map(|t| match t {
            Term::Variable(v) if seen.insert(*v) => Some(*v),
            _ => None,
        })
        .collect()
}
