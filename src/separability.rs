//! Non-conflicting TGDs and functional dependencies.
//!
//! A TGD conflicts with a functional dependency when firing it may produce
//! tuples that violate the dependency, so that the two cannot be reasoned
//! about separately.
use crate::dependency::Tgd;
use crate::fd::{analyze_egds, FunctionalDependency};
use crate::schema::DependencySchema;
use crate::{Term, Variable};
use std::collections::HashMap;

pub fn is_conflicting(tgd: &Tgd, fd: &FunctionalDependency) -> bool {
    let existential = tgd.existential_variables();
    let universal = tgd.universal_variables();
    let on_fd: Vec<_> = tgd.head().iter().filter(|a| a.predicate() == fd.predicate()).collect();

    if on_fd.len() > 1 {
        // an existential shared between head positions ties the generated tuples together
        let mut occurrences = HashMap::<Variable, usize>::new();
        for atom in tgd.head() {
            for v in atom.variables().filter(|v| existential.contains(v)) {
                *occurrences.entry(v).or_default() += 1;
            }
        }
        if occurrences.values().any(|&n| n > 1) {
            return true;
        }
    }

    on_fd.iter().any(|atom| {
        let mut seen_existentials = Vec::new();
        atom.terms().iter().enumerate().any(|(position, term)| match term {
            Term::Constant(_) => true,
            Term::Variable(v) if existential.contains(v) => {
                if seen_existentials.contains(v) {
                    return true;
                }
                seen_existentials.push(*v);
                false
            }
            Term::Variable(v) => universal.contains(v) && !fd.key().contains(&position),
        })
    })
}

pub fn is_conflicting_any(tgds: &[Tgd], fds: &[FunctionalDependency]) -> bool {
    tgds.iter().any(|tgd| fds.iter().any(|fd| is_conflicting(tgd, fd)))
}

/// True iff every EGD of the schema encodes a key dependency and no TGD
/// conflicts with any of them. Anything else is reported as conflicting.
pub fn egds_are_non_conflicting(schema: &DependencySchema) -> bool {
    let analysis = analyze_egds(schema.egds());
    if !analysis.other.is_empty() {
        tracing::debug!(non_functional = analysis.other.len(), "egds are not all functional");
        return false;
    }
    let fds: Vec<FunctionalDependency> = analysis.functional.into_iter().map(|f| f.fd).collect();
    if let Some(fd) = fds.iter().find(|fd| !fd.is_key_dependency()) {
        tracing::debug!(?fd, "functional dependency is not a key");
        return false;
    }
    let tgds: Vec<Tgd> = schema.tgds().cloned().collect();
    !is_conflicting_any(&tgds, &fds)
}
