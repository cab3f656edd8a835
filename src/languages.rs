//! Membership in the linear, guarded and weakly guarded Datalog+/- languages.
//!
//! Each check first rejects schemas whose dependency bodies hold negated or
//! built-in literals (the languages are only defined over positive atomic
//! bodies), then requires the EGDs to be non-conflicting with the TGDs, and
//! only then looks at the shape of the TGDs.
use crate::dependency::Tgd;
use crate::error::{AnalysisError, Result};
use crate::schema::{DependencySchema, PredicateRef};
use crate::separability::egds_are_non_conflicting;
use crate::util::VecSet;
use crate::{Literal, Variable};

/// Argument `index` of `predicate`.
#[derive(Hash, PartialOrd, Ord, Eq, PartialEq, Clone, Copy, Debug)]
pub struct PredicatePosition {
    pub predicate: PredicateRef,
    pub index: usize,
}

/// Errors on negated or built-in body literals.
pub(crate) fn check_supported(schema: &DependencySchema) -> Result<()> {
    for dependency in schema.dependencies() {
        for literal in dependency.body() {
            match literal {
                Literal::Ordinary(o) if o.positive => {}
                Literal::Ordinary(_) => {
                    return Err(AnalysisError::Unsupported("negated literal in dependency body"))
                }
                Literal::BuiltIn(_) => {
                    return Err(AnalysisError::Unsupported("built-in literal in dependency body"))
                }
            }
        }
    }
    Ok(())
}

/// Errors like `check_supported`; otherwise true iff the EGDs are
/// non-conflicting.
pub(crate) fn preamble(schema: &DependencySchema) -> Result<bool> {
    check_supported(schema)?;
    Ok(egds_are_non_conflicting(schema))
}

pub fn is_linear(schema: &DependencySchema) -> Result<bool> {
    let verdict = preamble(schema)? && schema.tgds().all(Tgd::is_linear);
    tracing::debug!(verdict, "linear");
    Ok(verdict)
}

pub fn is_guarded(schema: &DependencySchema) -> Result<bool> {
    let verdict = preamble(schema)? && schema.tgds().all(Tgd::is_guarded);
    tracing::debug!(verdict, "guarded");
    Ok(verdict)
}

pub fn is_weakly_guarded(schema: &DependencySchema) -> Result<bool> {
    if !preamble(schema)? {
        tracing::debug!(verdict = false, "weakly guarded");
        return Ok(false);
    }
    let affected = affected_positions(schema)?;
    let verdict = schema.tgds().all(|tgd| {
        let needed: VecSet<Variable> = affected_variables(tgd, &affected);
        tgd.body().literals().iter().any(|literal| {
            let covered: VecSet<Variable> = literal.variables().collect();
            covered.is_superset(&needed)
        })
    });
    tracing::debug!(verdict, affected = affected.len(), "weakly guarded");
    Ok(verdict)
}

/// Positions that may hold a value invented by an existential variable.
///
/// Least fixpoint: head positions of existential variables, plus head
/// positions of frontier variables whose every body occurrence is affected.
pub fn affected_positions(schema: &DependencySchema) -> Result<VecSet<PredicatePosition>> {
    check_supported(schema)?;
    let tgds: Vec<&Tgd> = schema.tgds().collect();

    let mut affected = VecSet::default();
    for tgd in &tgds {
        let existential = tgd.existential_variables();
        affected.extend(head_positions(tgd, |v| existential.contains(&v)));
    }

    let mut round = 0;
    loop {
        round += 1;
        let before = affected.len();
        for tgd in &tgds {
            let propagated = affected_variables(tgd, &affected);
            let frontier = tgd.frontier_variables();
            let new: Vec<_> = head_positions(tgd, |v| frontier.contains(&v) && propagated.contains(&v));
            affected.extend(new);
        }
        tracing::trace!(round, size = affected.len(), "affected positions");
        if affected.len() == before {
            return Ok(affected);
        }
    }
}

/// Universal variables of `tgd` occurring only at affected body positions.
fn affected_variables(tgd: &Tgd, affected: &VecSet<PredicatePosition>) -> VecSet<Variable> {
    tgd.universal_variables()
        .iter()
        .copied()
        .filter(|&v| {
            tgd.body().literals().iter().filter_map(Literal::as_positive_atom).all(|atom| {
                atom.terms().iter().enumerate().all(|(index, term)| {
                    term.as_variable() != Some(v)
                        || affected.contains(&PredicatePosition { predicate: atom.predicate(), index })
                })
            })
        })
        .collect()
}

fn head_positions(tgd: &Tgd, wanted: impl Fn(Variable) -> bool) -> Vec<PredicatePosition> {
    let mut out = vec![];
    for atom in tgd.head() {
        for (index, term) in atom.terms().iter().enumerate() {
            if term.as_variable().is_some_and(&wanted) {
                out.push(PredicatePosition { predicate: atom.predicate(), index });
            }
        }
    }
    out
}
