//! Sticky TGD sets.
//!
//! The marking procedure flags body positions whose variable may get lost
//! when a TGD fires, then propagates the flags backwards through the TGDs
//! whose heads feed a flagged predicate position. A set of TGDs is sticky iff
//! no TGD repeats a variable over its flagged body positions.
use crate::dependency::Tgd;
use crate::error::{AnalysisError, Result};
use crate::languages::preamble;
use crate::schema::{DependencySchema, PredicateRef};
use crate::util::VecSet;
use crate::{Literal, Variable};
use std::collections::{HashMap, HashSet};

/// Position `index` of body literal `literal` of TGD `tgd` (indices into the
/// analysed TGD list), which is an atom over `predicate`.
#[derive(Hash, PartialOrd, Ord, Eq, PartialEq, Clone, Copy, Debug)]
pub struct LiteralPosition {
    pub tgd: usize,
    pub literal: usize,
    pub index: usize,
    pub predicate: PredicateRef,
}

pub fn is_sticky(schema: &DependencySchema) -> Result<bool> {
    if !preamble(schema)? {
        tracing::debug!(verdict = false, "sticky");
        return Ok(false);
    }
    let tgds: Vec<Tgd> = schema.tgds().cloned().collect();
    let marking = sticky_marking(&tgds)?;

    let mut counts = HashMap::<(usize, Variable), usize>::new();
    for position in &marking {
        let term = position.literal_in(&tgds).and_then(|l| l.terms().get(position.index));
        if let Some(v) = term.and_then(|t| t.as_variable()) {
            *counts.entry((position.tgd, v)).or_default() += 1;
        }
    }
    let verdict = counts.values().all(|&n| n <= 1);
    tracing::debug!(verdict, marked = marking.len(), "sticky");
    Ok(verdict)
}

/// Least fixpoint of the sticky marking over `tgds`.
pub fn sticky_marking(tgds: &[Tgd]) -> Result<VecSet<LiteralPosition>> {
    for tgd in tgds {
        if tgd.body().literals().iter().any(|l| l.as_positive_atom().is_none()) {
            return Err(AnalysisError::Unsupported("sticky marking needs positive atomic bodies"));
        }
    }

    let mut marked = VecSet::default();
    for (t, tgd) in tgds.iter().enumerate() {
        for &v in &tgd.universal_variables() {
            let lost = tgd.head().iter().any(|atom| atom.variables().all(|w| w != v));
            if lost {
                mark_occurrences(t, tgd, v, &mut marked);
            }
        }
    }

    let mut round = 0;
    loop {
        round += 1;
        let before = marked.len();
        let flagged: HashSet<(PredicateRef, usize)> =
            marked.iter().map(|p| (p.predicate, p.index)).collect();
        for (t, tgd) in tgds.iter().enumerate() {
            let universal = tgd.universal_variables();
            for atom in tgd.head() {
                for (index, term) in atom.terms().iter().enumerate() {
                    let Some(v) = term.as_variable() else { continue };
                    if universal.contains(&v) && flagged.contains(&(atom.predicate(), index)) {
                        mark_occurrences(t, tgd, v, &mut marked);
                    }
                }
            }
        }
        tracing::trace!(round, size = marked.len(), "sticky marking");
        if marked.len() == before {
            return Ok(marked);
        }
    }
}

fn mark_occurrences(t: usize, tgd: &Tgd, v: Variable, marked: &mut VecSet<LiteralPosition>) {
    for (l, literal) in tgd.body().literals().iter().enumerate() {
        let Some(atom) = literal.as_positive_atom() else { continue };
        for (index, term) in atom.terms().iter().enumerate() {
            if term.as_variable() == Some(v) {
                marked.insert(LiteralPosition {
                    tgd: t,
                    literal: l,
                    index,
                    predicate: atom.predicate(),
                });
            }
        }
    }
}

impl LiteralPosition {
    /// The body literal this position points into.
    pub fn literal_in<'a>(&self, tgds: &'a [Tgd]) -> Option<&'a Literal> {
        tgds.get(self.tgd)?.body().literals().get(self.literal)
    }
}
