use crate::{Atom, BuiltIn, Literal, OrdinaryLiteral, Term, Variable};
use std::collections::HashMap;
use std::fmt::{Debug, Formatter, Result as FmtResult};

/// Finite partial map from variables to terms.
#[derive(Default, Clone, PartialEq, Eq)]
pub struct Substitution {
    map: HashMap<Variable, Term>,
}

impl Substitution {
    pub fn new() -> Self {
        Self::default()
    }
    /// Maps each given variable to itself.
    pub fn identity(variables: impl IntoIterator<Item = Variable>) -> Self {
        Self { map: variables.into_iter().map(|v| (v, Term::Variable(v))).collect() }
    }
    pub fn get(&self, variable: Variable) -> Option<Term> {
        self.map.get(&variable).copied()
    }
    pub fn contains(&self, variable: Variable) -> bool {
        self.map.contains_key(&variable)
    }
    pub fn len(&self) -> usize {
        self.map.len()
    }
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
    pub fn iter(&self) -> impl Iterator<Item = (Variable, Term)> + '_ {
        self.map.iter().map(|(v, t)| (*v, *t))
    }
    /// True iff every bound variable maps to itself.
    pub fn is_identity(&self) -> bool {
        self.map.iter().all(|(v, t)| *t == Term::Variable(*v))
    }

    /// Binds `variable` unless it is already bound to something else.
    /// Returns false on disagreement, leaving `self` unchanged.
    pub fn bind(&mut self, variable: Variable, term: Term) -> bool {
        match self.map.get(&variable) {
            Some(existing) => *existing == term,
            None => {
                self.map.insert(variable, term);
                true
            }
        }
    }

    /// Rewrites every binding whose image is `from` to `to`.
    pub(crate) fn rewrite_images(&mut self, from: Term, to: Term) {
        for image in self.map.values_mut() {
            if *image == from {
                *image = to;
            }
        }
    }

    /// Both mappings at once, or `None` if they disagree on a shared variable.
    pub fn union(&self, other: &Self) -> Option<Self> {
        let mut union = self.clone();
        for (v, t) in other.iter() {
            if !union.bind(v, t) {
                return None;
            }
        }
        Some(union)
    }

    pub fn apply_term(&self, term: Term) -> Term {
        match term {
            Term::Variable(v) => self.get(v).unwrap_or(term),
            Term::Constant(_) => term,
        }
    }
    pub fn apply_terms(&self, terms: &[Term]) -> Vec<Term> {
        terms.iter().map(|t| self.apply_term(*t)).collect()
    }
    pub fn apply_atom(&self, atom: &Atom) -> Atom {
        Atom { predicate: atom.predicate(), terms: self.apply_terms(atom.terms()) }
    }
    pub fn apply_literal(&self, literal: &Literal) -> Literal {
        match literal {
            Literal::Ordinary(OrdinaryLiteral { atom, positive }) => {
                Literal::Ordinary(OrdinaryLiteral { atom: self.apply_atom(atom), positive: *positive })
            }
            Literal::BuiltIn(b) => {
                Literal::BuiltIn(BuiltIn { op: b.op(), terms: self.apply_terms(b.terms()) })
            }
        }
    }
}

impl FromIterator<(Variable, Term)> for Substitution {
    fn from_iter<I: IntoIterator<Item = (Variable, Term)>>(iter: I) -> Self {
        Self { map: iter.into_iter().collect() }
    }
}

impl Debug for Substitution {
    fn fmt(&self, f: &mut Formatter) -> FmtResult {
        let mut entries: Vec<_> = self.iter().collect();
        entries.sort_by_key(|(v, _)| v.0.as_str());
        f.debug_map().entries(entries).finish()
    }
}
