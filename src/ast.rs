//! Output of the text reader: predicates are still names, not handles.
use crate::{Comparison, Term};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Atom {
    pub predicate: String,
    pub terms: Vec<Term>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Literal {
    Atom { atom: Atom, positive: bool },
    Comparison(Term, Comparison, Term),
    Boolean(bool),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Head {
    Atoms(Vec<Atom>),
    Equality(Term, Term),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Statement {
    /// `body -> head.`
    Dependency { body: Vec<Literal>, head: Head },
    /// `head :- body.`
    Rule { head: Atom, body: Vec<Literal> },
}
