//! Most general unifiers of literals and atoms.
//!
//! Unification starts from the identity over every input variable and walks
//! the term lists position by position. Images in the running substitution
//! are always representatives: a variable that is some image maps to itself,
//! so rebinding a representative is a rewrite of every binding that points to
//! it, which makes earlier bindings follow along.
use crate::{Atom, BuiltInOp, Literal, Substitution, Term};
use std::borrow::Cow;

/// Unifier of all `literals`, or `None` if there is none.
pub fn unify_literals(literals: &[Literal]) -> Option<Substitution> {
    match literals {
        [] => Some(Substitution::new()),
        [only] => Some(Substitution::identity(only.variables())),
        [first, rest @ ..] => {
            let mut sub = Substitution::identity(literals.iter().flat_map(Literal::variables));
            for other in rest {
                let terms = aligned_terms(first, other)?;
                if !unify_term_lists(&mut sub, first.terms(), &terms) {
                    return None;
                }
            }
            Some(sub)
        }
    }
}

/// Unifier of all `atoms`, or `None` if there is none.
pub fn unify_atoms(atoms: &[Atom]) -> Option<Substitution> {
    match atoms {
        [] => Some(Substitution::new()),
        [only] => Some(Substitution::identity(only.variables())),
        [first, rest @ ..] => {
            let mut sub = Substitution::identity(atoms.iter().flat_map(Atom::variables));
            for other in rest {
                if other.predicate() != first.predicate()
                    || !unify_term_lists(&mut sub, first.terms(), other.terms())
                {
                    return None;
                }
            }
            Some(sub)
        }
    }
}

pub fn are_unifiable(literals: &[Literal]) -> bool {
    unify_literals(literals).is_some()
}

pub fn are_unifiable_atoms(atoms: &[Atom]) -> bool {
    unify_atoms(atoms).is_some()
}

/// Terms of `other` lined up against those of `first`, or `None` when the two
/// literals are not schema compatible. A comparison written the other way
/// round (`b > a` against `a < b`) has its operands reversed.
fn aligned_terms<'a>(first: &Literal, other: &'a Literal) -> Option<Cow<'a, [Term]>> {
    match (first, other) {
        (Literal::Ordinary(a), Literal::Ordinary(b))
            if a.atom.predicate() == b.atom.predicate() && a.positive == b.positive =>
        {
            Some(Cow::Borrowed(b.atom.terms()))
        }
        (Literal::BuiltIn(a), Literal::BuiltIn(b)) => match (a.op(), b.op()) {
            (x, y) if x == y => Some(Cow::Borrowed(b.terms())),
            (BuiltInOp::Comparison(x), BuiltInOp::Comparison(y)) if x.symmetric() == y => {
                Some(Cow::Owned(b.terms().iter().rev().copied().collect()))
            }
            _ => None,
        },
        _ => None,
    }
}

fn unify_term_lists(sub: &mut Substitution, left: &[Term], right: &[Term]) -> bool {
    left.len() == right.len() && left.iter().zip(right).all(|(a, b)| unify_terms(sub, *a, *b))
}

fn unify_terms(sub: &mut Substitution, a: Term, b: Term) -> bool {
    let (a, b) = (sub.apply_term(a), sub.apply_term(b));
    match (a, b) {
        (Term::Constant(x), Term::Constant(y)) => x == y,
        (Term::Variable(_), Term::Constant(_)) => {
            sub.rewrite_images(a, b);
            true
        }
        (Term::Constant(_), Term::Variable(_)) => {
            sub.rewrite_images(b, a);
            true
        }
        (Term::Variable(_), Term::Variable(_)) => {
            if a != b {
                sub.rewrite_images(a, b);
            }
            true
        }
    }
}
