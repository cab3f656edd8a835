use crate::debug::terms;
use crate::dependency::{Dependency, Egd, Tgd};
use crate::schema::{DependencySchema, PredicateRef};
use crate::{Atom, Clause, Literal};
use std::fmt::{Display, Formatter, Result as FmtResult};

/// `t` rendered with the predicate names of `schema`.
pub struct Pretty<'a, T: ?Sized> {
    pub t: &'a T,
    pub schema: &'a DependencySchema,
}

impl<'a, T: ?Sized> Pretty<'a, T> {
    pub fn new(t: &'a T, schema: &'a DependencySchema) -> Self {
        Self { t, schema }
    }
    fn with<'b, U: ?Sized>(&self, u: &'b U) -> Pretty<'b, U>
    where
        'a: 'b,
    {
        Pretty { t: u, schema: self.schema }
    }
}

impl Display for Pretty<'_, PredicateRef> {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self.schema.get(*self.t) {
            Some(p) => write!(f, "{}", p.name()),
            None => write!(f, "{:?}", self.t),
        }
    }
}

impl Display for Pretty<'_, Atom> {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        let predicate = self.t.predicate();
        write!(f, "{}(", self.with(&predicate))?;
        terms(f, self.t.terms())?;
        write!(f, ")")
    }
}

impl Display for Pretty<'_, Literal> {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self.t {
            Literal::Ordinary(o) if o.positive => write!(f, "{}", self.with(&o.atom)),
            Literal::Ordinary(o) => write!(f, "not {}", self.with(&o.atom)),
            Literal::BuiltIn(b) => write!(f, "{:?}", b),
        }
    }
}

impl Display for Pretty<'_, [Literal]> {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        for (i, literal) in self.t.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", self.with(literal))?;
        }
        Ok(())
    }
}

impl Display for Pretty<'_, Clause> {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.with(self.t.literals()))
    }
}

impl Display for Pretty<'_, Tgd> {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{} -> ", self.with(self.t.body()))?;
        for (i, atom) in self.t.head().iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", self.with(atom))?;
        }
        Ok(())
    }
}

impl Display for Pretty<'_, Egd> {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{} -> {:?} = {:?}", self.with(self.t.body()), self.t.left(), self.t.right())
    }
}

impl Display for Pretty<'_, Dependency> {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self.t {
            Dependency::Tgd(tgd) => write!(f, "{}", self.with(tgd)),
            Dependency::Egd(egd) => write!(f, "{}", self.with(egd)),
        }
    }
}

impl Display for Pretty<'_, DependencySchema> {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        for (_, predicate) in self.t.predicates() {
            for rule in predicate.rules() {
                write!(f, "{}(", predicate.name())?;
                terms(f, rule.head())?;
                writeln!(f, ") :- {}.", self.with(rule.body()))?;
            }
        }
        for dependency in self.t.dependencies() {
            writeln!(f, "{}.", self.with(dependency))?;
        }
        Ok(())
    }
}
