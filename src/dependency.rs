use crate::error::SchemaError;
use crate::util::VecSet;
use crate::{Atom, BuiltIn, Clause, Comparison, Literal, Term, Variable};

/// `body -> ∃ existentials. head`
#[derive(Hash, Eq, PartialEq, Clone)]
pub struct Tgd {
    body: Clause,
    head: Vec<Atom>,
}

/// `body -> left = right`
#[derive(Hash, Eq, PartialEq, Clone)]
pub struct Egd {
    body: Clause,
    left: Term,
    right: Term,
}

/// Denial constraint `:- body`.
#[derive(Hash, Eq, PartialEq, Clone)]
pub struct LogicConstraint {
    body: Clause,
}

#[derive(Hash, Eq, PartialEq, Clone)]
pub enum Dependency {
    Tgd(Tgd),
    Egd(Egd),
}

impl Tgd {
    pub fn new(body: Clause, head: Vec<Atom>) -> Result<Self, SchemaError> {
        if head.is_empty() {
            return Err(SchemaError::EmptyHead);
        }
        Ok(Self { body, head })
    }
    pub fn body(&self) -> &Clause {
        &self.body
    }
    pub fn head(&self) -> &[Atom] {
        &self.head
    }
    pub fn universal_variables(&self) -> VecSet<Variable> {
        self.body.variables()
    }
    pub fn head_variables(&self) -> VecSet<Variable> {
        self.head.iter().flat_map(Atom::variables).collect()
    }
    pub fn existential_variables(&self) -> VecSet<Variable> {
        let universal = self.universal_variables();
        self.head_variables().iter().filter(|v| !universal.contains(*v)).copied().collect()
    }
    pub fn frontier_variables(&self) -> VecSet<Variable> {
        let universal = self.universal_variables();
        self.head_variables().iter().filter(|v| universal.contains(*v)).copied().collect()
    }
    pub fn is_linear(&self) -> bool {
        self.body.len() == 1
    }
    /// First body literal whose variables include every universal variable.
    pub fn guard(&self) -> Option<&Literal> {
        let universal = self.universal_variables();
        self.body.literals().iter().find(|literal| {
            let covered: VecSet<Variable> = literal.variables().collect();
            covered.is_superset(&universal)
        })
    }
    pub fn is_guarded(&self) -> bool {
        self.guard().is_some()
    }
}

impl Egd {
    pub fn new(body: Clause, left: Term, right: Term) -> Self {
        Self { body, left, right }
    }
    pub fn body(&self) -> &Clause {
        &self.body
    }
    pub fn left(&self) -> Term {
        self.left
    }
    pub fn right(&self) -> Term {
        self.right
    }
    pub fn head(&self) -> BuiltIn {
        BuiltIn::comparison(self.left, Comparison::Eq, self.right)
    }
    pub fn universal_variables(&self) -> VecSet<Variable> {
        self.body.variables()
    }
}

impl LogicConstraint {
    pub fn new(body: Clause) -> Self {
        Self { body }
    }
    pub fn body(&self) -> &Clause {
        &self.body
    }
}

impl Dependency {
    pub fn body(&self) -> &Clause {
        match self {
            Self::Tgd(tgd) => tgd.body(),
            Self::Egd(egd) => egd.body(),
        }
    }
    pub fn universal_variables(&self) -> VecSet<Variable> {
        self.body().variables()
    }
    pub fn as_tgd(&self) -> Option<&Tgd> {
        match self {
            Self::Tgd(tgd) => Some(tgd),
            Self::Egd(_) => None,
        }
    }
    pub fn as_egd(&self) -> Option<&Egd> {
        match self {
            Self::Egd(egd) => Some(egd),
            Self::Tgd(_) => None,
        }
    }
}

impl From<Tgd> for Dependency {
    fn from(tgd: Tgd) -> Self {
        Self::Tgd(tgd)
    }
}
impl From<Egd> for Dependency {
    fn from(egd: Egd) -> Self {
        Self::Egd(egd)
    }
}
