use crate::{error::SchemaError, util::VecSet, *};

/////////////////////

impl Term {
    pub fn var(name: &str) -> Self {
        Self::Variable(Variable(Text::new(name)))
    }
    pub fn constant(name: &str) -> Self {
        Self::Constant(Constant(Text::new(name)))
    }
    pub fn as_variable(&self) -> Option<Variable> {
        match self {
            Self::Variable(v) => Some(*v),
            Self::Constant(_) => None,
        }
    }
    pub fn is_variable(&self) -> bool {
        matches!(self, Self::Variable(_))
    }
    pub fn is_constant(&self) -> bool {
        matches!(self, Self::Constant(_))
    }
    pub fn name(&self) -> Text {
        match self {
            Self::Variable(Variable(t)) | Self::Constant(Constant(t)) => *t,
        }
    }
}

impl From<Variable> for Term {
    fn from(v: Variable) -> Self {
        Self::Variable(v)
    }
}
impl From<Constant> for Term {
    fn from(c: Constant) -> Self {
        Self::Constant(c)
    }
}

impl Comparison {
    /// The operator that holds with swapped operands: `a < b` iff `b > a`.
    pub fn symmetric(self) -> Self {
        match self {
            Self::Eq => Self::Eq,
            Self::Ne => Self::Ne,
            Self::Lt => Self::Gt,
            Self::Le => Self::Ge,
            Self::Gt => Self::Lt,
            Self::Ge => Self::Le,
        }
    }
    pub fn symbol(self) -> &'static str {
        match self {
            Self::Eq => "=",
            Self::Lt => "<",
            Self::Le => "<=",
            Self::Gt => ">",
            Self::Ge => ">=",
            Self::Ne => "<>",
        }
    }
}

impl BuiltInOp {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Comparison(c) => c.symbol(),
            Self::Boolean(true) => "true",
            Self::Boolean(false) => "false",
            Self::Custom(name) => name.as_str(),
        }
    }
    fn expected_terms(&self) -> Option<usize> {
        match self {
            Self::Comparison(_) => Some(2),
            Self::Boolean(_) => Some(0),
            Self::Custom(_) => None,
        }
    }
}

impl BuiltIn {
    pub fn new(op: BuiltInOp, terms: Vec<Term>) -> Result<Self, SchemaError> {
        match op.expected_terms() {
            Some(expected) if expected != terms.len() => Err(SchemaError::BuiltInArity {
                op: op.name().to_owned(),
                expected,
                found: terms.len(),
            }),
            _ => Ok(Self { op, terms }),
        }
    }
    pub fn comparison(left: Term, op: Comparison, right: Term) -> Self {
        Self { op: BuiltInOp::Comparison(op), terms: vec![left, right] }
    }
    pub fn boolean(value: bool) -> Self {
        Self { op: BuiltInOp::Boolean(value), terms: vec![] }
    }
    pub fn op(&self) -> BuiltInOp {
        self.op
    }
    pub fn terms(&self) -> &[Term] {
        &self.terms
    }
    /// For comparisons, the same constraint written the other way round.
    pub fn symmetric(&self) -> Option<Self> {
        match self.op {
            BuiltInOp::Comparison(c) => {
                let terms = self.terms.iter().rev().copied().collect();
                Some(Self { op: BuiltInOp::Comparison(c.symmetric()), terms })
            }
            BuiltInOp::Boolean(_) | BuiltInOp::Custom(_) => None,
        }
    }
}

impl Atom {
    pub fn new(predicate: PredicateRef, terms: Vec<Term>) -> Result<Self, SchemaError> {
        if predicate.arity() != terms.len() {
            return Err(SchemaError::ArityMismatch {
                expected: predicate.arity(),
                found: terms.len(),
            });
        }
        Ok(Self { predicate, terms })
    }
    pub fn predicate(&self) -> PredicateRef {
        self.predicate
    }
    pub fn terms(&self) -> &[Term] {
        &self.terms
    }
    pub fn variables(&self) -> impl Iterator<Item = Variable> + '_ {
        self.terms.iter().filter_map(Term::as_variable)
    }
    pub fn positive(self) -> Literal {
        Literal::Ordinary(OrdinaryLiteral { atom: self, positive: true })
    }
    pub fn negative(self) -> Literal {
        Literal::Ordinary(OrdinaryLiteral { atom: self, positive: false })
    }
}

impl Literal {
    pub fn terms(&self) -> &[Term] {
        match self {
            Self::Ordinary(o) => o.atom.terms(),
            Self::BuiltIn(b) => b.terms(),
        }
    }
    pub fn variables(&self) -> impl Iterator<Item = Variable> + '_ {
        self.terms().iter().filter_map(Term::as_variable)
    }
    pub fn as_ordinary(&self) -> Option<&OrdinaryLiteral> {
        match self {
            Self::Ordinary(o) => Some(o),
            Self::BuiltIn(_) => None,
        }
    }
    /// Positive ordinary literal, the only kind the language checks accept.
    pub fn as_positive_atom(&self) -> Option<&Atom> {
        match self {
            Self::Ordinary(OrdinaryLiteral { atom, positive: true }) => Some(atom),
            _ => None,
        }
    }
    pub fn predicate(&self) -> Option<PredicateRef> {
        self.as_ordinary().map(|o| o.atom.predicate())
    }
}

impl From<BuiltIn> for Literal {
    fn from(b: BuiltIn) -> Self {
        Self::BuiltIn(b)
    }
}

impl Clause {
    pub fn new(literals: Vec<Literal>) -> Result<Self, SchemaError> {
        if literals.is_empty() {
            return Err(SchemaError::EmptyBody);
        }
        Ok(Self { literals })
    }
    pub fn literals(&self) -> &[Literal] {
        &self.literals
    }
    pub fn len(&self) -> usize {
        self.literals.len()
    }
    /// Always false, kept for symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.literals.is_empty()
    }
    /// Variables in order of first occurrence.
    pub fn variables(&self) -> VecSet<Variable> {
        self.literals.iter().flat_map(Literal::variables).collect()
    }
    /// Predicates referenced by ordinary literals, with repetitions.
    pub fn predicates(&self) -> impl Iterator<Item = PredicateRef> + '_ {
        self.literals.iter().filter_map(Literal::predicate)
    }
}

impl<'a> IntoIterator for &'a Clause {
    type Item = &'a Literal;
    type IntoIter = std::slice::Iter<'a, Literal>;
    fn into_iter(self) -> Self::IntoIter {
        self.literals.iter()
    }
}
