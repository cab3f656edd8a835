//! Schema-free rendering. Predicates show as `#index/arity`; wrap values in
//! [`Pretty`](crate::Pretty) to see their names.
use crate::dependency::{Dependency, Egd, LogicConstraint, Tgd};
use crate::schema::{DerivationRule, PredicateRef};
use crate::{Atom, BuiltIn, BuiltInOp, Clause, Constant, Literal, Term, Variable};
use std::fmt::{Debug, Formatter, Result as FmtResult};

impl Debug for Variable {
    fn fmt(&self, f: &mut Formatter) -> FmtResult {
        write!(f, "{}", self.0)
    }
}
impl Debug for Constant {
    fn fmt(&self, f: &mut Formatter) -> FmtResult {
        write!(f, "'{}'", self.0)
    }
}
impl Debug for Term {
    fn fmt(&self, f: &mut Formatter) -> FmtResult {
        match self {
            Self::Variable(v) => v.fmt(f),
            Self::Constant(c) => c.fmt(f),
        }
    }
}

impl Debug for PredicateRef {
    fn fmt(&self, f: &mut Formatter) -> FmtResult {
        write!(f, "#{}/{}", self.index(), self.arity())
    }
}

pub(crate) fn terms(f: &mut Formatter, terms: &[Term]) -> FmtResult {
    for (i, term) in terms.iter().enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{:?}", term)?;
    }
    Ok(())
}

impl Debug for BuiltInOp {
    fn fmt(&self, f: &mut Formatter) -> FmtResult {
        write!(f, "{}", self.name())
    }
}

impl Debug for BuiltIn {
    fn fmt(&self, f: &mut Formatter) -> FmtResult {
        match (self.op(), self.terms()) {
            (BuiltInOp::Comparison(c), [l, r]) => write!(f, "{:?} {} {:?}", l, c.symbol(), r),
            (BuiltInOp::Boolean(b), _) => write!(f, "{}", b),
            (op, args) => {
                write!(f, "{}(", op.name())?;
                terms(f, args)?;
                write!(f, ")")
            }
        }
    }
}

impl Debug for Atom {
    fn fmt(&self, f: &mut Formatter) -> FmtResult {
        write!(f, "{:?}(", self.predicate())?;
        terms(f, self.terms())?;
        write!(f, ")")
    }
}

impl Debug for Literal {
    fn fmt(&self, f: &mut Formatter) -> FmtResult {
        match self {
            Self::Ordinary(o) if o.positive => o.atom.fmt(f),
            Self::Ordinary(o) => write!(f, "not {:?}", o.atom),
            Self::BuiltIn(b) => b.fmt(f),
        }
    }
}

impl Debug for Clause {
    fn fmt(&self, f: &mut Formatter) -> FmtResult {
        for (i, literal) in self.literals().iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{:?}", literal)?;
        }
        Ok(())
    }
}

impl Debug for Tgd {
    fn fmt(&self, f: &mut Formatter) -> FmtResult {
        write!(f, "{:?} -> ", self.body())?;
        for (i, atom) in self.head().iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{:?}", atom)?;
        }
        Ok(())
    }
}

impl Debug for Egd {
    fn fmt(&self, f: &mut Formatter) -> FmtResult {
        write!(f, "{:?} -> {:?} = {:?}", self.body(), self.left(), self.right())
    }
}

impl Debug for Dependency {
    fn fmt(&self, f: &mut Formatter) -> FmtResult {
        match self {
            Self::Tgd(tgd) => tgd.fmt(f),
            Self::Egd(egd) => egd.fmt(f),
        }
    }
}

impl Debug for DerivationRule {
    fn fmt(&self, f: &mut Formatter) -> FmtResult {
        write!(f, "(")?;
        terms(f, self.head())?;
        write!(f, ") :- {:?}", self.body())
    }
}

impl Debug for LogicConstraint {
    fn fmt(&self, f: &mut Formatter) -> FmtResult {
        write!(f, ":- {:?}", self.body())
    }
}
