//! From text to schema: parse, then resolve predicate names to handles.
use crate::dependency::{Egd, Tgd};
use crate::error::SchemaError;
use crate::schema::{DependencySchema, DerivationRule, PredicateRef, SchemaBuilder};
use crate::{ast, parse, preprocess, Atom, BuiltIn, Clause, Literal, Text};

/// Maps a predicate name used with `arity` terms to a handle.
trait Resolve {
    fn resolve(&mut self, name: &str, arity: usize) -> Result<PredicateRef, SchemaError>;
}

/// Declares predicates on first use.
impl Resolve for SchemaBuilder {
    fn resolve(&mut self, name: &str, arity: usize) -> Result<PredicateRef, SchemaError> {
        match self.predicate_named(name) {
            Some(p) if p.arity() == arity => Ok(p),
            Some(p) => Err(SchemaError::ArityMismatch { expected: p.arity(), found: arity }),
            None => self.predicate(name, arity),
        }
    }
}

/// Only knows the predicates the schema already has.
impl Resolve for &DependencySchema {
    fn resolve(&mut self, name: &str, arity: usize) -> Result<PredicateRef, SchemaError> {
        match self.predicate_named(name) {
            Some(p) if p.arity() == arity => Ok(p),
            Some(p) => Err(SchemaError::ArityMismatch { expected: p.arity(), found: arity }),
            None => Err(SchemaError::UnknownPredicate { name: Text::new(name) }),
        }
    }
}

impl ast::Atom {
    fn internalize(&self, r: &mut impl Resolve) -> Result<Atom, SchemaError> {
        let predicate = r.resolve(&self.predicate, self.terms.len())?;
        Atom::new(predicate, self.terms.clone())
    }
}

impl ast::Literal {
    fn internalize(&self, r: &mut impl Resolve) -> Result<Literal, SchemaError> {
        Ok(match self {
            Self::Atom { atom, positive: true } => atom.internalize(r)?.positive(),
            Self::Atom { atom, positive: false } => atom.internalize(r)?.negative(),
            Self::Comparison(left, op, right) => BuiltIn::comparison(*left, *op, *right).into(),
            Self::Boolean(b) => BuiltIn::boolean(*b).into(),
        })
    }
}

fn internalize_body(body: &[ast::Literal], r: &mut impl Resolve) -> Result<Clause, SchemaError> {
    let literals = body.iter().map(|l| l.internalize(r)).collect::<Result<_, _>>()?;
    Clause::new(literals)
}

impl ast::Statement {
    fn internalize(&self, builder: &mut SchemaBuilder) -> Result<(), SchemaError> {
        match self {
            Self::Rule { head, body } => {
                let predicate = builder.resolve(&head.predicate, head.terms.len())?;
                let body = internalize_body(body, builder)?;
                builder.rule(predicate, DerivationRule::new(head.terms.clone(), body))?;
            }
            Self::Dependency { body, head: ast::Head::Equality(l, r) } => {
                let body = internalize_body(body, builder)?;
                builder.dependency(Egd::new(body, *l, *r));
            }
            Self::Dependency { body, head: ast::Head::Atoms(atoms) } => {
                let body = internalize_body(body, builder)?;
                let head = atoms.iter().map(|a| a.internalize(builder)).collect::<Result<_, _>>()?;
                builder.dependency(Tgd::new(body, head)?);
            }
        }
        Ok(())
    }
}

fn parsed<'a, O>(
    source: &'a str,
    parser: impl FnMut(&'a str) -> parse::IResult<&'a str, O> + 'a,
) -> Result<O, SchemaError> {
    match parse::ended(parser)(source) {
        Ok((_, o)) => Ok(o),
        Err(nom::Err::Error(e)) | Err(nom::Err::Failure(e)) => {
            Err(SchemaError::Parse(nom::error::convert_error(source, e)))
        }
        Err(nom::Err::Incomplete(_)) => Err(SchemaError::Parse("incomplete input".to_owned())),
    }
}

/// Reads a whole schema. Predicates are declared on first use, in order of
/// appearance; a predicate with a `:-` rule is derived.
///
/// ```
/// let schema = deplog::schema_from_text("P(x, y) -> Q(y, z). # existential z").unwrap();
/// assert_eq!(schema.tgds().count(), 1);
/// ```
pub fn schema_from_text(source: &str) -> Result<DependencySchema, SchemaError> {
    let source = preprocess::comments_removed(source.to_owned());
    let statements = parsed(&source, parse::program)?;
    let mut builder = SchemaBuilder::new();
    for statement in &statements {
        statement.internalize(&mut builder)?;
    }
    builder.build()
}

/// Reads a literal list such as `P(x, y), not Q(y), x < 3` against the
/// predicates of `schema`.
pub fn clause_from_text(schema: &DependencySchema, source: &str) -> Result<Clause, SchemaError> {
    let source = preprocess::comments_removed(source.to_owned());
    let literals = parsed(&source, parse::literal_list)?;
    internalize_body(&literals, &mut { schema })
}
