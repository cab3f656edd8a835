//! Predicates and the schema that owns them.
//!
//! A schema owns a table of predicates; everything else refers to a predicate
//! through a [`PredicateRef`] handle issued by that table. Handles carry the
//! identity of the issuing schema, so a handle from one schema never passes
//! for a same-named predicate of another.
use crate::dependency::{Dependency, Egd, Tgd};
use crate::error::SchemaError;
use crate::{Clause, Term, Text};
use std::collections::HashMap;
use std::sync::atomic::{AtomicU32, Ordering};

#[derive(Hash, PartialOrd, Ord, Eq, PartialEq, Clone, Copy, Debug)]
pub struct SchemaId(u32);

impl SchemaId {
    fn fresh() -> Self {
        static COUNTER: AtomicU32 = AtomicU32::new(1);
        Self(COUNTER.fetch_add(1, Ordering::Relaxed))
    }
}

/// Handle to a predicate of one schema.
#[derive(Hash, PartialOrd, Ord, Eq, PartialEq, Clone, Copy)]
pub struct PredicateRef {
    schema: SchemaId,
    index: usize,
    arity: usize,
}

impl PredicateRef {
    pub fn arity(self) -> usize {
        self.arity
    }
    pub fn index(self) -> usize {
        self.index
    }
}

/// `head :- body`. The head lists the terms of the derived predicate.
#[derive(Hash, Eq, PartialEq, Clone)]
pub struct DerivationRule {
    head: Vec<Term>,
    body: Clause,
}

impl DerivationRule {
    pub fn new(head: Vec<Term>, body: Clause) -> Self {
        Self { head, body }
    }
    pub fn head(&self) -> &[Term] {
        &self.head
    }
    pub fn body(&self) -> &Clause {
        &self.body
    }
}

#[derive(Clone)]
pub struct Predicate {
    /// The builder that declared it. Copies of the table keep it, so old
    /// handles stay valid while handles of sibling builders do not mix.
    issuer: SchemaId,
    name: Text,
    arity: usize,
    rules: Vec<DerivationRule>,
}

impl Predicate {
    pub fn name(&self) -> Text {
        self.name
    }
    pub fn arity(&self) -> usize {
        self.arity
    }
    pub fn rules(&self) -> &[DerivationRule] {
        &self.rules
    }
    /// A derived predicate is defined by at least one derivation rule.
    pub fn is_derived(&self) -> bool {
        !self.rules.is_empty()
    }
}

/// Predicates plus dependencies over them. Only a [`SchemaBuilder`] creates
/// one, and only after every reference has been checked.
#[derive(Clone)]
pub struct DependencySchema {
    predicates: Vec<Predicate>,
    by_name: HashMap<Text, usize>,
    dependencies: Vec<Dependency>,
}

impl DependencySchema {
    pub fn builder() -> SchemaBuilder {
        SchemaBuilder::new()
    }
    pub fn contains(&self, predicate: PredicateRef) -> bool {
        owns(&self.predicates, predicate)
    }
    pub fn get(&self, predicate: PredicateRef) -> Option<&Predicate> {
        if self.contains(predicate) {
            self.predicates.get(predicate.index)
        } else {
            None
        }
    }
    pub fn predicate_named(&self, name: &str) -> Option<PredicateRef> {
        let index = *self.by_name.get(&Text::new(name))?;
        Some(self.handle(index))
    }
    pub fn predicates(&self) -> impl Iterator<Item = (PredicateRef, &Predicate)> + '_ {
        (0..self.predicates.len()).map(move |i| (self.handle(i), &self.predicates[i]))
    }
    pub fn dependencies(&self) -> &[Dependency] {
        &self.dependencies
    }
    pub fn tgds(&self) -> impl Iterator<Item = &Tgd> + '_ {
        self.dependencies.iter().filter_map(Dependency::as_tgd)
    }
    pub fn egds(&self) -> impl Iterator<Item = &Egd> + '_ {
        self.dependencies.iter().filter_map(Dependency::as_egd)
    }
    /// A builder over the same predicate table, without dependencies. Handles
    /// of this schema stay valid in the rebuilt one; predicates added to the
    /// builder get handles of their own.
    pub fn to_builder(&self) -> SchemaBuilder {
        SchemaBuilder {
            id: SchemaId::fresh(),
            predicates: self.predicates.clone(),
            by_name: self.by_name.clone(),
            dependencies: vec![],
        }
    }
    fn handle(&self, index: usize) -> PredicateRef {
        handle(&self.predicates, index)
    }
}

fn handle(predicates: &[Predicate], index: usize) -> PredicateRef {
    let p = &predicates[index];
    PredicateRef { schema: p.issuer, index, arity: p.arity }
}

fn owns(predicates: &[Predicate], predicate: PredicateRef) -> bool {
    predicates
        .get(predicate.index)
        .is_some_and(|p| p.issuer == predicate.schema && p.arity == predicate.arity)
}

pub struct SchemaBuilder {
    id: SchemaId,
    predicates: Vec<Predicate>,
    by_name: HashMap<Text, usize>,
    dependencies: Vec<Dependency>,
}

impl Default for SchemaBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl SchemaBuilder {
    pub fn new() -> Self {
        Self {
            id: SchemaId::fresh(),
            predicates: vec![],
            by_name: Default::default(),
            dependencies: vec![],
        }
    }

    /// Declares a base predicate. It becomes derived once a rule is added.
    pub fn predicate(&mut self, name: &str, arity: usize) -> Result<PredicateRef, SchemaError> {
        let name = Text::new(name);
        if self.by_name.contains_key(&name) {
            return Err(SchemaError::DuplicatePredicate { name });
        }
        let index = self.predicates.len();
        self.predicates.push(Predicate { issuer: self.id, name, arity, rules: vec![] });
        self.by_name.insert(name, index);
        Ok(PredicateRef { schema: self.id, index, arity })
    }

    pub fn predicate_named(&self, name: &str) -> Option<PredicateRef> {
        let index = *self.by_name.get(&Text::new(name))?;
        Some(handle(&self.predicates, index))
    }

    pub fn rule(
        &mut self,
        predicate: PredicateRef,
        rule: DerivationRule,
    ) -> Result<&mut Self, SchemaError> {
        self.check_owned(predicate)?;
        if rule.head.len() != predicate.arity {
            return Err(SchemaError::ArityMismatch {
                expected: predicate.arity,
                found: rule.head.len(),
            });
        }
        self.predicates[predicate.index].rules.push(rule);
        Ok(self)
    }

    pub fn dependency(&mut self, dependency: impl Into<Dependency>) -> &mut Self {
        self.dependencies.push(dependency.into());
        self
    }

    pub fn dependencies(&mut self, dependencies: impl IntoIterator<Item = Dependency>) -> &mut Self {
        self.dependencies.extend(dependencies);
        self
    }

    /// Validates every predicate reference, then freezes the schema.
    pub fn build(self) -> Result<DependencySchema, SchemaError> {
        for predicate in &self.predicates {
            for rule in &predicate.rules {
                self.check_clause(&rule.body)?;
            }
        }
        for dependency in &self.dependencies {
            self.check_clause(dependency.body())?;
            if let Dependency::Tgd(tgd) = dependency {
                for atom in tgd.head() {
                    self.check_owned(atom.predicate())?;
                }
            }
        }
        tracing::debug!(
            predicates = self.predicates.len(),
            dependencies = self.dependencies.len(),
            "schema built"
        );
        let Self { predicates, by_name, dependencies, .. } = self;
        Ok(DependencySchema { predicates, by_name, dependencies })
    }

    fn check_clause(&self, clause: &Clause) -> Result<(), SchemaError> {
        clause.predicates().try_for_each(|p| self.check_owned(p))
    }

    fn check_owned(&self, predicate: PredicateRef) -> Result<(), SchemaError> {
        if !owns(&self.predicates, predicate) {
            return Err(SchemaError::PredicateOutsideSchema {
                index: predicate.index,
                arity: predicate.arity,
            });
        }
        Ok(())
    }
}
