//! Homomorphism search between literal lists.
//!
//! A homomorphism from a domain list to a range list is a substitution that
//! turns every domain literal into some range literal. Range variables are
//! never bound: they behave like constants. The search picks the first
//! domain literal, tries every range literal it can be mapped onto, and
//! recurses on the rest, backtracking on failure. This is exponential in the
//! worst case.
//!
//! Base literals match by predicate name. Whether a literal over a derived
//! predicate may be mapped onto another is left to a [`DerivedLiteralCriteria`].
use crate::config::{AnalysisConfig, DerivedPolicy};
use crate::dependency::LogicConstraint;
use crate::error::{AnalysisError, Result};
use crate::schema::{DependencySchema, DerivationRule, Predicate, PredicateRef};
use crate::{Clause, Literal, Substitution, Term};
use std::collections::HashMap;

/// Decides whether literals over two predicates, at least one derived, may
/// be mapped onto each other. Terms are matched by the search afterwards.
pub trait DerivedLiteralCriteria: Send + Sync {
    fn predicates_match(
        &self,
        search: &mut Search<'_>,
        domain: PredicateRef,
        range: PredicateRef,
    ) -> Result<bool>;
}

/// Derived literals match iff their predicates have the same name.
pub struct SameNameCriteria;

impl DerivedLiteralCriteria for SameNameCriteria {
    fn predicates_match(
        &self,
        search: &mut Search<'_>,
        domain: PredicateRef,
        range: PredicateRef,
    ) -> Result<bool> {
        search.same_name(domain, range)
    }
}

/// Derived literals match if their predicates have the same name, or if each
/// derivation rule of one is equivalent to some derivation rule of the other.
pub struct RuleStructuralCriteria;

impl DerivedLiteralCriteria for RuleStructuralCriteria {
    fn predicates_match(
        &self,
        search: &mut Search<'_>,
        domain: PredicateRef,
        range: PredicateRef,
    ) -> Result<bool> {
        Ok(search.same_name(domain, range)? || search.rules_mutually_homomorphic(domain, range)?)
    }
}

pub fn criteria_for(policy: DerivedPolicy) -> Option<&'static dyn DerivedLiteralCriteria> {
    match policy {
        DerivedPolicy::Forbidden => None,
        DerivedPolicy::SameName => Some(&SameNameCriteria),
        DerivedPolicy::RuleStructural => Some(&RuleStructuralCriteria),
    }
}

/// Search entry point. Domain literals are read against `domain`, range
/// literals against `range`; usually both are the same schema.
#[derive(Clone, Copy)]
pub struct HomomorphismFinder<'s> {
    domain: &'s DependencySchema,
    range: &'s DependencySchema,
    criteria: Option<&'s dyn DerivedLiteralCriteria>,
}

impl<'s> HomomorphismFinder<'s> {
    /// A finder over one schema that rejects derived literals.
    pub fn new(schema: &'s DependencySchema) -> Self {
        Self::between(schema, schema)
    }
    pub fn between(domain: &'s DependencySchema, range: &'s DependencySchema) -> Self {
        Self { domain, range, criteria: None }
    }
    pub fn from_config(schema: &'s DependencySchema, config: &AnalysisConfig) -> Self {
        Self { criteria: criteria_for(config.derived_literals), ..Self::new(schema) }
    }
    pub fn with_criteria(self, criteria: &'s dyn DerivedLiteralCriteria) -> Self {
        Self { criteria: Some(criteria), ..self }
    }
    /// The same finder with domain and range swapped.
    pub fn reversed(&self) -> Self {
        Self { domain: self.range, range: self.domain, criteria: self.criteria }
    }
    pub fn domain(&self) -> &'s DependencySchema {
        self.domain
    }
    pub fn range(&self) -> &'s DependencySchema {
        self.range
    }

    pub fn find(&self, domain: &[Literal], range: &[Literal]) -> Result<Option<Substitution>> {
        self.find_from(domain, range, &Substitution::new())
    }

    /// Like `find`, but only extensions of `initial` count.
    pub fn find_from(
        &self,
        domain: &[Literal],
        range: &[Literal],
        initial: &Substitution,
    ) -> Result<Option<Substitution>> {
        self.check_derived(domain, range)?;
        Search::new(self).embed(domain, range, initial.clone())
    }

    pub fn find_clause(&self, domain: &Clause, range: &Clause) -> Result<Option<Substitution>> {
        self.find(domain.literals(), range.literals())
    }

    /// The heads seed the substitution, then the bodies are searched.
    pub fn find_rule(
        &self,
        domain: &DerivationRule,
        range: &DerivationRule,
    ) -> Result<Option<Substitution>> {
        self.check_derived(domain.body().literals(), range.body().literals())?;
        Search::new(self).rule_homomorphism(domain, range)
    }

    pub fn find_constraint(
        &self,
        domain: &LogicConstraint,
        range: &LogicConstraint,
    ) -> Result<Option<Substitution>> {
        self.find_clause(domain.body(), range.body())
    }

    /// Without a criteria, any derived literal on either side is an error,
    /// whichever literal the search would have reached first.
    fn check_derived(&self, domain: &[Literal], range: &[Literal]) -> Result<()> {
        if self.criteria.is_some() {
            return Ok(());
        }
        let sides = [(self.domain, domain), (self.range, range)];
        for (schema, literals) in sides {
            for predicate in literals.iter().filter_map(Literal::predicate) {
                match schema.get(predicate) {
                    Some(p) if p.is_derived() => {
                        return Err(AnalysisError::DerivedLiteralWithoutCriteria { predicate: p.name() })
                    }
                    _ => {}
                }
            }
        }
        Ok(())
    }
}

#[derive(Clone, Copy)]
enum Memo {
    InProgress,
    Done(bool),
}

/// State of one top-level search. Derivation rule comparisons are memoised
/// per predicate pair; a pair met again while still being compared (mutually
/// recursive derived predicates) counts as not matching.
pub struct Search<'s> {
    domain: &'s DependencySchema,
    range: &'s DependencySchema,
    criteria: Option<&'s dyn DerivedLiteralCriteria>,
    flipped: bool,
    rule_memo: HashMap<(PredicateRef, PredicateRef, bool), Memo>,
}

impl<'s> Search<'s> {
    fn new(finder: &HomomorphismFinder<'s>) -> Self {
        Self {
            domain: finder.domain,
            range: finder.range,
            criteria: finder.criteria,
            flipped: false,
            rule_memo: HashMap::new(),
        }
    }

    pub fn domain_predicate(&self, predicate: PredicateRef) -> Result<&'s Predicate> {
        let domain = self.domain;
        domain.get(predicate).ok_or(AnalysisError::ForeignPredicate { index: predicate.index() })
    }
    pub fn range_predicate(&self, predicate: PredicateRef) -> Result<&'s Predicate> {
        let range = self.range;
        range.get(predicate).ok_or(AnalysisError::ForeignPredicate { index: predicate.index() })
    }
    pub fn same_name(&self, domain: PredicateRef, range: PredicateRef) -> Result<bool> {
        let (d, r) = (self.domain_predicate(domain)?, self.range_predicate(range)?);
        Ok(d.name() == r.name() && d.arity() == r.arity())
    }

    /// Every rule of each predicate has an equivalent rule defining the other.
    pub fn rules_mutually_homomorphic(
        &mut self,
        domain: PredicateRef,
        range: PredicateRef,
    ) -> Result<bool> {
        let key = (domain, range, self.flipped);
        match self.rule_memo.get(&key) {
            Some(Memo::Done(known)) => return Ok(*known),
            Some(Memo::InProgress) => return Ok(false),
            None => {}
        }
        self.rule_memo.insert(key, Memo::InProgress);
        match self.compare_rule_sets(domain, range) {
            Ok(result) => {
                self.rule_memo.insert(key, Memo::Done(result));
                Ok(result)
            }
            Err(e) => {
                self.rule_memo.remove(&key);
                Err(e)
            }
        }
    }

    fn compare_rule_sets(&mut self, domain: PredicateRef, range: PredicateRef) -> Result<bool> {
        let (d, r) = (self.domain_predicate(domain)?, self.range_predicate(range)?);
        if !d.is_derived() || !r.is_derived() || d.arity() != r.arity() {
            return Ok(false);
        }
        for dr in d.rules() {
            if !self.has_equivalent_rule(dr, r.rules())? {
                return Ok(false);
            }
        }
        self.flip(|search| {
            for rr in r.rules() {
                if !search.has_equivalent_rule(rr, d.rules())? {
                    return Ok(false);
                }
            }
            Ok(true)
        })
    }

    fn has_equivalent_rule(&mut self, rule: &DerivationRule, others: &[DerivationRule]) -> Result<bool> {
        for other in others {
            if self.rule_homomorphism(rule, other)?.is_some()
                && self.flip(|search| search.rule_homomorphism(other, rule))?.is_some()
            {
                return Ok(true);
            }
        }
        Ok(false)
    }

    fn flip<T>(&mut self, f: impl FnOnce(&mut Self) -> T) -> T {
        std::mem::swap(&mut self.domain, &mut self.range);
        self.flipped = !self.flipped;
        let out = f(self);
        std::mem::swap(&mut self.domain, &mut self.range);
        self.flipped = !self.flipped;
        out
    }

    fn rule_homomorphism(
        &mut self,
        domain: &DerivationRule,
        range: &DerivationRule,
    ) -> Result<Option<Substitution>> {
        match extend(&Substitution::new(), domain.head(), range.head()) {
            Some(seed) => self.embed(domain.body().literals(), range.body().literals(), seed),
            None => Ok(None),
        }
    }

    fn embed(
        &mut self,
        domain: &[Literal],
        range: &[Literal],
        sub: Substitution,
    ) -> Result<Option<Substitution>> {
        let Some((first, rest)) = domain.split_first() else {
            return Ok(Some(sub));
        };
        for candidate in range {
            for extension in self.extensions(first, candidate, &sub)? {
                if let Some(found) = self.embed(rest, range, extension)? {
                    return Ok(Some(found));
                }
            }
        }
        tracing::trace!(remaining = domain.len(), "backtracking");
        Ok(None)
    }

    /// All extensions of `sub` under which `domain` becomes `range`. Only
    /// comparisons can yield two: as written, and with operands swapped.
    fn extensions(
        &mut self,
        domain: &Literal,
        range: &Literal,
        sub: &Substitution,
    ) -> Result<Vec<Substitution>> {
        match (domain, range) {
            (Literal::Ordinary(d), Literal::Ordinary(r)) => {
                if d.positive != r.positive
                    || !self.predicates_match(d.atom.predicate(), r.atom.predicate())?
                {
                    return Ok(vec![]);
                }
                Ok(extend(sub, d.atom.terms(), r.atom.terms()).into_iter().collect())
            }
            (Literal::BuiltIn(d), Literal::BuiltIn(r)) => {
                let mut out = vec![];
                if d.op() == r.op() {
                    out.extend(extend(sub, d.terms(), r.terms()));
                }
                if let Some(symmetric) = r.symmetric() {
                    if d.op() == symmetric.op() {
                        if let Some(s) = extend(sub, d.terms(), symmetric.terms()) {
                            if !out.contains(&s) {
                                out.push(s);
                            }
                        }
                    }
                }
                Ok(out)
            }
            _ => Ok(vec![]),
        }
    }

    fn predicates_match(&mut self, domain: PredicateRef, range: PredicateRef) -> Result<bool> {
        let (d, r) = (self.domain_predicate(domain)?, self.range_predicate(range)?);
        if !d.is_derived() && !r.is_derived() {
            return Ok(d.name() == r.name() && d.arity() == r.arity());
        }
        match self.criteria {
            Some(criteria) => criteria.predicates_match(self, domain, range),
            None => {
                let predicate = if d.is_derived() { d.name() } else { r.name() };
                Err(AnalysisError::DerivedLiteralWithoutCriteria { predicate })
            }
        }
    }
}

/// `sub` extended so that `domain` maps onto `range` position by position.
fn extend(sub: &Substitution, domain: &[Term], range: &[Term]) -> Option<Substitution> {
    if domain.len() != range.len() {
        return None;
    }
    let mut out = sub.clone();
    for (d, r) in domain.iter().zip(range) {
        let consistent = match d {
            Term::Variable(v) => out.bind(*v, *r),
            Term::Constant(_) => d == r,
        };
        if !consistent {
            return None;
        }
    }
    Some(out)
}
