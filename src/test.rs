use crate::{
    affected_positions, analyze_egds, are_unifiable, are_unifiable_atoms, clause_from_text,
    egds_are_non_conflicting, is_conflicting, is_guarded, is_linear, is_sticky, is_weakly_guarded,
    schema_from_text, sticky_marking, unify_atoms, unify_literals, AnalysisConfig, AnalysisError,
    Atom, BuiltIn, BuiltInOp, Clause, Comparison, DependencySchema, DerivedPolicy, Equivalence,
    EquivalenceAnalyzer, FunctionalDependency, HomomorphismFinder, Literal, LogicConstraint,
    PredicatePosition, Pretty, SameNameCriteria, SchemaBuilder, SchemaError, SplitHeads,
    Substitution, Term, Text, Tgd, Transform, Variable, ANALYSIS_CONFIG,
};
use std::collections::BTreeSet;

fn schema(source: &str) -> DependencySchema {
    schema_from_text(source).expect("valid schema")
}

fn literals(schema: &DependencySchema, source: &str) -> Vec<Literal> {
    clause_from_text(schema, source).expect("valid clause").literals().to_vec()
}

fn position(schema: &DependencySchema, name: &str, index: usize) -> PredicatePosition {
    let predicate = schema.predicate_named(name).expect("declared");
    PredicatePosition { predicate, index }
}

fn with_policy(derived_literals: DerivedPolicy) -> AnalysisConfig {
    AnalysisConfig { derived_literals }
}

//////////////////////////// unification ////////////////////////////

#[test]
fn unifier_makes_literals_equal() {
    let s = schema("P(x, y) -> Q(x).");
    let ls = literals(&s, "P(x, y), P(z, 'a')");
    let sub = unify_literals(&ls).expect("unifiable");
    assert_eq!(sub.apply_literal(&ls[0]), sub.apply_literal(&ls[1]));
    assert_eq!(sub.apply_term(Term::var("y")), Term::constant("a"));
}

#[test]
fn unifier_of_one_literal_is_identity() {
    let s = schema("P(x, y) -> Q(x).");
    let ls = literals(&s, "P(x, y)");
    assert!(unify_literals(&ls).expect("unifiable").is_identity());
}

#[test]
fn constant_clash_is_not_unifiable() {
    let s = schema("P(x, y) -> Q(x).");
    assert!(unify_literals(&literals(&s, "Q(1), Q(2)")).is_none());
    assert!(unify_literals(&literals(&s, "P(x, 'a'), P(x, 'b')")).is_none());
    assert!(unify_literals(&literals(&s, "P(x, x), P('a', 'b')")).is_none());
    assert!(unify_literals(&literals(&s, "P(x, y), Q(x)")).is_none());
    assert!(unify_literals(&literals(&s, "P(x, y), not P(x, y)")).is_none());
}

#[test]
fn chained_bindings_follow_along() {
    let s = schema("P(x, y) -> Q(x).");
    let ls = literals(&s, "P(x, y), P(y, z), P(z, 'c')");
    let sub = unify_literals(&ls).expect("unifiable");
    for v in ["x", "y", "z"] {
        assert_eq!(sub.apply_term(Term::var(v)), Term::constant("c"));
    }
}

#[test]
fn reversed_comparison_unifies() {
    let s = schema("P(x, y) -> Q(x).");
    let ls = literals(&s, "x < y, b > a");
    let sub = unify_literals(&ls).expect("unifiable");
    assert_eq!(sub.apply_term(Term::var("x")), sub.apply_term(Term::var("a")));
    assert_eq!(sub.apply_term(Term::var("y")), sub.apply_term(Term::var("b")));
}

#[test]
fn atoms_unify_like_positive_literals() {
    let s = schema("P(x, y) -> Q(x).");
    let ls = literals(&s, "P(x, 'a'), P('b', y), P(z, z)");
    let atoms: Vec<Atom> = ls.iter().filter_map(Literal::as_positive_atom).cloned().collect();
    let sub = unify_atoms(&atoms[..2]).expect("unifiable");
    assert_eq!(sub.apply_atom(&atoms[0]), sub.apply_atom(&atoms[1]));
    assert_eq!(sub.apply_term(Term::var("x")), Term::constant("b"));
    assert!(are_unifiable_atoms(&atoms[..2]));
    assert!(!are_unifiable_atoms(&atoms));
    assert!(unify_atoms(&[]).is_some_and(|s| s.is_empty()));
    assert!(are_unifiable(&ls[..2]));
    assert!(!are_unifiable(&ls));
}

#[test]
fn many_comparisons_fold_into_the_first() {
    let s = schema("P(x, y) -> Q(x).");
    let sub = unify_literals(&literals(&s, "x < y, a < b, c > d")).expect("unifiable");
    let image = |v: &str| sub.apply_term(Term::var(v));
    assert_eq!(image("x"), image("a"));
    assert_eq!(image("a"), image("d"));
    assert_eq!(image("y"), image("c"));
    assert_ne!(image("x"), image("y"));
    assert!(unify_literals(&literals(&s, "x < y, a < b, c < 'k', d <= e")).is_none());
    assert!(unify_literals(&literals(&s, "P(x, y), x < y")).is_none());
}

#[test]
fn built_ins_check_their_term_count() {
    let x = Term::var("x");
    assert!(matches!(
        BuiltIn::new(BuiltInOp::Comparison(Comparison::Lt), vec![x]),
        Err(SchemaError::BuiltInArity { expected: 2, found: 1, .. })
    ));
    assert!(matches!(
        BuiltIn::new(BuiltInOp::Boolean(true), vec![x]),
        Err(SchemaError::BuiltInArity { expected: 0, found: 1, .. })
    ));
    let custom = BuiltIn::new(BuiltInOp::Custom(Text::new("between")), vec![x, x, x]);
    assert_eq!(custom.map(|b| b.terms().len()), Ok(3));
    assert_eq!(
        BuiltIn::new(BuiltInOp::Comparison(Comparison::Eq), vec![x, x]),
        Ok(BuiltIn::comparison(x, Comparison::Eq, x))
    );
}

//////////////////////////// homomorphism ////////////////////////////

#[test]
fn homomorphism_is_reflexive() {
    let s = schema("P(x, y), not R(y), x < y -> Q(x).");
    let ls = literals(&s, "P(x, y), not R(y), x < y, Q('k')");
    let found = HomomorphismFinder::new(&s).find(&ls, &ls).expect("base only");
    assert!(found.expect("exists").is_identity());
}

#[test]
fn range_variables_are_not_bound() {
    let s = schema("P(x, y) -> Q(x).");
    let finder = HomomorphismFinder::new(&s);
    let general = literals(&s, "P(x, y)");
    let special = literals(&s, "P(u, u)");
    let sub = finder.find(&general, &special).expect("base only").expect("exists");
    assert_eq!(sub.get(Variable(Text::new("y"))), Some(Term::var("u")));
    assert!(finder.find(&special, &general).expect("base only").is_none());
}

#[test]
fn polarity_and_comparisons_are_respected() {
    let s = schema("P(x), not R(x) -> Q(x).");
    let finder = HomomorphismFinder::new(&s);
    let neg = literals(&s, "P(x), not R(x)");
    let pos = literals(&s, "P(u), R(u)");
    assert!(finder.find(&neg, &pos).expect("base only").is_none());

    let lt = literals(&s, "P(x), x < '3'");
    let gt = literals(&s, "P(u), '3' > u");
    assert!(finder.find(&lt, &gt).expect("base only").is_some());
}

#[test]
fn search_extends_the_initial_substitution() {
    let s = schema("P(x, y) -> Q(x).");
    let finder = HomomorphismFinder::new(&s);
    let domain = literals(&s, "P(x, y)");
    let range = literals(&s, "P(u, v), P(v, u)");
    let x = Variable(Text::new("x"));
    let initial: Substitution = [(x, Term::var("v"))].into_iter().collect();
    let found = finder.find_from(&domain, &range, &initial).expect("base only").expect("exists");
    assert_eq!(found.get(Variable(Text::new("y"))), Some(Term::var("u")));
    assert_eq!(found.get(x), Some(Term::var("v")));

    let pinned: Substitution = [(x, Term::constant("k"))].into_iter().collect();
    assert!(finder.find_from(&domain, &range, &pinned).expect("base only").is_none());
}

#[test]
fn search_between_two_schemas_matches_names() {
    let left = schema("P(x, y) -> Q(x).");
    let right = schema("R(x) -> P(x, x).");
    let finder = HomomorphismFinder::between(&left, &right);
    let domain = literals(&left, "P(x, y)");
    let range = literals(&right, "R(u), P(u, u)");
    let found = finder.find(&domain, &range).expect("base only").expect("exists");
    assert_eq!(found.get(Variable(Text::new("y"))), Some(Term::var("u")));
    assert!(finder.find(&literals(&left, "Q(x)"), &range).expect("base only").is_none());

    let analyzer = EquivalenceAnalyzer::new(finder);
    let same = literals(&right, "P(u, v)");
    assert_eq!(analyzer.are_equivalent(&domain, &same), Ok(Equivalence::Equivalent));
}

//////////////////////////// equivalence ////////////////////////////

#[test]
fn redundant_literal_is_equivalent() {
    let s = schema("P(x, y) -> Q(x).");
    let analyzer = EquivalenceAnalyzer::new(HomomorphismFinder::new(&s));
    let a = literals(&s, "P(x, y), P(x, z)");
    let b = literals(&s, "P(x, y)");
    assert_eq!(analyzer.are_equivalent(&a, &b), Ok(Equivalence::Equivalent));
    assert_eq!(analyzer.are_equivalent(&b, &a), Ok(Equivalence::Equivalent));
}

#[test]
fn conjunctive_queries_decide_inequivalence() {
    let s = schema("P(x, y) -> Q(x).");
    let analyzer = EquivalenceAnalyzer::new(HomomorphismFinder::new(&s));
    let a = literals(&s, "P(x, y)");
    let b = literals(&s, "P(x, x)");
    assert_eq!(analyzer.are_equivalent(&a, &b), Ok(Equivalence::NotEquivalent));
    assert_eq!(analyzer.are_equivalent(&b, &a), Ok(Equivalence::NotEquivalent));
}

#[test]
fn negation_leaves_equivalence_unknown() {
    let s = schema("P(x, y), not R(x) -> Q(x).");
    let analyzer = EquivalenceAnalyzer::new(HomomorphismFinder::new(&s));
    let a = literals(&s, "P(x, y), not R(x)");
    let b = literals(&s, "P(x, y)");
    let forward = analyzer.are_equivalent(&a, &b).expect("base only");
    assert_eq!(forward, Equivalence::Unknown);
    assert_eq!(forward.decided(), None);
    assert_eq!(analyzer.are_equivalent(&b, &a), Ok(forward));
}

#[test]
fn constraints_compare_by_body() {
    let s = schema("P(x, y) -> Q(x).");
    let constraint =
        |source: &str| LogicConstraint::new(clause_from_text(&s, source).expect("valid clause"));
    let a = constraint("P(x, y), Q(x)");
    let b = constraint("P(u, v), Q(u), P(u, w)");
    let c = constraint("P(x, x)");
    let finder = HomomorphismFinder::new(&s);
    assert!(finder.find_constraint(&a, &b).expect("base only").is_some());
    assert!(finder.find_constraint(&a, &c).expect("base only").is_none());

    let analyzer = EquivalenceAnalyzer::new(finder);
    assert_eq!(analyzer.are_equivalent_constraints(&a, &b), Ok(Equivalence::Equivalent));
    assert_eq!(analyzer.are_equivalent_constraints(&a, &c), Ok(Equivalence::NotEquivalent));
    assert_eq!(analyzer.are_equivalent_constraints(&c, &a), Ok(Equivalence::NotEquivalent));
}

//////////////////////////// derived literals ////////////////////////////

const DERIVED: &str = "
    D(x) :- P(x, y).
    E(u) :- P(u, w).
    D(x) -> Q(x).
    E(x) -> Q(x).
";

#[test]
fn derived_literal_needs_criteria() {
    let s = schema(DERIVED);
    let finder = HomomorphismFinder::new(&s);
    let err = finder.find(&literals(&s, "D(x)"), &literals(&s, "E(x)")).unwrap_err();
    assert!(matches!(err, AnalysisError::DerivedLiteralWithoutCriteria { .. }));

    let forbidden = EquivalenceAnalyzer::from_config(&s, &with_policy(DerivedPolicy::Forbidden));
    assert!(forbidden.are_equivalent(&literals(&s, "D(x)"), &literals(&s, "D(x)")).is_err());
}

#[test]
fn derived_literal_fails_whichever_side_it_is_on() {
    let s = schema("D(x) :- P(x, y).\nP(x, y) -> Q(x).");
    let (a, b) = (literals(&s, "Q(x), D(x)"), literals(&s, "P(x, x)"));
    let analyzer = EquivalenceAnalyzer::from_config(&s, &with_policy(DerivedPolicy::Forbidden));
    assert!(matches!(
        analyzer.are_equivalent(&a, &b),
        Err(AnalysisError::DerivedLiteralWithoutCriteria { .. })
    ));
    assert!(matches!(
        analyzer.are_equivalent(&b, &a),
        Err(AnalysisError::DerivedLiteralWithoutCriteria { .. })
    ));

    let finder = HomomorphismFinder::new(&s);
    for (domain, range) in [(&a, &b), (&b, &a)] {
        assert!(matches!(
            finder.find(domain, range),
            Err(AnalysisError::DerivedLiteralWithoutCriteria { .. })
        ));
    }
    let reordered = literals(&s, "D(x), Q(x)");
    assert_eq!(finder.find(&a, &b).unwrap_err(), finder.find(&reordered, &b).unwrap_err());
}

#[test]
fn same_name_criteria_only_matches_names() {
    let s = schema(DERIVED);
    let finder = HomomorphismFinder::new(&s).with_criteria(&SameNameCriteria);
    let analyzer = EquivalenceAnalyzer::new(finder);
    let (d, e) = (literals(&s, "D(x)"), literals(&s, "E(x)"));
    assert_eq!(analyzer.are_equivalent(&d, &d), Ok(Equivalence::Equivalent));
    assert_eq!(analyzer.are_equivalent(&d, &e), Ok(Equivalence::Unknown));
}

#[test]
fn rule_structural_criteria_compares_definitions() {
    let s = schema(DERIVED);
    let analyzer = EquivalenceAnalyzer::from_config(&s, &ANALYSIS_CONFIG);
    let (d, e) = (literals(&s, "D(x)"), literals(&s, "E(x)"));
    assert_eq!(analyzer.are_equivalent(&d, &e), Ok(Equivalence::Equivalent));

    let rule = |name: &str| {
        let predicate = s.predicate_named(name).and_then(|p| s.get(p)).expect("declared");
        &predicate.rules()[0]
    };
    assert_eq!(analyzer.are_equivalent_rules(rule("D"), rule("E")), Ok(Equivalence::Equivalent));
}

#[test]
fn mutually_recursive_definitions_terminate() {
    let s = schema(
        "
        A(x) :- A2(x).
        A2(x) :- A(x).
        B(x) :- B2(x).
        B2(x) :- B(x).
        ",
    );
    let analyzer = EquivalenceAnalyzer::from_config(&s, &with_policy(DerivedPolicy::RuleStructural));
    let (a, b) = (literals(&s, "A(x)"), literals(&s, "B(x)"));
    assert_eq!(analyzer.are_equivalent(&a, &b), Ok(Equivalence::Unknown));
    assert_eq!(analyzer.are_equivalent(&a, &a), Ok(Equivalence::Equivalent));
}

//////////////////////////// functional dependencies ////////////////////////////

#[test]
fn key_egd_becomes_functional_dependency() {
    let s = schema("E(i, x), E(i, y) -> x = y.");
    let analysis = analyze_egds(s.egds());
    assert!(analysis.other.is_empty());
    let [f] = analysis.functional.as_slice() else { panic!("{analysis:?}") };
    assert_eq!(f.fd.key(), &BTreeSet::from([0]));
    assert_eq!(f.fd.determined(), &BTreeSet::from([1]));
    assert!(f.fd.is_key_dependency());
    assert_eq!(f.sources.len(), 1);
}

#[test]
fn egds_with_one_key_accumulate() {
    let s = schema(
        "
        E(i, x, u), E(i, y, v) -> x = y.
        E(i, x, u), E(i, y, v) -> v = u.
        ",
    );
    let analysis = analyze_egds(s.egds());
    let [f] = analysis.functional.as_slice() else { panic!("{analysis:?}") };
    assert_eq!(f.fd.determined(), &BTreeSet::from([1, 2]));
    assert_eq!(f.sources.len(), 2);
    assert!(f.fd.is_key_dependency());
}

#[test]
fn other_egds_pass_through() {
    let s = schema(
        "
        E(i, x), F(i, y) -> x = y.
        E(i, x), E(x, y) -> x = y.
        E(i, x), E(i, 'a') -> x = i.
        ",
    );
    let analysis = analyze_egds(s.egds());
    assert!(analysis.functional.is_empty());
    assert_eq!(analysis.other.len(), 3);
}

#[test]
fn shared_variable_at_different_positions_is_not_functional() {
    let s = schema("E(i, x, y), E(i, z, x) -> y = x.");
    let analysis = analyze_egds(s.egds());
    assert!(analysis.functional.is_empty());
    assert_eq!(analysis.other.len(), 1);
}

//////////////////////////// separability ////////////////////////////

const KEY: &str = "E(i, x), E(i, y) -> x = y.\n";

fn conflicts(tgd: &str) -> bool {
    let s = schema(&format!("{KEY}{tgd}"));
    let fd = analyze_egds(s.egds()).functional.remove(0).fd;
    let tgd = s.tgds().next().expect("one tgd");
    let verdict = is_conflicting(tgd, &fd);
    assert_eq!(egds_are_non_conflicting(&s), !verdict);
    verdict
}

#[test]
fn existential_outside_key_does_not_conflict() {
    assert!(!conflicts("P(a) -> E(a, b)."));
    assert!(!conflicts("P(a) -> E(a, n), F(n)."));
}

#[test]
fn universal_outside_key_conflicts() {
    assert!(conflicts("P(a, c) -> E(b, c)."));
}

#[test]
fn constant_in_head_conflicts() {
    assert!(conflicts("P(a) -> E(a, 'k')."));
}

#[test]
fn shared_existential_across_fd_atoms_conflicts() {
    assert!(conflicts("P(a) -> E(a, n), E(m, n)."));
}

#[test]
fn repeated_existential_conflicts() {
    assert!(conflicts("P(a) -> E(n, n)."));
}

#[test]
fn person_key_examples() {
    let s = schema(
        "
        WorksIn(name, dept) -> Person(name, age).
        WorksIn(name, dept) -> Person4(name, age, x, x).
        ",
    );
    let tgds: Vec<&Tgd> = s.tgds().collect();
    let person = s.predicate_named("Person").expect("declared");
    let person4 = s.predicate_named("Person4").expect("declared");
    let fd = FunctionalDependency::new(person, [0], [1]).expect("valid");
    let fd4 = FunctionalDependency::new(person4, [0], [1, 2, 3]).expect("valid");
    assert!(!is_conflicting(tgds[0], &fd));
    assert!(is_conflicting(tgds[1], &fd4));
    assert!(FunctionalDependency::new(person, [0], [0]).is_none());
    assert!(FunctionalDependency::new(person, [0], [2]).is_none());
}

#[test]
fn non_key_dependency_is_conflicting() {
    let s = schema("E(i, x, u), E(i, y, v) -> x = y.\nP(a) -> E(a, n, m).");
    assert!(!egds_are_non_conflicting(&s));
}

//////////////////////////// languages ////////////////////////////

#[test]
fn existential_tgd_classification() {
    let s = schema("P(x) -> Q(x, y).\nR(x, y), S(y, z) -> T(x, z).");
    let tgds: Vec<&Tgd> = s.tgds().collect();
    assert_eq!(tgds[0].universal_variables().as_slice(), &[Variable(Text::new("x"))]);
    assert_eq!(tgds[0].existential_variables().as_slice(), &[Variable(Text::new("y"))]);
    assert!(tgds[0].is_linear() && tgds[0].is_guarded());
    assert!(!tgds[1].is_linear() && !tgds[1].is_guarded());
}

#[test]
fn linear_tgd_is_guarded() {
    let s = schema("P(x, y) -> Q(y, z).");
    assert_eq!(is_linear(&s), Ok(true));
    assert_eq!(is_guarded(&s), Ok(true));
    assert_eq!(is_weakly_guarded(&s), Ok(true));
    let tgd = s.tgds().next().expect("one tgd");
    assert_eq!(tgd.existential_variables().len(), 1);
    assert_eq!(tgd.frontier_variables().len(), 1);
}

#[test]
fn join_without_guard() {
    let s = schema("P(x, y), Q(y, z) -> R(x, z).");
    assert_eq!(is_linear(&s), Ok(false));
    assert_eq!(is_guarded(&s), Ok(false));
    assert_eq!(is_weakly_guarded(&s), Ok(true));
    assert_eq!(is_sticky(&s), Ok(false));

    let guarded = schema("G(x, y, z), Q(y, z) -> R(x, z).");
    assert_eq!(is_guarded(&guarded), Ok(true));
}

#[test]
fn weakly_guarded_needs_only_affected_variables() {
    let s = schema(
        "
        P(x) -> Q(x, y).
        Q(x, y), Q(y, z) -> S(x, z).
        ",
    );
    let affected = affected_positions(&s).expect("supported");
    assert_eq!(affected.len(), 2);
    assert!(affected.contains(&position(&s, "Q", 1)));
    assert!(affected.contains(&position(&s, "S", 1)));
    assert_eq!(is_guarded(&s), Ok(false));
    assert_eq!(is_weakly_guarded(&s), Ok(true));

    let unguarded = schema(
        "
        P(x) -> Q(x, y).
        Q(x, y), Q(z, w) -> S(y, w).
        ",
    );
    assert_eq!(is_weakly_guarded(&unguarded), Ok(false));
}

#[test]
fn sticky_marking_propagates_backwards() {
    let s = schema(
        "
        R(x, y), P(y, z) -> T(x, y, z).
        T(x, y, z) -> S(x, w).
        ",
    );
    let tgds: Vec<Tgd> = s.tgds().cloned().collect();
    let marking = sticky_marking(&tgds).expect("positive bodies");
    assert_eq!(marking.len(), 5);
    assert_eq!(marking.iter().filter(|p| p.tgd == 0).count(), 3);
    assert_eq!(is_sticky(&s), Ok(false));

    let sticky = schema("R(x, y), P(y, z) -> T(x, y, z).");
    assert_eq!(is_sticky(&sticky), Ok(true));
}

#[test]
fn sticky_marking_of_a_chain() {
    let s = schema("P(x, y) -> Q(x, y).\nQ(x, y) -> R(y).");
    let tgds: Vec<Tgd> = s.tgds().cloned().collect();
    let marking = sticky_marking(&tgds).expect("positive bodies");
    let marked: Vec<(usize, usize, usize)> =
        marking.iter().map(|p| (p.tgd, p.literal, p.index)).collect();
    assert_eq!(marked, vec![(1, 0, 0), (0, 0, 0)]);
    assert_eq!(marking.as_slice()[1].predicate, s.predicate_named("P").expect("declared"));
    assert_eq!(is_sticky(&s), Ok(true));
}

#[test]
fn negated_or_built_in_bodies_are_unsupported() {
    let negated = schema("P(x), not Q(x) -> R(x).");
    let compared = schema("P(x), x < '3' -> R(x).");
    for s in [&negated, &compared] {
        assert!(matches!(is_linear(s), Err(AnalysisError::Unsupported(_))));
        assert!(matches!(is_guarded(s), Err(AnalysisError::Unsupported(_))));
        assert!(matches!(is_weakly_guarded(s), Err(AnalysisError::Unsupported(_))));
        assert!(matches!(is_sticky(s), Err(AnalysisError::Unsupported(_))));
        assert!(matches!(affected_positions(s), Err(AnalysisError::Unsupported(_))));
    }
}

#[test]
fn conflicting_egds_fail_every_language() {
    let s = schema(
        "
        P(x, y) -> Q(x, y).
        P(x, y), Q(x, z) -> y = z.
        ",
    );
    assert_eq!(is_linear(&s), Ok(false));
    assert_eq!(is_guarded(&s), Ok(false));
    assert_eq!(is_weakly_guarded(&s), Ok(false));
    assert_eq!(is_sticky(&s), Ok(false));
}

//////////////////////////// schema ////////////////////////////

#[test]
fn predicates_of_another_schema_are_rejected() {
    let mut a = SchemaBuilder::new();
    let p = a.predicate("P", 1).expect("fresh");
    let mut b = SchemaBuilder::new();
    let q = b.predicate("P", 1).expect("fresh");
    assert_ne!(p, q);

    let body = Clause::new(vec![Atom::new(p, vec![Term::var("x")]).expect("arity").positive()])
        .expect("non-empty");
    let head = vec![Atom::new(q, vec![Term::var("x")]).expect("arity")];
    b.dependency(Tgd::new(body, head).expect("non-empty"));
    assert!(matches!(b.build(), Err(SchemaError::PredicateOutsideSchema { .. })));

    let built = a.build().expect("empty schema");
    assert!(built.get(q).is_none());
    assert!(built.get(p).is_some());
}

#[test]
fn sibling_builders_do_not_share_handles() {
    let base = schema("P(x) -> P(x).");
    let mut left = base.to_builder();
    let mut right = base.to_builder();
    let q = left.predicate("Q", 1).expect("fresh");
    let r = right.predicate("R", 1).expect("fresh");
    assert_ne!(q, r);

    let atom = |p| Atom::new(p, vec![Term::var("x")]).expect("arity");
    let body = Clause::new(vec![atom(r).positive()]).expect("non-empty");
    let tgd = Tgd::new(body, vec![atom(r)]).expect("non-empty");
    left.dependency(tgd.clone());
    assert!(matches!(left.build(), Err(SchemaError::PredicateOutsideSchema { .. })));

    right.dependency(tgd);
    let built = right.build().expect("own handles");
    let p = base.predicate_named("P").expect("declared");
    assert!(built.contains(p) && built.contains(r) && !built.contains(q));
    assert_eq!(built.predicate_named("P"), Some(p));
}

#[test]
fn builder_validates_shapes() {
    let mut b = SchemaBuilder::new();
    let p = b.predicate("P", 2).expect("fresh");
    assert!(matches!(b.predicate("P", 1), Err(SchemaError::DuplicatePredicate { .. })));
    assert_eq!(
        Atom::new(p, vec![Term::var("x")]).unwrap_err(),
        SchemaError::ArityMismatch { expected: 2, found: 1 }
    );
    assert_eq!(Clause::new(vec![]).unwrap_err(), SchemaError::EmptyBody);
    let body = Clause::new(vec![Atom::new(p, vec![Term::var("x"), Term::var("y")])
        .expect("arity")
        .positive()])
    .expect("non-empty");
    assert_eq!(Tgd::new(body, vec![]).unwrap_err(), SchemaError::EmptyHead);
}

#[test]
fn text_reader_reports_errors() {
    assert!(matches!(
        schema_from_text("P(x) -> P(x, y)."),
        Err(SchemaError::ArityMismatch { expected: 1, found: 2 })
    ));
    assert!(matches!(schema_from_text("P(x -> Q(x)."), Err(SchemaError::Parse(_))));
    let s = schema("P(x) -> Q(x).");
    assert!(matches!(
        clause_from_text(&s, "R(x)"),
        Err(SchemaError::UnknownPredicate { .. })
    ));
}

#[test]
fn schema_prints_back() {
    let s = schema("# comment\nD(x) :- P(x, y).\nP(x, y), not D(y) -> Q(y, z).\nQ(i, x), Q(i, y) -> x = y.");
    let printed = Pretty::new(&s, &s).to_string();
    assert_eq!(
        printed,
        "D(x) :- P(x, y).\nP(x, y), not D(y) -> Q(y, z).\nQ(i, x), Q(i, y) -> x = y.\n"
    );
    assert_eq!(schema_from_text(&printed).map(|t| t.dependencies().len()), Ok(2));
}

#[test]
fn split_heads_separates_independent_atoms() {
    let s = schema("P(x) -> Q(x, y), R(y), S(x).\nE(i, x), E(i, y) -> x = y.");
    let split = SplitHeads.transform(&s).expect("valid");
    let heads: Vec<usize> = split.tgds().map(|t| t.head().len()).collect();
    assert_eq!(heads, vec![2, 1]);
    assert_eq!(split.egds().count(), 1);
    let p = s.predicate_named("P").expect("declared");
    assert!(split.contains(p));
}
