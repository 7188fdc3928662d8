//! Property-based tests for QueryLogic IR
//!
//! These tests use proptest to validate the algebraic laws of the term
//! algebra and the guarantees of the rewrite engine over random terms and
//! documents.

use proptest::prelude::*;
use querylogic_ir::{Document, RewriteConfig, RewriteEngine, Term, CATCH_ALL};

// ===== Strategies for generating test data =====

fn arb_field() -> impl Strategy<Value = &'static str> {
    prop::sample::select(vec!["a", "b", "c"])
}

/// Values are patterns; keep them small so random documents hit them.
fn arb_value() -> impl Strategy<Value = &'static str> {
    prop::sample::select(vec!["x", "y", "x|y", "[xy]z?", ".*", "", CATCH_ALL])
}

fn arb_literal() -> impl Strategy<Value = Term> {
    (arb_field(), arb_value()).prop_map(|(field, value)| Term::literal(field, value).unwrap())
}

/// Generate random terms with bounded depth
fn arb_term(depth: u32) -> impl Strategy<Value = Term> {
    let leaf = prop_oneof![
        8 => arb_literal(),
        1 => Just(Term::always()),
        1 => Just(Term::never()),
    ];

    leaf.prop_recursive(depth, 64, 4, |inner| {
        prop_oneof![
            inner.clone().prop_map(Term::negate),
            prop::collection::vec(inner.clone(), 0..4).prop_map(|ops| Term::and(ops)),
            prop::collection::vec(inner, 0..4).prop_map(|ops| Term::or(ops)),
        ]
    })
}

fn arb_document() -> impl Strategy<Value = Document> {
    let values = prop::sample::select(vec!["x", "y", "xz", "z", ""]);
    prop::collection::btree_map(arb_field(), values, 0..=3).prop_map(|fields| {
        fields
            .into_iter()
            .fold(Document::new(), |doc, (name, value)| doc.with_field(name, value))
    })
}

// ===== Property Tests =====

proptest! {
    #[test]
    fn prop_rewrite_preserves_matching(
        term in arb_term(4),
        docs in prop::collection::vec(arb_document(), 1..8),
    ) {
        let rewritten = term.lightest_rewrite();
        for doc in &docs {
            prop_assert_eq!(term.matches(doc), rewritten.matches(doc));
        }
    }

    #[test]
    fn prop_rewrite_never_heavier(term in arb_term(4)) {
        prop_assert!(term.lightest_rewrite().weight() <= term.weight());
    }

    #[test]
    fn prop_rewrite_is_idempotent(term in arb_term(4)) {
        let once = term.lightest_rewrite();
        prop_assert_eq!(once.lightest_rewrite(), once);
    }

    #[test]
    fn prop_order_preserving_rewrite_is_sound(
        term in arb_term(3),
        doc in arb_document(),
    ) {
        let engine = RewriteEngine::new(RewriteConfig::default().without_canonical_order());
        let (rewritten, stats) = engine.rewrite(&term);
        prop_assert!(rewritten.weight() <= term.weight());
        prop_assert_eq!(term.matches(&doc), rewritten.matches(&doc));
        prop_assert!(!stats.fuse_tripped);
    }

    #[test]
    fn prop_clone_equals_original(term in arb_term(3)) {
        let copy = term.clone();
        prop_assert_eq!(copy.hash_code(), term.hash_code());
        prop_assert_eq!(copy, term);
    }

    #[test]
    fn prop_equal_terms_hash_equal(a in arb_term(2), b in arb_term(2)) {
        if a == b {
            prop_assert_eq!(a.hash_code(), b.hash_code());
        }
        let (ra, rb) = (a.lightest_rewrite(), b.lightest_rewrite());
        if ra == rb {
            prop_assert_eq!(ra.hash_code(), rb.hash_code());
        }
    }

    #[test]
    fn prop_equivalent_terms_match_alike(
        a in arb_term(2),
        b in arb_term(2),
        doc in arb_document(),
    ) {
        if a.equivalent(&b) {
            prop_assert_eq!(a.matches(&doc), b.matches(&doc));
        }
    }

    #[test]
    fn prop_double_negation(literal in arb_literal(), doc in arb_document()) {
        let nn = Term::negate(Term::negate(literal.clone()));
        prop_assert_eq!(nn.matches(&doc), literal.matches(&doc));
        prop_assert_eq!(nn.lightest_rewrite(), literal);
    }

    #[test]
    fn prop_identity_elements(doc in arb_document()) {
        prop_assert!(Term::always().matches(&doc));
        prop_assert!(!Term::never().matches(&doc));
    }

    #[test]
    fn prop_serialization_is_balanced(term in arb_term(4)) {
        let query = term.to_string();
        prop_assert_eq!(query.matches('(').count(), query.matches(')').count());
        prop_assert_eq!(query.matches('"').count() % 2, 0);
    }

    #[test]
    fn prop_negation_complements(term in arb_term(3), doc in arb_document()) {
        let negated = Term::negate(term.clone());
        prop_assert_ne!(negated.matches(&doc), term.matches(&doc));
        prop_assert_eq!(negated.lightest_rewrite().matches(&doc), !term.matches(&doc));
    }
}
