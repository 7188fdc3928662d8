//! Filter terms: literals and the AND/OR/NOT connectives over them.

mod literal;

use std::collections::BTreeSet;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::slice;

use serde::{Deserialize, Serialize};

use crate::document::DocumentView;
use crate::error::Result;
use crate::field::FieldKey;
use crate::rewrite::RewriteEngine;

pub use literal::{Literal, CATCH_ALL};

/// Discriminant of a [`Term`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TermKind {
    Literal,
    Conjunction,
    Disjunction,
    Negation,
}

impl fmt::Display for TermKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TermKind::Literal => write!(f, "literal"),
            TermKind::Conjunction => write!(f, "conjunction"),
            TermKind::Disjunction => write!(f, "disjunction"),
            TermKind::Negation => write!(f, "negation"),
        }
    }
}

/// A node of a propositional filter expression.
///
/// Terms are immutable values. Equality is structural and order sensitive:
/// `a AND b` and `b AND a` are different terms, though their
/// [`lightest_rewrite`](Term::lightest_rewrite)s are equal.
///
/// An empty conjunction is the universal-true term and an empty disjunction
/// the universal-false term.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Term {
    Literal(Literal),
    Conjunction(Vec<Term>),
    Disjunction(Vec<Term>),
    Negation(Box<Term>),
}

impl Term {
    /// Literal term, see [`Literal::new`].
    pub fn literal(key: impl Into<FieldKey>, value: impl Into<String>) -> Result<Self> {
        Literal::new(key, value).map(Term::Literal)
    }

    /// Presence test on `key`.
    pub fn catch_all(key: impl Into<FieldKey>) -> Self {
        Term::Literal(Literal::catch_all(key))
    }

    pub fn and(operands: impl IntoIterator<Item = Term>) -> Self {
        Term::Conjunction(operands.into_iter().collect())
    }

    pub fn or(operands: impl IntoIterator<Item = Term>) -> Self {
        Term::Disjunction(operands.into_iter().collect())
    }

    pub fn negate(term: Term) -> Self {
        Term::Negation(Box::new(term))
    }

    /// The universal-true term (empty conjunction).
    pub fn always() -> Self {
        Term::Conjunction(Vec::new())
    }

    /// The universal-false term (empty disjunction).
    pub fn never() -> Self {
        Term::Disjunction(Vec::new())
    }

    /// Append an operand to a conjunction or disjunction.
    ///
    /// Returns `None` for literals and negations, which take no extra operands.
    pub fn with_operand(self, operand: Term) -> Option<Self> {
        match self {
            Term::Conjunction(mut operands) => {
                operands.push(operand);
                Some(Term::Conjunction(operands))
            }
            Term::Disjunction(mut operands) => {
                operands.push(operand);
                Some(Term::Disjunction(operands))
            }
            Term::Literal(_) | Term::Negation(_) => None,
        }
    }

    pub fn kind(&self) -> TermKind {
        match self {
            Term::Literal(_) => TermKind::Literal,
            Term::Conjunction(_) => TermKind::Conjunction,
            Term::Disjunction(_) => TermKind::Disjunction,
            Term::Negation(_) => TermKind::Negation,
        }
    }

    pub fn is_always(&self) -> bool {
        matches!(self, Term::Conjunction(operands) if operands.is_empty())
    }

    pub fn is_never(&self) -> bool {
        matches!(self, Term::Disjunction(operands) if operands.is_empty())
    }

    pub fn as_literal(&self) -> Option<&Literal> {
        match self {
            Term::Literal(literal) => Some(literal),
            _ => None,
        }
    }

    /// Direct sub-terms, in order.
    pub fn children(&self) -> &[Term] {
        match self {
            Term::Literal(_) => &[],
            Term::Conjunction(operands) | Term::Disjunction(operands) => operands,
            Term::Negation(child) => slice::from_ref(child.as_ref()),
        }
    }

    /// Rewrite cost: number of operators plus number of operands plus one.
    pub fn weight(&self) -> usize {
        match self {
            Term::Literal(literal) => literal.weight(),
            Term::Conjunction(operands) | Term::Disjunction(operands) => {
                1 + operands.iter().map(Term::weight).sum::<usize>()
            }
            Term::Negation(child) => 1 + child.weight(),
        }
    }

    /// Hash code consistent with `==`.
    ///
    /// Literals hash their key and value; composites sum their children, so
    /// permuted operand lists collide by construction.
    pub fn hash_code(&self) -> u64 {
        match self {
            Term::Literal(literal) => literal.hash_code(),
            Term::Conjunction(operands) | Term::Disjunction(operands) => operands
                .iter()
                .fold(0u64, |acc, t| acc.wrapping_add(t.hash_code())),
            Term::Negation(child) => child.hash_code(),
        }
    }

    /// Height of the term tree; leaves and empty connectives have depth 1.
    pub fn depth(&self) -> usize {
        1 + self.children().iter().map(Term::depth).max().unwrap_or(0)
    }

    /// Distinct field keys referenced anywhere in the term.
    pub fn fields(&self) -> BTreeSet<&FieldKey> {
        let mut fields = BTreeSet::new();
        self.collect_fields(&mut fields);
        fields
    }

    fn collect_fields<'a>(&'a self, acc: &mut BTreeSet<&'a FieldKey>) {
        match self {
            Term::Literal(literal) => {
                acc.insert(literal.key());
            }
            _ => {
                for child in self.children() {
                    child.collect_fields(acc);
                }
            }
        }
    }

    /// Evaluate the term against a document.
    ///
    /// Connectives evaluate their operands in order and stop at the first
    /// deciding one.
    pub fn matches<D: DocumentView + ?Sized>(&self, doc: &D) -> bool {
        match self {
            Term::Literal(literal) => literal.matches(doc),
            Term::Conjunction(operands) => operands.iter().all(|t| t.matches(doc)),
            Term::Disjunction(operands) => operands.iter().any(|t| t.matches(doc)),
            Term::Negation(child) => !child.matches(doc),
        }
    }

    /// Equivalent term of weight no greater than this one, using the default
    /// [`RewriteConfig`](crate::RewriteConfig).
    pub fn lightest_rewrite(&self) -> Term {
        RewriteEngine::default().rewrite(self).0
    }

    /// Whether both terms rewrite to the same canonical form.
    ///
    /// This is a sound but incomplete equivalence check: `true` implies both
    /// terms match the same documents.
    pub fn equivalent(&self, other: &Term) -> bool {
        self == other || self.lightest_rewrite() == other.lightest_rewrite()
    }
}

impl Hash for Term {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u64(self.hash_code());
    }
}

impl From<Literal> for Term {
    fn from(literal: Literal) -> Self {
        Term::Literal(literal)
    }
}
