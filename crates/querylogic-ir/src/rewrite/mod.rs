//! Weight-minimizing term rewriting.
//!
//! The engine rewrites a term bottom-up: every operand is rewritten first,
//! then a fixed set of propositional identities is applied to the rebuilt node
//! until nothing changes:
//!
//! - double negation: `NOT(NOT x) → x`
//! - negated constants: `NOT(true) → false`, `NOT(false) → true`
//! - De Morgan: `NOT(AND(a, b)) → OR(NOT a, NOT b)` and its dual, only when the
//!   rewritten result is strictly lighter
//! - identity: true operands of AND and false operands of OR are dropped
//! - annihilation: AND with a false operand is false, OR with a true operand
//!   is true
//! - flattening of nested AND/AND and OR/OR
//! - duplicate elimination, keeping first occurrences
//! - canonical operand order (see [`RewriteConfig::canonical_order`])
//! - single-operand collapse
//!
//! No rule increases weight, so the local loop converges; `max_iterations`
//! only guards against a rule combination that fails to.
//!
//! # Example
//!
//! ```rust
//! use querylogic_ir::{RewriteEngine, Term};
//!
//! let a = Term::literal("host_s", "example\\.org").unwrap();
//! let term = Term::and(vec![a.clone(), Term::and(vec![a.clone(), Term::always()])]);
//!
//! let (rewritten, stats) = RewriteEngine::default().rewrite(&term);
//! assert_eq!(rewritten, a);
//! assert_eq!(stats.final_weight, 1);
//! ```

mod config;
mod stats;

use std::collections::HashSet;

use tracing::{debug, trace, warn};

use crate::term::Term;

pub use config::RewriteConfig;
pub use stats::{RewriteStats, Rule};

/// The two n-ary connectives, as seen by the rewrite rules.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Connective {
    And,
    Or,
}

impl Connective {
    fn of(term: &Term) -> Option<Self> {
        match term {
            Term::Conjunction(_) => Some(Connective::And),
            Term::Disjunction(_) => Some(Connective::Or),
            Term::Literal(_) | Term::Negation(_) => None,
        }
    }

    fn dual(self) -> Self {
        match self {
            Connective::And => Connective::Or,
            Connective::Or => Connective::And,
        }
    }

    /// Operand that can be dropped without changing the result.
    fn is_identity(self, term: &Term) -> bool {
        match self {
            Connective::And => term.is_always(),
            Connective::Or => term.is_never(),
        }
    }

    /// Operand that decides the result on its own.
    fn is_absorbing(self, term: &Term) -> bool {
        match self {
            Connective::And => term.is_never(),
            Connective::Or => term.is_always(),
        }
    }

    fn build(self, operands: Vec<Term>) -> Term {
        match self {
            Connective::And => Term::Conjunction(operands),
            Connective::Or => Term::Disjunction(operands),
        }
    }
}

/// Rewrites terms into equivalent terms of minimal or equal weight.
#[derive(Clone, Debug, Default)]
pub struct RewriteEngine {
    config: RewriteConfig,
}

impl RewriteEngine {
    pub fn new(config: RewriteConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RewriteConfig {
        &self.config
    }

    /// Rewrite `term`, returning the result and statistics about the session.
    ///
    /// The result matches exactly the same documents as `term` and its weight
    /// is never greater.
    pub fn rewrite(&self, term: &Term) -> (Term, RewriteStats) {
        let mut stats = RewriteStats::new();
        stats.initial_weight = term.weight();

        let rewritten = self.rewrite_term(term, &mut stats);
        stats.final_weight = rewritten.weight();

        debug!(
            initial_weight = stats.initial_weight,
            final_weight = stats.final_weight,
            iterations = stats.iterations,
            applications = stats.total_applications(),
            "rewrote term"
        );
        (rewritten, stats)
    }

    fn rewrite_term(&self, term: &Term, stats: &mut RewriteStats) -> Term {
        let rebuilt = match term {
            Term::Literal(_) => return term.clone(),
            Term::Conjunction(operands) => Term::Conjunction(self.rewrite_operands(operands, stats)),
            Term::Disjunction(operands) => Term::Disjunction(self.rewrite_operands(operands, stats)),
            Term::Negation(child) => Term::negate(self.rewrite_term(child, stats)),
        };
        self.fixpoint(rebuilt, stats)
    }

    fn rewrite_operands(&self, operands: &[Term], stats: &mut RewriteStats) -> Vec<Term> {
        operands
            .iter()
            .map(|operand| self.rewrite_term(operand, stats))
            .collect()
    }

    /// Apply local rules to a node whose operands are already rewritten.
    fn fixpoint(&self, mut current: Term, stats: &mut RewriteStats) -> Term {
        for _ in 0..self.config.max_iterations {
            stats.iterations += 1;
            match self.simplify(&current, stats) {
                Some(next) => current = next,
                None => return current,
            }
        }
        warn!(
            max_iterations = self.config.max_iterations,
            term = %current,
            "rewrite iteration limit reached"
        );
        stats.fuse_tripped = true;
        current
    }

    /// One local pass; `None` when no rule changes the node.
    fn simplify(&self, term: &Term, stats: &mut RewriteStats) -> Option<Term> {
        match term {
            Term::Literal(_) => None,
            Term::Negation(child) => self.simplify_negation(child, stats),
            Term::Conjunction(operands) => {
                self.simplify_operands(Connective::And, operands, stats)
            }
            Term::Disjunction(operands) => self.simplify_operands(Connective::Or, operands, stats),
        }
    }

    fn simplify_negation(&self, child: &Term, stats: &mut RewriteStats) -> Option<Term> {
        if let Term::Negation(inner) = child {
            fire(stats, Rule::DoubleNegation);
            return Some(inner.as_ref().clone());
        }
        if child.is_always() {
            fire(stats, Rule::NegatedConstant);
            return Some(Term::never());
        }
        if child.is_never() {
            fire(stats, Rule::NegatedConstant);
            return Some(Term::always());
        }

        let connective = Connective::of(child)?;
        if !self.config.de_morgan {
            return None;
        }

        let mut scratch = RewriteStats::new();
        let negated = child
            .children()
            .iter()
            .map(|operand| self.fixpoint(Term::negate(operand.clone()), &mut scratch))
            .collect();
        let candidate = self.fixpoint(connective.dual().build(negated), &mut scratch);

        let current_weight = 1 + child.weight();
        if candidate.weight() < current_weight {
            stats.absorb(scratch);
            fire(stats, Rule::DeMorgan);
            Some(candidate)
        } else {
            trace!(
                current_weight,
                candidate_weight = candidate.weight(),
                "declined de_morgan"
            );
            None
        }
    }

    fn simplify_operands(
        &self,
        connective: Connective,
        operands: &[Term],
        stats: &mut RewriteStats,
    ) -> Option<Term> {
        let mut changed = false;
        let mut flat = Vec::with_capacity(operands.len());

        for operand in operands {
            if connective.is_absorbing(operand) {
                fire(stats, Rule::Annihilation);
                return Some(operand.clone());
            }
            if connective.is_identity(operand) {
                fire(stats, Rule::Identity);
                changed = true;
            } else if Connective::of(operand) == Some(connective) {
                fire(stats, Rule::Flatten);
                flat.extend(operand.children().iter().cloned());
                changed = true;
            } else {
                flat.push(operand.clone());
            }
        }

        let mut seen = HashSet::with_capacity(flat.len());
        let mut unique = Vec::with_capacity(flat.len());
        for operand in flat {
            if seen.insert(operand.clone()) {
                unique.push(operand);
            } else {
                fire(stats, Rule::Deduplicate);
                changed = true;
            }
        }

        if self.config.canonical_order && !unique.windows(2).all(|pair| pair[0] <= pair[1]) {
            unique.sort();
            fire(stats, Rule::Reorder);
            changed = true;
        }

        if unique.len() == 1 {
            fire(stats, Rule::SingleOperand);
            return unique.pop();
        }

        changed.then(|| connective.build(unique))
    }
}

fn fire(stats: &mut RewriteStats, rule: Rule) {
    trace!(rule = rule.name(), "rewrite rule fired");
    stats.record(rule);
}
