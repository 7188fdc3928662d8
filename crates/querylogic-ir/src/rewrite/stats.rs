//! Statistics collected while rewriting.

use std::collections::HashMap;
use std::fmt;

/// Identities applied by the rewrite engine.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Rule {
    /// `NOT(NOT x) → x`
    DoubleNegation,
    /// `NOT(true) → false`, `NOT(false) → true`
    NegatedConstant,
    /// `NOT(AND(a, b)) → OR(NOT a, NOT b)` and its dual
    DeMorgan,
    /// Drop true operands of AND and false operands of OR
    Identity,
    /// AND containing false is false, OR containing true is true
    Annihilation,
    /// Merge nested operands of the same connective
    Flatten,
    /// Drop repeated operands
    Deduplicate,
    /// Sort operands into canonical order
    Reorder,
    /// A connective with one operand is that operand
    SingleOperand,
}

impl Rule {
    pub fn name(&self) -> &'static str {
        match self {
            Rule::DoubleNegation => "double_negation",
            Rule::NegatedConstant => "negated_constant",
            Rule::DeMorgan => "de_morgan",
            Rule::Identity => "identity",
            Rule::Annihilation => "annihilation",
            Rule::Flatten => "flatten",
            Rule::Deduplicate => "deduplicate",
            Rule::Reorder => "reorder",
            Rule::SingleOperand => "single_operand",
        }
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Statistics about a rewriting session.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RewriteStats {
    /// Weight of the input term
    pub initial_weight: usize,
    /// Weight of the rewritten term
    pub final_weight: usize,
    /// Local simplification passes over all nodes
    pub iterations: usize,
    /// Per-rule application counts
    pub rule_counts: HashMap<Rule, usize>,
    /// Whether some node hit the iteration limit
    pub fuse_tripped: bool,
}

impl RewriteStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn record(&mut self, rule: Rule) {
        *self.rule_counts.entry(rule).or_insert(0) += 1;
    }

    /// Fold the counters of a nested session into this one.
    pub(crate) fn absorb(&mut self, other: RewriteStats) {
        self.iterations += other.iterations;
        self.fuse_tripped |= other.fuse_tripped;
        for (rule, count) in other.rule_counts {
            *self.rule_counts.entry(rule).or_insert(0) += count;
        }
    }

    /// Number of times `rule` fired.
    pub fn count(&self, rule: Rule) -> usize {
        self.rule_counts.get(&rule).copied().unwrap_or(0)
    }

    pub fn total_applications(&self) -> usize {
        self.rule_counts.values().sum()
    }

    pub fn weight_reduction(&self) -> usize {
        self.initial_weight.saturating_sub(self.final_weight)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_and_count() {
        let mut stats = RewriteStats::new();
        stats.record(Rule::Flatten);
        stats.record(Rule::Flatten);
        stats.record(Rule::DeMorgan);
        assert_eq!(stats.count(Rule::Flatten), 2);
        assert_eq!(stats.count(Rule::DeMorgan), 1);
        assert_eq!(stats.count(Rule::Reorder), 0);
        assert_eq!(stats.total_applications(), 3);
        assert_eq!(stats.rule_counts.get(&Rule::Flatten), Some(&2));
        assert_eq!(stats.rule_counts.len(), 2);
    }

    #[test]
    fn test_absorb() {
        let mut outer = RewriteStats::new();
        outer.record(Rule::Identity);
        outer.iterations = 2;

        let mut inner = RewriteStats::new();
        inner.record(Rule::Identity);
        inner.record(Rule::DoubleNegation);
        inner.iterations = 3;
        inner.fuse_tripped = true;

        outer.absorb(inner);
        assert_eq!(outer.iterations, 5);
        assert_eq!(outer.count(Rule::Identity), 2);
        assert_eq!(outer.count(Rule::DoubleNegation), 1);
        assert!(outer.fuse_tripped);
    }

    #[test]
    fn test_weight_reduction() {
        let stats = RewriteStats {
            initial_weight: 7,
            final_weight: 3,
            ..Default::default()
        };
        assert_eq!(stats.weight_reduction(), 4);
    }
}
