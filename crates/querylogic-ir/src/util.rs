//! Term statistics and pretty printing.

use crate::term::Term;

/// Pretty-print a term as an indented tree, one node per line.
pub fn pretty_print_term(term: &Term) -> String {
    let mut buffer = String::new();
    pretty_print_inner(term, &mut buffer, 0);
    buffer
}

fn pretty_print_inner(term: &Term, buf: &mut String, indent: usize) {
    let spaces = "  ".repeat(indent);
    match term {
        Term::Literal(literal) => {
            buf.push_str(&format!("{}{}\n", spaces, literal));
        }
        Term::Conjunction(operands) if operands.is_empty() => {
            buf.push_str(&format!("{}TRUE\n", spaces));
        }
        Term::Disjunction(operands) if operands.is_empty() => {
            buf.push_str(&format!("{}FALSE\n", spaces));
        }
        Term::Conjunction(operands) | Term::Disjunction(operands) => {
            let op = if matches!(term, Term::Conjunction(_)) {
                "AND"
            } else {
                "OR"
            };
            buf.push_str(&format!("{}{}\n", spaces, op));
            for operand in operands {
                pretty_print_inner(operand, buf, indent + 1);
            }
        }
        Term::Negation(child) => {
            buf.push_str(&format!("{}NOT\n", spaces));
            pretty_print_inner(child, buf, indent + 1);
        }
    }
}

/// Statistics about a Term.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TermStats {
    /// Rewrite cost of the whole term
    pub weight: usize,
    /// Maximum depth of the term tree
    pub max_depth: usize,
    /// Number of literals, catch-alls included
    pub literal_count: usize,
    /// Number of presence-only literals
    pub catch_all_count: usize,
    pub conjunction_count: usize,
    pub disjunction_count: usize,
    pub negation_count: usize,
    /// Number of distinct fields referenced
    pub field_count: usize,
}

impl TermStats {
    /// Compute statistics for a term.
    pub fn compute(term: &Term) -> Self {
        let mut stats = TermStats {
            weight: term.weight(),
            max_depth: term.depth(),
            field_count: term.fields().len(),
            ..Default::default()
        };
        stats.count(term);
        stats
    }

    fn count(&mut self, term: &Term) {
        match term {
            Term::Literal(literal) => {
                self.literal_count += 1;
                if literal.is_catch_all() {
                    self.catch_all_count += 1;
                }
            }
            Term::Conjunction(_) => self.conjunction_count += 1,
            Term::Disjunction(_) => self.disjunction_count += 1,
            Term::Negation(_) => self.negation_count += 1,
        }
        for child in term.children() {
            self.count(child);
        }
    }

    /// Number of connective nodes.
    pub fn operator_count(&self) -> usize {
        self.conjunction_count + self.disjunction_count + self.negation_count
    }
}
