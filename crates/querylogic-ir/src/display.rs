//! Query-string serialization of terms.
//!
//! The output is handed to the query engine verbatim:
//!
//! ```text
//! literal     := name ':' '"' value '"'
//! negation    := '!' '(' term ')'
//! conjunction := term (' AND ' term)*
//! disjunction := term (' OR ' term)*
//! ```
//!
//! A connective operand is parenthesized when its kind differs from its
//! parent's. The identity elements serialize as the match-all query and its
//! negation.

use std::fmt;

use crate::term::{Term, TermKind};

/// Query selecting every document.
pub const MATCH_ALL: &str = "*:*";

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Term::Literal(literal) => write!(f, "{}", literal),
            Term::Conjunction(operands) if operands.is_empty() => f.write_str(MATCH_ALL),
            Term::Disjunction(operands) if operands.is_empty() => write!(f, "!({})", MATCH_ALL),
            Term::Conjunction(operands) => {
                write_operands(f, TermKind::Conjunction, operands, " AND ")
            }
            Term::Disjunction(operands) => {
                write_operands(f, TermKind::Disjunction, operands, " OR ")
            }
            Term::Negation(child) => write!(f, "!({})", child),
        }
    }
}

fn write_operands(
    f: &mut fmt::Formatter<'_>,
    parent: TermKind,
    operands: &[Term],
    separator: &str,
) -> fmt::Result {
    for (i, operand) in operands.iter().enumerate() {
        if i > 0 {
            f.write_str(separator)?;
        }
        if needs_parens(parent, operand) {
            write!(f, "({})", operand)?;
        } else {
            write!(f, "{}", operand)?;
        }
    }
    Ok(())
}

fn needs_parens(parent: TermKind, operand: &Term) -> bool {
    match operand {
        Term::Conjunction(children) | Term::Disjunction(children) => {
            !children.is_empty() && operand.kind() != parent
        }
        Term::Literal(_) | Term::Negation(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lit(key: &str, value: &str) -> Term {
        Term::literal(key, value).unwrap()
    }

    #[test]
    fn test_negated_conjunction() {
        let term = Term::negate(Term::and(vec![lit("f", "x"), lit("g", "y")]));
        assert_eq!(term.to_string(), r#"!(f:"x" AND g:"y")"#);
    }

    #[test]
    fn test_negated_literal() {
        assert_eq!(Term::negate(lit("f", "x")).to_string(), r#"!(f:"x")"#);
    }

    #[test]
    fn test_mixed_precedence() {
        let term = Term::and(vec![
            lit("a", "1"),
            Term::or(vec![lit("b", "2"), lit("c", "3")]),
            Term::negate(lit("d", "4")),
        ]);
        assert_eq!(
            term.to_string(),
            r#"a:"1" AND (b:"2" OR c:"3") AND !(d:"4")"#
        );

        let term = Term::or(vec![
            Term::and(vec![lit("a", "1"), lit("b", "2")]),
            lit("c", "3"),
        ]);
        assert_eq!(term.to_string(), r#"(a:"1" AND b:"2") OR c:"3""#);
    }

    #[test]
    fn test_same_kind_operands_are_not_parenthesized() {
        let term = Term::and(vec![
            lit("a", "1"),
            Term::and(vec![lit("b", "2"), lit("c", "3")]),
        ]);
        assert_eq!(term.to_string(), r#"a:"1" AND b:"2" AND c:"3""#);
    }

    #[test]
    fn test_identity_elements() {
        assert_eq!(Term::always().to_string(), "*:*");
        assert_eq!(Term::never().to_string(), "!(*:*)");
        assert_eq!(
            Term::or(vec![lit("a", "1"), Term::always()]).to_string(),
            r#"a:"1" OR *:*"#
        );
    }

    #[test]
    fn test_single_operand() {
        assert_eq!(Term::and(vec![lit("a", "1")]).to_string(), r#"a:"1""#);
    }
}
