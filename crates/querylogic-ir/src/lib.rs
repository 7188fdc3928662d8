//! # QueryLogic IR
//!
//! **Propositional filter terms for search federation**
//!
//! This crate provides the term algebra used to build, compare and simplify
//! filter expressions before they are sent to the query engine or evaluated
//! locally against already-fetched documents.
//!
//! ## Core Components
//!
//! ### Terms ([`Term`])
//! - **Literals** ([`Literal`]): a field and a value that the field's string
//!   form must fully match as a pattern, or the [`CATCH_ALL`] presence test
//! - **Conjunction / Disjunction**: ordered operand lists; the empty
//!   conjunction is always true, the empty disjunction never true
//! - **Negation**: exactly one operand
//!
//! Terms are immutable values with structural equality, a hash code consistent
//! with it, and a [`weight`](Term::weight) used as a query cost proxy.
//!
//! ### Serialization
//! [`Term`] implements `Display` producing the query-engine string, e.g.
//! `!(f:"x" AND g:"y")`. [`VersionedTerm`] adds versioned JSON storage.
//!
//! ### Matching
//! [`Term::matches`] evaluates a term against any [`DocumentView`]. Missing
//! fields never match.
//!
//! ### Rewriting ([`RewriteEngine`])
//! Bottom-up application of propositional identities (double negation,
//! weight-guarded De Morgan, identity and annihilation of the constants,
//! flattening, deduplication, single-operand collapse) producing an
//! equivalent term that is never heavier.
//!
//! ## Quick Start
//!
//! ```rust
//! use querylogic_ir::{Document, Term};
//!
//! let filter = Term::negate(Term::and(vec![
//!     Term::literal("f", "x").unwrap(),
//!     Term::literal("g", "y").unwrap(),
//! ]));
//! assert_eq!(filter.to_string(), r#"!(f:"x" AND g:"y")"#);
//!
//! let doc = Document::new().with_field("f", "x");
//! assert!(filter.matches(&doc));
//!
//! let lighter = filter.lightest_rewrite();
//! assert!(lighter.weight() <= filter.weight());
//! assert_eq!(lighter.matches(&doc), filter.matches(&doc));
//! ```
//!
//! ## Architecture
//!
//! - **field**: schema field handles
//! - **document**: document access and an in-memory document
//! - **term**: the term algebra
//! - **display**: query-string serialization
//! - **[`rewrite`]**: the rewrite engine, its configuration and statistics
//! - **[`serialization`]**: versioned JSON format
//! - **[`util`]**: statistics and pretty printing
//! - **error**: error types

mod display;
mod document;
mod error;
mod field;
pub mod rewrite;
pub mod serialization;
mod term;
pub mod util;


pub use display::MATCH_ALL;
pub use document::{Document, DocumentView, FieldValue};
pub use error::{LogicError, Result};
pub use field::FieldKey;
pub use rewrite::{RewriteConfig, RewriteEngine, RewriteStats, Rule};
pub use serialization::{VersionedTerm, FORMAT_VERSION};
pub use term::{Literal, Term, TermKind, CATCH_ALL};
pub use util::{pretty_print_term, TermStats};
