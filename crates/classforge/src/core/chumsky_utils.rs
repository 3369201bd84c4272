//! Shared chumsky parser utilities for diagram parsing
//!
//! This module provides common parser combinators used by the diagram parsers.

use chumsky::prelude::*;

/// Parse inline whitespace only (spaces and tabs, no newlines).
pub fn inline_whitespace<'src>() -> impl Parser<'src, &'src str, ()> + Clone {
    just(' ').or(just('\t')).repeated().ignored()
}

/// Parse a double-quoted string, yielding its trimmed contents.
///
/// Mermaid writes cardinalities and labels this way: `"1"`, `"0..*"`.
pub fn quoted_string<'src>() -> impl Parser<'src, &'src str, String> + Clone {
    just('"')
        .ignore_then(none_of('"').repeated().to_slice())
        .then_ignore(just('"'))
        .map(|s: &str| s.trim().to_string())
}

/// Parse a run of characters up to the next whitespace or quote.
pub fn bare_word<'src>() -> impl Parser<'src, &'src str, String> + Clone {
    none_of(" \t\"")
        .repeated()
        .at_least(1)
        .to_slice()
        .map(|s: &str| s.to_string())
}
