//! Relationship endpoint parsing
//!
//! An endpoint is the text on one side of a relationship marker, e.g.
//! `Customer "1"` or `"0..*" Order`. It carries a class name plus optional
//! multiplicity and relationship-kind glyphs (`o`, `*`, `<`, `>`, `|`).

use chumsky::prelude::*;

use super::database::Multiplicity;
use crate::core::chumsky_utils::{bare_word, inline_whitespace, quoted_string};

/// Characters that decorate the marker end of an endpoint
const KIND_GLYPHS: &[char] = &['o', '*', '<', '>', '|'];

/// Glyphs that may be written stuck to a class name (`o` may not, it ends names)
const ATTACHED_GLYPHS: &[char] = &['*', '<', '>', '|'];

/// Which side of the relationship marker an endpoint was written on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

/// A bare class name with the multiplicity written next to it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    pub name: String,
    pub multiplicity: Option<Multiplicity>,
}

impl Endpoint {
    /// The written multiplicity, or `1` when there is none
    pub fn multiplicity_or_one(&self) -> Multiplicity {
        self.multiplicity.clone().unwrap_or_default()
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Piece {
    Quoted(String),
    Word(String),
}

fn pieces_parser<'src>() -> impl Parser<'src, &'src str, Vec<Piece>> {
    let piece = quoted_string()
        .map(Piece::Quoted)
        .or(bare_word().map(Piece::Word));

    inline_whitespace()
        .ignore_then(piece.then_ignore(inline_whitespace()).repeated().collect())
        .then_ignore(end())
}

fn is_glyph_word(word: &str) -> bool {
    !word.is_empty() && word.chars().all(|c| KIND_GLYPHS.contains(&c))
}

/// Unquoted cardinalities: digits, `*`, ranges like `0..1`, `n` and `N`
fn is_bare_multiplicity(word: &str) -> bool {
    matches!(word, "n" | "N" | "*")
        || (word.chars().any(|c| c.is_ascii_digit())
            && word.chars().all(|c| c.is_ascii_digit() || c == '.' || c == '*'))
}

/// Parse one endpoint into a class name and optional multiplicity
///
/// Returns `None` when no single class name remains after removing the
/// decoration.
pub fn parse_endpoint(text: &str, side: Side) -> Option<Endpoint> {
    let mut pieces = pieces_parser().parse(text).into_result().ok()?;

    // Glyphs only ever sit on the end facing the marker. A lone `*` set apart
    // from the marker by whitespace is a multiplicity, not a glyph.
    let (marker_end, touches_marker) = match side {
        Side::Left => (
            pieces.len().checked_sub(1),
            !text.ends_with(char::is_whitespace),
        ),
        Side::Right => (
            (!pieces.is_empty()).then_some(0),
            !text.starts_with(char::is_whitespace),
        ),
    };
    if let Some(index) = marker_end {
        let stripped = match &pieces[index] {
            Piece::Word(word) if is_glyph_word(word) => {
                (touches_marker || !is_bare_multiplicity(word)).then(String::new)
            }
            Piece::Word(word) => Some(
                match side {
                    Side::Left => word.trim_end_matches(ATTACHED_GLYPHS),
                    Side::Right => word.trim_start_matches(ATTACHED_GLYPHS),
                }
                .to_string(),
            ),
            Piece::Quoted(_) => None,
        };
        match stripped {
            Some(word) if word.is_empty() => {
                pieces.remove(index);
            }
            Some(word) => pieces[index] = Piece::Word(word),
            None => {}
        }
    }

    let mut multiplicity = None;
    let mut words = Vec::new();
    for piece in pieces {
        match piece {
            Piece::Quoted(text) => {
                if multiplicity.is_none() && !text.is_empty() {
                    multiplicity = Some(Multiplicity::new(text));
                }
            }
            Piece::Word(word) => words.push(word),
        }
    }

    if words.len() > 1 {
        if let Some(index) = words.iter().position(|w| is_bare_multiplicity(w)) {
            let word = words.remove(index);
            multiplicity.get_or_insert(Multiplicity::new(word));
        }
    }

    match <[String; 1]>::try_from(words) {
        Ok([name]) => Some(Endpoint { name, multiplicity }),
        Err(_) => None,
    }
}
