use std::fmt::Display;

use itertools::Itertools;

use crate::cube::Face;

/// A single turn: which face, how many layers in, and which way.
///
/// `face` is `None` when the text it came from named no face, or more than one;
/// such a move changes nothing when applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    pub face: Option<Face>,
    /// 0 turns the outer layer along with the face itself; `k` turns only the
    /// slice `k` layers in
    pub depth: usize,
    pub clockwise: bool,
}

impl Move {
    pub fn new(face: Face, depth: usize, clockwise: bool) -> Move {
        Move {
            face: Some(face),
            depth,
            clockwise,
        }
    }

    /// Read a move written as `[<layer>]<face>[']`, e.g. `U`, `2U`, `R'`, `3D'`.
    ///
    /// This never fails. Text that does not name exactly one face gives a move
    /// with no face, which does nothing when applied.
    pub fn parse(text: &str) -> Move {
        let clockwise = !text.ends_with('\'');

        // Layers are numbered from 1 at the surface
        let depth = first_number(text).map_or(0, |layer| layer.saturating_sub(1));

        let letters = text
            .chars()
            .filter(|c| c.is_alphabetic())
            .flat_map(char::to_lowercase)
            .collect::<String>();

        Move {
            face: letters.parse().ok(),
            depth,
            clockwise,
        }
    }

    /// The move that undoes this one.
    #[must_use]
    pub fn inverse(self) -> Move {
        Move {
            clockwise: !self.clockwise,
            ..self
        }
    }

    pub fn is_valid(&self) -> bool {
        self.face.is_some()
    }
}

impl Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.depth > 0 {
            write!(f, "{}", self.depth + 1)?;
        }

        match self.face {
            Some(face) => write!(f, "{face}")?,
            None => write!(f, "?")?,
        }

        if !self.clockwise {
            write!(f, "'")?;
        }

        Ok(())
    }
}

/// Parse a whitespace separated list of moves, e.g. `F R U R' U' F'`.
pub fn parse_sequence(text: &str) -> Vec<Move> {
    text.split_whitespace().map(Move::parse).collect()
}

pub fn format_sequence<'a>(moves: impl IntoIterator<Item = &'a Move>) -> String {
    moves.into_iter().join(" ")
}

// The first run of digits anywhere in the text. Runs too long for a `usize`
// saturate so that they still read as "deeper than any cube".
fn first_number(text: &str) -> Option<usize> {
    let start = text.find(|c: char| c.is_ascii_digit())?;
    let rest = &text[start..];
    let end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());

    Some(rest[..end].parse().unwrap_or(usize::MAX))
}
