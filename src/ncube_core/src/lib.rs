#![warn(clippy::pedantic)]

//! The state of an N×N×N cube and the engine that turns its faces and slices.
//!
//! Every sticker is marked with the [`Face`] it started on, so a new
//! [`CubeState`] is solved when each face holds only its own marker.

pub mod cube;
pub mod face_grid;
pub mod moves;

pub use cube::{ADJACENCY, CubeState, DEFAULT_SIDE_LENGTH, EdgeRef, Face, neighbor_cycle};
pub use face_grid::{FaceGrid, GridError, Side};
pub use moves::{Move, format_sequence, parse_sequence};

/// Build a solved cube with the given side length. Zero falls back to
/// [`DEFAULT_SIDE_LENGTH`].
///
/// # Panics
///
/// If `side_length²` overflows `usize`; see [`CubeState::try_new`]
pub fn create_state(side_length: usize) -> CubeState {
    CubeState::new(side_length)
}

/// Parse `text` as a single move and apply it. Unrecognized text leaves the
/// state as it was.
#[must_use]
pub fn apply_move(state: &CubeState, text: &str) -> CubeState {
    state.apply_text(text)
}
