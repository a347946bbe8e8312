use std::{fmt::Display, ops::Index, str::FromStr};

use itertools::Itertools;
use log::{debug, trace};

use crate::{
    face_grid::{FaceGrid, GridError, Side},
    moves::Move,
};

/// The side length used when a cube is asked for with no stickers at all.
pub const DEFAULT_SIDE_LENGTH: usize = 3;

/// The six faces of the cube. The discriminants double as the color marker of
/// every sticker that starts on that face.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum Face {
    Back = 0,
    Left = 1,
    Up = 2,
    Right = 3,
    Down = 4,
    Front = 5,
}

impl Face {
    pub const ALL: [Self; 6] = {
        use Face::{Back, Down, Front, Left, Right, Up};
        let v = [Back, Left, Up, Right, Down, Front];

        let mut i = 0;
        while i < v.len() {
            assert!(i == v[i] as usize);
            i += 1;
        }

        v
    };

    pub fn index(self) -> usize {
        self as usize
    }

    /// The letter used for this face in move notation.
    pub fn letter(self) -> char {
        match self {
            Face::Back => 'B',
            Face::Left => 'L',
            Face::Up => 'U',
            Face::Right => 'R',
            Face::Down => 'D',
            Face::Front => 'F',
        }
    }

    pub fn opposite(self) -> Face {
        match self {
            Face::Back => Face::Front,
            Face::Left => Face::Right,
            Face::Up => Face::Down,
            Face::Right => Face::Left,
            Face::Down => Face::Up,
            Face::Front => Face::Back,
        }
    }
}

impl FromStr for Face {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "B" | "b" => Ok(Face::Back),
            "L" | "l" => Ok(Face::Left),
            "U" | "u" => Ok(Face::Up),
            "R" | "r" => Ok(Face::Right),
            "D" | "d" => Ok(Face::Down),
            "F" | "f" => Ok(Face::Front),
            _ => Err(()),
        }
    }
}

impl Display for Face {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.letter())
    }
}

/// An edge strip of a neighboring face: which face, and which of its sides
/// borders the face being turned.
pub type EdgeRef = (Face, Side);

const CLOCKWISE: usize = 0;
const COUNTERCLOCKWISE: usize = 1;

/// For every face and direction, the four neighbor strips that cycle when the
/// face is turned. The strip at position `k` moves into the strip at position
/// `k + 1`, wrapping around. Index by `[face][CLOCKWISE or COUNTERCLOCKWISE]`.
///
/// Orientation of each grid comes from the unrolled layout:
///
/// ```text
///      B
///   L  U  R  D
///      F
/// ```
///
/// L, R and D have B along their top and F along their bottom.
pub static ADJACENCY: [[[EdgeRef; 4]; 2]; 6] = [
    // Back
    [
        [
            (Face::Up, Side::Top),
            (Face::Left, Side::Top),
            (Face::Down, Side::Top),
            (Face::Right, Side::Top),
        ],
        [
            (Face::Right, Side::Top),
            (Face::Down, Side::Top),
            (Face::Left, Side::Top),
            (Face::Up, Side::Top),
        ],
    ],
    // Left
    [
        [
            (Face::Back, Side::Left),
            (Face::Up, Side::Left),
            (Face::Front, Side::Left),
            (Face::Down, Side::Right),
        ],
        [
            (Face::Down, Side::Right),
            (Face::Front, Side::Left),
            (Face::Up, Side::Left),
            (Face::Back, Side::Left),
        ],
    ],
    // Up
    [
        [
            (Face::Back, Side::Bottom),
            (Face::Right, Side::Left),
            (Face::Front, Side::Top),
            (Face::Left, Side::Right),
        ],
        [
            (Face::Left, Side::Right),
            (Face::Front, Side::Top),
            (Face::Right, Side::Left),
            (Face::Back, Side::Bottom),
        ],
    ],
    // Right
    [
        [
            (Face::Up, Side::Right),
            (Face::Back, Side::Right),
            (Face::Down, Side::Left),
            (Face::Front, Side::Right),
        ],
        [
            (Face::Front, Side::Right),
            (Face::Down, Side::Left),
            (Face::Back, Side::Right),
            (Face::Up, Side::Right),
        ],
    ],
    // Down
    [
        [
            (Face::Back, Side::Top),
            (Face::Left, Side::Left),
            (Face::Front, Side::Bottom),
            (Face::Right, Side::Right),
        ],
        [
            (Face::Right, Side::Right),
            (Face::Front, Side::Bottom),
            (Face::Left, Side::Left),
            (Face::Back, Side::Top),
        ],
    ],
    // Front
    [
        [
            (Face::Up, Side::Bottom),
            (Face::Right, Side::Bottom),
            (Face::Down, Side::Bottom),
            (Face::Left, Side::Bottom),
        ],
        [
            (Face::Left, Side::Bottom),
            (Face::Down, Side::Bottom),
            (Face::Right, Side::Bottom),
            (Face::Up, Side::Bottom),
        ],
    ],
];

/// The neighbor strips cycled by turning `face` in the given direction.
pub fn neighbor_cycle(face: Face, clockwise: bool) -> &'static [EdgeRef; 4] {
    let direction = if clockwise { CLOCKWISE } else { COUNTERCLOCKWISE };
    &ADJACENCY[face.index()][direction]
}

/// The full sticker state of an N×N×N cube.
///
/// Applying a move never changes a state in place; it returns the next state,
/// so older states can be kept around for undo or history.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct CubeState {
    side_length: usize,
    faces: [FaceGrid<Face>; 6],
}

impl CubeState {
    /// A solved cube. A side length of zero falls back to
    /// [`DEFAULT_SIDE_LENGTH`].
    ///
    /// # Panics
    ///
    /// If a face of the given side length has more cells than `usize` can
    /// count. Use [`CubeState::try_new`] for side lengths that come from
    /// outside the program.
    pub fn new(side_length: usize) -> CubeState {
        match CubeState::try_new(side_length) {
            Ok(state) => state,
            Err(err) => panic!("{err}"),
        }
    }

    /// A solved cube, or an error if the faces cannot be addressed. A side
    /// length of zero falls back to [`DEFAULT_SIDE_LENGTH`].
    ///
    /// # Errors
    ///
    /// [`GridError::TooLarge`] if `side_length²` overflows `usize`
    pub fn try_new(side_length: usize) -> Result<CubeState, GridError> {
        let side_length = if side_length == 0 {
            DEFAULT_SIDE_LENGTH
        } else {
            side_length
        };

        let blank = FaceGrid::filled(side_length, ())?;

        Ok(CubeState {
            side_length,
            faces: Face::ALL.map(|face| blank.map(|()| face)),
        })
    }

    /// Build a state from explicit stickers, indexed the same way as
    /// [`Face::ALL`].
    ///
    /// # Errors
    ///
    /// If the grids do not all share one side length
    pub fn from_faces(faces: [FaceGrid<Face>; 6]) -> Result<CubeState, GridError> {
        let side_length = faces[0].side_length();

        if let Some(other) = faces.iter().find(|grid| grid.side_length() != side_length) {
            return Err(GridError::MismatchedSideLength {
                expected: side_length,
                actual: other.side_length(),
            });
        }

        Ok(CubeState { side_length, faces })
    }

    pub fn side_length(&self) -> usize {
        self.side_length
    }

    pub fn face(&self, face: Face) -> &FaceGrid<Face> {
        &self.faces[face.index()]
    }

    pub fn faces(&self) -> impl Iterator<Item = (Face, &FaceGrid<Face>)> {
        Face::ALL.into_iter().zip(&self.faces)
    }

    /// Whether every face shows a single color.
    pub fn is_solved(&self) -> bool {
        self.faces
            .iter()
            .all(|grid| grid.cells().iter().all_equal())
    }

    /// Return the state after applying `move_`. Moves with no face, or deeper
    /// than the cube, leave the state as it is.
    ///
    /// A move at depth `N-1` turns the layer holding the opposite face, so that
    /// face rotates too, in the other direction. This differs from a plain
    /// strip cycle, which would leave the opposite face's own stickers in
    /// place: here `3R` on a 3×3 is the same as `L'`.
    #[must_use]
    pub fn apply_move(&self, move_: &Move) -> CubeState {
        let Some(face) = move_.face else {
            debug!("Ignoring a move with no recognized face");
            return self.clone();
        };

        let depth = move_.depth;
        let n = self.side_length;
        if depth >= n {
            debug!("Ignoring {move_}: depth {depth} does not fit a side length of {n}");
            return self.clone();
        }

        trace!("Applying {move_}: face={face:?} depth={depth} clockwise={}", move_.clockwise);

        let mut next = self.clone();

        if depth == 0 {
            turn(&mut next.faces[face.index()], move_.clockwise);
        }

        // The deepest slice carries the opposite face with it, seen from behind
        if depth == n - 1 {
            turn(&mut next.faces[face.opposite().index()], !move_.clockwise);
        }

        let cycle = *neighbor_cycle(face, move_.clockwise);

        // Every read comes from the untouched state, so the four strips move
        // together rather than overwriting each other in turn
        let strips = cycle.map(|(from, side)| {
            self.face(from)
                .read_edge(side, depth)
                .expect("depth is within the side length")
        });

        for (strip, &(to, side)) in strips.iter().zip(cycle.iter().cycle().skip(1)) {
            next.faces[to.index()]
                .write_edge(side, depth, strip)
                .expect("every face shares one side length");
        }

        next
    }

    /// Parse and apply a single move written in notation.
    #[must_use]
    pub fn apply_text(&self, text: &str) -> CubeState {
        self.apply_move(&Move::parse(text))
    }

    #[must_use]
    pub fn apply_sequence<'a>(&self, moves: impl IntoIterator<Item = &'a Move>) -> CubeState {
        moves
            .into_iter()
            .fold(self.clone(), |state, move_| state.apply_move(move_))
    }
}

impl Default for CubeState {
    fn default() -> Self {
        CubeState::new(DEFAULT_SIDE_LENGTH)
    }
}

impl Index<Face> for CubeState {
    type Output = FaceGrid<Face>;

    fn index(&self, index: Face) -> &Self::Output {
        &self.faces[index.index()]
    }
}

fn turn(grid: &mut FaceGrid<Face>, clockwise: bool) {
    if clockwise {
        grid.rotate_clockwise();
    } else {
        grid.rotate_counterclockwise();
    }
}
