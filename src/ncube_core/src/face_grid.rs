use std::ops::Index;

use thiserror::Error;

/// One edge of a grid, named as it appears in the unrolled layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Side {
    Top = 0,
    Right = 1,
    Bottom = 2,
    Left = 3,
}

impl Side {
    pub const ALL: [Self; 4] = [Side::Top, Side::Right, Side::Bottom, Side::Left];

    /// The number of clockwise quarter turns that bring this side to the top.
    pub fn turns_to_top(self) -> usize {
        (4 - self as usize) % 4
    }
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum GridError {
    #[error("A grid must have a side length of at least 1")]
    EmptyGrid,
    #[error("Expected {expected} cells for the grid but got {actual}")]
    WrongCellCount { expected: usize, actual: usize },
    #[error("Expected an edge strip of {expected} cells but got {actual}")]
    WrongStripLength { expected: usize, actual: usize },
    #[error("Depth {depth} is out of range for a grid with side length {side_length}")]
    DepthOutOfRange { depth: usize, side_length: usize },
    #[error("Every face must have the same side length, expected {expected} but got {actual}")]
    MismatchedSideLength { expected: usize, actual: usize },
    #[error("A grid with side length {side_length} has more cells than can be addressed")]
    TooLarge { side_length: usize },
}

fn cell_count(side_length: usize) -> Result<usize, GridError> {
    if side_length == 0 {
        return Err(GridError::EmptyGrid);
    }

    side_length
        .checked_mul(side_length)
        .ok_or(GridError::TooLarge { side_length })
}

/// A square grid of stickers stored row-major, with the origin at the upper
/// left of the face as it appears in the unrolled layout.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct FaceGrid<T> {
    side_length: usize,
    cells: Box<[T]>,
}

impl<T: Copy> FaceGrid<T> {
    /// Create a grid where every cell holds `value`.
    ///
    /// # Errors
    ///
    /// If `side_length` is zero or `side_length²` overflows `usize`
    pub fn filled(side_length: usize, value: T) -> Result<Self, GridError> {
        let count = cell_count(side_length)?;

        Ok(FaceGrid {
            side_length,
            cells: vec![value; count].into_boxed_slice(),
        })
    }

    /// Create a grid from row-major cells.
    ///
    /// # Errors
    ///
    /// If `side_length` is zero, `side_length²` overflows `usize`, or `cells`
    /// does not hold exactly `side_length²` values
    pub fn from_cells(side_length: usize, cells: Vec<T>) -> Result<Self, GridError> {
        let expected = cell_count(side_length)?;
        if cells.len() != expected {
            return Err(GridError::WrongCellCount {
                expected,
                actual: cells.len(),
            });
        }

        Ok(FaceGrid {
            side_length,
            cells: cells.into_boxed_slice(),
        })
    }

    pub fn side_length(&self) -> usize {
        self.side_length
    }

    pub fn cells(&self) -> &[T] {
        &self.cells
    }

    pub fn get(&self, row: usize, col: usize) -> Option<T> {
        if row < self.side_length && col < self.side_length {
            Some(self.cells[row * self.side_length + col])
        } else {
            None
        }
    }

    pub fn rows(&self) -> impl Iterator<Item = &[T]> {
        self.cells.chunks_exact(self.side_length)
    }

    /// A grid of the same size with `f` applied to every cell.
    pub fn map<U>(&self, f: impl FnMut(T) -> U) -> FaceGrid<U> {
        FaceGrid {
            side_length: self.side_length,
            cells: self.cells.iter().copied().map(f).collect(),
        }
    }

    /// Rotate the grid a quarter turn clockwise in place.
    ///
    /// Works one concentric ring at a time from the outside in, moving four
    /// cells per step: top to right, right to bottom, bottom to left, and left
    /// to top.
    pub fn rotate_clockwise(&mut self) {
        let n = self.side_length;

        for ring in 0..n / 2 {
            let last = n - 1 - ring;

            for offset in 0..n - 2 * ring - 1 {
                let top = self.flat(ring, ring + offset);
                let right = self.flat(ring + offset, last);
                let bottom = self.flat(last, last - offset);
                let left = self.flat(last - offset, ring);

                let saved = self.cells[top];
                self.cells[top] = self.cells[left];
                self.cells[left] = self.cells[bottom];
                self.cells[bottom] = self.cells[right];
                self.cells[right] = saved;
            }
        }
    }

    /// Rotate the grid a quarter turn counterclockwise in place. Equivalent to
    /// three clockwise turns.
    pub fn rotate_counterclockwise(&mut self) {
        let n = self.side_length;

        for ring in 0..n / 2 {
            let last = n - 1 - ring;

            for offset in 0..n - 2 * ring - 1 {
                let top = self.flat(ring, ring + offset);
                let right = self.flat(ring + offset, last);
                let bottom = self.flat(last, last - offset);
                let left = self.flat(last - offset, ring);

                let saved = self.cells[top];
                self.cells[top] = self.cells[right];
                self.cells[right] = self.cells[bottom];
                self.cells[bottom] = self.cells[left];
                self.cells[left] = saved;
            }
        }
    }

    /// Read the strip of cells lying `depth` cells in from `side`.
    ///
    /// The cells come out in the order they would have if the grid were turned
    /// until `side` is on top and that row read left to right; in other words,
    /// clockwise around the grid. Returns `None` if `depth` is not inside the
    /// grid.
    pub fn read_edge(&self, side: Side, depth: usize) -> Option<Vec<T>> {
        if depth >= self.side_length {
            return None;
        }

        Some(
            (0..self.side_length)
                .map(|i| self.cells[self.strip_index(side, depth, i)])
                .collect(),
        )
    }

    /// Overwrite the strip that [`FaceGrid::read_edge`] would return.
    ///
    /// # Errors
    ///
    /// If `depth` is not inside the grid or `values` is not exactly one side
    /// length long
    pub fn write_edge(&mut self, side: Side, depth: usize, values: &[T]) -> Result<(), GridError> {
        if depth >= self.side_length {
            return Err(GridError::DepthOutOfRange {
                depth,
                side_length: self.side_length,
            });
        }

        if values.len() != self.side_length {
            return Err(GridError::WrongStripLength {
                expected: self.side_length,
                actual: values.len(),
            });
        }

        for (i, &value) in values.iter().enumerate() {
            let idx = self.strip_index(side, depth, i);
            self.cells[idx] = value;
        }

        Ok(())
    }

    fn flat(&self, row: usize, col: usize) -> usize {
        row * self.side_length + col
    }

    // Where the `i`th cell of a strip lives, without physically turning the grid
    fn strip_index(&self, side: Side, depth: usize, i: usize) -> usize {
        let last = self.side_length - 1;

        let (row, col) = match side {
            Side::Top => (depth, i),
            Side::Right => (i, last - depth),
            Side::Bottom => (last - depth, last - i),
            Side::Left => (last - i, depth),
        };

        self.flat(row, col)
    }
}

impl<T: Copy> Index<(usize, usize)> for FaceGrid<T> {
    type Output = T;

    fn index(&self, (row, col): (usize, usize)) -> &Self::Output {
        assert!(
            row < self.side_length && col < self.side_length,
            "cell ({row}, {col}) is outside a grid of side length {}",
            self.side_length
        );

        &self.cells[row * self.side_length + col]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn numbered(n: usize) -> FaceGrid<usize> {
        FaceGrid::from_cells(n, (0..n * n).collect()).unwrap()
    }

    fn random_grid(rng: &mut fastrand::Rng, n: usize) -> FaceGrid<u8> {
        FaceGrid::from_cells(n, (0..n * n).map(|_| rng.u8(..6)).collect()).unwrap()
    }

    // The straightforward definition: turn the side to the top, read, turn back
    fn read_by_rotating(grid: &FaceGrid<usize>, side: Side, depth: usize) -> Vec<usize> {
        let mut turned = grid.clone();
        for _ in 0..side.turns_to_top() {
            turned.rotate_clockwise();
        }
        turned.rows().nth(depth).unwrap().to_vec()
    }

    #[test]
    fn rotate_three_by_three() {
        let mut grid = numbered(3);
        grid.rotate_clockwise();
        assert_eq!(grid.cells(), &[6, 3, 0, 7, 4, 1, 8, 5, 2]);

        grid.rotate_counterclockwise();
        assert_eq!(grid, numbered(3));
    }

    #[test]
    fn rotate_single_cell() {
        let mut grid = numbered(1);
        grid.rotate_clockwise();
        grid.rotate_counterclockwise();
        assert_eq!(grid.cells(), &[0]);
    }

    #[test]
    fn four_turns_is_identity() {
        let mut rng = fastrand::Rng::with_seed(0xC0BE);

        for n in 1..=9 {
            let original = random_grid(&mut rng, n);
            let mut grid = original.clone();

            for _ in 0..4 {
                grid.rotate_clockwise();
            }
            assert_eq!(grid, original, "n = {n}");

            for _ in 0..4 {
                grid.rotate_counterclockwise();
            }
            assert_eq!(grid, original, "n = {n}");
        }
    }

    #[test]
    fn clockwise_is_three_counterclockwise() {
        let mut rng = fastrand::Rng::with_seed(42);

        for n in 1..=9 {
            let original = random_grid(&mut rng, n);

            let mut once = original.clone();
            once.rotate_clockwise();

            let mut thrice = original.clone();
            for _ in 0..3 {
                thrice.rotate_counterclockwise();
            }

            assert_eq!(once, thrice, "n = {n}");
        }
    }

    #[test]
    fn strided_reads_match_rotation() {
        for n in 1..=6 {
            let grid = numbered(n);

            for side in Side::ALL {
                for depth in 0..n {
                    assert_eq!(
                        grid.read_edge(side, depth).unwrap(),
                        read_by_rotating(&grid, side, depth),
                        "n = {n}, side = {side:?}, depth = {depth}"
                    );
                }
            }
        }
    }

    #[test]
    fn strided_writes_match_rotation() {
        for n in 1..=6 {
            for side in Side::ALL {
                for depth in 0..n {
                    let strip = (100..100 + n).collect::<Vec<_>>();

                    let mut strided = numbered(n);
                    strided.write_edge(side, depth, &strip).unwrap();

                    let mut rotated = numbered(n);
                    for _ in 0..side.turns_to_top() {
                        rotated.rotate_clockwise();
                    }
                    rotated.write_edge(Side::Top, depth, &strip).unwrap();
                    for _ in 0..side as usize {
                        rotated.rotate_clockwise();
                    }

                    assert_eq!(strided, rotated, "n = {n}, side = {side:?}, depth = {depth}");
                }
            }
        }
    }

    #[test]
    fn edges_read_clockwise() {
        let grid = numbered(3);
        assert_eq!(grid.read_edge(Side::Top, 0).unwrap(), [0, 1, 2]);
        assert_eq!(grid.read_edge(Side::Right, 0).unwrap(), [2, 5, 8]);
        assert_eq!(grid.read_edge(Side::Bottom, 0).unwrap(), [8, 7, 6]);
        assert_eq!(grid.read_edge(Side::Left, 0).unwrap(), [6, 3, 0]);
        assert_eq!(grid.read_edge(Side::Left, 1).unwrap(), [7, 4, 1]);
        assert_eq!(grid.read_edge(Side::Left, 3), None);
    }

    #[test]
    fn bad_writes_are_rejected() {
        let mut grid = numbered(3);

        assert_eq!(
            grid.write_edge(Side::Top, 3, &[0, 0, 0]),
            Err(GridError::DepthOutOfRange {
                depth: 3,
                side_length: 3
            })
        );
        assert_eq!(
            grid.write_edge(Side::Top, 0, &[0, 0]),
            Err(GridError::WrongStripLength {
                expected: 3,
                actual: 2
            })
        );
        assert_eq!(grid, numbered(3));
    }

    #[test]
    fn from_cells_validates() {
        assert_eq!(
            FaceGrid::from_cells(2, vec![0; 3]),
            Err(GridError::WrongCellCount {
                expected: 4,
                actual: 3
            })
        );
        assert_eq!(FaceGrid::<u8>::from_cells(0, vec![]), Err(GridError::EmptyGrid));
        assert_eq!(numbered(3)[(1, 2)], 5);
        assert_eq!(numbered(3).get(3, 0), None);
    }

    #[test]
    fn oversized_grids_are_rejected() {
        let side_length = 1usize << (usize::BITS / 2);

        assert_eq!(
            FaceGrid::filled(side_length, 0u8),
            Err(GridError::TooLarge { side_length })
        );
        assert_eq!(
            FaceGrid::<u8>::from_cells(usize::MAX, vec![]),
            Err(GridError::TooLarge {
                side_length: usize::MAX
            })
        );
        assert_eq!(FaceGrid::filled(0, 0u8), Err(GridError::EmptyGrid));
        assert_eq!(FaceGrid::filled(2, 7u8).unwrap().cells(), [7; 4]);
    }
}
