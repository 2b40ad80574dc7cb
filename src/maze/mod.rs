pub mod cell;
pub mod grid;

use std::sync::mpsc::SyncSender;

use thiserror::Error;

pub use cell::{GridCell, OpenKind};
pub use grid::{Grid, GridEvent};

/// A grid coordinate as `(row, col)`.
pub type Coord = (u16, u16);

/// Smallest accepted maze dimension.
pub const MIN_SIZE: u16 = 5;
/// Largest accepted maze dimension.
pub const MAX_SIZE: u16 = 50;

#[derive(Debug, Error, PartialEq)]
pub enum MazeError {
    #[error(
        "maze dimensions must be within {min}x{min}..{max}x{max}, got {rows}x{cols}",
        min = MIN_SIZE,
        max = MAX_SIZE
    )]
    InvalidDimensions { rows: u16, cols: u16 },
    #[error("carving left fewer than two open cells")]
    DegenerateMaze,
}

/// A rectangular maze of wall and open cells.
///
/// Dimensions are fixed at construction and bounded to
/// [`MIN_SIZE`]`..=`[`MAX_SIZE`] in each direction. Mutation goes through
/// [`Maze::set`], which reports changes to the observer channel handed to
/// [`Maze::new`] so a renderer can animate them.
pub struct Maze {
    grid: Grid,
}

impl Maze {
    pub fn new(
        rows: u16,
        cols: u16,
        sender: Option<SyncSender<GridEvent>>,
    ) -> Result<Self, MazeError> {
        if !(MIN_SIZE..=MAX_SIZE).contains(&rows) || !(MIN_SIZE..=MAX_SIZE).contains(&cols) {
            return Err(MazeError::InvalidDimensions { rows, cols });
        }
        Ok(Maze {
            grid: Grid::new(rows, cols, GridCell::WALL, sender),
        })
    }

    /// Builds a maze from rows of `'#'` (wall) and `' '` (open) characters.
    #[cfg(test)]
    pub fn from_rows(rows: &[&str]) -> Self {
        let mut maze = Maze::new(rows.len() as u16, rows[0].len() as u16, None)
            .expect("test grid within size bounds");
        for (r, line) in rows.iter().enumerate() {
            assert_eq!(line.len(), rows[0].len(), "test grid must be rectangular");
            for (c, ch) in line.chars().enumerate() {
                if ch == ' ' {
                    maze.set((r as u16, c as u16), GridCell::EMPTY);
                }
            }
        }
        maze
    }

    /// Returns the number of rows.
    pub fn rows(&self) -> u16 {
        self.grid.rows()
    }

    /// Returns the number of columns.
    pub fn cols(&self) -> u16 {
        self.grid.cols()
    }

    /// Checks if the given coordinate is within the bounds of the maze.
    pub fn is_in_bounds(&self, coord: Coord) -> bool {
        coord.0 < self.rows() && coord.1 < self.cols()
    }

    /// Checks if the given coordinate is in bounds and passable.
    pub fn is_open(&self, coord: Coord) -> bool {
        self.is_in_bounds(coord) && self.grid[coord].is_open()
    }

    /// Whether the coordinate lies on the outer border.
    pub fn is_boundary(&self, coord: Coord) -> bool {
        self.grid.is_boundary(coord.0, coord.1)
    }

    pub fn set(&mut self, coord: Coord, cell: GridCell) {
        self.grid.set(coord, cell);
    }

    /// All open cells in row-major order.
    pub fn open_cells(&self) -> Vec<Coord> {
        (0..self.rows())
            .flat_map(|r| (0..self.cols()).map(move |c| (r, c)))
            .filter(|&coord| self.grid[coord].is_open())
            .collect()
    }
}

impl std::ops::Index<Coord> for Maze {
    type Output = GridCell;

    fn index(&self, index: Coord) -> &Self::Output {
        &self.grid[index]
    }
}

/// Get the in-bounds 4-neighbors of a coordinate (up, down, left, right).
pub fn get_neighbors(coord: Coord, maze: &Maze) -> impl Iterator<Item = Coord> {
    let neighbors: Vec<Coord> = if maze.is_in_bounds(coord) {
        let (row, col) = coord;
        vec![
            // Wrapping row - 1 / col - 1 to u16::MAX on underflow and saturating
            // the increment at u16::MAX both land outside any valid maze
            // (dimensions cap at MAX_SIZE), so the bounds filter drops them.
            (row.wrapping_sub(1), col),
            (row.saturating_add(1), col),
            (row, col.wrapping_sub(1)),
            (row, col.saturating_add(1)),
        ]
    } else {
        // No neighbors if the coordinate is out of bounds
        vec![]
    };

    neighbors.into_iter().filter(move |&c| maze.is_in_bounds(c))
}

/// The in-bounds, open 4-neighbors of a coordinate: the shared neighbor rule
/// of every search strategy.
pub fn open_neighbors(coord: Coord, maze: &Maze) -> impl Iterator<Item = Coord> {
    get_neighbors(coord, maze).filter(move |&c| maze.is_open(c))
}

/// Manhattan distance between two coordinates.
pub fn manhattan(a: Coord, b: Coord) -> u32 {
    a.0.abs_diff(b.0) as u32 + a.1.abs_diff(b.1) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_out_of_range_dimensions() {
        assert_eq!(
            Maze::new(4, 10, None).err(),
            Some(MazeError::InvalidDimensions { rows: 4, cols: 10 })
        );
        assert_eq!(
            Maze::new(10, 51, None).err(),
            Some(MazeError::InvalidDimensions { rows: 10, cols: 51 })
        );
        assert!(Maze::new(5, 5, None).is_ok());
        assert!(Maze::new(50, 50, None).is_ok());
    }

    #[test]
    fn indexing_and_bounds() {
        let mut maze = Maze::new(5, 5, None).unwrap();
        maze.set((2, 3), GridCell::EMPTY);
        assert_eq!(maze[(2, 3)], GridCell::EMPTY);
        assert!(maze.is_open((2, 3)));
        assert!(!maze.is_open((2, 2)));
        assert!(!maze.is_in_bounds((5, 0)));
        assert!(!maze.is_in_bounds((0, 5)));
        assert!(maze.is_in_bounds((4, 4)));
    }

    #[test]
    fn neighbors_clip_to_bounds() {
        let maze = Maze::new(5, 5, None).unwrap();
        let at_corner: Vec<_> = get_neighbors((0, 0), &maze).collect();
        assert_eq!(at_corner, vec![(1, 0), (0, 1)]);

        let at_center: Vec<_> = get_neighbors((2, 2), &maze).collect();
        assert_eq!(at_center, vec![(1, 2), (3, 2), (2, 1), (2, 3)]);

        assert_eq!(get_neighbors((7, 7), &maze).count(), 0);
    }

    #[test]
    fn open_neighbors_filter_walls() {
        let maze = Maze::from_rows(&[
            "#####", //
            "#   #",
            "### #",
            "#   #",
            "#####",
        ]);
        let open: Vec<_> = open_neighbors((1, 2), &maze).collect();
        assert_eq!(open, vec![(1, 1), (1, 3)]);
    }

    #[test]
    fn manhattan_distance() {
        assert_eq!(manhattan((1, 1), (1, 1)), 0);
        assert_eq!(manhattan((1, 2), (4, 0)), 5);
        assert_eq!(manhattan((4, 0), (1, 2)), 5);
    }

    #[test]
    fn open_cells_row_major() {
        let maze = Maze::from_rows(&[
            "#####", //
            "# # #",
            "#####",
            "# ###",
            "#####",
        ]);
        assert_eq!(maze.open_cells(), vec![(1, 1), (1, 3), (3, 1)]);
    }
}
