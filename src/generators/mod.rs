use rand::{SeedableRng, rngs::StdRng};

mod backtrack;

use backtrack::carve;

use crate::maze::{Maze, MazeError};

/// Get a random number generator, optionally seeded for reproducibility.
fn get_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_os_rng(),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Generator {
    /// Randomized depth-first carving over odd-parity room cells.
    Backtracking,
    /// Same carve, but a passage is skipped when it would close a loop.
    LoopAverse,
}

impl std::fmt::Display for Generator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Generator::Backtracking => write!(f, "Randomized Backtracking"),
            Generator::LoopAverse => write!(f, "Randomized Backtracking (loop-averse)"),
        }
    }
}

/// Carves a maze in place with the selected generator.
///
/// The maze starts over as all walls; the same seed reproduces the same maze.
/// Fails with [`MazeError::DegenerateMaze`] if carving leaves fewer than two
/// open cells to pick endpoints from.
pub fn generate_maze(
    maze: &mut Maze,
    generator: Generator,
    seed: Option<u64>,
) -> Result<(), MazeError> {
    let mut rng = get_rng(seed);
    match generator {
        Generator::Backtracking => carve(maze, &mut rng, false),
        Generator::LoopAverse => carve(maze, &mut rng, true),
    }

    let open = maze.open_cells().len();
    if open < 2 {
        tracing::warn!(open, "carve produced a degenerate maze");
        return Err(MazeError::DegenerateMaze);
    }
    tracing::debug!(%generator, open, "maze generated");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::maze::{GridCell, get_neighbors};

    fn carved(rows: u16, cols: u16, generator: Generator, seed: u64) -> Maze {
        let mut maze = Maze::new(rows, cols, None).unwrap();
        generate_maze(&mut maze, generator, Some(seed)).unwrap();
        maze
    }

    /// Flood fill from the carve origin, counting reachable open cells.
    fn reachable_from_origin(maze: &Maze) -> usize {
        let mut seen = std::collections::HashSet::from([(1, 1)]);
        let mut stack = vec![(1, 1)];
        while let Some(cell) = stack.pop() {
            for neighbor in get_neighbors(cell, maze) {
                if maze.is_open(neighbor) && seen.insert(neighbor) {
                    stack.push(neighbor);
                }
            }
        }
        seen.len()
    }

    #[test]
    fn border_is_all_walls() {
        for generator in [Generator::Backtracking, Generator::LoopAverse] {
            let maze = carved(21, 31, generator, 7);
            for r in 0..maze.rows() {
                assert_eq!(maze[(r, 0)], GridCell::WALL);
                assert_eq!(maze[(r, maze.cols() - 1)], GridCell::WALL);
            }
            for c in 0..maze.cols() {
                assert_eq!(maze[(0, c)], GridCell::WALL);
                assert_eq!(maze[(maze.rows() - 1, c)], GridCell::WALL);
            }
        }
    }

    #[test]
    fn every_open_cell_reachable_from_origin() {
        for generator in [Generator::Backtracking, Generator::LoopAverse] {
            for seed in 0..5 {
                let maze = carved(25, 25, generator, seed);
                let open = maze.open_cells().len();
                assert_eq!(
                    reachable_from_origin(&maze),
                    open,
                    "isolated open region with {generator} seed {seed}"
                );
            }
        }
    }

    #[test]
    fn same_seed_same_maze() {
        let a = carved(15, 15, Generator::Backtracking, 42);
        let b = carved(15, 15, Generator::Backtracking, 42);
        assert_eq!(a.open_cells(), b.open_cells());
    }

    #[test]
    fn different_seeds_usually_differ() {
        let a = carved(25, 25, Generator::Backtracking, 1);
        let b = carved(25, 25, Generator::Backtracking, 2);
        assert_ne!(a.open_cells(), b.open_cells());
    }

    #[test]
    fn carve_opens_enough_cells() {
        // A 5x5 grid has four room cells; all of them must end up open.
        let maze = carved(5, 5, Generator::Backtracking, 3);
        assert!(maze.open_cells().len() >= 4);
    }

    #[test]
    fn even_dimensions_leave_trailing_wall() {
        // Room cells have odd coordinates, so even-sized grids keep an extra
        // wall row and column before the border.
        let maze = carved(10, 10, Generator::Backtracking, 11);
        assert_eq!(reachable_from_origin(&maze), maze.open_cells().len());
        for c in 0..maze.cols() {
            assert_eq!(maze[(9, c)], GridCell::WALL);
        }
    }
}
