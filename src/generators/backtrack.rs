use rand::rngs::StdRng;
use rand::seq::SliceRandom;

use crate::maze::{Coord, GridCell, Maze, open_neighbors};

/// Carve step between two room cells, as (row, col) deltas.
const DIRECTIONS: [(i32, i32); 4] = [(-2, 0), (2, 0), (0, -2), (0, 2)];

/// Randomized depth-first carve over the odd-parity room cells.
///
/// Rooms sit two cells apart; carving a passage opens the wall cell between
/// a room and its target. An explicit stack stands in for recursion, so the
/// working set stays bounded on large grids.
pub(super) fn carve(maze: &mut Maze, rng: &mut StdRng, loop_averse: bool) {
    // Reset to solid walls.
    for r in 0..maze.rows() {
        for c in 0..maze.cols() {
            maze.set((r, c), GridCell::WALL);
        }
    }

    let origin: Coord = (1, 1);
    maze.set(origin, GridCell::EMPTY);

    let mut directions = DIRECTIONS;
    let mut stack = vec![origin];
    // The current room stays on the stack until no shuffled direction carves,
    // so every direction gets another look after each detour returns.
    while let Some(&room) = stack.last() {
        directions.shuffle(rng);
        let mut extended = false;
        for (dr, dc) in directions {
            let Some(target) = room_towards(room, (dr, dc), maze) else {
                continue;
            };
            if maze[target] != GridCell::WALL {
                continue;
            }
            let link = (
                (room.0 as i32 + dr / 2) as u16,
                (room.1 as i32 + dc / 2) as u16,
            );
            // Loop-averse rule: carving may not join two already-open areas.
            // The link and target may each touch at most one open cell (the
            // room we are carving from).
            if loop_averse && (open_degree(link, maze) > 1 || open_degree(target, maze) > 1) {
                continue;
            }
            maze.set(link, GridCell::EMPTY);
            maze.set(target, GridCell::EMPTY);
            stack.push(target);
            extended = true;
            break;
        }
        if !extended {
            stack.pop();
        }
    }

    // The outer border is wall regardless of carving outcome.
    for r in 0..maze.rows() {
        maze.set((r, 0), GridCell::WALL);
        maze.set((r, maze.cols() - 1), GridCell::WALL);
    }
    for c in 0..maze.cols() {
        maze.set((0, c), GridCell::WALL);
        maze.set((maze.rows() - 1, c), GridCell::WALL);
    }
}

/// The room cell two steps away in the given direction, if it lies strictly
/// inside the border.
fn room_towards(room: Coord, (dr, dc): (i32, i32), maze: &Maze) -> Option<Coord> {
    let r = room.0 as i32 + dr;
    let c = room.1 as i32 + dc;
    if r > 0 && c > 0 && r < maze.rows() as i32 - 1 && c < maze.cols() as i32 - 1 {
        Some((r as u16, c as u16))
    } else {
        None
    }
}

fn open_degree(coord: Coord, maze: &Maze) -> usize {
    open_neighbors(coord, maze).count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generators::get_rng;

    #[test]
    fn room_towards_rejects_border_and_beyond() {
        let maze = Maze::new(7, 7, None).unwrap();
        assert_eq!(room_towards((1, 1), (-2, 0), &maze), None);
        assert_eq!(room_towards((1, 1), (0, -2), &maze), None);
        assert_eq!(room_towards((1, 1), (2, 0), &maze), Some((3, 1)));
        assert_eq!(room_towards((5, 5), (2, 0), &maze), None);
        assert_eq!(room_towards((5, 5), (0, -2), &maze), Some((5, 3)));
    }

    #[test]
    fn loop_averse_carve_is_a_tree() {
        let mut maze = Maze::new(21, 21, None).unwrap();
        carve(&mut maze, &mut get_rng(Some(9)), true);
        // A connected maze without loops has exactly one passage fewer than
        // it has open cells. Count passages as open right/down pairs.
        let open = maze.open_cells();
        let passages = open
            .iter()
            .map(|&(r, c)| {
                usize::from(maze.is_open((r + 1, c))) + usize::from(maze.is_open((r, c + 1)))
            })
            .sum::<usize>();
        assert_eq!(passages, open.len() - 1);
    }
}
