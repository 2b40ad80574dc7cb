use std::collections::HashSet;
use std::mem;
use std::rc::Rc;

use super::{SearchStats, Solution, TrackedCell};
use crate::maze::{Coord, Maze, open_neighbors};

/// Depth-first search. The LIFO frontier dives down one branch before
/// trying siblings; the route it returns is a path, not a shortest path.
///
/// Cells are marked visited when popped, not when pushed. The stack can hold
/// duplicate entries for a while, but entries never go stale, and the
/// visited set only ever holds cells that were actually expanded.
pub(super) fn solve_dfs(maze: &Maze, start: Coord, goal: Coord) -> Solution {
    let mut frontier: Vec<Rc<TrackedCell>> = vec![TrackedCell::root(start)];

    let mut visited: HashSet<Coord> = HashSet::new();
    let mut stats = SearchStats::default();

    while let Some(current) = frontier.pop() {
        if !visited.insert(current.coord) {
            continue;
        }
        stats.expanded.push(current.coord);

        if current.coord == goal {
            let path = super::unwind_path(&current);
            return Solution { path, stats };
        }

        for neighbor in open_neighbors(current.coord, maze) {
            if !visited.contains(&neighbor) {
                frontier.push(current.child(neighbor));
            }
        }
        stats.sample(
            frontier.len(),
            frontier.len() * mem::size_of::<TrackedCell>()
                + visited.len() * mem::size_of::<Coord>(),
        );
    }

    Solution {
        path: vec![],
        stats,
    }
}
