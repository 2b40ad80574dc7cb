use std::collections::HashSet;
use std::mem;

use super::{SearchStats, Solution};
use crate::maze::{Coord, Maze, manhattan, open_neighbors};

/// Greedy hill-climbing on the Manhattan distance to the goal.
///
/// At each step the walk moves to the unvisited open neighbor closest to the
/// goal, and only if that neighbor is strictly closer than where it stands.
/// Cells visited anywhere along the walk are excluded for good, and the walk
/// never backtracks, so a dead end or local optimum ends the search even
/// when a path exists. Incomplete and non-optimal by design.
pub(super) fn solve_hill_climb(maze: &Maze, start: Coord, goal: Coord) -> Solution {
    let mut path = vec![start];
    let mut visited: HashSet<Coord> = HashSet::from([start]);
    let mut stats = SearchStats::default();
    stats.expanded.push(start);

    let mut current = start;
    while current != goal {
        let candidate = open_neighbors(current, maze)
            .filter(|c| !visited.contains(c))
            .min_by_key(|&c| manhattan(c, goal));

        let Some(next) = candidate else {
            tracing::debug!(?current, "hill-climbing dead end");
            return Solution { path: vec![], stats };
        };
        if manhattan(next, goal) >= manhattan(current, goal) {
            tracing::debug!(?current, ?next, "hill-climbing stuck at local optimum");
            return Solution { path: vec![], stats };
        }

        visited.insert(next);
        path.push(next);
        stats.expanded.push(next);
        current = next;
        // The frontier is the single walk head; the working set is the
        // visited record.
        stats.sample(1, visited.len() * mem::size_of::<Coord>());
    }

    Solution { path, stats }
}
