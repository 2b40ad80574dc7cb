use std::collections::{HashSet, VecDeque};
use std::mem;
use std::rc::Rc;

use super::{SearchStats, Solution, TrackedCell};
use crate::maze::{Coord, Maze, open_neighbors};

/// Breadth-first search. The FIFO frontier finalizes cells in distance
/// order, so the first time the goal is dequeued its route is a shortest one.
pub(super) fn solve_bfs(maze: &Maze, start: Coord, goal: Coord) -> Solution {
    let mut frontier: VecDeque<Rc<TrackedCell>> = VecDeque::new();
    frontier.push_back(TrackedCell::root(start));

    let mut visited: HashSet<Coord> = HashSet::new();
    let mut stats = SearchStats::default();

    while let Some(current) = frontier.pop_front() {
        // Duplicates may sit in the queue; the first dequeue wins.
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
                frontier.push_back(current.child(neighbor));
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
