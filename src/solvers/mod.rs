use std::rc::Rc;
use std::time::{Duration, Instant};

mod astar;
mod bfs;
mod dfs;
mod hill_climb;

use crate::maze::{Coord, Maze};
use astar::solve_astar;
use bfs::solve_bfs;
use dfs::solve_dfs;
use hill_climb::solve_hill_climb;

/// A cell reached during a search, linked back to the cell it was reached
/// from so the final route can be unwound without storing a path per entry.
struct TrackedCell {
    /// Coordinates of the cell in the maze
    coord: Coord,
    /// The cell from which this cell was reached
    parent: Option<Rc<TrackedCell>>,
}

impl TrackedCell {
    fn root(coord: Coord) -> Rc<Self> {
        Rc::new(TrackedCell {
            coord,
            parent: None,
        })
    }

    fn child(self: &Rc<Self>, coord: Coord) -> Rc<Self> {
        Rc::new(TrackedCell {
            coord,
            parent: Some(self.clone()),
        })
    }
}

/// Follow parent links back to the start and return the route start-to-goal.
fn unwind_path(tail: &Rc<TrackedCell>) -> Vec<Coord> {
    let mut path = vec![tail.coord];
    let mut node = tail;
    while let Some(parent) = node.parent.as_ref() {
        path.push(parent.coord);
        node = parent;
    }
    path.reverse();
    path
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    Bfs,
    Dfs,
    HillClimb,
    AStar,
}

impl Strategy {
    pub const ALL: [Strategy; 4] = [
        Strategy::Bfs,
        Strategy::Dfs,
        Strategy::HillClimb,
        Strategy::AStar,
    ];

    /// Compact label for table columns.
    pub fn label(&self) -> &'static str {
        match self {
            Strategy::Bfs => "BFS",
            Strategy::Dfs => "DFS",
            Strategy::HillClimb => "Hill-Climbing",
            Strategy::AStar => "A*",
        }
    }
}

impl std::fmt::Display for Strategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Strategy::Bfs => write!(f, "Breadth-First Search (BFS)"),
            Strategy::Dfs => write!(f, "Depth-First Search (DFS)"),
            Strategy::HillClimb => write!(f, "Hill-Climbing (greedy descent)"),
            Strategy::AStar => write!(f, "A* (Manhattan heuristic)"),
        }
    }
}

/// Bookkeeping gathered while a strategy runs.
#[derive(Debug, Default, Clone)]
pub struct SearchStats {
    /// Wall-clock duration of the solve call.
    pub elapsed: Duration,
    /// Cells in the order the strategy expanded them. Doubles as the
    /// visitation record an animation replays.
    pub expanded: Vec<Coord>,
    /// Largest number of frontier entries alive at once.
    pub peak_frontier: usize,
    /// Estimated peak bytes held by the frontier and its bookkeeping.
    pub peak_bytes: usize,
}

impl SearchStats {
    pub fn expanded_count(&self) -> usize {
        self.expanded.len()
    }

    /// Record the current working-set size; keeps the running peaks.
    fn sample(&mut self, frontier_len: usize, bytes: usize) {
        self.peak_frontier = self.peak_frontier.max(frontier_len);
        self.peak_bytes = self.peak_bytes.max(bytes);
    }
}

/// The outcome of one solve call. An empty `path` means no path was found;
/// the stats still describe everything visited before the search gave up.
#[derive(Debug, Default, Clone)]
pub struct Solution {
    pub path: Vec<Coord>,
    pub stats: SearchStats,
}

impl Solution {
    pub fn found(&self) -> bool {
        !self.path.is_empty()
    }
}

/// Searches `maze` for a route from `start` to `goal` with the selected
/// strategy.
///
/// A `start` or `goal` that is out of bounds or on a wall yields an immediate
/// empty solution rather than touching the grid. `start == goal` yields the
/// single-cell path without expanding anything further.
pub fn solve(maze: &Maze, start: Coord, goal: Coord, strategy: Strategy) -> Solution {
    if !maze.is_open(start) || !maze.is_open(goal) {
        tracing::warn!(?start, ?goal, "endpoint out of bounds or on a wall");
        return Solution::default();
    }
    if start == goal {
        return Solution {
            path: vec![start],
            stats: SearchStats {
                expanded: vec![start],
                ..SearchStats::default()
            },
        };
    }

    let began = Instant::now();
    let mut solution = match strategy {
        Strategy::Bfs => solve_bfs(maze, start, goal),
        Strategy::Dfs => solve_dfs(maze, start, goal),
        Strategy::HillClimb => solve_hill_climb(maze, start, goal),
        Strategy::AStar => solve_astar(maze, start, goal),
    };
    solution.stats.elapsed = began.elapsed();

    tracing::info!(
        %strategy,
        found = solution.found(),
        path_len = solution.path.len(),
        expanded = solution.stats.expanded_count(),
        elapsed_us = solution.stats.elapsed.as_micros() as u64,
        "solve finished"
    );
    solution
}
