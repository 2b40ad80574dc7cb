use std::fmt::Write as _;
use std::time::Duration;

use unicode_truncate::UnicodeTruncateStr;

use crate::maze::Coord;
use crate::solvers::{Solution, Strategy};

/// A run slower than this fails its time budget.
pub const TIME_BUDGET: Duration = Duration::from_secs(1);
/// A run whose estimated peak working set exceeds this fails its memory
/// budget.
pub const MEMORY_BUDGET_BYTES: usize = 1 << 20;

/// Diagnostic summary of one solve run, in the shape the summary table
/// prints.
#[derive(Debug, Clone)]
pub struct RunReport {
    pub strategy: Strategy,
    pub start: Coord,
    pub goal: Coord,
    pub found: bool,
    pub elapsed: Duration,
    pub expanded: usize,
    pub path_len: usize,
    pub peak_bytes: usize,
}

impl RunReport {
    pub fn new(strategy: Strategy, start: Coord, goal: Coord, solution: &Solution) -> Self {
        RunReport {
            strategy,
            start,
            goal,
            found: solution.found(),
            elapsed: solution.stats.elapsed,
            expanded: solution.stats.expanded_count(),
            path_len: solution.path.len(),
            peak_bytes: solution.stats.peak_bytes,
        }
    }

    /// Nodes expanded per cell of the final route; zero when nothing was
    /// found.
    pub fn branching_factor(&self) -> f64 {
        if self.path_len == 0 {
            0.0
        } else {
            self.expanded as f64 / self.path_len as f64
        }
    }

    pub fn within_time_budget(&self) -> bool {
        self.elapsed < TIME_BUDGET
    }

    pub fn within_memory_budget(&self) -> bool {
        self.peak_bytes < MEMORY_BUDGET_BYTES
    }

    fn budget_verdict(&self) -> &'static str {
        match (self.within_time_budget(), self.within_memory_budget()) {
            (true, true) => "ok",
            (false, true) => "time!",
            (true, false) => "mem!",
            (false, false) => "time+mem!",
        }
    }
}

/// Renders run reports as an ASCII summary table, truncated to `max_width`
/// columns when given.
pub fn render_table(reports: &[RunReport], max_width: Option<usize>) -> String {
    let rule = "+---------------+---------+---------+-------+------------+--------+-------+--------+----------+-----------+";
    let mut out = String::new();
    let push_line = |out: &mut String, line: &str| {
        match max_width {
            Some(width) => out.push_str(line.unicode_truncate(width).0),
            None => out.push_str(line),
        }
        out.push('\n');
    };

    push_line(&mut out, rule);
    push_line(
        &mut out,
        "| Strategy      | Start   | Goal    | Found | Time (s)   | Nodes  | Path  | Branch | Peak MB  | Budget    |",
    );
    push_line(&mut out, rule);
    for report in reports {
        let mut line = String::new();
        let _ = write!(
            line,
            "| {:<13} | {:^7} | {:^7} | {:^5} | {:<10.7} | {:>6} | {:>5} | {:>6.2} | {:>8.3} | {:<9} |",
            report.strategy.label(),
            format!("({},{})", report.start.0, report.start.1),
            format!("({},{})", report.goal.0, report.goal.1),
            if report.found { "Yes" } else { "No" },
            report.elapsed.as_secs_f64(),
            report.expanded,
            report.path_len,
            report.branching_factor(),
            report.peak_bytes as f64 / (1024.0 * 1024.0),
            report.budget_verdict(),
        );
        push_line(&mut out, &line);
    }
    push_line(&mut out, rule);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::solvers::SearchStats;

    fn sample_solution(path_len: usize, expanded: usize) -> Solution {
        Solution {
            path: (0..path_len as u16).map(|c| (1, c)).collect(),
            stats: SearchStats {
                elapsed: Duration::from_millis(12),
                expanded: (0..expanded as u16).map(|c| (1, c)).collect(),
                peak_frontier: 4,
                peak_bytes: 2048,
            },
        }
    }

    #[test]
    fn branching_factor_arithmetic() {
        let report = RunReport::new(
            Strategy::Bfs,
            (1, 1),
            (1, 8),
            &sample_solution(8, 20),
        );
        assert!((report.branching_factor() - 2.5).abs() < f64::EPSILON);

        let empty = RunReport::new(Strategy::Bfs, (1, 1), (1, 8), &Solution::default());
        assert_eq!(empty.branching_factor(), 0.0);
        assert!(!empty.found);
    }

    #[test]
    fn budget_verdicts() {
        let mut report = RunReport::new(
            Strategy::AStar,
            (1, 1),
            (2, 2),
            &sample_solution(3, 5),
        );
        assert!(report.within_time_budget());
        assert!(report.within_memory_budget());
        assert_eq!(report.budget_verdict(), "ok");

        report.elapsed = Duration::from_secs(2);
        assert_eq!(report.budget_verdict(), "time!");

        report.peak_bytes = 2 * MEMORY_BUDGET_BYTES;
        assert_eq!(report.budget_verdict(), "time+mem!");
    }

    #[test]
    fn table_rows_respect_max_width() {
        let report = RunReport::new(
            Strategy::HillClimb,
            (1, 1),
            (3, 3),
            &sample_solution(4, 4),
        );
        let table = render_table(&[report], Some(40));
        assert!(table.lines().count() >= 5);
        for line in table.lines() {
            assert!(line.len() <= 40);
        }
    }
}
