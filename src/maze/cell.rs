use crossterm::style::{Color, Stylize};

use std::fmt;

/// A single cell of the maze grid: either a wall or an open (passable) cell.
///
/// The search algorithms only care about the wall/open split; the `OpenKind`
/// payload carries the display state an open cell picks up while an animation
/// replays a run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GridCell {
    Open(OpenKind),
    Wall,
}

impl GridCell {
    pub const EMPTY: GridCell = GridCell::Open(OpenKind::Empty);
    pub const WALL: GridCell = GridCell::Wall;
    pub const VISITED: GridCell = GridCell::Open(OpenKind::Visited);
    pub const ROUTE: GridCell = GridCell::Open(OpenKind::Route);
    pub const START: GridCell = GridCell::Open(OpenKind::Start);
    pub const GOAL: GridCell = GridCell::Open(OpenKind::Goal);
    /// The width of each cell when rendered, in character widths.
    pub const CELL_WIDTH: u16 = 2;

    /// Whether the cell is passable, regardless of its display state.
    pub fn is_open(&self) -> bool {
        matches!(self, GridCell::Open(_))
    }
}

/// Display states of an open cell.
#[derive(Default, Debug, Clone, Copy, PartialEq)]
pub enum OpenKind {
    /// An open cell no run has touched yet.
    #[default]
    Empty,
    /// Expanded by the search being replayed.
    Visited,
    /// Part of the final route.
    Route,
    /// The start cell of the search.
    Start,
    /// The goal cell of the search.
    Goal,
}

impl fmt::Display for GridCell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let styled_symbol = match self {
            GridCell::Open(kind) => match kind {
                OpenKind::Empty => "  ".with(Color::Reset),
                OpenKind::Visited => "* ".with(Color::Blue),
                OpenKind::Route => "██".with(Color::Yellow),
                OpenKind::Start => "🟩".with(Color::Green),
                OpenKind::Goal => "🟥".with(Color::Red),
            },
            GridCell::Wall => "⬜".with(Color::White),
        };

        #[cfg(debug_assertions)]
        {
            use unicode_width::UnicodeWidthStr;
            assert_eq!(
                styled_symbol.content().width(),
                GridCell::CELL_WIDTH as usize,
                "Each cell must occupy exactly two character widths."
            );
        }

        write!(f, "{}", styled_symbol)
    }
}
