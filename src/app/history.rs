use std::collections::VecDeque;

use crate::maze::GridEvent;

/// Bounded record of rendered grid events with a browse cursor.
///
/// The renderer pushes every event it draws. While paused it can move the
/// cursor backward (returning the event to undo) and forward (returning the
/// event to redraw). The cursor counts how many recorded events are applied
/// to the screen; pushing a live event snaps it back to the live edge.
pub struct EventHistory {
    events: VecDeque<GridEvent>,
    cursor: usize,
    capacity: usize,
}

impl EventHistory {
    pub fn new(capacity: usize) -> Self {
        EventHistory {
            events: VecDeque::new(),
            cursor: 0,
            capacity,
        }
    }

    pub fn push(&mut self, event: GridEvent) {
        if self.capacity == 0 {
            return;
        }
        if self.events.len() == self.capacity {
            self.events.pop_front();
        }
        self.events.push_back(event);
        self.cursor = self.events.len();
    }

    /// The most recently applied event, so the caller can undo it.
    /// Initial snapshots are not steppable and stop the walk backward.
    pub fn step_back(&mut self) -> Option<GridEvent> {
        let candidate = *self.events.get(self.cursor.checked_sub(1)?)?;
        if matches!(candidate, GridEvent::Initial { .. }) {
            return None;
        }
        self.cursor -= 1;
        Some(candidate)
    }

    /// The next recorded event past the cursor, so the caller can redo it.
    pub fn step_forward(&mut self) -> Option<GridEvent> {
        let event = *self.events.get(self.cursor)?;
        self.cursor += 1;
        Some(event)
    }

    /// Whether the cursor sits past the newest recorded event.
    pub fn at_live_edge(&self) -> bool {
        self.cursor == self.events.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::maze::GridCell;

    fn update(row: u16) -> GridEvent {
        GridEvent::Update {
            coord: (row, 1),
            old: GridCell::WALL,
            new: GridCell::EMPTY,
        }
    }

    #[test]
    fn stepping_back_and_forward_round_trips() {
        let mut history = EventHistory::new(16);
        history.push(update(1));
        history.push(update(2));
        assert!(history.at_live_edge());

        let undone = history.step_back().unwrap();
        assert!(matches!(undone, GridEvent::Update { coord: (2, 1), .. }));
        assert!(!history.at_live_edge());

        let redone = history.step_forward().unwrap();
        assert!(matches!(redone, GridEvent::Update { coord: (2, 1), .. }));
        assert!(history.at_live_edge());
        assert!(history.step_forward().is_none());
    }

    #[test]
    fn initial_snapshot_stops_the_walk_backward() {
        let mut history = EventHistory::new(16);
        history.push(GridEvent::Initial {
            cell: GridCell::WALL,
            rows: 5,
            cols: 5,
        });
        history.push(update(1));
        assert!(history.step_back().is_some());
        assert!(history.step_back().is_none());
    }

    #[test]
    fn capacity_drops_oldest_events() {
        let mut history = EventHistory::new(2);
        history.push(update(1));
        history.push(update(2));
        history.push(update(3));
        // Oldest event fell off; only two steps back are possible.
        assert!(history.step_back().is_some());
        assert!(history.step_back().is_some());
        assert!(history.step_back().is_none());
    }

    #[test]
    fn live_push_snaps_cursor_forward() {
        let mut history = EventHistory::new(16);
        history.push(update(1));
        history.push(update(2));
        history.step_back();
        history.push(update(3));
        assert!(history.at_live_edge());
        assert!(matches!(
            history.step_back(),
            Some(GridEvent::Update { coord: (3, 1), .. })
        ));
    }
}
