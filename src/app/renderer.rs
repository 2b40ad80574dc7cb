use std::{
    io::{Stdout, Write},
    sync::{
        atomic::{AtomicBool, Ordering},
        mpsc::{Receiver, RecvTimeoutError, TryRecvError},
    },
    time::Duration,
};

use crossterm::{
    QueueableCommand, cursor, queue,
    style::{self, Attribute, Color, Stylize},
    terminal::{self, ClearType},
};

use crate::{
    app::{UserActionEvent, history::EventHistory},
    maze::{GridCell, GridEvent},
};

/// Animation refresh interval with a user-adjustable speed level.
pub(super) struct RefreshScale {
    base: Duration,
    level: i32,
}

impl RefreshScale {
    const MIN_LEVEL: i32 = -4;
    const MAX_LEVEL: i32 = 6;

    /// Base interval sized so a full carve animates in a few seconds
    /// regardless of grid area.
    pub fn calibrated(rows: u16, cols: u16) -> Self {
        let cells = rows as u64 * cols as u64;
        let micros = (3_000_000 / cells.max(1)).clamp(400, 40_000);
        RefreshScale {
            base: Duration::from_micros(micros),
            level: 0,
        }
    }

    pub fn current(&self) -> Duration {
        if self.level >= 0 {
            self.base / (1u32 << self.level)
        } else {
            self.base * (1u32 << -self.level)
        }
    }

    pub fn speed_up(&mut self) {
        self.level = (self.level + 1).min(Self::MAX_LEVEL);
    }

    pub fn slow_down(&mut self) {
        self.level = (self.level - 1).max(Self::MIN_LEVEL);
    }
}

/// How the render loop ended.
pub enum RendererStatus {
    Completed,
    Cancelled,
}

enum PauseOutcome {
    Resumed,
    Cancelled,
}

pub struct Renderer {
    /// Standard output handle to write to the terminal
    stdout: Stdout,
    /// Current grid dimensions as (rows, cols)
    grid_dims: Option<(u16, u16)>,
    /// Record of drawn events for browsing while paused
    history: EventHistory,
    /// Time to wait between events, adjustable from the keyboard
    refresh: RefreshScale,
}

impl Renderer {
    /// How often the render loop wakes up to look for user actions while no
    /// grid events arrive.
    const IDLE_POLL: Duration = Duration::from_millis(100);

    pub fn new(max_history_events: usize, refresh: RefreshScale) -> Self {
        Self {
            stdout: std::io::stdout(),
            grid_dims: None,
            history: EventHistory::new(max_history_events),
            refresh,
        }
    }

    /// Check the terminal is large enough for the grid. If not, report the
    /// needed size and signal the caller to stop rendering.
    fn check_fit(stdout: &mut Stdout, rows: u16, cols: u16) -> std::io::Result<bool> {
        let (term_cols, term_rows) = terminal::size()?;
        if term_cols < cols * GridCell::CELL_WIDTH || term_rows < rows {
            let msg = format!(
                "Terminal is too small: the {cols}x{rows} grid needs {}x{} characters.\r\n",
                cols * GridCell::CELL_WIDTH,
                rows,
            );
            queue!(
                stdout,
                terminal::Clear(ClearType::All),
                cursor::MoveTo(0, 0),
                style::PrintStyledContent(msg.with(Color::Yellow).attribute(Attribute::Bold)),
            )?;
            stdout.flush()?;
            return Ok(false);
        }
        Ok(true)
    }

    /// Draw a single grid event. Returns Ok(false) when the terminal cannot
    /// fit the grid and rendering should stop.
    fn render_grid_event(&mut self, event: &GridEvent) -> std::io::Result<bool> {
        match event {
            GridEvent::Initial { cell, rows, cols } => {
                let (rows, cols) = (*rows, *cols);
                self.grid_dims = Some((rows, cols));

                if !Renderer::check_fit(&mut self.stdout, rows, cols)? {
                    return Ok(false);
                }

                self.stdout.queue(cursor::MoveTo(0, 0))?;
                for _row in 0..rows {
                    for _col in 0..cols {
                        self.stdout.queue(style::Print(cell))?;
                    }
                    self.stdout.queue(style::Print("\r\n"))?;
                }
                self.stdout.flush()?;
            }
            GridEvent::Update { coord, new, .. } => {
                if self.grid_dims.is_some() {
                    // Cell (row, col) sits at terminal column col * CELL_WIDTH, line row
                    queue!(
                        self.stdout,
                        cursor::MoveTo(coord.1 * GridCell::CELL_WIDTH, coord.0),
                        style::Print(new)
                    )?;
                    self.stdout.flush()?;
                }
            }
        }
        Ok(true)
    }

    /// Draw the reverse of an update, restoring the cell it overwrote.
    fn undo_grid_event(&mut self, event: &GridEvent) -> std::io::Result<bool> {
        match event {
            GridEvent::Initial { .. } => Ok(true),
            GridEvent::Update { coord, old, new } => self.render_grid_event(&GridEvent::Update {
                coord: *coord,
                old: *new,
                new: *old,
            }),
        }
    }

    /// Blocks on user actions until the animation resumes or is cancelled.
    fn handle_pause(
        &mut self,
        user_action_event_rx: &Receiver<UserActionEvent>,
        grid_event_rx: &Receiver<GridEvent>,
    ) -> std::io::Result<PauseOutcome> {
        loop {
            let event = match user_action_event_rx.recv() {
                // Channel gone means the app loop exited; resume so the
                // render loop can notice and wind down.
                Err(_) => return Ok(PauseOutcome::Resumed),
                Ok(event) => event,
            };
            match event {
                UserActionEvent::Resume => {
                    // Catch back up to the live edge before going live.
                    while let Some(event) = self.history.step_forward() {
                        tracing::debug!(?event, "replaying history forward on resume");
                        if !self.render_grid_event(&event)? {
                            return Ok(PauseOutcome::Cancelled);
                        }
                        std::thread::sleep(self.refresh.current());
                    }
                    return Ok(PauseOutcome::Resumed);
                }
                UserActionEvent::Forward => {
                    if self.history.at_live_edge() {
                        // Pull one future event in, if any has arrived.
                        match grid_event_rx.try_recv() {
                            Ok(event) => {
                                tracing::debug!(?event, "stepping into a live event");
                                if !self.render_grid_event(&event)? {
                                    return Ok(PauseOutcome::Cancelled);
                                }
                                self.history.push(event);
                            }
                            Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => {
                                tracing::debug!("no further event to step into");
                            }
                        }
                    } else if let Some(event) = self.history.step_forward() {
                        tracing::debug!(?event, "stepping forward in history");
                        if !self.render_grid_event(&event)? {
                            return Ok(PauseOutcome::Cancelled);
                        }
                    }
                }
                UserActionEvent::Backward => {
                    if let Some(event) = self.history.step_back() {
                        tracing::debug!(?event, "stepping backward in history");
                        if !self.undo_grid_event(&event)? {
                            return Ok(PauseOutcome::Cancelled);
                        }
                    }
                }
                UserActionEvent::SpeedUp => self.refresh.speed_up(),
                UserActionEvent::SlowDown => self.refresh.slow_down(),
                UserActionEvent::Resize => {
                    if let Some((rows, cols)) = self.grid_dims {
                        if !Renderer::check_fit(&mut self.stdout, rows, cols)? {
                            return Ok(PauseOutcome::Cancelled);
                        }
                    }
                }
                UserActionEvent::Pause => {
                    // Already paused
                }
                UserActionEvent::Cancel => return Ok(PauseOutcome::Cancelled),
            }
        }
    }

    /// Render loop consuming grid events until the channel closes.
    /// Returns whether rendering ran to completion or was cancelled.
    pub fn render(
        &mut self,
        grid_event_rx: Receiver<GridEvent>,
        user_action_event_rx: Receiver<UserActionEvent>,
        cancel: &AtomicBool,
        done: &AtomicBool,
    ) -> std::io::Result<RendererStatus> {
        queue!(self.stdout, terminal::Clear(ClearType::All), cursor::Hide)?;
        self.stdout.flush()?;

        loop {
            if cancel.load(Ordering::Relaxed) {
                return Ok(RendererStatus::Cancelled);
            }

            match user_action_event_rx.try_recv() {
                Ok(action_event) => {
                    tracing::debug!(?action_event, "received user action event");
                    match action_event {
                        UserActionEvent::Pause => {
                            match self.handle_pause(&user_action_event_rx, &grid_event_rx)? {
                                PauseOutcome::Resumed => {}
                                PauseOutcome::Cancelled => {
                                    cancel.store(true, Ordering::Relaxed);
                                    return Ok(RendererStatus::Cancelled);
                                }
                            }
                        }
                        UserActionEvent::SpeedUp => self.refresh.speed_up(),
                        UserActionEvent::SlowDown => self.refresh.slow_down(),
                        UserActionEvent::Resize => {
                            if let Some((rows, cols)) = self.grid_dims {
                                if !Renderer::check_fit(&mut self.stdout, rows, cols)? {
                                    cancel.store(true, Ordering::Relaxed);
                                    return Ok(RendererStatus::Cancelled);
                                }
                            }
                        }
                        UserActionEvent::Cancel => {
                            cancel.store(true, Ordering::Relaxed);
                            return Ok(RendererStatus::Cancelled);
                        }
                        _ => {}
                    }
                }
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => {}
            }

            match grid_event_rx.recv_timeout(Self::IDLE_POLL) {
                Err(RecvTimeoutError::Timeout) => {
                    // Nothing to draw; check user actions again
                }
                Err(RecvTimeoutError::Disconnected) => break,
                Ok(event) => {
                    if !self.render_grid_event(&event)? {
                        cancel.store(true, Ordering::Relaxed);
                        return Ok(RendererStatus::Cancelled);
                    }
                    self.history.push(event);
                    std::thread::sleep(self.refresh.current());
                }
            }
        }

        // Move cursor below the maze after the stream ends
        if let Some((rows, _)) = self.grid_dims {
            queue!(self.stdout, cursor::MoveTo(0, rows), cursor::Show)?;
            self.stdout.flush()?;
        }
        done.store(true, Ordering::Relaxed);
        Ok(RendererStatus::Completed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn refresh_scale_halves_and_doubles() {
        let mut scale = RefreshScale::calibrated(25, 25);
        let base = scale.current();
        scale.speed_up();
        assert_eq!(scale.current(), base / 2);
        scale.slow_down();
        scale.slow_down();
        assert_eq!(scale.current(), base * 2);
    }

    #[test]
    fn refresh_scale_saturates_at_its_bounds() {
        let mut scale = RefreshScale::calibrated(10, 10);
        for _ in 0..20 {
            scale.speed_up();
        }
        let fastest = scale.current();
        scale.speed_up();
        assert_eq!(scale.current(), fastest);
        assert!(fastest > Duration::ZERO);
    }

    #[test]
    fn calibration_shrinks_for_larger_grids() {
        let small = RefreshScale::calibrated(5, 5);
        let large = RefreshScale::calibrated(50, 50);
        assert!(large.current() < small.current());
    }
}
