mod history;
mod renderer;

use std::{
    io::{Stdout, Write},
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
        mpsc::{Receiver, Sender, SyncSender},
    },
    time::Duration,
};

use crossterm::{
    ExecutableCommand, QueueableCommand, cursor,
    event::{self, KeyCode},
    queue,
    style::{self, Attribute, Color, Stylize},
    terminal::{self, ClearType},
};
use rand::Rng;

use crate::{
    app::renderer::{RefreshScale, Renderer, RendererStatus},
    generators::{Generator, generate_maze},
    maze::{GridCell, GridEvent, MAX_SIZE, MIN_SIZE, Maze, MazeError},
    report::RunReport,
    solvers::{Strategy, solve},
};

enum UserInputEvent {
    KeyPress(event::KeyEvent),
    Resize,
}

#[derive(Debug)]
pub(crate) enum UserActionEvent {
    /// Pause the animation
    Pause,
    /// Resume the animation
    Resume,
    /// Step forward in history or to the future when paused
    Forward,
    /// Step backward in history when paused
    Backward,
    /// Terminal resize
    Resize,
    /// Increase animation speed
    SpeedUp,
    /// Decrease animation speed
    SlowDown,
    /// Cancel rendering
    Cancel,
}

pub struct App {
    /// Timeout for receiving input events, a.k.a. how often to check for render done/cancel flags
    input_recv_timeout: Duration,
    /// Timeout for polling input events in the input thread, a.k.a.
    /// how often to check for render done/cancel flags
    user_input_event_poll_timeout: Duration,
    /// Maximum number of grid events to keep for history browsing when paused
    max_history_events: usize,
}

impl Default for App {
    fn default() -> Self {
        Self {
            input_recv_timeout: Duration::from_millis(100),
            user_input_event_poll_timeout: Duration::from_millis(100),
            max_history_events: 10000,
        }
    }
}

impl App {
    /// Maximum number of grid events to buffer in the channel between compute and render threads
    const MAX_EVENTS_IN_CHANNEL_BUFFER: usize = 1000;
    /// Terminal rows kept free below the maze for status messages
    const STATUS_ROWS: u16 = 2;
    /// Available maze generators
    const GENERATORS: [Generator; 2] = [Generator::Backtracking, Generator::LoopAverse];
    /// Available search strategies
    const STRATEGIES: [Strategy; 4] = Strategy::ALL;

    /// Set a panic hook to restore terminal state on panic
    /// This ensures that the terminal is not left in raw mode or alternate screen on panic
    /// even if the panic occurs in a different thread
    fn set_panic_hook() {
        let hook = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |panic_info| {
            let _ = App::restore_terminal(&mut std::io::stdout()); // ignore any errors as we are already failing
            hook(panic_info);
        }));
    }

    /// Setup terminal in raw mode and enter alternate screen
    /// Also sets a panic hook to restore terminal on panic
    pub fn setup_terminal(stdout: &mut Stdout) -> std::io::Result<()> {
        terminal::enable_raw_mode()?;
        App::set_panic_hook();
        crossterm::queue!(
            stdout,
            terminal::EnterAlternateScreen,
            terminal::Clear(ClearType::All),
            cursor::Hide,
            cursor::MoveTo(0, 0)
        )?;
        stdout.flush()?;
        Ok(())
    }

    /// Restore terminal to original state
    /// Leave alternate screen and disable raw mode
    pub fn restore_terminal(stdout: &mut Stdout) -> std::io::Result<()> {
        queue!(stdout, terminal::LeaveAlternateScreen, cursor::Show)?;
        stdout.flush()?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    /// Main application loop. Returns the reports of every completed run so
    /// the caller can print the summary table on the regular screen.
    pub fn run(&self, stdout: &mut Stdout) -> std::io::Result<Vec<RunReport>> {
        // Ask user for maze dimensions
        let (rows, cols) = match App::ask_maze_dimensions(stdout)? {
            Some(dims) => dims,
            None => {
                return Ok(vec![]);
            }
        };

        // Ask user for maze generation algorithm
        let mut generator = match App::select_from_menu(
            stdout,
            "Select maze generation algorithm (use arrow keys and Enter, or Esc to exit):",
            &App::GENERATORS,
        )? {
            Some(generator) => {
                stdout.execute(style::PrintStyledContent(
                    format!("Selected generator: {}\r\n", generator)
                        .with(Color::Green)
                        .attribute(Attribute::Bold),
                ))?;
                generator
            }
            None => {
                return Ok(vec![]);
            }
        };

        // Ask user for search strategy
        let mut strategy = match App::select_from_menu(
            stdout,
            "Select search strategy (use arrow keys and Enter, or Esc to exit):",
            &App::STRATEGIES,
        )? {
            Some(strategy) => {
                stdout.execute(style::PrintStyledContent(
                    format!("Selected strategy: {}\r\n", strategy)
                        .with(Color::Green)
                        .attribute(Attribute::Bold),
                ))?;
                strategy
            }
            None => {
                return Ok(vec![]);
            }
        };

        queue!(
            stdout,
            style::PrintStyledContent(
                "Controls:\r\n"
                    .with(Color::Yellow)
                    .attribute(Attribute::Bold)
            ),
            style::PrintStyledContent("  Enter: Pause/Resume animation\r\n".with(Color::Cyan)),
            style::PrintStyledContent(
                "  ←/→: Step backward/forward when paused\r\n".with(Color::Cyan)
            ),
            style::PrintStyledContent("  ↑/↓: Speed up/slow down animation\r\n".with(Color::Cyan)),
            style::PrintStyledContent("  Esc: Exit\r\n\r\n".with(Color::Cyan)),
        )?;
        stdout.flush()?;

        // Ask if user wants to loop generation and solving
        let loop_animation = match App::select_from_menu(
            stdout,
            "Loop maze generation and solving? Will randomize generator & strategy combination. (use arrow keys and Enter, or Esc to exit):",
            &["Yes", "No"],
        )? {
            Some(choice) => choice == "Yes",
            None => {
                return Ok(vec![]);
            }
        };

        // Flag to indicate rendering is done. Set to true by the render thread when it finishes.
        let render_done = Arc::new(AtomicBool::new(false));
        // Flag to indicate rendering should be cancelled. Set to true on Esc key event.
        let render_cancel = Arc::new(AtomicBool::new(false));

        let (user_input_event_tx, user_input_event_rx) =
            std::sync::mpsc::channel::<UserInputEvent>();
        let user_input_event_poll_timeout = self.user_input_event_poll_timeout;
        let render_done_for_input = render_done.clone();
        let render_cancel_for_input = render_cancel.clone();
        // Spawn a thread to listen for user input
        let input_thread_handle = std::thread::spawn(move || -> std::io::Result<()> {
            App::listen_to_user_input(
                user_input_event_tx,
                user_input_event_poll_timeout,
                &render_done_for_input,
                &render_cancel_for_input,
            )
        });

        let (grid_event_tx, grid_event_rx) =
            std::sync::mpsc::sync_channel::<GridEvent>(App::MAX_EVENTS_IN_CHANNEL_BUFFER);
        let (user_action_event_tx, user_action_event_rx) =
            std::sync::mpsc::channel::<UserActionEvent>();

        // Spawn a thread to listen for grid updates and render the maze
        let max_history_events = self.max_history_events;
        let render_cancel_for_render = render_cancel.clone();
        let render_done_for_render = render_done.clone();
        let render_thread_handle = std::thread::spawn(move || {
            let mut renderer =
                Renderer::new(max_history_events, RefreshScale::calibrated(rows, cols));
            renderer.render(
                grid_event_rx,
                user_action_event_rx,
                &render_cancel_for_render,
                &render_done_for_render,
            )
        });

        // Spawn a thread to generate mazes and solve them
        let combos = App::GENERATORS
            .iter()
            .flat_map(|&generator| {
                App::STRATEGIES
                    .iter()
                    .map(move |&strategy| (generator, strategy))
            })
            .collect::<Vec<(Generator, Strategy)>>();
        let render_cancel_for_compute = render_cancel.clone();
        let compute_thread_handle = std::thread::spawn(move || -> Vec<RunReport> {
            let mut reports = Vec::new();
            if !loop_animation {
                reports.extend(App::compute(rows, cols, grid_event_tx, generator, strategy));
                return reports;
            }
            // Looping mode: randomly select generator and strategy each iteration
            let mut rng = rand::rng();
            loop {
                reports.extend(App::compute(
                    rows,
                    cols,
                    grid_event_tx.clone(),
                    generator,
                    strategy,
                ));
                // Check if rendering was cancelled
                if render_cancel_for_compute.load(Ordering::Relaxed) {
                    tracing::info!("compute thread detected render cancel, exiting loop");
                    return reports;
                }
                // Randomly select new generator and strategy combination for next iteration
                (generator, strategy) = combos[rng.random_range(0..combos.len())];
            }
        });

        // Main thread loop to listen for user input events during rendering
        self.app_loop(
            user_input_event_rx,
            user_action_event_tx,
            render_done,
            render_cancel,
        );

        // Wait for input thread to finish
        let _ = input_thread_handle.join();

        // Wait for compute thread to finish
        let reports = compute_thread_handle
            .join()
            .expect("Compute thread panicked");

        // Wait for render thread to finish
        let completed = render_thread_handle
            .join()
            .expect("Render thread panicked")?;

        if let RendererStatus::Cancelled = completed {
            tracing::info!("rendering was cancelled by user");
            return Ok(reports);
        }

        let msg = match reports.last() {
            Some(report) if report.found => "Path found! ",
            Some(_) => "No path found. ",
            None => "Nothing to solve. ",
        };
        stdout.execute(style::PrintStyledContent(
            msg.with(Color::Green).attribute(Attribute::Bold),
        ))?;

        stdout.execute(style::PrintStyledContent(
            "Press Esc to exit...\r\n"
                .with(Color::Blue)
                .attribute(Attribute::Bold),
        ))?;
        // Wait for user to press Esc
        App::wait_for_esc()?;
        Ok(reports)
    }

    /// Headless mode: generate and solve with every strategy, no rendering.
    /// One maze is carved per iteration; seeds advance per iteration so runs
    /// stay reproducible.
    pub fn profile(
        &self,
        rows: u16,
        cols: u16,
        seed: Option<u64>,
        iterations: usize,
    ) -> Result<Vec<RunReport>, MazeError> {
        let mut reports = Vec::new();
        for iteration in 0..iterations {
            let mut maze = Maze::new(rows, cols, None)?;
            generate_maze(
                &mut maze,
                Generator::Backtracking,
                seed.map(|s| s.wrapping_add(iteration as u64)),
            )?;
            let open = maze.open_cells();
            let (start, goal) = (open[0], *open.last().expect("generator rejects degenerate mazes"));
            for strategy in App::STRATEGIES {
                let solution = solve(&maze, start, goal, strategy);
                reports.push(RunReport::new(strategy, start, goal, &solution));
            }
        }
        Ok(reports)
    }

    /// App loop after starting input and render threads
    fn app_loop(
        &self,
        user_input_event_rx: Receiver<UserInputEvent>,
        user_action_event_tx: Sender<UserActionEvent>,
        render_done: Arc<AtomicBool>,
        render_cancel: Arc<AtomicBool>,
    ) {
        tracing::info!("started main app loop");
        // Flag to indicate if the animation is currently paused
        let mut is_paused = false;
        loop {
            // Check if render is done
            if render_done.load(Ordering::Relaxed) {
                // Drop the receiver to signal input thread to exit
                drop(user_input_event_rx);
                break;
            }

            let event = match user_input_event_rx.recv_timeout(self.input_recv_timeout) {
                Err(e) => {
                    match e {
                        std::sync::mpsc::RecvTimeoutError::Timeout => {
                            // Skip to next iteration to check render_done again
                            continue;
                        }
                        std::sync::mpsc::RecvTimeoutError::Disconnected => {
                            // Input thread has exited, break the loop
                            break;
                        }
                    }
                }
                Ok(event) => match event {
                    UserInputEvent::KeyPress(key_event) => {
                        match key_event.code {
                            // Exit on Esc key
                            KeyCode::Esc => {
                                tracing::debug!("[app loop] Esc key pressed, notifying renderer");
                                // Error only happens if the receiver is dropped, which
                                // means Renderer::render has exited already
                                user_action_event_tx.send(UserActionEvent::Cancel).ok();
                                render_cancel.store(true, Ordering::Relaxed);
                                break;
                            }
                            KeyCode::Enter => {
                                // Toggle pause/resume on Enter key
                                let event = if is_paused {
                                    UserActionEvent::Resume
                                } else {
                                    UserActionEvent::Pause
                                };
                                is_paused = !is_paused;
                                Some(event)
                            }
                            KeyCode::Left if is_paused => {
                                // Step backward when paused
                                Some(UserActionEvent::Backward)
                            }
                            KeyCode::Right if is_paused => {
                                // Step forward when paused
                                Some(UserActionEvent::Forward)
                            }
                            KeyCode::Up => {
                                // Speed up animation
                                Some(UserActionEvent::SpeedUp)
                            }
                            KeyCode::Down => {
                                // Slow down animation
                                Some(UserActionEvent::SlowDown)
                            }
                            _ => None, // Ignore other keys
                        }
                    }
                    UserInputEvent::Resize => Some(UserActionEvent::Resize),
                },
            };

            // Send the user action event to the render thread
            if let Some(event) = event {
                if user_action_event_tx.send(event).is_err() {
                    // Render thread has exited
                    break;
                }
            }
        }
        // The user_input_event_rx and user_action_event_tx are dropped here
        tracing::info!("exiting main app loop");
    }

    /// Listen for user input events (key presses and resize)
    /// This function runs in a separate thread, and is the only place where user input is read
    fn listen_to_user_input(
        user_input_event_tx: Sender<UserInputEvent>,
        event_poll_timeout: Duration,
        render_done: &AtomicBool,
        render_cancel: &AtomicBool,
    ) -> std::io::Result<()> {
        loop {
            // Check if render is done or canceled
            if render_done.load(Ordering::Relaxed) || render_cancel.load(Ordering::Relaxed) {
                return Ok(());
            }

            // Poll for events with a timeout
            if !event::poll(event_poll_timeout)? {
                // No event available, continue loop to check flags again
                continue;
            }

            // Read the next event
            // We only care about key presses and resizes for now
            let input_event = match event::read()? {
                event::Event::Key(key_event) if key_event.kind == event::KeyEventKind::Press => {
                    UserInputEvent::KeyPress(key_event)
                }
                event::Event::Resize(_, _) => UserInputEvent::Resize,
                _ => continue, // Ignore other events
            };

            // Should exit input thread on Esc key
            let should_exit = matches!(
                input_event,
                UserInputEvent::KeyPress(event::KeyEvent {
                    code: KeyCode::Esc,
                    ..
                })
            );

            // Send the input event to the main thread
            if user_input_event_tx.send(input_event).is_err() {
                // Receiver has been dropped, exit the thread
                return Ok(());
            }

            if should_exit {
                tracing::debug!("[input loop] Esc key pressed, exiting");
                return Ok(());
            }
        }
    }

    /// Generate a maze, solve it, and replay the search for the renderer.
    /// Returns the report of the run, or None if generation failed.
    fn compute(
        rows: u16,
        cols: u16,
        grid_event_tx: SyncSender<GridEvent>,
        generator: Generator,
        strategy: Strategy,
    ) -> Option<RunReport> {
        let mut maze = match Maze::new(rows, cols, Some(grid_event_tx)) {
            Ok(maze) => maze,
            Err(e) => {
                tracing::error!(%e, "rejected maze dimensions");
                return None;
            }
        };
        if let Err(e) = generate_maze(&mut maze, generator, None) {
            tracing::error!(%e, "maze generation failed");
            return None;
        }

        // First and last open cells are far apart in row-major order and
        // never on a wall.
        let open = maze.open_cells();
        let (start, goal) = (open[0], *open.last().expect("generator rejects degenerate mazes"));
        maze.set(start, GridCell::START);
        maze.set(goal, GridCell::GOAL);

        // The search itself reads the maze without touching it.
        let solution = solve(&maze, start, goal, strategy);

        // Replay for the renderer: expansions first, then the final route.
        for &cell in &solution.stats.expanded {
            if cell != start && cell != goal {
                maze.set(cell, GridCell::VISITED);
            }
        }
        for &cell in &solution.path {
            if cell != start && cell != goal {
                maze.set(cell, GridCell::ROUTE);
            }
        }

        Some(RunReport::new(strategy, start, goal, &solution))
        // Maze is dropped here, as well as the grid_event_tx sender
    }

    /// Wait for the user to press the Esc key
    /// This function blocks until Esc is pressed
    fn wait_for_esc() -> std::io::Result<()> {
        loop {
            if let event::Event::Key(event::KeyEvent { code, kind, .. }) = event::read()? {
                if code == KeyCode::Esc && kind == event::KeyEventKind::Press {
                    break;
                }
            }
        }
        Ok(())
    }

    /// Get user input with real-time validation and feedback
    /// Returns None if user cancels input with Esc
    /// Returns Some(T) if user inputs a valid input and presses Enter, where T is the validated type
    fn prompt_with_validation<F, T>(
        stdout: &mut Stdout,
        prompt: &str,
        validate: F,
    ) -> std::io::Result<Option<T>>
    where
        F: Fn(&str) -> Result<T, String>,
    {
        // Save cursor position so we can restore / redraw
        queue!(stdout, cursor::Hide, cursor::SavePosition)?;
        stdout.flush()?;

        let mut input = String::new();

        let number_option = loop {
            // Re-render prompt line
            queue!(
                stdout,
                cursor::RestorePosition,
                terminal::Clear(ClearType::FromCursorDown)
            )?;

            // Print prompt
            stdout.queue(style::PrintStyledContent(
                prompt.with(Color::Cyan).attribute(Attribute::Bold),
            ))?;

            // Decide color based on validity
            let validation_result = validate(input.trim());
            match validation_result {
                Ok(_) => {
                    stdout.queue(style::SetForegroundColor(Color::Green))?;
                }
                Err(_) => {
                    stdout.queue(style::SetForegroundColor(Color::Red))?;
                }
            }

            queue!(stdout, style::Print(&input), style::ResetColor)?;

            stdout.queue(style::Print(" \r\n"))?;

            // Error message line (if any)
            if let Err(msg) = validation_result {
                stdout.queue(style::PrintStyledContent(
                    msg.with(Color::DarkGrey).attribute(Attribute::Dim),
                ))?;
            }

            stdout.flush()?;

            // Wait for key event
            if let event::Event::Key(event::KeyEvent { code, kind, .. }) = event::read()? {
                match code {
                    KeyCode::Enter => {
                        match validate(input.trim()) {
                            Ok(n) => break Some(n), // valid number, exit loop
                            Err(_) => continue,     // invalid, re-render
                        }
                    }
                    KeyCode::Char(c) if kind == event::KeyEventKind::Press => {
                        if !c.is_whitespace() && !c.is_control() {
                            input.push(c);
                        }
                    }
                    KeyCode::Backspace => {
                        input.pop();
                    }
                    KeyCode::Esc => {
                        // User cancelled input
                        break None;
                    }
                    _ => {}
                }
            }
        };
        // Cleanup
        queue!(
            stdout,
            cursor::RestorePosition,
            terminal::Clear(ClearType::FromCursorDown),
            cursor::Show
        )?;
        stdout.flush()?;

        Ok(number_option)
    }

    /// Largest maze dimension that fits the terminal, within the library
    /// bounds. Returns None when even the smallest maze does not fit.
    fn get_max_maze_size(term_size: u16, cell_size: u16) -> Option<u16> {
        let fit = term_size / cell_size;
        if fit < MIN_SIZE {
            return None;
        }
        Some(fit.min(MAX_SIZE))
    }

    /// Ask user for maze dimensions (rows and columns between MIN_SIZE and
    /// MAX_SIZE, further capped by the terminal size)
    /// Returns None if user cancels input with Esc
    fn ask_maze_dimensions(stdout: &mut Stdout) -> std::io::Result<Option<(u16, u16)>> {
        stdout.execute(style::PrintStyledContent(
            format!(
                "Enter maze dimensions (rows and columns between {MIN_SIZE} and {MAX_SIZE}), \
or press Esc to exit. Empty input takes the largest size the terminal fits.\r\n"
            )
            .with(Color::Blue),
        ))?;

        // Validation closure based on the terminal size at keystroke time
        let validate = |s: &str, is_rows| {
            let max_size = if let Ok((term_cols, term_rows)) = terminal::size() {
                let max = if is_rows {
                    // Reserve rows for status messages below the maze
                    App::get_max_maze_size(term_rows.saturating_sub(App::STATUS_ROWS), 1)
                } else {
                    App::get_max_maze_size(term_cols, GridCell::CELL_WIDTH)
                };
                match max {
                    Some(max) => max,
                    None => {
                        return Err(format!(
                            "Terminal is too small for even a {MIN_SIZE}x{MIN_SIZE} maze. Please resize it."
                        ));
                    }
                }
            } else {
                // Fall back to the library bound if terminal size is unknown
                MAX_SIZE
            };

            if s.is_empty() {
                return Ok(max_size);
            }

            let error_msg = format!("Please enter a number between {MIN_SIZE} and {max_size}.");
            s.parse::<u16>()
                .map_err(|_| error_msg.clone())
                .and_then(|n| {
                    if (MIN_SIZE..=max_size).contains(&n) {
                        Ok(n)
                    } else {
                        Err(error_msg)
                    }
                })
        };

        let validate_rows = |s: &str| validate(s, true);
        let validate_cols = |s: &str| validate(s, false);

        let rows = match App::prompt_with_validation(stdout, "Rows: ", validate_rows)? {
            Some(r) => r,
            None => return Ok(None),
        };
        stdout.execute(style::PrintStyledContent(
            format!("Rows set to {}\r\n", rows)
                .with(Color::Green)
                .attribute(Attribute::Bold),
        ))?;

        let cols = match App::prompt_with_validation(stdout, "Columns: ", validate_cols)? {
            Some(c) => c,
            None => return Ok(None),
        };
        stdout.execute(style::PrintStyledContent(
            format!("Columns set to {}\r\n", cols)
                .with(Color::Green)
                .attribute(Attribute::Bold),
        ))?;

        Ok(Some((rows, cols)))
    }

    /// Present a menu of options to the user and let them select one using arrow keys
    /// Returns None if user cancels input with Esc
    /// Returns Some(T) if user selects an option and presses Enter, where T is the option type
    fn select_from_menu<T: std::fmt::Display + Copy>(
        stdout: &mut Stdout,
        prompt: &str,
        options: &[T],
    ) -> std::io::Result<Option<T>> {
        if options.is_empty() {
            return Ok(None);
        }

        // Save cursor position so we can restore / redraw
        queue!(stdout, cursor::Hide, cursor::SavePosition)?;

        let mut selected = 0;

        let selected_option = loop {
            // Re-render prompt line
            queue!(
                stdout,
                cursor::RestorePosition,
                terminal::Clear(ClearType::FromCursorDown)
            )?;

            // Print prompt
            stdout.queue(style::PrintStyledContent(prompt.with(Color::Yellow)))?;

            // Print options
            for (i, option) in options.iter().enumerate() {
                if i == selected {
                    stdout.queue(style::SetAttribute(Attribute::Reverse))?;
                }
                stdout.queue(style::Print(format!("\r\n{}", option)))?;
                if i == selected {
                    stdout.queue(style::SetAttribute(Attribute::NoReverse))?;
                }
            }
            stdout.queue(style::Print("\r\n"))?;

            stdout.flush()?;

            // Wait for key event
            if let event::Event::Key(event::KeyEvent { code, kind, .. }) = event::read()? {
                if kind != event::KeyEventKind::Press {
                    // Only handle key press events
                    continue;
                }
                match code {
                    KeyCode::Up => {
                        selected = match selected {
                            0 => options.len() - 1,
                            _ => selected - 1,
                        };
                    }
                    KeyCode::Down => {
                        selected = if selected >= options.len() - 1 {
                            0
                        } else {
                            selected + 1
                        };
                    }
                    KeyCode::Enter => {
                        break Some(options[selected]);
                    }
                    KeyCode::Esc => {
                        // User cancelled input
                        break None;
                    }
                    _ => {}
                }
            }
        };
        // Cleanup
        queue!(
            stdout,
            cursor::RestorePosition,
            terminal::Clear(ClearType::FromCursorDown),
            cursor::Show
        )?;
        stdout.flush()?;

        Ok(selected_option)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn max_maze_size_respects_terminal_and_library_bounds() {
        // 2 columns of glyphs per cell
        assert_eq!(App::get_max_maze_size(40, GridCell::CELL_WIDTH), Some(20));
        // Huge terminal still caps at the library bound
        assert_eq!(App::get_max_maze_size(500, 1), Some(MAX_SIZE));
        // Tiny terminal fits nothing
        assert_eq!(App::get_max_maze_size(6, GridCell::CELL_WIDTH), None);
        assert_eq!(App::get_max_maze_size(MIN_SIZE, 1), Some(MIN_SIZE));
    }

    #[test]
    fn profile_reports_every_strategy() {
        let app = App::default();
        let reports = app.profile(15, 15, Some(5), 2).unwrap();
        assert_eq!(reports.len(), 2 * App::STRATEGIES.len());
        // BFS and A* agree on shortest length whenever both found a path
        for pair in reports.chunks(App::STRATEGIES.len()) {
            let bfs = &pair[0];
            let astar = &pair[3];
            assert!(bfs.found && astar.found);
            assert_eq!(bfs.path_len, astar.path_len);
        }
    }

    #[test]
    fn compute_reports_a_run_end_to_end() {
        let (tx, rx) = std::sync::mpsc::sync_channel(64);
        // Drain events on another thread so compute never blocks on the
        // channel buffer.
        let drain = std::thread::spawn(move || {
            let mut count = 0usize;
            while rx.recv().is_ok() {
                count += 1;
            }
            count
        });

        let report = App::compute(11, 11, tx, Generator::Backtracking, Strategy::Bfs)
            .expect("generation succeeds");
        assert!(report.found, "carved mazes are fully connected");
        assert!(report.expanded >= report.path_len);

        let events = drain.join().unwrap();
        // At least the initial snapshot, the carving, and the replay
        assert!(events > report.expanded);
    }
}
