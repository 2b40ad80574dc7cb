use mazeway::{app::App, maze, report};

/// Headless generate-and-solve driver: `profile [iterations] [size] [seed]`.
fn main() -> std::process::ExitCode {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .init();

    let mut args = std::env::args();
    args.next(); // Skip executable name
    let iterations = args
        .next()
        .and_then(|s| s.parse::<usize>().ok())
        .unwrap_or(1);
    let size = args
        .next()
        .and_then(|s| s.parse::<u16>().ok())
        .unwrap_or(maze::MAX_SIZE);
    let seed = args.next().and_then(|s| s.parse::<u64>().ok());

    let app = App::default();
    match app.profile(size, size, seed, iterations) {
        Ok(reports) => {
            print!("{}", report::render_table(&reports, None));
            std::process::ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("profiling failed: {e}");
            std::process::ExitCode::FAILURE
        }
    }
}
