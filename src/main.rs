use mazeway::{app::App, report};

fn main() -> std::io::Result<()> {
    // The terminal belongs to the animation, so diagnostics go to a file.
    let file_appender = tracing_appender::rolling::never(std::env::temp_dir(), "mazeway.log");
    let (writer, _guard) = tracing_appender::non_blocking(file_appender);
    tracing_subscriber::fmt()
        .with_writer(writer)
        .with_ansi(false)
        .init();

    let mut stdout = std::io::stdout();
    App::setup_terminal(&mut stdout)?;
    let app = App::default();
    let result = app.run(&mut stdout);
    App::restore_terminal(&mut stdout)?;

    // Print the summary on the regular screen, where it survives exit.
    let reports = result?;
    if !reports.is_empty() {
        let max_width = crossterm::terminal::size()
            .ok()
            .map(|(cols, _)| cols as usize);
        print!("{}", report::render_table(&reports, max_width));
    }
    Ok(())
}
