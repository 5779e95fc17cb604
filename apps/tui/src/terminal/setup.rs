use color_eyre::eyre::eyre;
use color_eyre::Result;
use crossterm::{
    cursor,
    event::{DisableBracketedPaste, EnableBracketedPaste},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{stdout, Stdout, Write};

/// Raw mode, alternate screen and bracketed paste (so dropped files arrive as
/// one paste event). Every step is rolled back if a later one fails.
pub fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
    eprintln!("Setting up terminal...");

    let (width, height) = crossterm::terminal::size().unwrap_or((80, 24));
    eprintln!("Terminal size: {width}x{height}");

    eprintln!("Enabling raw mode...");
    enable_raw_mode().map_err(|e| {
        eprintln!("Failed to enable raw mode: {e}");
        eyre!("Failed to enable raw mode: {e}")
    })?;

    eprintln!("Entering alternate screen...");
    let mut out = stdout();
    if let Err(e) = execute!(out, EnterAlternateScreen, EnableBracketedPaste) {
        cleanup_terminal_state(true, false);
        return Err(eyre!("Failed to enter alternate screen: {e}"));
    }

    let mut terminal = match Terminal::new(CrosstermBackend::new(out)) {
        Ok(terminal) => terminal,
        Err(e) => {
            cleanup_terminal_state(true, true);
            return Err(eyre!("Failed to create terminal: {e}"));
        }
    };

    // Cosmetic; a failure here is not fatal.
    if let Err(e) = terminal.clear() {
        eprintln!("Warning: Failed to clear terminal: {e}");
    }
    if let Err(e) = execute!(stdout(), cursor::Hide) {
        eprintln!("Warning: Failed to hide cursor: {e}");
    }

    eprintln!("Terminal setup completed successfully");
    Ok(terminal)
}

/// Undo whatever `setup_terminal` managed to do.
pub fn cleanup_terminal_state(raw_mode: bool, alternate_screen: bool) {
    let mut out = stdout();
    eprintln!("Cleaning up terminal state...");

    if let Err(e) = execute!(out, cursor::Show) {
        eprintln!("Warning: Failed to show cursor: {e}");
    }

    if alternate_screen {
        match execute!(out, DisableBracketedPaste, LeaveAlternateScreen) {
            Ok(()) => eprintln!("Left alternate screen"),
            Err(e) => eprintln!("Warning: Failed to leave alternate screen: {e}"),
        }
    }

    if raw_mode {
        match disable_raw_mode() {
            Ok(()) => eprintln!("Disabled raw mode"),
            Err(e) => eprintln!("Warning: Failed to disable raw mode: {e}"),
        }
    }

    let _ = execute!(out, cursor::MoveToNextLine(1));
    let _ = out.flush();

    eprintln!("Terminal cleanup completed");
}
