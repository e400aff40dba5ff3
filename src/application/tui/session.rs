use crossterm::ExecutableCommand;
use crossterm::event::{self, Event, KeyEvent, KeyEventKind, poll};
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use crossterm::tty::IsTty;
use ratatui::{Frame, Terminal, backend::CrosstermBackend};
use std::io::{self, Stdout, stdout};
use std::time::Duration;

/// A page that can be driven by [`TerminalSession::run`].
pub trait Screen {
    fn draw(&mut self, frame: &mut Frame);

    /// Returns `false` once the screen wants to exit.
    fn handle_key(&mut self, key: KeyEvent) -> bool;
}

/// Owns the terminal while a page is running: raw mode plus alternate screen.
pub struct TerminalSession {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    restored: bool,
}

impl TerminalSession {
    pub fn new() -> io::Result<Self> {
        // First check if we're in a proper terminal
        if !IsTty::is_tty(&stdout()) {
            return Err(io::Error::new(
                io::ErrorKind::Unsupported,
                "Not running in a TTY, cannot initialize terminal interface",
            ));
        }

        enable_raw_mode()
            .map_err(|e| io::Error::other(format!("Failed to enable raw mode: {}", e)))?;

        stdout().execute(EnterAlternateScreen).map_err(|e| {
            let _ = disable_raw_mode(); // Clean up on failure
            io::Error::other(format!("Failed to enter alternate screen: {}", e))
        })?;

        let backend = CrosstermBackend::new(stdout());
        let terminal = Terminal::new(backend).map_err(|e| {
            let _ = disable_raw_mode();
            let _ = stdout().execute(LeaveAlternateScreen);
            io::Error::other(format!("Failed to create terminal: {}", e))
        })?;

        log::debug!("terminal session started");

        Ok(Self {
            terminal,
            restored: false,
        })
    }

    /// Draw/poll loop. Redraws after every key and on resize.
    pub fn run<S: Screen>(&mut self, screen: &mut S) -> io::Result<()> {
        loop {
            self.terminal.draw(|frame| screen.draw(frame))?;

            if !poll(Duration::from_millis(100))? {
                continue;
            }

            match event::read()? {
                // Windows reports both press and release
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if !screen.handle_key(key) {
                        break;
                    }
                }
                _ => continue,
            }
        }

        self.restore()
    }

    fn restore(&mut self) -> io::Result<()> {
        if self.restored {
            return Ok(());
        }
        self.restored = true;
        disable_raw_mode()?;
        self.terminal.backend_mut().execute(LeaveAlternateScreen)?;
        self.terminal.show_cursor()?;
        log::debug!("terminal session restored");
        Ok(())
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        // Fallback cleanup if run() exited early
        let _ = self.restore();
    }
}

/// Prints what the terminal supports; used by `rangepicker check-terminal`.
pub fn check_terminal() -> io::Result<()> {
    println!("Testing terminal capabilities...");

    if IsTty::is_tty(&stdout()) {
        println!("✓ Running in a TTY");
    } else {
        println!("✗ Not running in a TTY");
        return Err(io::Error::new(
            io::ErrorKind::Unsupported,
            "Terminal interface requires a TTY",
        ));
    }

    enable_raw_mode()?;
    println!("✓ Raw mode enabled");

    stdout().execute(EnterAlternateScreen)?;
    stdout().execute(LeaveAlternateScreen)?;
    println!("✓ Alternate screen enabled");

    disable_raw_mode()?;
    println!("✓ Terminal restored");
    Ok(())
}
