//! Terminal output: styled fragments, frames and the screen they are drawn on.

mod driver;

use std::io::{self, Write};

use crossterm::{
    cursor::MoveTo,
    queue,
    style::Stylize,
    terminal::{Clear, ClearType},
};
use portpulse_core::{PortState, ProcessInfo};

pub use driver::{run, shutdown_signal, Mode};

/// Output of one render step.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Frame {
    /// Wipe the screen before printing.
    pub clear: bool,
    pub lines: Vec<String>,
}

impl Frame {
    /// A frame that replaces whatever is on screen.
    pub fn redraw(lines: Vec<String>) -> Self {
        Self { clear: true, lines }
    }

    /// A frame appended below previous output.
    pub fn append(lines: Vec<String>) -> Self {
        Self {
            clear: false,
            lines,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

/// Where frames are written.
///
/// Clearing only happens when `interactive` is set, so redirected output
/// stays free of cursor escape codes.
pub struct Screen<W: Write> {
    out: W,
    interactive: bool,
}

impl<W: Write> Screen<W> {
    pub fn new(out: W, interactive: bool) -> Self {
        Self { out, interactive }
    }

    pub fn draw(&mut self, frame: &Frame) -> io::Result<()> {
        if frame.is_empty() && !frame.clear {
            return Ok(());
        }
        if frame.clear && self.interactive {
            queue!(self.out, Clear(ClearType::All), MoveTo(0, 0))?;
        }
        for line in &frame.lines {
            writeln!(self.out, "{}", line)?;
        }
        self.out.flush()
    }

    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl Screen<io::Stdout> {
    /// Screen on stdout, interactive when stdout is a terminal.
    pub fn stdout() -> Self {
        Self::new(io::stdout(), atty::is(atty::Stream::Stdout))
    }
}

/// `BUSY`/`FREE` label padded to `width` and colored.
pub fn state_label(state: PortState, width: usize) -> String {
    let padded = format!("{:<width$}", state.label(), width = width);
    match state {
        PortState::Busy => padded.red().bold().to_string(),
        PortState::Free => padded.green().to_string(),
    }
}

/// Owner description for a busy port.
pub fn owner(process: Option<&ProcessInfo>) -> String {
    match process {
        Some(p) => p.to_string(),
        None => "process unknown".dark_grey().to_string(),
    }
}

/// Dimmed helper text.
pub fn hint(text: &str) -> String {
    text.dark_grey().to_string()
}

/// Shorten `s` to at most `max` characters, ending with `…` when cut.
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max.saturating_sub(1)).collect();
        format!("{}…", kept)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("node", 30), "node");
        let long = "node /home/dev/project/node_modules/.bin/vite --port 5173";
        let cut = truncate(long, 30);
        assert_eq!(cut.chars().count(), 30);
        assert!(cut.ends_with('…'));
        assert!(cut.starts_with("node /home/dev"));
    }

    #[test]
    fn test_truncate_multibyte() {
        let cut = truncate("ñññññññññ", 4);
        assert_eq!(cut, "ñññ…");
    }

    #[test]
    fn test_screen_skips_clear_when_not_interactive() {
        let mut screen = Screen::new(Vec::new(), false);
        screen
            .draw(&Frame::redraw(vec!["a".to_string(), "b".to_string()]))
            .unwrap();
        assert_eq!(String::from_utf8(screen.into_inner()).unwrap(), "a\nb\n");
    }

    #[test]
    fn test_screen_clears_when_interactive() {
        let mut screen = Screen::new(Vec::new(), true);
        screen.draw(&Frame::redraw(vec!["x".to_string()])).unwrap();
        let out = String::from_utf8(screen.into_inner()).unwrap();
        assert!(out.starts_with('\u{1b}'));
        assert!(out.ends_with("x\n"));

        let mut screen = Screen::new(Vec::new(), true);
        screen.draw(&Frame::append(vec!["y".to_string()])).unwrap();
        assert_eq!(String::from_utf8(screen.into_inner()).unwrap(), "y\n");
    }

    #[test]
    fn test_owner_text() {
        let info = ProcessInfo::new(42, "python -m http.server 8000");
        assert_eq!(owner(Some(&info)), "PID 42: python -m http.server 8000");
        assert!(owner(None).contains("process unknown"));
    }
}
