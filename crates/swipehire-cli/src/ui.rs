//! Terminal output for the streaming assistant message

use std::io::{self, Write};

/// Redraws the in-progress assistant message in place.
///
/// Each update carries the whole visible text, not an increment, and the text
/// can shrink when a directive span completes and is stripped. The printer
/// erases the previously drawn block and reprints, so directive tags never
/// linger on screen.
#[derive(Debug, Default)]
pub struct StreamPrinter {
    drawn_lines: usize,
}

impl StreamPrinter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the drawn block with `text`.
    pub fn redraw(&mut self, text: &str) -> io::Result<()> {
        let mut stdout = io::stdout().lock();
        if self.drawn_lines > 0 {
            // move to the top of the block and clear to end of screen
            write!(stdout, "\x1b[{}A\r\x1b[J", self.drawn_lines)?;
        }
        writeln!(stdout, "{}", text)?;
        stdout.flush()?;
        self.drawn_lines = line_count(text);
        Ok(())
    }

    /// Finish the block, leaving the final text in place.
    pub fn finish(&mut self, text: &str) -> io::Result<()> {
        self.redraw(text)?;
        self.drawn_lines = 0;
        Ok(())
    }
}

/// Lines `writeln!` produced for this text, including the trailing newline.
fn line_count(text: &str) -> usize {
    text.split('\n').count()
}
