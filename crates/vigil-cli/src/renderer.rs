//! Terminal rendering module for rich markdown output
//!
//! Uses termimad for styled markdown with a plain-text fallback for pipes
//! and tests.

use anyhow::Result;
use termimad::{crossterm::style::Color, MadSkin};

/// Terminal renderer that can switch between rich and plain text output
pub struct TerminalRenderer {
    rich_enabled: bool,
    skin: MadSkin,
}

impl TerminalRenderer {
    pub fn new(rich_enabled: bool) -> Self {
        let mut skin = MadSkin::default();

        skin.set_headers_fg(Color::Blue);
        skin.bold.set_fg(Color::Yellow);
        skin.italic.set_fg(Color::Magenta);
        skin.inline_code.set_bg(Color::AnsiValue(238));

        Self { rich_enabled, skin }
    }

    /// Render markdown text to stdout
    pub fn render(&self, markdown: &str) -> Result<()> {
        if self.rich_enabled {
            // Headers keep their hash marks; tables go through the skin as a block.
            let mut table = String::new();
            for line in markdown.lines() {
                if line.starts_with('|') {
                    table.push_str(line);
                    table.push('\n');
                    continue;
                }
                if !table.is_empty() {
                    self.skin.print_text(&table);
                    table.clear();
                }
                if line.starts_with('#') {
                    println!("\x1b[34m{line}\x1b[0m");
                } else {
                    self.skin.print_inline(line);
                    println!();
                }
            }
            if !table.is_empty() {
                self.skin.print_text(&table);
            }
        } else {
            print!("{markdown}");
        }
        Ok(())
    }

    /// Print a warning line to stderr
    pub fn warn(&self, message: &str) {
        if self.rich_enabled {
            eprintln!("\x1b[33mWarning:\x1b[0m {message}");
        } else {
            eprintln!("Warning: {message}");
        }
    }
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self::new(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_renderer() {
        let renderer = TerminalRenderer::new(false);
        assert!(!renderer.rich_enabled);
        assert!(renderer.render("# Title\n").is_ok());
    }

    #[test]
    fn test_default_is_rich() {
        assert!(TerminalRenderer::default().rich_enabled);
    }
}
