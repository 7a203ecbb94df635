//! Terminal rendering for the markdown produced by `upkeep_core::display`.
//!
//! Rich output goes through termimad; `--no-color` prints the markdown as is,
//! which is also what the integration tests match against.

use std::io::{self, Write};

use anyhow::Result;
use termimad::{crossterm::style::Color, MadSkin};

/// Renders markdown either styled or as plain text.
pub struct TerminalRenderer {
    rich_enabled: bool,
    skin: MadSkin,
}

impl TerminalRenderer {
    pub fn new(rich_enabled: bool) -> Self {
        let mut skin = MadSkin::default();

        skin.set_headers_fg(Color::Cyan);
        skin.bold.set_fg(Color::Yellow);
        skin.italic.set_fg(Color::Magenta);
        skin.inline_code.set_bg(Color::AnsiValue(238));
        // Export tables
        skin.table.set_fg(Color::AnsiValue(244));

        Self { rich_enabled, skin }
    }

    pub fn render(&self, markdown: &str) -> Result<()> {
        let mut out = io::stdout().lock();
        if !self.rich_enabled {
            write!(out, "{markdown}")?;
            out.flush()?;
            return Ok(());
        }

        let mut table = String::new();
        for line in markdown.lines() {
            if line.starts_with('|') {
                table.push_str(line);
                table.push('\n');
                continue;
            }
            if !table.is_empty() {
                write!(out, "{}", self.skin.term_text(&table))?;
                table.clear();
            }
            if line.starts_with('#') {
                // Keep the hashes visible so schedule ids stay easy to spot
                writeln!(out, "\x1b[36m{line}\x1b[0m")?;
            } else {
                writeln!(out, "{}", self.skin.inline(line))?;
            }
        }
        if !table.is_empty() {
            write!(out, "{}", self.skin.term_text(&table))?;
        }
        out.flush()?;
        Ok(())
    }
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self::new(true)
    }
}
