use std::io::{self, Write};

use crossterm::cursor::MoveTo;
use crossterm::style::{Attribute, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor};
use crossterm::terminal::{Clear, ClearType};
use crossterm::queue;

use crate::color::Color;
use crate::scene::{HELP_LINE, SceneFrame};

const CELL: &str = "  ";
const LEVEL_WIDTH: usize = 20;

/// Draws [`SceneFrame`]s as colored character cells.
///
/// Generic over the writer so frames can be rendered into a buffer in tests.
/// Every call repaints in place; nothing is scrolled.
pub struct TerminalPainter<W: Write> {
    out: W,
    accent: Color,
}

impl<W: Write> TerminalPainter<W> {
    pub fn new(out: W) -> Self {
        Self { out, accent: Color::from_srgb(0.2, 0.6, 1.0, 1.0) }
    }

    pub fn accent(mut self, v: Color) -> Self { self.accent = v; self }

    pub fn into_inner(self) -> W {
        self.out
    }

    pub fn clear(&mut self) -> io::Result<()> {
        queue!(self.out, Clear(ClearType::All), MoveTo(0, 0))?;
        self.out.flush()
    }

    pub fn paint(&mut self, title: &str, frame: &SceneFrame) -> io::Result<()> {
        let mut row: u16 = 0;

        queue!(
            self.out,
            MoveTo(0, row),
            SetAttribute(Attribute::Bold),
            Print(title),
            SetAttribute(Attribute::Reset),
            Clear(ClearType::UntilNewLine),
        )?;
        row += 2;

        let grid_top = row;
        let grid_width = frame.cells.first().map_or(0, Vec::len) * CELL.len();
        for cells in &frame.cells {
            queue!(self.out, MoveTo(0, row))?;
            for &color in cells {
                queue!(self.out, SetBackgroundColor(color.to_terminal()), Print(CELL))?;
            }
            queue!(self.out, ResetColor, Clear(ClearType::UntilNewLine))?;
            row += 1;
        }

        // Indicator sits to the right of the grid's first row.
        let indicator_col = u16::try_from(grid_width + 4).unwrap_or(u16::MAX);
        queue!(
            self.out,
            MoveTo(indicator_col, grid_top),
            SetBackgroundColor(frame.indicator.to_terminal()),
            Print("    "),
            ResetColor,
            Print(" tick"),
        )?;
        row += 1;

        let filled = ((frame.level.clamp(0.0, 1.0) * LEVEL_WIDTH as f32).round() as usize).min(LEVEL_WIDTH);
        queue!(
            self.out,
            MoveTo(0, row),
            Print("[-] "),
            SetForegroundColor(self.accent.to_terminal()),
            Print("█".repeat(filled)),
            ResetColor,
            Print("░".repeat(LEVEL_WIDTH - filled)),
            Print(" [+]  "),
            Print(&frame.target),
            Clear(ClearType::UntilNewLine),
        )?;
        row += 2;

        queue!(self.out, MoveTo(0, row), Print(&frame.readout), Clear(ClearType::UntilNewLine))?;
        row += 1;
        queue!(
            self.out,
            MoveTo(0, row),
            SetAttribute(Attribute::Dim),
            Print(HELP_LINE),
            SetAttribute(Attribute::Reset),
            Clear(ClearType::UntilNewLine),
        )?;

        self.out.flush()
    }
}
