use itertools::Itertools;
use serde::Deserialize;
use std::fmt::{self, Display};
use std::io::Write;

use crate::error::Result;
use crate::grid::{DayCell, MonthGrid, Origin};
use crate::metadata::{CalendarMetadata, DAYS_PER_WEEK};

/// Shown in place of the calendar when the metadata could not be loaded.
pub const LOAD_ERROR_MESSAGE: &str = "Error loading data, refresh to retry";

const CELL_WIDTH: usize = 4;

/// Draws a month grid somewhere. The grid carries everything computed; the
/// renderer only decides how it looks.
pub trait Render {
    fn render(&mut self, metadata: &CalendarMetadata, grid: &MonthGrid) -> Result<()>;
    fn render_error(&mut self, message: &str) -> Result<()>;
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Theme {
    pub today_symbol: Option<char>,
    pub styled: bool,
}

impl Default for Theme {
    fn default() -> Self {
        Theme {
            today_symbol: Some('*'),
            styled: true,
        }
    }
}

struct CellView<'a> {
    cell: &'a DayCell,
    theme: &'a Theme,
}

impl Display for CellView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let marker = if self.cell.is_today {
            self.theme.today_symbol.unwrap_or(' ')
        } else {
            ' '
        };

        let faint = self.theme.styled && self.cell.origin != Origin::CurrentMonth;
        let bold = self.theme.styled && self.cell.is_today;

        if faint {
            write!(f, "{}", termion::style::Faint)?;
        } else if bold {
            write!(f, "{}", termion::style::Bold)?;
        }

        write!(f, " {}{:>2}", marker, self.cell.label)?;

        if faint || bold {
            write!(f, "{}", termion::style::Reset)?;
        }
        Ok(())
    }
}

/// Renders the calendar as text, one line per week.
pub struct TextRenderer<W: Write> {
    out: W,
    theme: Theme,
    fullscreen: bool,
}

impl<W: Write> TextRenderer<W> {
    pub fn new(out: W, theme: Theme) -> Self {
        TextRenderer {
            out,
            theme,
            fullscreen: false,
        }
    }

    /// Redraw from the top-left corner on every render, for raw-mode terminals.
    pub fn fullscreen(mut self) -> Self {
        self.fullscreen = true;
        self
    }

    pub fn get_mut(&mut self) -> &mut W {
        &mut self.out
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn begin(&mut self) -> Result<()> {
        if self.fullscreen {
            write!(
                self.out,
                "{}{}",
                termion::clear::All,
                termion::cursor::Goto(1, 1)
            )?;
        }
        Ok(())
    }

    fn line(&mut self, text: &str) -> Result<()> {
        // Raw mode does not translate \n into \r\n
        let eol = if self.fullscreen { "\r\n" } else { "\n" };
        write!(self.out, "{}{}", text.trim_end(), eol)?;
        Ok(())
    }
}

impl<W: Write> Render for TextRenderer<W> {
    fn render(&mut self, metadata: &CalendarMetadata, grid: &MonthGrid) -> Result<()> {
        let width = DAYS_PER_WEEK * CELL_WIDTH;
        let title = format!("{} {}", metadata.month_name(grid.month0()), grid.year());
        let header = metadata
            .weekday_abbreviations()
            .iter()
            .map(|abbr| format!("{:>w$}", abbr, w = CELL_WIDTH))
            .join("");

        self.begin()?;
        self.line(&format!("{:^w$}", title, w = width))?;
        self.line(&header)?;

        for row in grid.rows() {
            let theme = &self.theme;
            let text = row
                .iter()
                .map(|cell| CellView { cell, theme }.to_string())
                .join("");
            self.line(&text)?;
        }

        self.out.flush()?;
        Ok(())
    }

    fn render_error(&mut self, message: &str) -> Result<()> {
        self.begin()?;
        self.line(message)?;
        self.out.flush()?;
        Ok(())
    }
}
