use chrono::NaiveDate;

use crate::cmds::Cmd;
use crate::cursor::{local_today, MonthCursor};
use crate::error::Result;
use crate::grid::{self, MonthGrid};
use crate::loader::MetadataSource;
use crate::metadata::CalendarMetadata;
use crate::render::{Render, LOAD_ERROR_MESSAGE};

/// A month calendar: metadata loaded once plus the cursor being displayed.
pub struct Widget {
    metadata: CalendarMetadata,
    cursor: MonthCursor,
}

impl Widget {
    pub fn new(metadata: CalendarMetadata, cursor: MonthCursor) -> Self {
        Widget { metadata, cursor }
    }

    /// Loads the metadata and points the cursor at the current month.
    pub fn load(source: &dyn MetadataSource) -> Result<Self> {
        let metadata = source.load()?;
        Ok(Widget::new(metadata, MonthCursor::current()))
    }

    /// Like `load`, but reports a failure through `renderer` so nothing but
    /// the error message is drawn. A resource that could not be fetched gets
    /// the fixed retry message; data that arrived but is unusable is named.
    pub fn load_or_report(
        source: &dyn MetadataSource,
        renderer: &mut dyn Render,
    ) -> Result<Option<Self>> {
        match Widget::load(source) {
            Ok(widget) => Ok(Some(widget)),
            Err(e) if e.is_load_failure() => {
                log::warn!("Could not load calendar data from {}: {}", source.describe(), e);
                renderer.render_error(LOAD_ERROR_MESSAGE)?;
                Ok(None)
            }
            Err(e) => {
                log::error!("Calendar data from {} is unusable: {}", source.describe(), e);
                renderer.render_error(&e.to_string())?;
                Ok(None)
            }
        }
    }

    pub fn metadata(&self) -> &CalendarMetadata {
        &self.metadata
    }

    pub fn cursor(&self) -> &MonthCursor {
        &self.cursor
    }

    pub fn cursor_mut(&mut self) -> &mut MonthCursor {
        &mut self.cursor
    }

    /// Applies a navigation command. Returns whether the view changed and
    /// has to be drawn again.
    pub fn send_cmd(&mut self, cmd: Cmd) -> bool {
        self.send_cmd_at(cmd, local_today())
    }

    pub fn send_cmd_at(&mut self, cmd: Cmd, today: NaiveDate) -> bool {
        let moved = match cmd {
            Cmd::PrevMonth => self.cursor.prev_month(),
            Cmd::NextMonth => self.cursor.next_month(),
            Cmd::ThisMonth => {
                self.cursor.set_to_current_from(today);
                true
            }
            Cmd::PrevYear => self.cursor.prev_year(),
            Cmd::NextYear => self.cursor.next_year(),
            Cmd::ThisYear => {
                self.cursor.set_year_to_current_from(today);
                true
            }
            Cmd::Noop | Cmd::Exit => return false,
        };

        if moved {
            log::debug!("{} -> {}", cmd, self.cursor);
        } else {
            log::debug!("{} ignored at {}", cmd, self.cursor);
        }
        moved
    }

    pub fn grid(&self) -> MonthGrid {
        grid::generate(
            self.cursor.year(),
            self.cursor.month0(),
            self.metadata.days_in_month_table(),
        )
    }

    pub fn grid_at(&self, today: NaiveDate) -> MonthGrid {
        grid::generate_at(
            self.cursor.year(),
            self.cursor.month0(),
            self.metadata.days_in_month_table(),
            today,
        )
    }

    pub fn draw(&self, renderer: &mut dyn Render) -> Result<()> {
        renderer.render(&self.metadata, &self.grid())
    }
}
