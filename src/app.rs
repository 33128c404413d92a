use chrono::NaiveDate;

use crate::cmds::Cmd;
use crate::config::Config;
use crate::cursor::local_today;
use crate::error::Result;
use crate::events::{Dispatcher, Event};
use crate::render::Render;
use crate::widget::Widget;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Redraw,
    Idle,
    Quit,
}

pub struct App<'a> {
    config: &'a Config,
    widget: Widget,
    today: NaiveDate,
}

impl<'a> App<'a> {
    pub fn new(config: &'a Config, widget: Widget) -> App<'a> {
        App {
            config,
            widget,
            today: local_today(),
        }
    }

    pub fn widget(&self) -> &Widget {
        &self.widget
    }

    pub fn handle(&mut self, event: Event) -> Outcome {
        match event {
            Event::Tick => self.update(local_today()),
            Event::Input(key) => match self.config.cmd_for(&key) {
                Cmd::Exit => Outcome::Quit,
                cmd => {
                    if self.widget.send_cmd_at(cmd, self.today) {
                        Outcome::Redraw
                    } else {
                        Outcome::Idle
                    }
                }
            },
        }
    }

    /// Moves the notion of today forward; only a new date needs a redraw.
    pub fn update(&mut self, today: NaiveDate) -> Outcome {
        if today == self.today {
            Outcome::Idle
        } else {
            log::debug!("Date changed to {}", today);
            self.today = today;
            Outcome::Redraw
        }
    }

    pub fn draw(&self, renderer: &mut dyn Render) -> Result<()> {
        renderer.render(self.widget.metadata(), &self.widget.grid_at(self.today))
    }

    pub fn run(&mut self, dispatcher: &Dispatcher, renderer: &mut dyn Render) -> Result<()> {
        self.draw(renderer)?;

        while let Ok(event) = dispatcher.next() {
            match self.handle(event) {
                Outcome::Redraw => self.draw(renderer)?,
                Outcome::Idle => {}
                Outcome::Quit => break,
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cursor::MonthCursor;
    use crate::grid::MonthGrid;
    use crate::metadata::tests::english;
    use crate::metadata::CalendarMetadata;
    use termion::event::Key;

    #[derive(Default)]
    struct Recorder {
        drawn: Vec<(i32, u32)>,
    }

    impl Render for Recorder {
        fn render(&mut self, _metadata: &CalendarMetadata, grid: &MonthGrid) -> Result<()> {
            self.drawn.push((grid.year(), grid.month0()));
            Ok(())
        }

        fn render_error(&mut self, _message: &str) -> Result<()> {
            Ok(())
        }
    }

    #[test]
    fn keys_drive_the_cursor_until_exit() {
        let config = Config::default();
        let widget = Widget::new(english(), MonthCursor::new(2024, 11));
        let mut app = App::new(&config, widget);

        let dispatcher = Dispatcher::detached();
        let sink = dispatcher.event_sink();
        for key in &[
            Key::Char('l'),
            Key::Char('x'),
            Key::Char('j'),
            Key::Char('h'),
            Key::Char('h'),
            Key::Char('q'),
            Key::Char('l'),
        ] {
            sink.send(Event::Input(*key)).unwrap();
        }

        let mut recorder = Recorder::default();
        app.run(&dispatcher, &mut recorder).unwrap();

        assert_eq!(
            recorder.drawn,
            vec![(2024, 11), (2025, 0), (2026, 0), (2025, 11), (2025, 10)]
        );
        assert_eq!(*app.widget().cursor(), MonthCursor::new(2025, 10));
    }

    #[test]
    fn redraws_only_when_the_date_changes() {
        let config = Config::default();
        let mut app = App::new(&config, Widget::new(english(), MonthCursor::new(2024, 1)));

        let today = app.today;
        assert_eq!(app.update(today), Outcome::Idle);
        assert_eq!(app.update(today.succ_opt().unwrap()), Outcome::Redraw);
    }
}
