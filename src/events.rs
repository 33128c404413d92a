use std::io;
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use termion::event::Key;
use termion::input::TermRead;

use crate::config::Config;

pub enum Event {
    Input(Key),
    Tick,
}

/// Funnels key presses and clock ticks into a single queue, so the consumer
/// handles exactly one event at a time.
pub struct Dispatcher {
    rx: mpsc::Receiver<Event>,
    tx: mpsc::Sender<Event>,
}

impl Default for Dispatcher {
    fn default() -> Dispatcher {
        Dispatcher::from_config(&Config::default())
    }
}

impl Dispatcher {
    pub fn from_config(config: &Config) -> Dispatcher {
        let dispatcher = Dispatcher::detached();
        dispatcher.spawn_input();
        dispatcher.spawn_ticks(config.tick_rate);
        dispatcher
    }

    /// A dispatcher with no producers attached; events only arrive through
    /// `event_sink`.
    pub fn detached() -> Dispatcher {
        let (tx, rx) = mpsc::channel();
        Dispatcher { rx, tx }
    }

    fn spawn_input(&self) {
        let tx = self.tx.clone();
        thread::spawn(move || {
            let stdin = io::stdin();
            for key in stdin.lock().keys().flatten() {
                if tx.send(Event::Input(key)).is_err() {
                    return;
                }
            }
        });
    }

    fn spawn_ticks(&self, tick_rate: Duration) {
        let tx = self.tx.clone();
        thread::spawn(move || loop {
            if tx.send(Event::Tick).is_err() {
                return;
            }
            thread::sleep(tick_rate);
        });
    }

    pub fn next(&self) -> Result<Event, mpsc::RecvError> {
        self.rx.recv()
    }

    pub fn event_sink(&self) -> &mpsc::Sender<Event> {
        &self.tx
    }
}
