use std::fmt;
use std::str::FromStr;

use crate::error::{Error, ErrorKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cmd {
    Noop,
    PrevMonth,
    NextMonth,
    ThisMonth,
    PrevYear,
    NextYear,
    ThisYear,
    Exit,
}

impl Cmd {
    pub const ALL: [Cmd; 8] = [
        Cmd::Noop,
        Cmd::PrevMonth,
        Cmd::NextMonth,
        Cmd::ThisMonth,
        Cmd::PrevYear,
        Cmd::NextYear,
        Cmd::ThisYear,
        Cmd::Exit,
    ];

    pub fn as_str(&self) -> &'static str {
        match *self {
            Cmd::Noop => "noop",
            Cmd::PrevMonth => "prev_month",
            Cmd::NextMonth => "next_month",
            Cmd::ThisMonth => "this_month",
            Cmd::PrevYear => "prev_year",
            Cmd::NextYear => "next_year",
            Cmd::ThisYear => "this_year",
            Cmd::Exit => "exit",
        }
    }

    /// Whether the command moves the cursor, so the grid must be redrawn.
    pub fn navigates(&self) -> bool {
        !matches!(self, Cmd::Noop | Cmd::Exit)
    }
}

impl fmt::Display for Cmd {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Cmd {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim().to_lowercase().replace('-', "_");
        Cmd::ALL
            .iter()
            .find(|cmd| cmd.as_str() == name)
            .copied()
            .ok_or_else(|| {
                Error::new(
                    ErrorKind::ConfigParse,
                    &format!("Command '{}' not recognized", s),
                )
            })
    }
}
