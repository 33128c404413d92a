pub mod app;
pub mod cmds;
pub mod config;
pub mod cursor;
pub mod error;
pub mod events;
pub mod grid;
pub mod loader;
pub mod metadata;
pub mod render;
pub mod widget;

pub use error::{Error, ErrorKind, Result};
