use serde::Deserialize;
use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use termion::event::Key;

use crate::cmds::Cmd;
use crate::error::{Error, ErrorKind, Result};
use crate::render::Theme;

pub type KeyMap = HashMap<Key, Cmd>;

const CONFIG_PATH_ENV_VAR: &str = "SLIMCAL_CONFIG_FILE";

pub const DEFAULT_METADATA_LOCATION: &str = "data/calendar.json";

pub(crate) fn find_configfile_locations() -> Vec<PathBuf> {
    let mut locations = Vec::new();

    if let Ok(path) = env::var(CONFIG_PATH_ENV_VAR) {
        locations.push(PathBuf::from(path));
    }

    if let Some(dir) = dirs::config_dir() {
        locations.push(dir.join("slimcal").join("config.toml"));
    }

    if let Some(home) = dirs::home_dir() {
        locations.push(home.join(".slimcal.toml"));
    }

    locations
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct ConfigFile {
    metadata: Option<String>,
    tick_rate_ms: Option<u64>,
    keys: HashMap<String, String>,
    theme: Option<Theme>,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub metadata: String,
    pub key_map: KeyMap,
    pub tick_rate: Duration,
    pub theme: Theme,
}

impl Default for Config {
    fn default() -> Config {
        let mut config = Config {
            metadata: DEFAULT_METADATA_LOCATION.to_owned(),
            key_map: HashMap::new(),
            tick_rate: Duration::from_millis(500),
            theme: Theme::default(),
        };

        config.key_map.insert(Key::Char('h'), Cmd::PrevMonth);
        config.key_map.insert(Key::Left, Cmd::PrevMonth);
        config.key_map.insert(Key::Char('l'), Cmd::NextMonth);
        config.key_map.insert(Key::Right, Cmd::NextMonth);
        config.key_map.insert(Key::Char('t'), Cmd::ThisMonth);
        config.key_map.insert(Key::Char('k'), Cmd::PrevYear);
        config.key_map.insert(Key::Up, Cmd::PrevYear);
        config.key_map.insert(Key::Char('j'), Cmd::NextYear);
        config.key_map.insert(Key::Down, Cmd::NextYear);
        config.key_map.insert(Key::Char('T'), Cmd::ThisYear);
        config.key_map.insert(Key::Char('q'), Cmd::Exit);
        config.key_map.insert(Key::Esc, Cmd::Exit);

        config
    }
}

fn parse_key(name: &str) -> Result<Key> {
    let mut chars = name.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => return Ok(Key::Char(c)),
        (None, _) => {
            return Err(Error::new(ErrorKind::ConfigParse, "Empty key binding"));
        }
        _ => {}
    }

    match name.to_lowercase().as_str() {
        "left" => Ok(Key::Left),
        "right" => Ok(Key::Right),
        "up" => Ok(Key::Up),
        "down" => Ok(Key::Down),
        "pageup" => Ok(Key::PageUp),
        "pagedown" => Ok(Key::PageDown),
        "home" => Ok(Key::Home),
        "end" => Ok(Key::End),
        "esc" => Ok(Key::Esc),
        _ => Err(Error::new(
            ErrorKind::ConfigParse,
            &format!("Key '{}' not recognized", name),
        )),
    }
}

impl Config {
    pub fn from_toml(content: &str) -> Result<Config> {
        let file: ConfigFile = toml::from_str(content)?;
        let mut config = Config::default();

        if let Some(metadata) = file.metadata {
            config.metadata = metadata;
        }

        if let Some(ms) = file.tick_rate_ms {
            config.tick_rate = Duration::from_millis(ms);
        }

        if let Some(theme) = file.theme {
            config.theme = theme;
        }

        for (key, cmd) in file.keys.iter() {
            config.key_map.insert(parse_key(key)?, cmd.parse()?);
        }

        Ok(config)
    }

    pub fn from_path(path: &Path) -> Result<Config> {
        let content = fs::read_to_string(path).map_err(|e| {
            Error::new(
                ErrorKind::ConfigParse,
                &format!("Could not read '{}': {}", path.display(), e),
            )
        })?;
        Config::from_toml(&content)
    }

    pub fn cmd_for(&self, key: &Key) -> Cmd {
        self.key_map.get(key).copied().unwrap_or(Cmd::Noop)
    }
}

/// Loads the configuration from `path` if given, else from the first existing
/// default location, else falls back to built-in defaults.
pub fn load_suitable_config(path: Option<&Path>) -> Result<Config> {
    if let Some(path) = path {
        return Config::from_path(path);
    }

    match find_configfile_locations()
        .into_iter()
        .find(|location| location.is_file())
    {
        Some(location) => {
            log::info!("Using configuration from {}", location.display());
            Config::from_path(&location)
        }
        None => {
            log::debug!("No configuration file found, using defaults");
            Ok(Config::default())
        }
    }
}
