use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::metadata::CalendarMetadata;

/// Where calendar metadata comes from.
///
/// Every call to `load` is an independent attempt: nothing is retried and
/// nothing from an earlier attempt is reused. Failures are handed back
/// unlogged; the caller decides how to report them.
pub trait MetadataSource {
    fn describe(&self) -> String;
    fn fetch(&self) -> Result<CalendarMetadata>;

    fn load(&self) -> Result<CalendarMetadata> {
        let metadata = self.fetch()?;
        log::info!("Loaded calendar data from {}", self.describe());
        Ok(metadata)
    }
}

pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        FileSource {
            path: path.as_ref().to_owned(),
        }
    }
}

impl MetadataSource for FileSource {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    fn fetch(&self) -> Result<CalendarMetadata> {
        let file = File::open(&self.path)?;
        CalendarMetadata::from_reader(BufReader::new(file))
    }
}

/// A single blocking GET. Transport errors and non-2xx replies are both load
/// failures; timeouts are whatever the agent defaults to.
pub struct HttpSource {
    url: String,
    agent: ureq::Agent,
}

impl HttpSource {
    pub fn new(url: &str) -> Self {
        HttpSource {
            url: url.to_owned(),
            agent: ureq::AgentBuilder::new().build(),
        }
    }
}

impl MetadataSource for HttpSource {
    fn describe(&self) -> String {
        self.url.clone()
    }

    fn fetch(&self) -> Result<CalendarMetadata> {
        let response = self.agent.get(&self.url).call()?;
        log::debug!("{} answered with status {}", self.url, response.status());
        // Read errors while receiving the body stay I/O errors
        let body = response.into_string()?;
        body.parse()
    }
}

pub fn is_remote(location: &str) -> bool {
    let lowercase = location.to_lowercase();
    lowercase.starts_with("http://") || lowercase.starts_with("https://")
}

/// Picks the source matching `location`: URLs are fetched over HTTP, anything
/// else is read as a local file.
pub fn source_for(location: &str) -> Box<dyn MetadataSource> {
    if is_remote(location) {
        Box::new(HttpSource::new(location))
    } else {
        Box::new(FileSource::new(location))
    }
}
