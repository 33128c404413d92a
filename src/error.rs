use std::convert::From;
use std::error;
use std::fmt;
use std::io;
use std::result;

pub type Result<T> = result::Result<T, Error>;

#[derive(Debug)]
pub struct Error {
    pub kind: ErrorKind,
    pub message: Option<String>,
}

#[derive(Debug)]
pub enum ErrorKind {
    MetadataParse,
    InvalidMetadata,
    ConfigParse,
    Network,
    Status(u16),
    IOError(io::Error),
}

impl Error {
    pub fn new(kind: ErrorKind, msg: &str) -> Self {
        Error {
            kind,
            message: Some(msg.to_owned()),
        }
    }

    pub fn with_msg(mut self, message: &str) -> Self {
        self.message = Some(message.to_owned());
        self
    }

    /// Whether this error happened while fetching the metadata resource, as
    /// opposed to the resource being unusable once fetched.
    pub fn is_load_failure(&self) -> bool {
        matches!(
            self.kind,
            ErrorKind::Network | ErrorKind::Status(_) | ErrorKind::IOError(_)
        )
    }
}

impl From<ErrorKind> for Error {
    fn from(kind: ErrorKind) -> Error {
        Error {
            kind,
            message: None,
        }
    }
}

impl From<io::Error> for Error {
    fn from(io_error: io::Error) -> Error {
        Error::from(ErrorKind::IOError(io_error))
    }
}

impl From<serde_json::Error> for Error {
    fn from(json_error: serde_json::Error) -> Error {
        Error::new(
            ErrorKind::MetadataParse,
            &format!("Could not parse calendar data: {}", json_error),
        )
    }
}

impl From<toml::de::Error> for Error {
    fn from(toml_error: toml::de::Error) -> Error {
        Error::new(
            ErrorKind::ConfigParse,
            &format!("Could not parse configuration: {}", toml_error),
        )
    }
}

impl From<ureq::Error> for Error {
    fn from(ureq_error: ureq::Error) -> Error {
        match ureq_error {
            ureq::Error::Status(code, response) => Error::new(
                ErrorKind::Status(code),
                &format!("server returned error for {}", response.get_url()),
            ),
            ureq::Error::Transport(transport) => {
                Error::new(ErrorKind::Network, &transport.to_string())
            }
        }
    }
}

impl From<Error> for io::Error {
    fn from(err: Error) -> Self {
        match (err.kind, err.message) {
            (ErrorKind::IOError(err), _) => err,
            (_, Some(message)) => io::Error::new(io::ErrorKind::InvalidData, message),
            (kind, None) => io::Error::new(io::ErrorKind::InvalidData, kind.as_str()),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.message {
            Some(msg) => write!(f, "{}: {}", self.kind.as_str(), msg),
            None => write!(f, "{}", self.kind.as_str()),
        }
    }
}

impl error::Error for Error {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match &self.kind {
            ErrorKind::IOError(err) => Some(err),
            _ => None,
        }
    }
}

impl ErrorKind {
    pub fn as_str(&self) -> String {
        match self {
            ErrorKind::MetadataParse => "invalid calendar data format".to_owned(),
            ErrorKind::InvalidMetadata => "inconsistent calendar data".to_owned(),
            ErrorKind::ConfigParse => "invalid configuration".to_owned(),
            ErrorKind::Network => "connection error".to_owned(),
            ErrorKind::Status(code) => format!("server returned error, status: {}", code),
            ErrorKind::IOError(err) => err.to_string(),
        }
    }
}
