use std::{fmt, io};

#[derive(Debug)]
pub enum Error {
    /// The config file could not be opened or read.
    Io(io::Error),
    /// The config file is readable but does not satisfy the contract.
    Config(String),
    /// Connecting to or talking to the endpoint failed.
    Network(String),
    /// The endpoint did not answer within the configured timeout.
    Timeout,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::Io(e) => write!(f, "could not read the config file: {}", e),
            Error::Config(reason) => write!(f, "invalid configuration: {}", reason),
            Error::Network(reason) => write!(f, "{}", reason),
            Error::Timeout => write!(f, "the endpoint did not respond in time"),
        }
    }
}

impl std::error::Error for Error {}

impl From<io::Error> for Error {
    fn from(e: io::Error) -> Error {
        Error::Io(e)
    }
}
