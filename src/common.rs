use std::fmt::{self, Display};
use std::io;

pub const DEFAULT_STATS_URL: &'static str = "https://pypi.org/stats";
/// Name fragment of the HTML row that carries the size of the whole index.
pub const TOTAL_ROW_MARKER: &'static str = "All of PyPI";

#[derive(Debug, PartialEq, Eq, Clone)]
pub struct SizeEntry {
    pub name: String,
    pub size_bytes: u64,
}

impl SizeEntry {
    pub fn new(name: impl Into<String>, size_bytes: u64) -> Self {
        SizeEntry {
            name: name.into(),
            size_bytes,
        }
    }
}

/// Sizes reported by one response of the statistics endpoint.
///
/// `entries` never contains the index-wide total, which is tracked apart in
/// `total_index_size_bytes`.
#[derive(Debug, Default, PartialEq, Eq, Clone)]
pub struct StatsSnapshot {
    pub entries: Vec<SizeEntry>,
    pub total_index_size_bytes: Option<u64>,
}

impl StatsSnapshot {
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[derive(Debug)]
pub enum Error {
    CreateClient(reqwest::Error),
    CreateRuntime(io::Error),
    InvalidJson(serde_json::Error),
    MissingTotal,
    ZeroTotal,
    Write(io::Error),
}

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::CreateClient(e) => write!(f, "failed to create the HTTP client: {e}"),
            Error::CreateRuntime(e) => write!(f, "failed to create tokio runtime: {e}"),
            Error::InvalidJson(e) => {
                write!(f, "statistics response is not the expected JSON document: {e}")
            }
            Error::MissingTotal => {
                write!(f, "statistics response does not report the total index size")
            }
            Error::ZeroTotal => write!(
                f,
                "statistics response reports a total index size of zero bytes"
            ),
            Error::Write(e) => write!(f, "failed to write output: {e}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::CreateClient(e) => Some(e),
            Error::CreateRuntime(e) => Some(e),
            Error::InvalidJson(e) => Some(e),
            Error::MissingTotal => None,
            Error::ZeroTotal => None,
            Error::Write(e) => Some(e),
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(error: serde_json::Error) -> Self {
        Error::InvalidJson(error)
    }
}

impl From<io::Error> for Error {
    fn from(error: io::Error) -> Self {
        Error::Write(error)
    }
}

pub type Result<T> = std::result::Result<T, Error>;
