use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Asset database error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// An asset tag was read before any location tag in the same scan.
    #[error("location not specified for asset {asset} (tag no. {position})")]
    Structural { asset: String, position: usize },

    /// `record` is the 1-based row number, which is also the line number in a scan file.
    #[error("incorrect no. of columns in row no. {record} of file '{scan}'")]
    MalformedRecord { scan: String, record: usize },

    #[error("incorrect scan filename '{0}' should be YYYY-MM-DD.csv")]
    InvalidScanName(String),

    #[error("no scans have been ingested")]
    EmptyStore,

    #[error("cannot compute scan progress without any known locations")]
    DivisionInput,

    #[error("scan '{scan}': {source}")]
    Scan {
        scan: String,
        #[source]
        source: Box<Error>,
    },
}

impl Error {
    /// Attach the scan file name to an error raised while ingesting it.
    pub fn in_scan(self, scan: impl Into<String>) -> Self {
        match self {
            // Already names its file.
            err @ (Error::MalformedRecord { .. } | Error::InvalidScanName(_) | Error::Scan { .. }) => {
                err
            }
            other => Error::Scan {
                scan: scan.into(),
                source: Box::new(other),
            },
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
