use std::num::ParseIntError;

use thiserror::Error;
use tokio::task::JoinError;

#[derive(Debug, Error)]
pub enum ScanError {
    #[error("error converting `{value}` to uint port")]
    InvalidPort {
        value: String,
        #[source]
        source: Option<ParseIntError>,
    },
    #[error("TCP port out of range, please only use ports 1 through 65535 (got {0})")]
    PortOutOfRange(u64),
    #[error("invalid port range `{0}`")]
    InvalidRange(String),
    #[error("invalid range: start port {start} is greater than the end port {end}")]
    RangeStartAfterEnd { start: u16, end: u16 },
    #[error("worker count must be at least 1")]
    NoWorkers,
    #[error("distributor stopped early: {0}")]
    DistributorFailed(String),
    #[error("results queue closed after {received} of {expected} results")]
    ResultsClosed { received: usize, expected: usize },
    #[error("scan task failed: {0}")]
    TaskFailed(#[from] JoinError),
}
