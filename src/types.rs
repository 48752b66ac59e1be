use serde::{Deserialize, Serialize};

/// Outcome of a single TCP connect probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbeOutcome {
    Open(u16),
    Closed,
}

impl ProbeOutcome {
    pub fn open_port(self) -> Option<u16> {
        match self {
            ProbeOutcome::Open(port) => Some(port),
            ProbeOutcome::Closed => None,
        }
    }
}

/// Final result of one scan run.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ScanReport {
    pub host: String,
    /// Number of ports submitted, duplicates included.
    pub scanned: usize,
    /// Open ports, strictly ascending.
    pub open_ports: Vec<u16>,
    pub elapsed_ms: u64,
    pub finished_at: String,
}
