use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

use crate::error::ScanError;

/// Immutable settings shared by every worker for the duration of a scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanConfig {
    pub host: String,
    pub workers: usize,
    /// Per-probe connect bound. `None` leaves it to the OS connect timeout.
    pub timeout: Option<Duration>,
}

impl ScanConfig {
    pub fn new(
        host: impl Into<String>,
        workers: usize,
        timeout: Option<Duration>,
    ) -> Result<Self, ScanError> {
        if workers == 0 {
            return Err(ScanError::NoWorkers);
        }
        Ok(Self {
            host: host.into(),
            workers,
            timeout,
        })
    }
}

/// scandito — concurrent TCP connect port scanner.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "scandito",
    version,
    about = "Concurrent TCP connect port scanner.",
    long_about = None
)]
pub struct Cli {
    /// A host address to scan.
    #[arg(long, default_value = "scanme.nmap.org")]
    pub host: String,

    /// Ports to scan: a range 1-100, a comma separated list 1,2,3 or a single port.
    #[arg(long, default_value = "1-1024")]
    pub ports: String,

    /// Number of concurrent workers (also the work queue capacity).
    #[arg(long, default_value_t = 100, value_parser = clap::value_parser!(u32).range(1..))]
    pub workers: u32,

    /// Socket connect timeout in milliseconds. 0 keeps the OS default.
    #[arg(long = "timeout-ms", default_value_t = 1000)]
    pub timeout_ms: u64,

    /// Write the scan report as pretty JSON to this path (optional).
    #[arg(long)]
    pub output: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    pub fn scan_config(&self) -> Result<ScanConfig, ScanError> {
        let timeout = match self.timeout_ms {
            0 => None,
            ms => Some(Duration::from_millis(ms)),
        };
        ScanConfig::new(self.host.clone(), self.workers as usize, timeout)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_original_flags() {
        let cli = Cli::try_parse_from(["scandito"]).unwrap();
        assert_eq!(cli.host, "scanme.nmap.org");
        assert_eq!(cli.ports, "1-1024");
        assert_eq!(cli.workers, 100);
        assert!(cli.output.is_none());

        let config = cli.scan_config().unwrap();
        assert_eq!(config.workers, 100);
        assert_eq!(config.timeout, Some(Duration::from_millis(1000)));
    }

    #[test]
    fn zero_timeout_means_os_default() {
        let cli = Cli::try_parse_from(["scandito", "--timeout-ms", "0"]).unwrap();
        assert_eq!(cli.scan_config().unwrap().timeout, None);
    }

    #[test]
    fn zero_workers_rejected() {
        assert!(Cli::try_parse_from(["scandito", "--workers", "0"]).is_err());
        assert!(matches!(
            ScanConfig::new("localhost", 0, None),
            Err(ScanError::NoWorkers)
        ));
    }

    #[test]
    fn verbosity_counts() {
        let cli = Cli::try_parse_from(["scandito", "-vv", "--host", "127.0.0.1"]).unwrap();
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.host, "127.0.0.1");
    }
}
