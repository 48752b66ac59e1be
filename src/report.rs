use anyhow::{Context, Result};
use std::fs::File;
use std::path::Path;

use crate::types::ScanReport;

const PREFIX: &str = "[scandito]";

/// Console rendering of a finished scan, one line per open port.
pub fn render(report: &ScanReport) -> String {
    let mut out = String::new();
    if report.open_ports.is_empty() {
        out.push_str(&format!(
            "{PREFIX}: Scanned {} ports, none were open for host {}.\n",
            report.scanned, report.host
        ));
        return out;
    }

    out.push_str(&format!(
        "{PREFIX}: Finished scanning {} ports on {}\n",
        report.scanned, report.host
    ));
    for port in &report.open_ports {
        out.push_str(&format!(
            "{PREFIX}: port [{}] on host: [{}] is [OPEN]\n",
            port, report.host
        ));
    }
    out
}

pub fn write_json(path: &Path, report: &ScanReport) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("failed to create report file: {}", path.display()))?;
    serde_json::to_writer_pretty(file, report)?;
    Ok(())
}
