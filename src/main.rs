use anyhow::Result;
use clap::Parser;

use scandito::config::Cli;
use scandito::{logging, ports, report, scanner};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    // Input errors end the run here, before any probe is sent.
    let ports = ports::parse_ports_spec(&cli.ports)?;
    let config = cli.scan_config()?;

    let results = scanner::scan(config, &ports).await?;
    print!("{}", report::render(&results));

    if let Some(path) = cli.output.as_deref() {
        if let Err(e) = report::write_json(path, &results) {
            tracing::error!(
                path = %path.display(),
                error = %format!("{e:#}"),
                "failed to write JSON report"
            );
        } else {
            tracing::info!(path = %path.display(), "wrote JSON report");
        }
    }

    Ok(())
}
