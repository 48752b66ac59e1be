use crate::config::ScanConfig;
use crate::error::ScanError;
use crate::types::{ProbeOutcome, ScanReport};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpStream;
use tokio::sync::{mpsc, Mutex};
use tokio::task::{JoinHandle, JoinSet};
use tokio::time::{self, Instant};
use tracing::{debug, info, trace};
use ::time::{format_description::well_known, OffsetDateTime};

/// Receiving end of the work queue, shared by every worker in the pool.
pub type WorkQueue = Arc<Mutex<mpsc::Receiver<u16>>>;

/// Scan `ports` on `config.host` with a fixed pool of `config.workers` workers.
///
/// - One distributor feeds the bounded work queue (capacity = worker count) in input order.
/// - Each worker probes one port at a time and reports exactly one `ProbeOutcome` per port.
/// - The collector receives exactly `ports.len()` outcomes, failing fast if the
///   distributor dies or the results queue closes early.
/// - Open ports are returned ascending with duplicates folded.
pub async fn scan(config: ScanConfig, ports: &[u16]) -> Result<ScanReport, ScanError> {
    if config.workers == 0 {
        return Err(ScanError::NoWorkers);
    }
    let config = Arc::new(config);
    let expected = ports.len();
    let start = Instant::now();
    info!(host = %config.host, ports = expected, workers = config.workers, "starting scan");

    let (work_tx, work_rx) = mpsc::channel::<u16>(config.workers);
    let (results_tx, mut results_rx) = mpsc::channel::<ProbeOutcome>(1);
    let work_rx: WorkQueue = Arc::new(Mutex::new(work_rx));

    // Dropping the JoinSet on an early return aborts any worker still running.
    let mut pool = JoinSet::new();
    for id in 0..config.workers {
        pool.spawn(worker(
            id,
            config.clone(),
            work_rx.clone(),
            results_tx.clone(),
        ));
    }
    // Only workers may hold senders, so a closed results queue means the pool is gone.
    drop(results_tx);
    drop(work_rx);

    let distributor = tokio::spawn(distribute(ports.to_vec(), work_tx));
    let mut open_ports = collect(&mut results_rx, expected, distributor).await?;
    results_rx.close();

    while let Some(joined) = pool.join_next().await {
        joined?;
    }

    open_ports.sort_unstable();
    open_ports.dedup();

    let elapsed = start.elapsed();
    info!(
        host = %config.host,
        open = open_ports.len(),
        elapsed_ms = elapsed.as_millis() as u64,
        "scan finished"
    );

    Ok(ScanReport {
        host: config.host.clone(),
        scanned: expected,
        open_ports,
        elapsed_ms: elapsed.as_millis() as u64,
        finished_at: now_rfc3339(),
    })
}

/// Push every port into the work queue in order. The queue closes when `work` is dropped on return.
pub async fn distribute(ports: Vec<u16>, work: mpsc::Sender<u16>) -> Result<(), ScanError> {
    let total = ports.len();
    for (sent, port) in ports.into_iter().enumerate() {
        trace!(port, "queueing port");
        work.send(port).await.map_err(|_| {
            ScanError::DistributorFailed(format!(
                "work queue closed after {sent} of {total} ports"
            ))
        })?;
    }
    debug!(total, "all ports queued");
    Ok(())
}

/// Pull ports until the work queue is closed and drained, reporting one outcome per port.
pub async fn worker(
    id: usize,
    config: Arc<ScanConfig>,
    work: WorkQueue,
    results: mpsc::Sender<ProbeOutcome>,
) {
    trace!(worker = id, "worker started");
    loop {
        // The lock is released before probing so other workers can take the next port.
        let next = work.lock().await.recv().await;
        let Some(port) = next else { break };

        let outcome = probe(&config.host, port, config.timeout).await;
        debug!(worker = id, port, ?outcome, "probe finished");

        if results.send(outcome).await.is_err() {
            debug!(worker = id, "results queue closed, stopping");
            break;
        }
    }
    trace!(worker = id, "worker stopped");
}

/// Receive exactly `expected` outcomes and keep the open ports, in arrival order.
///
/// The distributor handle is watched alongside the results queue so a failed
/// distributor aborts collection instead of leaving it waiting forever.
pub async fn collect(
    results: &mut mpsc::Receiver<ProbeOutcome>,
    expected: usize,
    mut distributor: JoinHandle<Result<(), ScanError>>,
) -> Result<Vec<u16>, ScanError> {
    let mut open_ports = Vec::new();
    let mut received = 0usize;
    let mut distributed = false;

    while received < expected {
        tokio::select! {
            joined = &mut distributor, if !distributed => {
                joined??;
                distributed = true;
            }
            outcome = results.recv() => {
                let outcome = outcome.ok_or(ScanError::ResultsClosed { received, expected })?;
                received += 1;
                if let Some(port) = outcome.open_port() {
                    open_ports.push(port);
                }
            }
        }
    }

    if !distributed {
        distributor.await??;
    }
    Ok(open_ports)
}

/// Attempt a single TCP connect to `host:port`; the stream is closed right away on success.
///
/// Every failure (refused, unreachable, resolution error, timeout) is `Closed`.
pub async fn probe(host: &str, port: u16, timeout: Option<Duration>) -> ProbeOutcome {
    let connect = TcpStream::connect((host, port));
    let res = match timeout {
        Some(limit) => match time::timeout(limit, connect).await {
            Ok(res) => res,
            Err(_) => {
                trace!(host, port, "connect timed out");
                return ProbeOutcome::Closed;
            }
        },
        None => connect.await,
    };

    match res {
        Ok(stream) => {
            drop(stream);
            ProbeOutcome::Open(port)
        }
        Err(e) => {
            trace!(host, port, error = %e, "connect failed");
            ProbeOutcome::Closed
        }
    }
}

fn now_rfc3339() -> String {
    OffsetDateTime::now_utc()
        .format(&well_known::Rfc3339)
        .unwrap_or_else(|_| String::from("1970-01-01T00:00:00Z"))
}
