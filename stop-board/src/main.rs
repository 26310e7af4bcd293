use stop_board::board::{BoardClient, BoardConfig};
use stop_board::domain::StopId;
use stop_board::refresh::{BoardView, RefreshConfig, RefreshListener, RefreshPhase, RefreshScheduler};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Logs each applied refresh; stands in for the departures table.
struct LogListener;

impl RefreshListener for LogListener {
    fn on_interval(&mut self, view: &BoardView) {
        match &view.snapshot {
            Some(snapshot) => {
                info!(
                    live = view.is_live,
                    services = snapshot.services.len(),
                    departures = snapshot.departure_count(),
                    "board updated"
                );
                for service in &snapshot.services {
                    let waits: Vec<String> = service
                        .departures
                        .iter()
                        .map(|d| format!("{}s", d.seconds_remaining))
                        .collect();
                    info!(
                        "  {} to {}: {}",
                        service.line_name,
                        service.destination,
                        waits.join(", ")
                    );
                }
            }
            None => info!("no data available"),
        }
    }

    fn on_end(&mut self) {
        info!("refresh loop ended");
    }
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let base_url = std::env::var("STOP_BOARD_BASE_URL").unwrap_or_else(|_| {
        eprintln!("STOP_BOARD_BASE_URL not set");
        std::process::exit(1);
    });

    let stop_arg = std::env::args().nth(1).unwrap_or_else(|| {
        eprintln!("usage: stop-board <stop-id>");
        std::process::exit(2);
    });
    let stop = StopId::parse(&stop_arg).unwrap_or_else(|e| {
        eprintln!("{e}");
        std::process::exit(2);
    });

    let client =
        BoardClient::new(BoardConfig::new(base_url)).expect("Failed to create board client");

    let scheduler = RefreshScheduler::new(client, stop.clone(), RefreshConfig::default());
    scheduler.start(LogListener);
    info!(stop = %stop, "watching stop; Ctrl-C to stop");

    tokio::signal::ctrl_c()
        .await
        .expect("Failed to listen for Ctrl-C");

    // Let the loop drain to its cycle boundary rather than cutting it off.
    info!("draining current refresh cycle");
    scheduler.stop();
    let mut views = scheduler.subscribe();
    loop {
        if views.borrow().phase == RefreshPhase::Idle {
            break;
        }
        if views.changed().await.is_err() {
            break;
        }
    }
}
