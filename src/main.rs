//! Terminal front-end for the engine hub
//!
//! Run with: cargo run --features cli --bin hub-cli
//!
//! Prints connection status changes and every new UI snapshot. Each stdin line
//! is sent as an intent (empty line or `ping` sends the Ping intent, `quit` exits).

#[cfg(not(target_arch = "wasm32"))]
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    use noetic_hub::cli::{parse_command, Command};
    use noetic_hub::config::HubConfig;
    use noetic_hub::core::{snapshot_text, EngineSession};
    use noetic_hub::websocket_native::NativeWsClient;
    use std::time::Duration;
    use tokio::io::{AsyncBufReadExt, BufReader};
    use tracing::{error, info};
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,noetic_hub=debug"));
    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let config = HubConfig::from_env();
    info!(url = %config.ws_url, client_id = %config.client_id, "Connecting to engine");

    let mut session = EngineSession::new(NativeWsClient::connect(&config));
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdin_open = true;

    let mut tick = tokio::time::interval(Duration::from_millis(50));
    let mut stats_interval = tokio::time::interval(Duration::from_secs(30));
    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    let mut last_state = session.ready_state();
    let mut last_applied = 0u64;
    println!("status: {}", last_state);
    println!("{}", snapshot_text(None));

    loop {
        tokio::select! {
            _ = tick.tick() => {
                session.poll();

                let state = session.ready_state();
                if state != last_state {
                    println!("status: {}", state);
                    last_state = state;
                }

                let applied = session.stats().snapshots_applied;
                if applied != last_applied {
                    println!("{}", snapshot_text(session.snapshot()));
                    last_applied = applied;
                }
            }
            line = lines.next_line(), if stdin_open => {
                match line {
                    Ok(Some(line)) => match parse_command(&line) {
                        Command::Quit => break,
                        Command::Intent(payload) => {
                            match session.send_intent(payload) {
                                Some(ref_id) => println!("intent sent: {}", ref_id),
                                None => println!("intent dropped: socket is {}", session.ready_state()),
                            }
                        }
                    },
                    Ok(None) => {
                        info!("stdin closed, intents disabled");
                        stdin_open = false;
                    }
                    Err(e) => {
                        error!(error = %e, "Failed to read stdin");
                        stdin_open = false;
                    }
                }
            }
            _ = stats_interval.tick() => {
                let stats = session.stats();
                info!(
                    state = %session.ready_state(),
                    frames = stats.frames_received,
                    ignored = stats.frames_ignored,
                    rejected = stats.frames_rejected,
                    snapshots = stats.snapshots_applied,
                    intents = stats.intents_sent,
                    dropped = stats.intents_dropped,
                    "stats"
                );
            }
            _ = &mut ctrl_c => {
                info!("Interrupted");
                break;
            }
        }
    }

    session.close();
    Ok(())
}

#[cfg(target_arch = "wasm32")]
fn main() {}
