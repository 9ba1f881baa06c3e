use std::{borrow::Cow, time::Duration};

use anyhow::{bail, Context, Result};
use striker_core::{AgentState, BehaviorSettings, MotorCmd, Vector2};
use striker_executor::Agent;
use tokio::{
    io::{AsyncBufReadExt, BufReader},
    sync::broadcast,
    time::MissedTickBehavior,
};

use crate::{snapshots::SnapshotFeed, transport::ServerConnection, Args};

/// Where motor commands go.
enum Outlet {
    Server(ServerConnection),
    /// Print commands in wire form, for dry runs without a server.
    Console,
}

impl Outlet {
    async fn send(&mut self, cmd: &MotorCmd) -> Result<()> {
        match self {
            Outlet::Server(conn) => conn.send(cmd).await,
            Outlet::Console => {
                println!("{}", cmd);
                Ok(())
            }
        }
    }

    async fn recv(&mut self) -> Result<String> {
        match self {
            Outlet::Server(conn) => conn.recv().await,
            Outlet::Console => std::future::pending().await,
        }
    }
}

/// Placement `X Y [TURN]` from the command line.
fn parse_params(params: &[f64]) -> Result<(Vector2, f64)> {
    match params {
        [x, y] => Ok((Vector2::new(*x, *y), 0.0)),
        [x, y, turn] => Ok((Vector2::new(*x, *y), *turn)),
        _ => bail!("Expected `X Y [TURN]`, got {} value(s)", params.len()),
    }
}

/// Console input is untrusted: bytes that are not UTF-8 are replaced rather
/// than ending the session.
fn command_text(line: &[u8]) -> Cow<'_, str> {
    String::from_utf8_lossy(line)
}

/// Run one agent until `stop_rx` fires.
///
/// Console lines, server messages and ticks are all handled from this one
/// task, so command batches and ticks never overlap.
pub(crate) async fn run(args: Args, mut stop_rx: broadcast::Receiver<()>) -> Result<()> {
    let settings = BehaviorSettings::load_or_insert(&args.settings_file)?;
    let (start, kickoff_turn) = parse_params(&args.params)?;

    let mut state = AgentState {
        position: start,
        side: args.side,
        kickoff_turn,
        ..AgentState::default()
    };

    let mut outlet = match args.server {
        Some(addr) => {
            let (conn, reply) = ServerConnection::connect(addr, &args.team, args.protocol_version)
                .await
                .context("Failed to register with the server")?;
            tracing::info!(
                "Connected to {} as {} #{} ({})",
                addr,
                reply.side,
                reply.unum,
                reply.play_mode
            );
            state.side = reply.side;
            Outlet::Server(conn)
        }
        None => {
            tracing::info!("No server given, printing commands");
            Outlet::Console
        }
    };

    let mut agent = Agent::new(settings, state);
    for cmd in agent.placement(start.x, start.y) {
        outlet.send(&cmd).await?;
    }

    let mut feed = match &args.snapshots {
        Some(path) => Some(SnapshotFeed::open(path).await?),
        None => None,
    };

    let mut stdin = BufReader::new(tokio::io::stdin()).split(b'\n');
    let mut stdin_open = true;
    let mut interval = tokio::time::interval(Duration::from_millis(args.tick_ms.max(1)));
    interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        tokio::select! {
            _ = stop_rx.recv() => break,
            line = stdin.next_segment(), if stdin_open => {
                match line.context("Failed to read from stdin")? {
                    Some(line) => {
                        let report = agent.handle_commands(&command_text(&line));
                        tracing::debug!(
                            "Batch: {} applied, {} ignored, {} rejected",
                            report.applied,
                            report.ignored,
                            report.errors.len()
                        );
                    }
                    None => {
                        tracing::info!("Console closed, no more commands");
                        stdin_open = false;
                    }
                }
            }
            msg = outlet.recv() => {
                let msg = msg?;
                if msg.starts_with("(error") {
                    tracing::warn!("Server error: {}", msg);
                } else {
                    tracing::trace!("Server: {}", msg);
                }
            }
            _ = interval.tick() => {
                let next = match feed.as_mut() {
                    Some(feed) => feed.next().await?,
                    None => None,
                };
                match next {
                    Some(snapshot) => agent.update(snapshot),
                    None if feed.is_some() => {
                        tracing::info!("Snapshot feed exhausted, keeping the last perception");
                        feed = None;
                    }
                    None => {}
                }
                if let Some(cmd) = agent.tick() {
                    tracing::debug!("Tick: {}", cmd);
                    outlet.send(&cmd).await?;
                }
            }
        }
    }

    Ok(())
}
