use std::{net::SocketAddr, time::Duration};

use anyhow::{bail, Context, Result};
use striker_core::{MotorCmd, Side};
use tokio::net::UdpSocket;

const HANDSHAKE_TIMEOUT: Duration = Duration::from_secs(5);

/// What the server told us in reply to `init`.
#[derive(Debug, Clone, PartialEq)]
pub struct InitReply {
    pub side: Side,
    pub unum: u32,
    pub play_mode: String,
}

/// A UDP connection to the soccer server for one player.
///
/// The server answers `init` from a port dedicated to the new player; the
/// socket is connected to that address once the handshake is done.
pub struct ServerConnection {
    socket: UdpSocket,
    buf: Vec<u8>,
}

impl ServerConnection {
    /// Register a player of `team` with the server.
    pub async fn connect(server: SocketAddr, team: &str, version: u32) -> Result<(Self, InitReply)> {
        let socket = UdpSocket::bind("0.0.0.0:0")
            .await
            .context("Failed to bind UDP socket")?;
        socket
            .send_to(&encode(&init_message(team, version)), server)
            .await
            .context(format!("Failed to send init to {}", server))?;

        let mut buf = vec![0u8; 8 * 1024];
        let (len, player_addr) = tokio::time::timeout(HANDSHAKE_TIMEOUT, socket.recv_from(&mut buf))
            .await
            .context(format!("No reply to init from {}", server))?
            .context("Failed to receive init reply")?;
        let reply = parse_init_reply(&decode(&buf[..len]))?;
        socket
            .connect(player_addr)
            .await
            .context(format!("Failed to connect to {}", player_addr))?;

        Ok((Self { socket, buf }, reply))
    }

    pub async fn send(&self, cmd: &MotorCmd) -> Result<()> {
        self.socket
            .send(&encode(&cmd.to_string()))
            .await
            .context("Failed to send on UDP socket")?;
        Ok(())
    }

    /// Receive the next raw message from the server.
    pub async fn recv(&mut self) -> Result<String> {
        let len = self
            .socket
            .recv(&mut self.buf)
            .await
            .context("Failed to receive data from UDP socket")?;
        Ok(decode(&self.buf[..len]))
    }
}

fn init_message(team: &str, version: u32) -> String {
    format!("(init {} (version {}))", team, version)
}

/// Messages are sent NUL terminated, as the server's own clients do.
fn encode(msg: &str) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(msg.len() + 1);
    bytes.extend_from_slice(msg.as_bytes());
    bytes.push(0);
    bytes
}

fn decode(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes)
        .trim_end_matches('\0')
        .trim()
        .to_string()
}

/// Parse `(init <side> <unum> <play_mode>)`.
fn parse_init_reply(msg: &str) -> Result<InitReply> {
    if msg.starts_with("(error") {
        bail!("Server refused the player: {}", msg);
    }
    let Some(body) = msg
        .strip_prefix("(init ")
        .and_then(|rest| rest.strip_suffix(')'))
    else {
        bail!("Unexpected init reply: {}", msg);
    };
    let parts: Vec<&str> = body.split_whitespace().collect();
    let [side, unum, play_mode] = parts.as_slice() else {
        bail!("Unexpected init reply: {}", msg);
    };
    let side = side
        .parse::<Side>()
        .map_err(anyhow::Error::msg)
        .context(format!("Bad side in init reply: {}", msg))?;
    let unum = unum
        .parse::<u32>()
        .context(format!("Bad uniform number in init reply: {}", msg))?;
    Ok(InitReply {
        side,
        unum,
        play_mode: play_mode.to_string(),
    })
}
