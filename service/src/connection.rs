//
// Copyright 2017-2026 Hans W. Uhlig. All Rights Reserved.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//      http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//

//! A single terminal ↔ server bridge
//!
//! Each bridge runs four tasks:
//!
//! ```text
//! terminal reader ──IacEscaper──────────────▶ server writer
//! server reader ───TelnetNegotiator─┬─Data──▶ terminal writer
//!                                   └─Reply─▶ server writer
//! ```
//!
//! Readers never touch the opposite socket directly. They hold an `mpsc::Sender` for the
//! opposite writer task, so every message is written whole and in order.

use crate::{BridgeError, Result, ShutdownSignal};
use bytes::Bytes;
use futures::future::join_all;
use futures::{SinkExt, StreamExt};
use metrics::counter;
use std::fmt;
use tokio::net::TcpStream;
use tokio::net::tcp::{OwnedReadHalf, OwnedWriteHalf};
use tokio::sync::mpsc;
use tokio::task::{JoinError, JoinHandle};
use tokio_util::codec::{BytesCodec, FramedRead, FramedWrite};
use tracing::{Instrument, debug, info, info_span, trace, warn};
use ttybridge_telnetcodec::{IacEscaper, TelnetEvent, TelnetNegotiator, TerminalProfile};

/// Messages queued for a writer task before the reader blocks
const WRITE_QUEUE_DEPTH: usize = 64;

/// Which end of a bridge a connection belongs to
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ConnectionSide {
    /// The serial terminal adapter (raw bytes)
    Terminal,
    /// The Telnet server
    Server,
}

impl fmt::Display for ConnectionSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConnectionSide::Terminal => write!(f, "terminal"),
            ConnectionSide::Server => write!(f, "server"),
        }
    }
}

/// One established terminal connection paired with its server connection
#[derive(Debug)]
pub struct ConnectionBridge {
    name: String,
    server_name: String,
    terminal: TcpStream,
    server: TcpStream,
    profile: TerminalProfile,
}

impl ConnectionBridge {
    /// Pair two established connections
    ///
    /// `profile` is bound to the negotiator on the server connection.
    pub fn new(
        name: impl Into<String>,
        terminal: TcpStream,
        server_name: impl Into<String>,
        server: TcpStream,
        profile: TerminalProfile,
    ) -> Self {
        Self {
            name: name.into(),
            server_name: server_name.into(),
            terminal,
            server,
            profile,
        }
    }

    /// Terminal name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Negotiation profile for the server connection
    pub fn profile(&self) -> &TerminalProfile {
        &self.profile
    }

    /// Spawn the bridge's reader and writer tasks
    ///
    /// All four tasks end once `signal` fires. Either reader fires it when its peer closes.
    /// Sockets are closed when the tasks holding their halves return.
    pub fn spawn(self, signal: &ShutdownSignal) -> Vec<JoinHandle<Result<()>>> {
        let span = info_span!("bridge", terminal = %self.name);
        let (terminal_read, terminal_write) = self.terminal.into_split();
        let (server_read, server_write) = self.server.into_split();
        let (terminal_tx, terminal_rx) = mpsc::channel(WRITE_QUEUE_DEPTH);
        let (server_tx, server_rx) = mpsc::channel(WRITE_QUEUE_DEPTH);

        let terminal_writer = write_loop(
            ConnectionSide::Terminal,
            self.name.clone(),
            terminal_write,
            terminal_rx,
            signal.clone(),
        );
        let server_writer = write_loop(
            ConnectionSide::Server,
            self.server_name.clone(),
            server_write,
            server_rx,
            signal.clone(),
        );
        let terminal_reader = terminal_to_server(
            self.name.clone(),
            terminal_read,
            server_tx.clone(),
            signal.clone(),
        );
        let server_reader = server_to_terminal(
            self.name,
            self.server_name,
            self.profile,
            server_read,
            terminal_tx,
            server_tx,
            signal.clone(),
        );

        vec![
            tokio::spawn(terminal_writer.instrument(span.clone())),
            tokio::spawn(server_writer.instrument(span.clone())),
            tokio::spawn(terminal_reader.instrument(span.clone())),
            tokio::spawn(server_reader.instrument(span)),
        ]
    }

    /// Run this bridge alone until `signal` fires
    ///
    /// Returns the reason the bridge stopped, or `Ok(())` when `signal` was fired elsewhere.
    pub async fn run(self, signal: ShutdownSignal) -> Result<()> {
        first_failure(join_all(self.spawn(&signal)).await)
    }
}

/// Pick the error that started teardown out of a set of finished tasks
pub(crate) fn first_failure(results: Vec<std::result::Result<Result<()>, JoinError>>) -> Result<()> {
    let mut outcome = Ok(());
    for result in results {
        match result {
            Ok(Err(err)) if outcome.is_ok() => outcome = Err(err),
            Ok(_) => {}
            Err(err) => debug!("Bridge task ended abnormally: {}", err),
        }
    }
    outcome
}

/// Log the loss of a connection and start teardown
fn connection_lost(side: ConnectionSide, name: &str, signal: &ShutdownSignal) {
    info!("{} closed the connection", name);
    counter!("ttybridge.connections.closed", "side" => side.to_string()).increment(1);
    if signal.fire() {
        debug!("Shutdown signal fired by {} {}", side, name);
    }
}

/// Drain queued messages onto one socket
async fn write_loop(
    side: ConnectionSide,
    name: String,
    socket: OwnedWriteHalf,
    mut queue: mpsc::Receiver<Bytes>,
    signal: ShutdownSignal,
) -> Result<()> {
    let mut sink = FramedWrite::new(socket, BytesCodec::new());
    loop {
        let message = tokio::select! {
            biased;
            () = signal.wait() => break,
            message = queue.recv() => message,
        };
        let Some(bytes) = message else { break };
        if signal.is_fired() {
            break;
        }
        let result = tokio::select! {
            biased;
            () = signal.wait() => break,
            result = sink.send(bytes) => result,
        };
        if let Err(err) = result {
            // Writes racing teardown are expected to fail.
            if signal.is_fired() {
                break;
            }
            warn!("Write to {} {} failed: {}", side, name, err);
            connection_lost(side, &name, &signal);
            return Err(BridgeError::Io(err));
        }
    }
    trace!("{} writer for {} stopped", side, name);
    Ok(())
}

/// Terminal → server: escape literal IAC bytes
async fn terminal_to_server(
    name: String,
    socket: OwnedReadHalf,
    server: mpsc::Sender<Bytes>,
    signal: ShutdownSignal,
) -> Result<()> {
    let escaper = IacEscaper::new();
    let mut frames = FramedRead::new(socket, BytesCodec::new());
    let outcome = loop {
        let next = tokio::select! {
            biased;
            () = signal.wait() => return Ok(()),
            next = frames.next() => next,
        };
        match next {
            Some(Ok(bytes)) => {
                trace!("Received from terminal {}: {:?}", name, bytes);
                counter!("ttybridge.bytes.terminal_to_server", "terminal" => name.clone())
                    .increment(bytes.len() as u64);
                if server.send(escaper.escape(&bytes)).await.is_err() {
                    return Ok(());
                }
            }
            Some(Err(err)) => {
                debug!("Read from terminal {} failed: {}", name, err);
                break BridgeError::Io(err);
            }
            None => break BridgeError::ConnectionClosed,
        }
    };
    connection_lost(ConnectionSide::Terminal, &name, &signal);
    Err(outcome)
}

/// Server → terminal: run the negotiator, routing data and replies
async fn server_to_terminal(
    name: String,
    server_name: String,
    profile: TerminalProfile,
    socket: OwnedReadHalf,
    terminal: mpsc::Sender<Bytes>,
    server: mpsc::Sender<Bytes>,
    signal: ShutdownSignal,
) -> Result<()> {
    let mut frames = FramedRead::new(socket, TelnetNegotiator::new(profile));
    let outcome = loop {
        let next = tokio::select! {
            biased;
            () = signal.wait() => return Ok(()),
            next = frames.next() => next,
        };
        match next {
            Some(Ok(TelnetEvent::Data(bytes))) => {
                counter!("ttybridge.bytes.server_to_terminal", "terminal" => name.clone())
                    .increment(bytes.len() as u64);
                if terminal.send(bytes).await.is_err() {
                    return Ok(());
                }
            }
            Some(Ok(TelnetEvent::Reply(frame))) => {
                debug!("Replying {} to {}", frame, server_name);
                counter!("ttybridge.negotiations.replies", "terminal" => name.clone()).increment(1);
                match frame.to_bytes() {
                    Ok(bytes) => {
                        if server.send(bytes).await.is_err() {
                            return Ok(());
                        }
                    }
                    Err(err) => warn!("Unable to encode {}: {}", frame, err),
                }
            }
            Some(Err(err)) => {
                debug!("Read from server {} failed: {}", server_name, err);
                break BridgeError::Codec(err);
            }
            None => break BridgeError::ConnectionClosed,
        }
    };
    connection_lost(ConnectionSide::Server, &server_name, &signal);
    Err(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::time::Duration;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    async fn pair() -> (TcpStream, TcpStream) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let address = listener.local_addr().unwrap();
        let (near, far) = tokio::join!(TcpStream::connect(address), listener.accept());
        (near.unwrap(), far.unwrap().0)
    }

    #[test]
    fn test_side_display() {
        assert_eq!(ConnectionSide::Terminal.to_string(), "terminal");
        assert_eq!(ConnectionSide::Server.to_string(), "server");
    }

    #[tokio::test]
    #[tracing_test::traced_test]
    async fn test_terminal_close_fires_signal() {
        let (terminal, mut terminal_peer) = pair().await;
        let (server, mut server_peer) = pair().await;
        let bridge = ConnectionBridge::new(
            "vt100-a",
            terminal,
            "bbs",
            server,
            TerminalProfile::new("vt100", "9600"),
        );
        assert_eq!(bridge.name(), "vt100-a");
        assert_eq!(bridge.profile().baudrate, "9600");

        let signal = ShutdownSignal::new();
        let run = tokio::spawn(bridge.run(signal.clone()));

        terminal_peer.write_all(b"\xFF").await.unwrap();
        let mut buf = [0u8; 2];
        server_peer.read_exact(&mut buf).await.unwrap();
        assert_eq!(buf, [0xFF, 0xFF]);

        drop(terminal_peer);
        let outcome = tokio::time::timeout(Duration::from_secs(2), run)
            .await
            .unwrap()
            .unwrap();
        assert!(outcome.unwrap_err().is_connection_closed());
        assert!(signal.is_fired());
        assert_eq!(server_peer.read(&mut buf).await.unwrap_or(0), 0);
        assert!(logs_contain("vt100-a closed the connection"));
        assert!(logs_contain(r#"Received from terminal vt100-a: b"\xff""#));
    }

    #[tokio::test]
    async fn test_external_fire_is_not_a_failure() {
        let (terminal, _terminal_peer) = pair().await;
        let (server, _server_peer) = pair().await;
        let bridge = ConnectionBridge::new(
            "vt100-a",
            terminal,
            "bbs",
            server,
            TerminalProfile::new("vt100", "9600"),
        );
        let signal = ShutdownSignal::new();
        let run = tokio::spawn(bridge.run(signal.clone()));
        signal.fire();
        let outcome = tokio::time::timeout(Duration::from_secs(2), run)
            .await
            .unwrap()
            .unwrap();
        assert!(outcome.is_ok());
    }

    #[tokio::test]
    async fn test_first_failure_keeps_earliest_error() {
        let outcome = first_failure(vec![
            Ok(Ok(())),
            Ok(Err(BridgeError::ConnectionClosed)),
            Ok(Err(BridgeError::Io(std::io::ErrorKind::BrokenPipe.into()))),
        ]);
        assert!(outcome.unwrap_err().is_connection_closed());
        assert!(first_failure(vec![Ok(Ok(())), Ok(Ok(()))]).is_ok());
    }
}
