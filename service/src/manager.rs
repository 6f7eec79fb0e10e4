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

//! Bridge set manager
//!
//! The BridgeSetManager is responsible for:
//! - Connecting every configured terminal and its server connection
//! - Owning the shutdown signal shared by every bridge
//! - Tearing the whole set down when any one connection is lost

use crate::connection::{ConnectionBridge, ConnectionSide, first_failure};
use crate::{BridgeConfig, BridgeError, Result, ShutdownSignal, TerminalConfig};
use futures::future::{join_all, try_join_all};
use std::time::Duration;
use tokio::net::TcpStream;
use tracing::{debug, info};

/// Builds one [`ConnectionBridge`] per configured terminal
#[derive(Debug)]
pub struct BridgeSetManager {
    config: BridgeConfig,
    signal: ShutdownSignal,
}

impl BridgeSetManager {
    /// Create a manager with a fresh shutdown signal
    pub fn new(config: BridgeConfig) -> Self {
        Self {
            config,
            signal: ShutdownSignal::new(),
        }
    }

    /// Configuration this manager was built from
    pub fn config(&self) -> &BridgeConfig {
        &self.config
    }

    /// Shutdown signal shared by every bridge this manager creates
    pub fn signal(&self) -> ShutdownSignal {
        self.signal.clone()
    }

    /// Connect every terminal and its server connection
    ///
    /// Terminals are set up concurrently. Any failure aborts the whole set and drops the
    /// connections already made.
    pub async fn connect(&self) -> Result<BridgeSet> {
        info!(
            "Connecting {} terminal(s) to {} at {}",
            self.config.terminals.len(),
            self.config.server.name,
            self.config.server.endpoint()
        );
        let bridges = try_join_all(
            self.config
                .terminals
                .iter()
                .map(|terminal| self.connect_bridge(terminal)),
        )
        .await?;
        Ok(BridgeSet {
            bridges,
            signal: self.signal.clone(),
        })
    }

    /// Connect one terminal, then the server on its behalf
    async fn connect_bridge(&self, terminal: &TerminalConfig) -> Result<ConnectionBridge> {
        let timeout = self.config.connect_timeout();
        let terminal_stream = dial(
            ConnectionSide::Terminal,
            &terminal.name,
            &terminal.address,
            terminal.port,
            timeout,
        )
        .await?;
        let server = &self.config.server;
        let server_stream = dial(
            ConnectionSide::Server,
            &server.name,
            &server.address,
            server.port,
            timeout,
        )
        .await?;
        Ok(ConnectionBridge::new(
            terminal.name.clone(),
            terminal_stream,
            server.name.clone(),
            server_stream,
            terminal.profile(),
        ))
    }
}

/// Open one outbound connection
async fn dial(
    side: ConnectionSide,
    name: &str,
    host: &str,
    port: u16,
    timeout: Option<Duration>,
) -> Result<TcpStream> {
    let address = format!("{host}:{port}");
    debug!("Connecting to {} {} at {}", side, name, address);
    let attempt = TcpStream::connect((host, port));
    let result = match timeout {
        Some(limit) => tokio::time::timeout(limit, attempt).await.map_err(|_| {
            BridgeError::ConnectTimeout {
                side,
                name: name.to_string(),
                address: address.clone(),
            }
        })?,
        None => attempt.await,
    };
    let stream = result.map_err(|source| BridgeError::Connect {
        side,
        name: name.to_string(),
        address: address.clone(),
        source,
    })?;
    info!("Connected to {} {} at {}", side, name, address);
    Ok(stream)
}

/// A connected set of bridges sharing one shutdown signal
#[derive(Debug)]
pub struct BridgeSet {
    bridges: Vec<ConnectionBridge>,
    signal: ShutdownSignal,
}

impl BridgeSet {
    /// Number of bridges in the set
    pub fn len(&self) -> usize {
        self.bridges.len()
    }

    /// Whether the set has no bridges
    pub fn is_empty(&self) -> bool {
        self.bridges.is_empty()
    }

    /// Names of the bridged terminals
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.bridges.iter().map(ConnectionBridge::name)
    }

    /// Shutdown signal shared by every bridge in the set
    pub fn signal(&self) -> ShutdownSignal {
        self.signal.clone()
    }

    /// Relay until the shutdown signal fires, then close every connection
    ///
    /// Returns the failure that started teardown, usually [`BridgeError::ConnectionClosed`],
    /// or `Ok(())` when the signal was fired from outside the set.
    pub async fn run(self) -> Result<()> {
        let count = self.bridges.len();
        let signal = self.signal;
        let tasks: Vec<_> = self
            .bridges
            .into_iter()
            .flat_map(|bridge| bridge.spawn(&signal))
            .collect();
        info!("Bridging {} terminal(s)", count);

        signal.wait().await;
        info!("Shutdown signalled, closing all bridges");
        let outcome = first_failure(join_all(tasks).await);
        info!("All bridges closed");
        outcome
    }
}
