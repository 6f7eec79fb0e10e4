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

//! Serial Terminal Bridge Service
//!
//! Attaches serial terminal adapters, which speak raw bytes over TCP, to a Telnet server. Each
//! configured terminal gets its own [`ConnectionBridge`]; all bridges share one
//! [`ShutdownSignal`], and losing any connection tears the whole set down.
//!
//! # Architecture
//!
//! ```text
//! BridgeSetManager
//!     ↓ connect()
//! BridgeSet ── ShutdownSignal
//!     ↓ run()
//! ConnectionBridge × N → reader/writer tasks
//! ```
//!
//! # Example
//!
//! ```no_run
//! use ttybridge_service::{BridgeConfig, BridgeSetManager};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = BridgeConfig::load("terminals.json")?;
//!     let manager = BridgeSetManager::new(config);
//!     let bridges = manager.connect().await?;
//!     bridges.run().await;
//!     Ok(())
//! }
//! ```

mod config;
mod connection;
mod error;
mod manager;
mod signal;

pub use config::{Arguments, BridgeConfig, DEFAULT_PORT, ServerConfig, TerminalConfig};
pub use connection::{ConnectionBridge, ConnectionSide};
pub use error::{BridgeError, ConfigError, Result};
pub use manager::{BridgeSet, BridgeSetManager};
pub use signal::ShutdownSignal;
