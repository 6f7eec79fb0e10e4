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

//! Bridge configuration
//!
//! The bridge set is described by a single JSON document naming one Telnet server and the
//! serial terminal adapters that should be attached to it.
//!
//! ```
//! use ttybridge_service::BridgeConfig;
//!
//! let config: BridgeConfig = r#"{
//!     "name": "bbs",
//!     "address": "bbs.example.org",
//!     "terminals": [
//!         { "name": "vt100-a", "address": "10.0.0.21", "type": "vt100", "baudrate": "9600" }
//!     ]
//! }"#.parse().unwrap();
//!
//! assert_eq!(config.server.port, 23);
//! assert_eq!(config.terminals[0].profile().terminal_type, "vt100");
//! ```

use crate::error::ConfigError;
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;
use ttybridge_telnetcodec::TerminalProfile;

/// Default Telnet port used for both the server and the terminal adapters
pub const DEFAULT_PORT: u16 = 23;

fn default_port() -> u16 {
    DEFAULT_PORT
}

/// Command line arguments for the `ttybridge` binary
#[derive(Debug, Parser)]
#[command(version, about, long_about = None)]
pub struct Arguments {
    #[arg(
        short = 'c',
        long = "config",
        help = "Path to configuration file",
        default_value = "terminals.json"
    )]
    pub config_file: PathBuf,

    #[arg(
        long = "connect-timeout",
        help = "Seconds to wait for each connection before giving up"
    )]
    pub connect_timeout: Option<u64>,
}

/// The Telnet server every terminal is bridged onto
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Display name used in logs
    pub name: String,
    /// Host name or IP address
    pub address: String,
    /// TCP port
    #[serde(default = "default_port")]
    pub port: u16,
}

impl ServerConfig {
    /// `host:port` form of the server address
    pub fn endpoint(&self) -> String {
        format!("{}:{}", self.address, self.port)
    }
}

/// One serial terminal adapter
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TerminalConfig {
    /// Display name used in logs
    pub name: String,
    /// Host name or IP address of the adapter
    pub address: String,
    /// TCP port of the adapter
    #[serde(default = "default_port")]
    pub port: u16,
    /// Telnet terminal type reported to the server
    #[serde(rename = "type")]
    pub terminal_type: String,
    /// Line speed reported to the server
    pub baudrate: String,
}

impl TerminalConfig {
    /// `host:port` form of the adapter address
    pub fn endpoint(&self) -> String {
        format!("{}:{}", self.address, self.port)
    }

    /// Negotiation profile for this terminal's server connection
    pub fn profile(&self) -> TerminalProfile {
        TerminalProfile::new(self.terminal_type.clone(), self.baudrate.clone())
    }
}

/// Complete bridge set configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BridgeConfig {
    /// Server every terminal is bridged onto
    #[serde(flatten)]
    pub server: ServerConfig,

    /// Terminals to bridge, one bridge per entry
    pub terminals: Vec<TerminalConfig>,

    /// Optional bound on each connection attempt, in seconds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub connect_timeout: Option<u64>,
}

impl BridgeConfig {
    /// Load and validate a configuration file
    pub fn load(path: impl AsRef<std::path::Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        tracing::debug!("Loading configuration from file: {}", path.display());
        let file = std::fs::File::open(path)?;
        let config: BridgeConfig = serde_json::from_reader(std::io::BufReader::new(file))?;
        config.validate()?;
        Ok(config)
    }

    /// Check the configuration describes a usable bridge set
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.name.is_empty() {
            return Err(ConfigError::Invalid("server name is empty".to_string()));
        }
        if self.server.address.is_empty() {
            return Err(ConfigError::Invalid(format!(
                "server {} has no address",
                self.server.name
            )));
        }
        if self.terminals.is_empty() {
            return Err(ConfigError::Invalid("no terminals configured".to_string()));
        }
        for terminal in &self.terminals {
            if terminal.name.is_empty() {
                return Err(ConfigError::Invalid("terminal name is empty".to_string()));
            }
            if terminal.address.is_empty() {
                return Err(ConfigError::Invalid(format!(
                    "terminal {} has no address",
                    terminal.name
                )));
            }
            terminal.profile().validate().map_err(|err| {
                ConfigError::Invalid(format!("terminal {}: {}", terminal.name, err))
            })?;
        }
        Ok(())
    }

    /// Connection timeout, if one is configured
    pub fn connect_timeout(&self) -> Option<Duration> {
        self.connect_timeout.map(Duration::from_secs)
    }

    /// Apply command line overrides
    pub fn with_arguments(mut self, arguments: &Arguments) -> Self {
        if arguments.connect_timeout.is_some() {
            self.connect_timeout = arguments.connect_timeout;
        }
        self
    }
}

impl FromStr for BridgeConfig {
    type Err = ConfigError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let config: BridgeConfig = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }
}
