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

//! Error types for the bridge service

use crate::connection::ConnectionSide;
use thiserror::Error;

/// Result type for bridge operations
pub type Result<T> = std::result::Result<T, BridgeError>;

/// Bridge error types
#[derive(Debug, Error)]
pub enum BridgeError {
    /// A terminal adapter or the server could not be reached
    #[error("Unable to connect to {side} {name} at {address}: {source}")]
    Connect {
        /// Which end of the bridge failed
        side: ConnectionSide,
        /// Configured name of the peer
        name: String,
        /// `host:port` that was dialed
        address: String,
        /// Underlying socket error
        #[source]
        source: std::io::Error,
    },

    /// Connecting took longer than the configured timeout
    #[error("Timed out connecting to {side} {name} at {address}")]
    ConnectTimeout {
        /// Which end of the bridge failed
        side: ConnectionSide,
        /// Configured name of the peer
        name: String,
        /// `host:port` that was dialed
        address: String,
    },

    /// A peer closed or reset its connection
    #[error("Connection closed")]
    ConnectionClosed,

    /// I/O error from an established connection
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Protocol error from the codec layer
    #[error("Protocol error: {0}")]
    Codec(#[from] ttybridge_telnetcodec::CodecError),

    /// Configuration could not be loaded
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl BridgeError {
    /// Check if the error happened while establishing a connection
    pub fn is_connect_error(&self) -> bool {
        matches!(
            self,
            BridgeError::Connect { .. } | BridgeError::ConnectTimeout { .. }
        )
    }

    /// Check if the error is the normal end of a bridge
    pub fn is_connection_closed(&self) -> bool {
        matches!(self, BridgeError::ConnectionClosed)
    }
}

/// Configuration error types
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read
    #[error("Failed to open config file: {0}")]
    Io(#[from] std::io::Error),

    /// The configuration file is not valid JSON for the expected layout
    #[error("Failed to parse config file: {0}")]
    Parse(#[from] serde_json::Error),

    /// The configuration parsed but describes something unusable
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}
