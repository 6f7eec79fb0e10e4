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

//! Terminal Speed
//!

use crate::consts;

/// `TERMINAL-SPEED IS <transmit>,<receive>` reply payload.
///
/// Speeds are carried as the ASCII strings they are configured with.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TerminalSpeed {
    /// Transmit speed in bits per second
    pub transmit: String,
    /// Receive speed in bits per second
    pub receive: String,
}

impl TerminalSpeed {
    /// Create a speed reply with distinct transmit and receive speeds.
    pub fn new(transmit: impl Into<String>, receive: impl Into<String>) -> Self {
        TerminalSpeed {
            transmit: transmit.into(),
            receive: receive.into(),
        }
    }

    /// Serial lines run at one baud rate in both directions.
    pub fn symmetric(baudrate: impl Into<String>) -> Self {
        let baudrate = baudrate.into();
        TerminalSpeed {
            transmit: baudrate.clone(),
            receive: baudrate,
        }
    }

    /// IS byte, both speeds and the separating comma.
    pub fn len(&self) -> usize {
        2 + self.transmit.len() + self.receive.len()
    }

    /// Writes `IS <transmit>,<receive>`.
    pub fn write<W: std::io::Write>(&self, writer: &mut W) -> std::io::Result<usize> {
        writer.write_all(&[consts::IS])?;
        writer.write_all(self.transmit.as_bytes())?;
        writer.write_all(b",")?;
        writer.write_all(self.receive.as_bytes())?;
        Ok(self.len())
    }
}

impl std::fmt::Display for TerminalSpeed {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{},{}", self.transmit, self.receive)
    }
}
