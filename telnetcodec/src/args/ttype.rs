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

//! Terminal Type
//!

use crate::consts;

/// `TERMINAL-TYPE IS <name>` reply payload.
///
/// The name is sent exactly as configured; no case folding is applied.
///
/// ```
/// use ttybridge_telnetcodec::ttype::TerminalType;
///
/// let mut out = Vec::new();
/// TerminalType::new("vt100").write(&mut out)?;
/// assert_eq!(out, b"\x00vt100");
/// # Ok::<(), std::io::Error>(())
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TerminalType {
    /// Terminal type name, e.g. `vt100`
    pub name: String,
}

impl TerminalType {
    /// Create a terminal type reply for the given name.
    pub fn new(name: impl Into<String>) -> Self {
        TerminalType { name: name.into() }
    }

    /// IS byte followed by the name.
    pub fn len(&self) -> usize {
        1 + self.name.len()
    }

    /// Writes `IS <name>`.
    pub fn write<W: std::io::Write>(&self, writer: &mut W) -> std::io::Result<usize> {
        writer.write_all(&[consts::IS])?;
        writer.write_all(self.name.as_bytes())?;
        Ok(self.len())
    }
}

impl std::fmt::Display for TerminalType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}
