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

use crate::TelnetOption;
use crate::args::naws::WindowSize;
use crate::args::tspeed::TerminalSpeed;
use crate::args::ttype::TerminalType;
use crate::consts;
use crate::result::CodecResult;
use bytes::BufMut;
use std::fmt::Formatter;

pub mod naws;
pub mod tspeed;
pub mod ttype;

///
/// Telnet Subnegotiation Argument
///
/// The payload carried between `IAC SB <option>` and `IAC SE` in a reply we send to the server.
///
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TelnetArgument {
    /// `TERMINAL-TYPE IS <name>` ([RFC1091](https://tools.ietf.org/html/rfc1091))
    TerminalType(TerminalType),
    /// Window size in characters ([RFC1073](https://tools.ietf.org/html/rfc1073))
    NAWSWindowSize(WindowSize),
    /// `TERMINAL-SPEED IS <transmit>,<receive>` ([RFC1079](https://tools.ietf.org/html/rfc1079))
    TerminalSpeed(TerminalSpeed),
}

impl TelnetArgument {
    /// Returns the unescaped byte length of the payload.
    ///
    /// Used to reserve buffer space before encoding; the encoded form is longer only when the
    /// payload contains IAC bytes.
    pub fn len(&self) -> usize {
        match self {
            TelnetArgument::TerminalType(inner) => inner.len(),
            TelnetArgument::NAWSWindowSize(inner) => inner.len(),
            TelnetArgument::TerminalSpeed(inner) => inner.len(),
        }
    }

    /// Encodes the payload into a `BufMut`, returning the number of bytes written.
    ///
    /// ```
    /// use bytes::BytesMut;
    /// use ttybridge_telnetcodec::TelnetArgument;
    /// use ttybridge_telnetcodec::naws::WindowSize;
    ///
    /// let arg = TelnetArgument::NAWSWindowSize(WindowSize::new(80, 24));
    /// let mut buffer = BytesMut::new();
    /// assert_eq!(arg.encode(&mut buffer)?, 4);
    /// assert_eq!(&buffer[..], &[0x00, 0x50, 0x00, 0x18]);
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn encode<T: BufMut>(&self, dst: &mut T) -> CodecResult<usize> {
        Ok(self.write(&mut dst.writer())?)
    }

    /// Writes the payload to a `std::io::Write`, doubling any IAC byte inside it.
    pub fn write<W: std::io::Write>(&self, writer: &mut W) -> std::io::Result<usize> {
        let mut payload = Vec::with_capacity(self.len());
        match self {
            TelnetArgument::TerminalType(inner) => inner.write(&mut payload)?,
            TelnetArgument::NAWSWindowSize(inner) => inner.write(&mut payload)?,
            TelnetArgument::TerminalSpeed(inner) => inner.write(&mut payload)?,
        };
        let mut written = 0;
        for byte in payload {
            if byte == consts::IAC {
                writer.write_all(&[consts::IAC, consts::IAC])?;
                written += 2;
            } else {
                writer.write_all(&[byte])?;
                written += 1;
            }
        }
        Ok(written)
    }

    /// Returns the `TelnetOption` this argument belongs to.
    pub fn option(&self) -> TelnetOption {
        match self {
            TelnetArgument::TerminalType(_) => TelnetOption::TerminalType,
            TelnetArgument::NAWSWindowSize(_) => TelnetOption::NAWS,
            TelnetArgument::TerminalSpeed(_) => TelnetOption::TerminalSpeed,
        }
    }
}

impl std::fmt::Display for TelnetArgument {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            TelnetArgument::TerminalType(v) => write!(f, "TerminalType({v})"),
            TelnetArgument::NAWSWindowSize(v) => write!(f, "NAWS{v}"),
            TelnetArgument::TerminalSpeed(v) => write!(f, "TerminalSpeed({v})"),
        }
    }
}
