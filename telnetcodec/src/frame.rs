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

use crate::args::TelnetArgument;
use crate::result::CodecResult;
use crate::{TelnetOption, consts};
use bytes::{BufMut, Bytes, BytesMut};

///
/// A negotiation command sent to the Telnet server.
///
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TelnetFrame {
    /// `IAC DO <option>`
    Do(TelnetOption),
    /// `IAC DONT <option>`
    Dont(TelnetOption),
    /// `IAC WILL <option>`
    Will(TelnetOption),
    /// `IAC WONT <option>`
    Wont(TelnetOption),
    /// `IAC SB <option> <argument> IAC SE`
    Subnegotiate(TelnetArgument),
}

impl TelnetFrame {
    /// Number of bytes the frame needs on the wire, excluding IAC escapes inside a
    /// subnegotiation payload.
    pub fn len(&self) -> usize {
        match self {
            TelnetFrame::Do(_) | TelnetFrame::Dont(_) | TelnetFrame::Will(_) | TelnetFrame::Wont(_) => 3,
            TelnetFrame::Subnegotiate(argument) => 5 + argument.len(),
        }
    }

    /// Appends the wire form of the frame to `dst`.
    ///
    /// # Example
    /// ```
    /// use bytes::BytesMut;
    /// use ttybridge_telnetcodec::{TelnetFrame, TelnetOption};
    ///
    /// let mut dst = BytesMut::new();
    /// TelnetFrame::Will(TelnetOption::Echo).encode(&mut dst)?;
    /// assert_eq!(&dst[..], &[0xFF, 0xFB, 0x01]);
    /// # Ok::<(), ttybridge_telnetcodec::CodecError>(())
    /// ```
    pub fn encode(&self, dst: &mut BytesMut) -> CodecResult<()> {
        dst.reserve(self.len());
        match self {
            TelnetFrame::Do(option) => {
                dst.put_u8(consts::IAC);
                dst.put_u8(consts::DO);
                dst.put_u8(option.to_u8());
            }
            TelnetFrame::Dont(option) => {
                dst.put_u8(consts::IAC);
                dst.put_u8(consts::DONT);
                dst.put_u8(option.to_u8());
            }
            TelnetFrame::Will(option) => {
                dst.put_u8(consts::IAC);
                dst.put_u8(consts::WILL);
                dst.put_u8(option.to_u8());
            }
            TelnetFrame::Wont(option) => {
                dst.put_u8(consts::IAC);
                dst.put_u8(consts::WONT);
                dst.put_u8(option.to_u8());
            }
            TelnetFrame::Subnegotiate(argument) => {
                dst.put_u8(consts::IAC);
                dst.put_u8(consts::SB);
                dst.put_u8(argument.option().to_u8());
                argument.encode(dst)?;
                dst.put_u8(consts::IAC);
                dst.put_u8(consts::SE);
            }
        }
        Ok(())
    }

    /// Encodes the frame into a standalone buffer, ready to be written as one unit.
    pub fn to_bytes(&self) -> CodecResult<Bytes> {
        let mut dst = BytesMut::with_capacity(self.len());
        self.encode(&mut dst)?;
        Ok(dst.freeze())
    }
}

impl std::fmt::Display for TelnetFrame {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TelnetFrame::Do(option) => write!(f, "DO {option}"),
            TelnetFrame::Dont(option) => write!(f, "DONT {option}"),
            TelnetFrame::Will(option) => write!(f, "WILL {option}"),
            TelnetFrame::Wont(option) => write!(f, "WONT {option}"),
            TelnetFrame::Subnegotiate(argument) => write!(f, "SB {argument}"),
        }
    }
}
