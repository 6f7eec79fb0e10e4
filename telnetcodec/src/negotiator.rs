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
use crate::args::naws::WindowSize;
use crate::args::tspeed::TerminalSpeed;
use crate::args::ttype::TerminalType;
use crate::result::CodecResult;
use crate::{CodecError, TelnetEvent, TelnetFrame, TelnetOption, consts};
use bytes::{Buf, BufMut, BytesMut};
use tokio_util::codec::Decoder;
use tracing::{debug, trace};

/// Longest subnegotiation payload buffered before it is discarded.
pub const MAX_SUBNEGOTIATION_LEN: usize = 4096;

/// What a bridged terminal reports about itself during subnegotiation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TerminalProfile {
    /// Telnet terminal type, e.g. `vt100`
    pub terminal_type: String,
    /// Serial line speed, reported for both transmit and receive
    pub baudrate: String,
}

impl TerminalProfile {
    /// Creates a profile from the terminal's configured type and baud rate.
    pub fn new(terminal_type: impl Into<String>, baudrate: impl Into<String>) -> Self {
        TerminalProfile {
            terminal_type: terminal_type.into(),
            baudrate: baudrate.into(),
        }
    }

    /// Checks that both values can be sent in a subnegotiation reply.
    ///
    /// RFC 1091 restricts terminal types to printable ASCII and RFC 1079 speeds are decimal
    /// numbers.
    pub fn validate(&self) -> CodecResult<()> {
        if self.terminal_type.is_empty()
            || !self.terminal_type.bytes().all(|byte| byte.is_ascii_graphic())
        {
            return Err(CodecError::SubnegotiationError {
                option: consts::option::TTYPE,
                reason: format!(
                    "invalid terminal type {:?}, RFC 1091 requires printable ASCII without spaces",
                    self.terminal_type
                ),
            });
        }
        if self.baudrate.is_empty() || !self.baudrate.bytes().all(|byte| byte.is_ascii_digit()) {
            return Err(CodecError::SubnegotiationError {
                option: consts::option::TSPEED,
                reason: format!(
                    "invalid baud rate {:?}, RFC 1079 requires a decimal number",
                    self.baudrate
                ),
            });
        }
        Ok(())
    }
}

/// Position of the negotiator in the server's command stream.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NegotiationState {
    /// Plain data
    Normal,
    /// Received IAC, next byte is a command
    InterpretAsCommand,
    /// Received DO, next byte is the option
    NegotiateDo,
    /// Received WILL, next byte is the option
    NegotiateWill,
    /// Inside `SB ... IAC SE`
    Subnegotiate,
}

/// Telnet negotiation engine for the server side of a bridge.
///
/// Decodes the server's byte stream into [`TelnetEvent`]s: plain data for the terminal and
/// negotiation replies for the server. The option policy is fixed:
///
/// - `DO` Echo, Terminal Type, NAWS or Terminal Speed is answered with `WILL`, any other
///   `DO` with `WONT`.
/// - Every `WILL` is answered with `DO`.
/// - Terminal Type, NAWS and Terminal Speed subnegotiations are answered from the
///   [`TerminalProfile`]; other subnegotiations are dropped.
/// - `DONT`, `WONT` and the remaining two-byte commands are forwarded to the terminal as-is.
///
/// Data runs are emitted before any reply that follows them in the input, and a run never
/// spans a reply.
///
/// ```
/// use bytes::BytesMut;
/// use tokio_util::codec::Decoder;
/// use ttybridge_telnetcodec::{TelnetEvent, TelnetFrame, TelnetNegotiator, TelnetOption, TerminalProfile};
///
/// let mut negotiator = TelnetNegotiator::new(TerminalProfile::new("vt100", "9600"));
/// let mut src = BytesMut::from(&b"\xFF\xFD\x18"[..]);
/// assert_eq!(
///     negotiator.decode(&mut src).unwrap(),
///     Some(TelnetEvent::Reply(TelnetFrame::Will(TelnetOption::TerminalType)))
/// );
/// ```
#[derive(Debug)]
pub struct TelnetNegotiator {
    profile: TerminalProfile,
    state: NegotiationState,
    subnegotiation: BytesMut,
    subnegotiation_iac: bool,
    subnegotiation_overflow: bool,
    data: BytesMut,
    pending_reply: Option<TelnetFrame>,
}

impl TelnetNegotiator {
    /// Creates a negotiator in the `Normal` state.
    pub fn new(profile: TerminalProfile) -> TelnetNegotiator {
        TelnetNegotiator {
            profile,
            state: NegotiationState::Normal,
            subnegotiation: BytesMut::new(),
            subnegotiation_iac: false,
            subnegotiation_overflow: false,
            data: BytesMut::new(),
            pending_reply: None,
        }
    }

    /// Current parser state.
    pub fn state(&self) -> NegotiationState {
        self.state
    }

    /// Profile used to answer subnegotiations.
    pub fn profile(&self) -> &TerminalProfile {
        &self.profile
    }

    /// Builds the reply to a completed subnegotiation buffer.
    ///
    /// The first byte selects the option; no reply is produced for an empty buffer or an option
    /// we do not answer.
    pub fn process_subnegotiation(&self, buffer: &[u8]) -> Option<TelnetFrame> {
        let Some(&code) = buffer.first() else {
            debug!("Ignoring empty subnegotiation");
            return None;
        };
        let argument = match TelnetOption::from_u8(code) {
            TelnetOption::TerminalType => {
                TelnetArgument::TerminalType(TerminalType::new(self.profile.terminal_type.clone()))
            }
            TelnetOption::NAWS => TelnetArgument::NAWSWindowSize(WindowSize::default()),
            TelnetOption::TerminalSpeed => {
                TelnetArgument::TerminalSpeed(TerminalSpeed::symmetric(self.profile.baudrate.clone()))
            }
            option => {
                debug!("Ignoring subnegotiation for {}", option);
                return None;
            }
        };
        Some(TelnetFrame::Subnegotiate(argument))
    }

    fn step(&mut self, byte: u8) -> Option<TelnetFrame> {
        match self.state {
            NegotiationState::Normal => self.on_normal(byte),
            NegotiationState::InterpretAsCommand => self.on_interpret_as_command(byte),
            NegotiationState::NegotiateDo => self.on_do(byte),
            NegotiationState::NegotiateWill => self.on_will(byte),
            NegotiationState::Subnegotiate => self.on_subnegotiate(byte),
        }
    }

    fn on_normal(&mut self, byte: u8) -> Option<TelnetFrame> {
        if byte == consts::IAC {
            self.state = NegotiationState::InterpretAsCommand;
        } else {
            self.data.put_u8(byte);
        }
        None
    }

    fn on_interpret_as_command(&mut self, byte: u8) -> Option<TelnetFrame> {
        self.state = NegotiationState::Normal;
        match byte {
            consts::IAC => self.data.put_u8(consts::IAC),
            consts::DO => self.state = NegotiationState::NegotiateDo,
            consts::WILL => self.state = NegotiationState::NegotiateWill,
            consts::SB => {
                self.state = NegotiationState::Subnegotiate;
                self.subnegotiation.clear();
                self.subnegotiation_iac = false;
                self.subnegotiation_overflow = false;
            }
            command => {
                debug!("Passing through command {:#04X}", command);
                self.data.put_u8(consts::IAC);
                self.data.put_u8(command);
            }
        }
        None
    }

    fn on_do(&mut self, byte: u8) -> Option<TelnetFrame> {
        self.state = NegotiationState::Normal;
        let option = TelnetOption::from_u8(byte);
        if option.is_supported_local() {
            debug!("accept DO {:#04X} ({})", byte, option);
            Some(TelnetFrame::Will(option))
        } else {
            debug!("reject DO {:#04X} ({})", byte, option);
            Some(TelnetFrame::Wont(option))
        }
    }

    fn on_will(&mut self, byte: u8) -> Option<TelnetFrame> {
        self.state = NegotiationState::Normal;
        let option = TelnetOption::from_u8(byte);
        debug!("accept WILL {:#04X} ({})", byte, option);
        Some(TelnetFrame::Do(option))
    }

    fn on_subnegotiate(&mut self, byte: u8) -> Option<TelnetFrame> {
        if !self.subnegotiation_iac {
            if byte == consts::IAC {
                self.subnegotiation_iac = true;
            } else {
                self.buffer_subnegotiation(&[byte]);
            }
            return None;
        }
        match byte {
            consts::SE => {
                self.state = NegotiationState::Normal;
                self.subnegotiation_iac = false;
                let buffer = self.subnegotiation.split();
                if std::mem::take(&mut self.subnegotiation_overflow) {
                    debug!("Ignoring oversized subnegotiation");
                    return None;
                }
                debug!("Subnegotiation buffer: {:?}", &buffer[..]);
                self.process_subnegotiation(&buffer)
            }
            // The first IAC was a lone payload byte; the second may still start the terminator.
            consts::IAC => {
                self.buffer_subnegotiation(&[consts::IAC]);
                None
            }
            _ => {
                self.subnegotiation_iac = false;
                self.buffer_subnegotiation(&[consts::IAC, byte]);
                None
            }
        }
    }

    /// Appends payload bytes, discarding the payload once it passes [`MAX_SUBNEGOTIATION_LEN`].
    fn buffer_subnegotiation(&mut self, bytes: &[u8]) {
        if self.subnegotiation_overflow {
            return;
        }
        if self.subnegotiation.len() + bytes.len() > MAX_SUBNEGOTIATION_LEN {
            debug!(
                "Subnegotiation longer than {} bytes, discarding until IAC SE",
                MAX_SUBNEGOTIATION_LEN
            );
            self.subnegotiation_overflow = true;
            self.subnegotiation = BytesMut::new();
            return;
        }
        self.subnegotiation.put_slice(bytes);
    }
}

impl Decoder for TelnetNegotiator {
    type Item = TelnetEvent;
    type Error = CodecError;

    /// Consumes bytes from `src` until an event is ready.
    ///
    /// Plain data accumulates until a reply is produced or `src` runs dry. When a reply follows
    /// buffered data the data is returned first and the reply on the next call.
    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<TelnetEvent>, Self::Error> {
        if let Some(frame) = self.pending_reply.take() {
            return Ok(Some(TelnetEvent::Reply(frame)));
        }
        if !src.is_empty() {
            trace!("Received {:?}", src);
        }
        while src.has_remaining() {
            if self.state == NegotiationState::Normal {
                let run = src
                    .iter()
                    .position(|byte| *byte == consts::IAC)
                    .unwrap_or(src.len());
                if run > 0 {
                    let chunk = src.split_to(run);
                    self.data.put_slice(&chunk);
                    continue;
                }
            }
            let byte = src.get_u8();
            if let Some(frame) = self.step(byte) {
                if self.data.is_empty() {
                    return Ok(Some(TelnetEvent::Reply(frame)));
                }
                self.pending_reply = Some(frame);
                return Ok(Some(TelnetEvent::Data(self.data.split().freeze())));
            }
        }
        if self.data.is_empty() {
            Ok(None)
        } else {
            Ok(Some(TelnetEvent::Data(self.data.split().freeze())))
        }
    }
}
