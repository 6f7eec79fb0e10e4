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

//! # ttybridge Telnet Codec
//!
//! Protocol core of the serial terminal bridge. A serial terminal adapter speaks raw bytes while
//! the Telnet server speaks RFC 854; this crate translates between the two without doing any I/O.
//!
//! ## Core Components
//!
//! ### [`IacEscaper`]
//!
//! Stateless encoder for bytes travelling terminal → server. Every literal IAC (0xFF) is sent
//! twice, everything else passes through untouched.
//!
//! ### [`TelnetNegotiator`]
//!
//! A [`Decoder`](tokio_util::codec::Decoder) for bytes travelling server → terminal. It runs the
//! IAC state machine and yields [`TelnetEvent`]s:
//!
//! - [`TelnetEvent::Data`]: plain data for the terminal, with `IAC IAC` collapsed
//! - [`TelnetEvent::Reply`]: a [`TelnetFrame`] to write back to the server
//!
//! ### [`TelnetFrame`] and [`TelnetArgument`]
//!
//! Outgoing negotiation commands and the Terminal Type, NAWS and Terminal Speed
//! subnegotiation payloads.
//!
//! ## Usage Example
//!
//! ```rust
//! use bytes::BytesMut;
//! use tokio_util::codec::Decoder;
//! use ttybridge_telnetcodec::{escape_iac, TelnetEvent, TelnetNegotiator, TerminalProfile};
//!
//! // Terminal -> server
//! let mut to_server = BytesMut::new();
//! escape_iac(b"\xFFhi", &mut to_server);
//! assert_eq!(&to_server[..], b"\xFF\xFFhi");
//!
//! // Server -> terminal
//! let mut negotiator = TelnetNegotiator::new(TerminalProfile::new("vt100", "9600"));
//! let mut from_server = BytesMut::from(&b"Login: \xFF\xFB\x01"[..]);
//! while let Some(event) = negotiator.decode(&mut from_server).unwrap() {
//!     match event {
//!         TelnetEvent::Data(bytes) => println!("to terminal: {:?}", bytes),
//!         TelnetEvent::Reply(frame) => println!("to server: {}", frame),
//!     }
//! }
//! ```
//!
//! ## Option Policy
//!
//! | Received          | Reply                                            |
//! |-------------------|--------------------------------------------------|
//! | `DO` 1, 24, 31, 32 | `WILL` option                                   |
//! | `DO` anything else | `WONT` option                                   |
//! | `WILL` any         | `DO` option                                     |
//! | `SB 24 … SE`       | `SB 24 IS <terminal type> SE`                   |
//! | `SB 31 … SE`       | `SB 31 0 80 0 24 SE`                            |
//! | `SB 32 … SE`       | `SB 32 IS <baud>,<baud> SE`                     |
//!
//! ## Related RFCs
//!
//! - RFC 854: Telnet Protocol Specification
//! - RFC 857: Telnet Echo Option
//! - RFC 1073: Telnet Window Size Option
//! - RFC 1079: Telnet Terminal Speed Option
//! - RFC 1091: Telnet Terminal-Type Option

#![warn(
    clippy::cargo,
    missing_docs,
    clippy::pedantic,
    future_incompatible,
    rust_2018_idioms
)]
#![allow(
    clippy::option_if_let_else,
    clippy::module_name_repetitions,
    clippy::missing_errors_doc,
    clippy::len_without_is_empty
)]

mod args;
pub mod consts;
mod escaper;
mod event;
mod frame;
mod negotiator;
mod options;
mod result;

pub use self::args::{TelnetArgument, naws, tspeed, ttype};
pub use self::escaper::{IacEscaper, escape_iac};
pub use self::event::TelnetEvent;
pub use self::frame::TelnetFrame;
pub use self::negotiator::{
    MAX_SUBNEGOTIATION_LEN, NegotiationState, TelnetNegotiator, TerminalProfile,
};
pub use self::options::TelnetOption;
pub use self::result::{CodecError, CodecResult};

#[cfg(test)]
mod tests {
    use super::{TelnetEvent, TelnetNegotiator, TerminalProfile, consts, escape_iac};
    use bytes::BytesMut;
    use tokio_util::codec::Decoder;

    #[test]
    fn login_exchange() {
        let mut negotiator = TelnetNegotiator::new(TerminalProfile::new("ansi", "2400"));
        let mut input = BytesMut::from(
            &[
                consts::IAC,
                consts::DO,
                consts::option::TTYPE,
                consts::IAC,
                consts::SB,
                consts::option::TTYPE,
                consts::SEND,
                consts::IAC,
                consts::SE,
                b'L',
                b'o',
                b'g',
                b'i',
                b'n',
                b':',
            ][..],
        );
        let mut to_server = BytesMut::new();
        let mut to_terminal = BytesMut::new();
        while let Some(event) = negotiator.decode(&mut input).unwrap() {
            match event {
                TelnetEvent::Data(bytes) => to_terminal.extend_from_slice(&bytes),
                TelnetEvent::Reply(frame) => frame.encode(&mut to_server).unwrap(),
            }
        }
        assert_eq!(&to_terminal[..], b"Login:");
        assert_eq!(
            &to_server[..],
            b"\xFF\xFB\x18\xFF\xFA\x18\x00ansi\xFF\xF0"
        );
    }

    #[test]
    fn escaped_terminal_bytes_decode_back() {
        let original = b"\x00\xFF\x7F\xFF\xFF\x80";
        let mut wire = BytesMut::new();
        escape_iac(original, &mut wire);
        let mut negotiator = TelnetNegotiator::new(TerminalProfile::new("vt100", "9600"));
        let mut decoded = Vec::new();
        while let Some(event) = negotiator.decode(&mut wire).unwrap() {
            match event {
                TelnetEvent::Data(bytes) => decoded.extend_from_slice(&bytes),
                TelnetEvent::Reply(frame) => panic!("unexpected reply {frame}"),
            }
        }
        assert_eq!(decoded, original);
    }
}
