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

//! Wire-level tests for the negotiator's replies

use bytes::BytesMut;
use tokio_util::codec::Decoder;
use ttybridge_telnetcodec::{TelnetEvent, TelnetNegotiator, TerminalProfile, consts};

// ============================================================================
// Helper Functions
// ============================================================================

/// Runs `input` through a fresh negotiator and returns (bytes for the server, bytes for the terminal).
fn exchange(profile: TerminalProfile, input: &[u8]) -> (Vec<u8>, Vec<u8>) {
    let mut negotiator = TelnetNegotiator::new(profile);
    let mut src = BytesMut::from(input);
    let mut to_server = BytesMut::new();
    let mut to_terminal = Vec::new();
    while let Some(event) = negotiator.decode(&mut src).unwrap() {
        match event {
            TelnetEvent::Data(bytes) => to_terminal.extend_from_slice(&bytes),
            TelnetEvent::Reply(frame) => frame.encode(&mut to_server).unwrap(),
        }
    }
    (to_server.to_vec(), to_terminal)
}

fn vt100() -> TerminalProfile {
    TerminalProfile::new("vt100", "9600")
}

// ============================================================================
// Option Negotiation
// ============================================================================

#[test]
fn do_accepted_options_reply_will() {
    for code in [1u8, 24, 31, 32] {
        let (to_server, to_terminal) = exchange(vt100(), &[consts::IAC, consts::DO, code]);
        assert_eq!(to_server, vec![consts::IAC, consts::WILL, code]);
        assert!(to_terminal.is_empty());
    }
}

#[test]
fn do_other_options_reply_wont() {
    for code in [5u8, 255] {
        let (to_server, _) = exchange(vt100(), &[consts::IAC, consts::DO, code]);
        assert_eq!(to_server, vec![consts::IAC, consts::WONT, code]);
    }
}

#[test]
fn will_replies_do() {
    for code in [1u8, 3, 24, 86, 201, 255] {
        let (to_server, _) = exchange(vt100(), &[consts::IAC, consts::WILL, code]);
        assert_eq!(to_server, vec![consts::IAC, consts::DO, code]);
    }
}

#[test]
fn dont_and_wont_reach_the_terminal() {
    let (to_server, to_terminal) = exchange(vt100(), &[consts::IAC, consts::DONT, consts::IAC, consts::WONT]);
    assert!(to_server.is_empty());
    assert_eq!(to_terminal, vec![consts::IAC, consts::DONT, consts::IAC, consts::WONT]);
}

// ============================================================================
// Subnegotiation Replies
// ============================================================================

#[test]
fn terminal_type_reply() {
    let (to_server, _) = exchange(
        vt100(),
        &[consts::IAC, consts::SB, 24, consts::IAC, consts::SE],
    );
    assert_eq!(
        to_server,
        vec![
            consts::IAC,
            consts::SB,
            0x18,
            0x00,
            b'v',
            b't',
            b'1',
            b'0',
            b'0',
            consts::IAC,
            consts::SE
        ]
    );
}

#[test]
fn window_size_reply_ignores_profile() {
    for profile in [vt100(), TerminalProfile::new("wyse60", "19200")] {
        let (to_server, _) = exchange(profile, &[consts::IAC, consts::SB, 31, consts::IAC, consts::SE]);
        assert_eq!(
            to_server,
            vec![consts::IAC, consts::SB, 0x1F, 0x00, 0x50, 0x00, 0x18, consts::IAC, consts::SE]
        );
    }
}

#[test]
fn terminal_speed_reply() {
    let (to_server, _) = exchange(
        vt100(),
        &[consts::IAC, consts::SB, 32, consts::SEND, consts::IAC, consts::SE],
    );
    assert_eq!(
        to_server,
        vec![
            consts::IAC,
            consts::SB,
            0x20,
            0x00,
            b'9',
            b'6',
            b'0',
            b'0',
            b',',
            b'9',
            b'6',
            b'0',
            b'0',
            consts::IAC,
            consts::SE
        ]
    );
}

#[test]
fn unknown_subnegotiation_is_silent() {
    let (to_server, to_terminal) = exchange(
        vt100(),
        &[consts::IAC, consts::SB, 39, 1, 2, 3, consts::IAC, consts::SE],
    );
    assert!(to_server.is_empty());
    assert!(to_terminal.is_empty());
}

// ============================================================================
// Mixed Streams
// ============================================================================

#[test]
fn typical_bbs_greeting() {
    let mut input = Vec::new();
    input.extend_from_slice(&[consts::IAC, consts::WILL, consts::option::ECHO]);
    input.extend_from_slice(&[consts::IAC, consts::WILL, 3]);
    input.extend_from_slice(&[consts::IAC, consts::DO, consts::option::NAWS]);
    input.extend_from_slice(&[consts::IAC, consts::DO, 0x27]);
    input.extend_from_slice(b"Welcome\r\n");
    input.extend_from_slice(&[consts::IAC, consts::SB, consts::option::NAWS, consts::IAC, consts::SE]);
    input.extend_from_slice(b"Name: ");

    let (to_server, to_terminal) = exchange(vt100(), &input);
    assert_eq!(to_terminal, b"Welcome\r\nName: ");
    assert_eq!(
        to_server,
        vec![
            consts::IAC, consts::DO, 1,
            consts::IAC, consts::DO, 3,
            consts::IAC, consts::WILL, 31,
            consts::IAC, consts::WONT, 0x27,
            consts::IAC, consts::SB, 31, 0, 80, 0, 24, consts::IAC, consts::SE,
        ]
    );
}
