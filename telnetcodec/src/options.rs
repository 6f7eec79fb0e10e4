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

use crate::consts;

///
/// Telnet Options understood by the bridge.
///
/// Every other option code is carried as [`TelnetOption::Unknown`] so it can still be echoed back
/// in a reply.
///
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TelnetOption {
    /// [`consts::option::ECHO`] Telnet Echo Option [RFC857](https://tools.ietf.org/html/rfc857)
    Echo,
    /// [`consts::option::TTYPE`] Telnet Terminal Type [RFC1091](https://tools.ietf.org/html/rfc1091)
    TerminalType,
    /// [`consts::option::NAWS`] Negotiate About Window Size [RFC1073](https://tools.ietf.org/html/rfc1073)
    NAWS,
    /// [`consts::option::TSPEED`] Terminal Speed [RFC1079](https://tools.ietf.org/html/rfc1079)
    TerminalSpeed,
    /// Any other option code
    Unknown(u8),
}

impl TelnetOption {
    /// Convert the option into its wire byte.
    pub fn to_u8(&self) -> u8 {
        match self {
            TelnetOption::Echo => consts::option::ECHO,
            TelnetOption::TerminalType => consts::option::TTYPE,
            TelnetOption::NAWS => consts::option::NAWS,
            TelnetOption::TerminalSpeed => consts::option::TSPEED,
            TelnetOption::Unknown(byte) => *byte,
        }
    }

    /// Convert a wire byte into an option.
    pub fn from_u8(byte: u8) -> Self {
        match byte {
            consts::option::ECHO => TelnetOption::Echo,
            consts::option::TTYPE => TelnetOption::TerminalType,
            consts::option::NAWS => TelnetOption::NAWS,
            consts::option::TSPEED => TelnetOption::TerminalSpeed,
            byte => TelnetOption::Unknown(byte),
        }
    }

    /// Whether we agree to perform this option when the server sends `DO`.
    ///
    /// Only Echo, Terminal Type, NAWS and Terminal Speed are accepted; everything else is
    /// answered with `WONT`. Offers from the server (`WILL`) are not subject to this list.
    pub fn is_supported_local(&self) -> bool {
        !matches!(self, TelnetOption::Unknown(_))
    }
}

impl std::fmt::Display for TelnetOption {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TelnetOption::Echo => write!(f, "Echo"),
            TelnetOption::TerminalType => write!(f, "TerminalType"),
            TelnetOption::NAWS => write!(f, "NAWS"),
            TelnetOption::TerminalSpeed => write!(f, "TerminalSpeed"),
            TelnetOption::Unknown(byte) => write!(f, "Unknown({})", byte),
        }
    }
}

impl From<u8> for TelnetOption {
    fn from(byte: u8) -> Self {
        Self::from_u8(byte)
    }
}

impl From<TelnetOption> for u8 {
    fn from(option: TelnetOption) -> Self {
        option.to_u8()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_options_round_trip_through_u8() {
        for code in [1u8, 24, 31, 32] {
            let option = TelnetOption::from(code);
            assert!(!matches!(option, TelnetOption::Unknown(_)));
            assert_eq!(u8::from(option), code);
        }
    }

    #[test]
    fn unknown_options_keep_their_code() {
        assert_eq!(TelnetOption::from(5), TelnetOption::Unknown(5));
        assert_eq!(TelnetOption::from(255).to_u8(), 255);
    }

    #[test]
    fn local_support_is_the_allow_list() {
        let accepted: Vec<u8> = (0..=255u8)
            .filter(|code| TelnetOption::from_u8(*code).is_supported_local())
            .collect();
        assert_eq!(accepted, vec![1, 24, 31, 32]);
    }

    #[test]
    fn display() {
        assert_eq!(TelnetOption::NAWS.to_string(), "NAWS");
        assert_eq!(TelnetOption::Unknown(99).to_string(), "Unknown(99)");
    }
}
