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

use crate::{CodecError, consts};
use bytes::{BufMut, Bytes, BytesMut};
use tokio_util::codec::Encoder;

/// Appends `src` to `dst`, doubling every IAC byte.
///
/// All other bytes are copied one-for-one and in order, so the output is exactly
/// `src.len()` plus the number of IAC bytes in `src` long.
///
/// ```
/// use bytes::BytesMut;
/// use ttybridge_telnetcodec::escape_iac;
///
/// let mut dst = BytesMut::new();
/// escape_iac(b"a\xFFb", &mut dst);
/// assert_eq!(&dst[..], b"a\xFF\xFFb");
/// ```
pub fn escape_iac(src: &[u8], dst: &mut BytesMut) {
    let escapes = src.iter().filter(|byte| **byte == consts::IAC).count();
    dst.reserve(src.len() + escapes);
    let mut rest = src;
    while let Some(position) = rest.iter().position(|byte| *byte == consts::IAC) {
        dst.put_slice(&rest[..=position]);
        dst.put_u8(consts::IAC);
        rest = &rest[position + 1..];
    }
    dst.put_slice(rest);
}

/// Stateless encoder for raw terminal bytes headed onto a Telnet connection.
///
/// Each call is independent; nothing is buffered between deliveries.
#[derive(Clone, Copy, Debug, Default)]
pub struct IacEscaper;

impl IacEscaper {
    /// Creates a new escaper.
    pub fn new() -> IacEscaper {
        IacEscaper
    }

    /// Escapes `src` into a freshly allocated buffer.
    pub fn escape(&self, src: &[u8]) -> Bytes {
        let mut dst = BytesMut::new();
        escape_iac(src, &mut dst);
        dst.freeze()
    }
}

impl Encoder<&[u8]> for IacEscaper {
    type Error = CodecError;

    fn encode(&mut self, item: &[u8], dst: &mut BytesMut) -> Result<(), Self::Error> {
        escape_iac(item, dst);
        Ok(())
    }
}

impl Encoder<Bytes> for IacEscaper {
    type Error = CodecError;

    fn encode(&mut self, item: Bytes, dst: &mut BytesMut) -> Result<(), Self::Error> {
        escape_iac(&item, dst);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_bytes_pass_through() {
        assert_eq!(&IacEscaper.escape(b"login:\r\n")[..], b"login:\r\n");
    }

    #[test]
    fn iac_is_doubled() {
        assert_eq!(&IacEscaper.escape(&[consts::IAC])[..], &[consts::IAC, consts::IAC]);
    }

    #[test]
    fn consecutive_iacs_and_edges() {
        let input = [consts::IAC, b'a', consts::IAC, consts::IAC, b'b', consts::IAC];
        let expected = [
            consts::IAC,
            consts::IAC,
            b'a',
            consts::IAC,
            consts::IAC,
            consts::IAC,
            consts::IAC,
            b'b',
            consts::IAC,
            consts::IAC,
        ];
        assert_eq!(&IacEscaper.escape(&input)[..], &expected[..]);
    }

    #[test]
    fn empty_input_writes_nothing() {
        let mut dst = BytesMut::new();
        IacEscaper::new().encode(&b""[..], &mut dst).unwrap();
        assert!(dst.is_empty());
    }

    #[test]
    fn encoder_appends_across_calls() {
        let mut escaper = IacEscaper::new();
        let mut dst = BytesMut::new();
        escaper.encode(Bytes::from_static(b"ab\xFF"), &mut dst).unwrap();
        escaper.encode(Bytes::from_static(b"\xFFc"), &mut dst).unwrap();
        assert_eq!(&dst[..], b"ab\xFF\xFF\xFF\xFFc");
    }
}
