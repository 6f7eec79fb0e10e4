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

use crate::TelnetFrame;
use bytes::Bytes;

///
/// `TelnetEvent` is what the negotiator produces from the server's byte stream, tagged by
/// where it has to go.
///
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TelnetEvent {
    /// Decoded bytes for the terminal side. Literal `IAC IAC` has already been collapsed and
    /// commands the bridge does not handle are passed through as `IAC <command>`.
    Data(Bytes),
    /// A negotiation reply to write back to the server.
    Reply(TelnetFrame),
}
