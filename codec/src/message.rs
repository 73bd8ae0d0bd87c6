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
use bytes::Bytes;

///
/// An outbound unit for the encoder: user data or a command to the peer.
///
/// Data is escaped on the wire (`0xFF` becomes `IAC IAC`); command variants
/// produce their exact byte sequences. Sending the same message twice puts
/// the same bytes on the wire twice, the encoder keeps no negotiation state.
///
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum TelnetMessage {
    /// User data, IAC-escaped on the wire.
    Data(Bytes),
    /// `IAC DO <option>`: ask the peer to enable an option.
    Do(TelnetOption),
    /// `IAC DONT <option>`: ask the peer to disable an option.
    Dont(TelnetOption),
    /// `IAC WILL <option>`: offer to enable an option locally.
    Will(TelnetOption),
    /// `IAC WONT <option>`: refuse an option locally.
    Wont(TelnetOption),
    /// `IAC SB 24 SEND IAC SE`: solicit the peer's terminal name.
    TerminalTypeRequest,
    /// `IAC SB 39 SEND IAC SE`: solicit the peer's environment.
    EnvironmentRequest,
    /// A subnegotiation with a pre-encoded payload; the payload is
    /// IAC-escaped and wrapped in `IAC SB <option> … IAC SE`.
    Subnegotiation(TelnetOption, Bytes),
}
