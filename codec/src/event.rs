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

use crate::args::environ::EnvironmentEntry;
use crate::args::naws::WindowSize;
use crate::{TelnetCommand, TelnetOption};
use bytes::Bytes;

///
/// One decoded unit from the inbound byte stream: either a span of user data
/// or an option frame. Spans are contiguous in wire order and never contain
/// an `IAC` byte except the literal `0xFF` produced by an `IAC IAC` escape.
///
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum TelnetEvent {
    /// A span of user data with escapes already collapsed.
    Data(Bytes),
    /// A decoded negotiation or subnegotiation frame.
    Option(OptionEvent),
}

///
/// The structured result of decoding one option frame.
///
/// Every variant carries the command verb from the wire. The three options
/// with a subnegotiation grammar carry their payload only when the verb is
/// `sb`; for plain `DO`/`DONT`/`WILL`/`WONT` acknowledgements the payload is
/// `None`. Events are owned: nothing borrows from the parse residue.
///
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum OptionEvent {
    /// Binary Transmission acknowledgement.
    TransmitBinary(TelnetCommand),
    /// Echo acknowledgement.
    Echo(TelnetCommand),
    /// Suppress Go Ahead acknowledgement.
    SuppressGoAhead(TelnetCommand),
    /// Status acknowledgement.
    Status(TelnetCommand),
    /// Timing Mark acknowledgement.
    TimingMark(TelnetCommand),
    /// Terminal Speed acknowledgement.
    TerminalSpeed(TelnetCommand),
    /// Remote Flow Control acknowledgement.
    RemoteFlowControl(TelnetCommand),
    /// Linemode acknowledgement. The Linemode sub-grammar is not
    /// interpreted; Linemode subnegotiations surface as [`OptionEvent::Unknown`].
    Linemode(TelnetCommand),
    /// X Display Location acknowledgement.
    XDisplayLocation(TelnetCommand),
    /// Authentication acknowledgement.
    Authentication(TelnetCommand),
    /// Window size negotiation; dimensions present for `sb` frames only.
    WindowSize {
        /// The command verb from the wire.
        command: TelnetCommand,
        /// Decoded dimensions, present when `command` is `sb`.
        size: Option<WindowSize>,
    },
    /// Terminal type negotiation; the lowercased name is present for `sb`
    /// frames only.
    TerminalType {
        /// The command verb from the wire.
        command: TelnetCommand,
        /// The peer's terminal name, present when `command` is `sb`.
        name: Option<String>,
    },
    /// Environment negotiation; the variable is present for `sb` frames only.
    Environment {
        /// The command verb from the wire.
        command: TelnetCommand,
        /// The decoded variable, present when `command` is `sb`.
        entry: Option<EnvironmentEntry>,
    },
    /// Any option outside the registry, tolerated and passed through.
    Unknown {
        /// The command verb from the wire.
        command: TelnetCommand,
        /// The raw option code.
        option: u8,
        /// The subnegotiation payload for `sb` frames, empty otherwise.
        data: Bytes,
    },
}

impl OptionEvent {
    /// The command verb this frame arrived with.
    pub fn command(&self) -> TelnetCommand {
        match self {
            OptionEvent::TransmitBinary(command)
            | OptionEvent::Echo(command)
            | OptionEvent::SuppressGoAhead(command)
            | OptionEvent::Status(command)
            | OptionEvent::TimingMark(command)
            | OptionEvent::TerminalSpeed(command)
            | OptionEvent::RemoteFlowControl(command)
            | OptionEvent::Linemode(command)
            | OptionEvent::XDisplayLocation(command)
            | OptionEvent::Authentication(command)
            | OptionEvent::WindowSize { command, .. }
            | OptionEvent::TerminalType { command, .. }
            | OptionEvent::Environment { command, .. }
            | OptionEvent::Unknown { command, .. } => *command,
        }
    }

    /// The option this frame negotiates.
    pub fn option(&self) -> TelnetOption {
        match self {
            OptionEvent::TransmitBinary(_) => TelnetOption::TransmitBinary,
            OptionEvent::Echo(_) => TelnetOption::Echo,
            OptionEvent::SuppressGoAhead(_) => TelnetOption::SuppressGoAhead,
            OptionEvent::Status(_) => TelnetOption::Status,
            OptionEvent::TimingMark(_) => TelnetOption::TimingMark,
            OptionEvent::TerminalSpeed(_) => TelnetOption::TerminalSpeed,
            OptionEvent::RemoteFlowControl(_) => TelnetOption::RemoteFlowControl,
            OptionEvent::Linemode(_) => TelnetOption::Linemode,
            OptionEvent::XDisplayLocation(_) => TelnetOption::XDisplayLocation,
            OptionEvent::Authentication(_) => TelnetOption::Authentication,
            OptionEvent::WindowSize { .. } => TelnetOption::WindowSize,
            OptionEvent::TerminalType { .. } => TelnetOption::TerminalType,
            OptionEvent::Environment { .. } => TelnetOption::EnvironmentVariables,
            OptionEvent::Unknown { option, .. } => TelnetOption::Unknown(*option),
        }
    }

    /// Canonical event name, the option-table name.
    pub fn name(&self) -> &'static str {
        self.option().name()
    }

    /// Short event names subscribers may fan this event out under.
    pub fn aliases(&self) -> &'static [&'static str] {
        self.option().aliases()
    }
}

impl std::fmt::Display for OptionEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.command(), self.option())
    }
}
