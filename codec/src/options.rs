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
/// The option registry: every option this engine decodes by name, plus
/// `Unknown` for the rest of the IANA space.
///
/// Two options carry historical double names. `NAWS` and `NEW_ENVIRON` are
/// provided as associated constants so both spellings work wherever an option
/// is named, and [`TelnetOption::aliases`] exposes the short event names.
///
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum TelnetOption {
    /// Binary Transmission [RFC856](https://tools.ietf.org/html/rfc856)
    TransmitBinary,
    /// Echo [RFC857](https://tools.ietf.org/html/rfc857)
    Echo,
    /// Suppress Go Ahead [RFC858](https://tools.ietf.org/html/rfc858)
    SuppressGoAhead,
    /// Status [RFC859](https://tools.ietf.org/html/rfc859)
    Status,
    /// Timing Mark [RFC860](https://tools.ietf.org/html/rfc860)
    TimingMark,
    /// Terminal Type [RFC1091](https://tools.ietf.org/html/rfc1091)
    TerminalType,
    /// Negotiate About Window Size [RFC1073](https://tools.ietf.org/html/rfc1073)
    WindowSize,
    /// Terminal Speed [RFC1079](https://tools.ietf.org/html/rfc1079)
    TerminalSpeed,
    /// Remote Flow Control [RFC1372](https://tools.ietf.org/html/rfc1372)
    RemoteFlowControl,
    /// Linemode [RFC1184](https://tools.ietf.org/html/rfc1184)
    Linemode,
    /// X Display Location [RFC1096](https://tools.ietf.org/html/rfc1096)
    XDisplayLocation,
    /// Authentication [RFC2941](https://tools.ietf.org/html/rfc2941)
    Authentication,
    /// New Environment [RFC1572](https://tools.ietf.org/html/rfc1572)
    EnvironmentVariables,
    /// Any option outside the registry.
    Unknown(u8),
}

impl TelnetOption {
    /// RFC 1073 name for [`TelnetOption::WindowSize`].
    pub const NAWS: TelnetOption = TelnetOption::WindowSize;
    /// RFC 1572 name for [`TelnetOption::EnvironmentVariables`].
    pub const NEW_ENVIRON: TelnetOption = TelnetOption::EnvironmentVariables;

    /// Looks up an option code, falling back to `Unknown` for codes outside
    /// the registry.
    pub fn from_u8(byte: u8) -> TelnetOption {
        match byte {
            consts::option::TRANSMIT_BINARY => TelnetOption::TransmitBinary,
            consts::option::ECHO => TelnetOption::Echo,
            consts::option::SUPPRESS_GO_AHEAD => TelnetOption::SuppressGoAhead,
            consts::option::STATUS => TelnetOption::Status,
            consts::option::TIMING_MARK => TelnetOption::TimingMark,
            consts::option::TERMINAL_TYPE => TelnetOption::TerminalType,
            consts::option::WINDOW_SIZE => TelnetOption::WindowSize,
            consts::option::TERMINAL_SPEED => TelnetOption::TerminalSpeed,
            consts::option::REMOTE_FLOW_CONTROL => TelnetOption::RemoteFlowControl,
            consts::option::LINEMODE => TelnetOption::Linemode,
            consts::option::X_DISPLAY_LOCATION => TelnetOption::XDisplayLocation,
            consts::option::AUTHENTICATION => TelnetOption::Authentication,
            consts::option::ENVIRONMENT_VARIABLES => TelnetOption::EnvironmentVariables,
            byte => TelnetOption::Unknown(byte),
        }
    }

    /// The wire byte for this option.
    pub fn to_u8(self) -> u8 {
        match self {
            TelnetOption::TransmitBinary => consts::option::TRANSMIT_BINARY,
            TelnetOption::Echo => consts::option::ECHO,
            TelnetOption::SuppressGoAhead => consts::option::SUPPRESS_GO_AHEAD,
            TelnetOption::Status => consts::option::STATUS,
            TelnetOption::TimingMark => consts::option::TIMING_MARK,
            TelnetOption::TerminalType => consts::option::TERMINAL_TYPE,
            TelnetOption::WindowSize => consts::option::WINDOW_SIZE,
            TelnetOption::TerminalSpeed => consts::option::TERMINAL_SPEED,
            TelnetOption::RemoteFlowControl => consts::option::REMOTE_FLOW_CONTROL,
            TelnetOption::Linemode => consts::option::LINEMODE,
            TelnetOption::XDisplayLocation => consts::option::X_DISPLAY_LOCATION,
            TelnetOption::Authentication => consts::option::AUTHENTICATION,
            TelnetOption::EnvironmentVariables => consts::option::ENVIRONMENT_VARIABLES,
            TelnetOption::Unknown(byte) => byte,
        }
    }

    /// True when the option is part of the registry.
    pub fn is_known(self) -> bool {
        !matches!(self, TelnetOption::Unknown(_))
    }

    /// Canonical lowercase name from the option table.
    pub fn name(self) -> &'static str {
        match self {
            TelnetOption::TransmitBinary => "transmit binary",
            TelnetOption::Echo => "echo",
            TelnetOption::SuppressGoAhead => "suppress go ahead",
            TelnetOption::Status => "status",
            TelnetOption::TimingMark => "timing mark",
            TelnetOption::TerminalType => "terminal type",
            TelnetOption::WindowSize => "window size",
            TelnetOption::TerminalSpeed => "terminal speed",
            TelnetOption::RemoteFlowControl => "remote flow control",
            TelnetOption::Linemode => "linemode",
            TelnetOption::XDisplayLocation => "x display location",
            TelnetOption::Authentication => "authentication",
            TelnetOption::EnvironmentVariables => "environment variables",
            TelnetOption::Unknown(_) => "unknown",
        }
    }

    /// Short event names fired alongside the canonical one.
    pub fn aliases(self) -> &'static [&'static str] {
        match self {
            TelnetOption::WindowSize => &["naws", "size"],
            TelnetOption::TerminalType => &["term"],
            TelnetOption::EnvironmentVariables => &["new environ", "env"],
            _ => &[],
        }
    }

    /// Parses a canonical name or any alias, either spelling of the
    /// double-named options included.
    pub fn from_name(name: &str) -> Option<TelnetOption> {
        const KNOWN: [TelnetOption; 13] = [
            TelnetOption::TransmitBinary,
            TelnetOption::Echo,
            TelnetOption::SuppressGoAhead,
            TelnetOption::Status,
            TelnetOption::TimingMark,
            TelnetOption::TerminalType,
            TelnetOption::WindowSize,
            TelnetOption::TerminalSpeed,
            TelnetOption::RemoteFlowControl,
            TelnetOption::Linemode,
            TelnetOption::XDisplayLocation,
            TelnetOption::Authentication,
            TelnetOption::EnvironmentVariables,
        ];
        KNOWN
            .into_iter()
            .find(|option| option.name() == name || option.aliases().contains(&name))
    }
}

impl std::fmt::Display for TelnetOption {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TelnetOption::Unknown(byte) => write!(f, "unknown option {byte}"),
            option => f.write_str(option.name()),
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
