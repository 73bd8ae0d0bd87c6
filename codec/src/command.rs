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
/// The sixteen command verbs that may follow an `IAC` escape on the wire.
///
/// `Iac` is the doubled escape itself: `IAC IAC` stands for a literal `0xFF`
/// byte in the user-data stream and is folded back into data by the scanner.
///
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum TelnetCommand {
    /// End of subnegotiation parameters.
    SubnegotiationEnd,
    /// No operation.
    NoOperation,
    /// Data Mark, the data-stream half of a Synch.
    DataMark,
    /// Operator pressed the Break or Attention key.
    Break,
    /// Interrupt the current process.
    InterruptProcess,
    /// Cancel output from the current process.
    AbortOutput,
    /// Request an acknowledgement that the peer is still there.
    AreYouThere,
    /// Request that the operator erase the previous character.
    EraseCharacter,
    /// Request that the operator erase the previous line.
    EraseLine,
    /// End of input for half-duplex connections.
    GoAhead,
    /// Begin a subnegotiation block.
    SubnegotiationBegin,
    /// Sender wants to enable an option on its own side.
    Will,
    /// Sender refuses to enable an option on its own side.
    Wont,
    /// Sender asks the peer to enable an option.
    Do,
    /// Sender asks the peer to disable an option.
    Dont,
    /// Escaped literal `0xFF` data byte.
    Iac,
}

impl TelnetCommand {
    /// Looks up the verb for a wire byte. Bytes below 240 are not commands
    /// and return `None`.
    pub fn from_u8(byte: u8) -> Option<TelnetCommand> {
        match byte {
            consts::SE => Some(TelnetCommand::SubnegotiationEnd),
            consts::NOP => Some(TelnetCommand::NoOperation),
            consts::DM => Some(TelnetCommand::DataMark),
            consts::BRK => Some(TelnetCommand::Break),
            consts::IP => Some(TelnetCommand::InterruptProcess),
            consts::AO => Some(TelnetCommand::AbortOutput),
            consts::AYT => Some(TelnetCommand::AreYouThere),
            consts::EC => Some(TelnetCommand::EraseCharacter),
            consts::EL => Some(TelnetCommand::EraseLine),
            consts::GA => Some(TelnetCommand::GoAhead),
            consts::SB => Some(TelnetCommand::SubnegotiationBegin),
            consts::WILL => Some(TelnetCommand::Will),
            consts::WONT => Some(TelnetCommand::Wont),
            consts::DO => Some(TelnetCommand::Do),
            consts::DONT => Some(TelnetCommand::Dont),
            consts::IAC => Some(TelnetCommand::Iac),
            _ => None,
        }
    }

    /// The wire byte for this verb.
    pub fn to_u8(self) -> u8 {
        match self {
            TelnetCommand::SubnegotiationEnd => consts::SE,
            TelnetCommand::NoOperation => consts::NOP,
            TelnetCommand::DataMark => consts::DM,
            TelnetCommand::Break => consts::BRK,
            TelnetCommand::InterruptProcess => consts::IP,
            TelnetCommand::AbortOutput => consts::AO,
            TelnetCommand::AreYouThere => consts::AYT,
            TelnetCommand::EraseCharacter => consts::EC,
            TelnetCommand::EraseLine => consts::EL,
            TelnetCommand::GoAhead => consts::GA,
            TelnetCommand::SubnegotiationBegin => consts::SB,
            TelnetCommand::Will => consts::WILL,
            TelnetCommand::Wont => consts::WONT,
            TelnetCommand::Do => consts::DO,
            TelnetCommand::Dont => consts::DONT,
            TelnetCommand::Iac => consts::IAC,
        }
    }

    /// Canonical lowercase name from the command table.
    pub fn name(self) -> &'static str {
        match self {
            TelnetCommand::SubnegotiationEnd => "se",
            TelnetCommand::NoOperation => "nop",
            TelnetCommand::DataMark => "dm",
            TelnetCommand::Break => "brk",
            TelnetCommand::InterruptProcess => "ip",
            TelnetCommand::AbortOutput => "ao",
            TelnetCommand::AreYouThere => "ayt",
            TelnetCommand::EraseCharacter => "ec",
            TelnetCommand::EraseLine => "el",
            TelnetCommand::GoAhead => "ga",
            TelnetCommand::SubnegotiationBegin => "sb",
            TelnetCommand::Will => "will",
            TelnetCommand::Wont => "wont",
            TelnetCommand::Do => "do",
            TelnetCommand::Dont => "dont",
            TelnetCommand::Iac => "iac",
        }
    }

    /// True for the four option-negotiation verbs.
    pub fn is_negotiation(self) -> bool {
        matches!(
            self,
            TelnetCommand::Do | TelnetCommand::Dont | TelnetCommand::Will | TelnetCommand::Wont
        )
    }
}

impl std::fmt::Display for TelnetCommand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl From<TelnetCommand> for u8 {
    fn from(command: TelnetCommand) -> Self {
        command.to_u8()
    }
}

#[cfg(test)]
mod tests {
    use super::TelnetCommand;

    #[test]
    fn round_trips_every_command_byte() {
        for byte in 240..=255u8 {
            let command = TelnetCommand::from_u8(byte).expect("command byte");
            assert_eq!(command.to_u8(), byte);
        }
    }

    #[test]
    fn rejects_non_command_bytes() {
        assert_eq!(TelnetCommand::from_u8(0), None);
        assert_eq!(TelnetCommand::from_u8(b'A'), None);
        assert_eq!(TelnetCommand::from_u8(239), None);
    }

    #[test]
    fn canonical_names() {
        assert_eq!(TelnetCommand::Will.name(), "will");
        assert_eq!(TelnetCommand::SubnegotiationBegin.name(), "sb");
        assert_eq!(TelnetCommand::Iac.name(), "iac");
    }
}
