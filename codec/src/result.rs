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
use thiserror::Error;

/// Result type for codec operations.
pub type CodecResult<T> = Result<T, CodecError>;

/// Errors surfaced by the codec.
///
/// Underflow is never an error: an incomplete frame makes the decoder return
/// `Ok(None)` and wait for more bytes. A `MalformedSubnegotiation` means a
/// recognised option's sub-grammar was violated; the decoder drops the rest
/// of the current read but the connection is left to the caller.
#[derive(Debug, Error)]
pub enum CodecError {
    /// I/O error from the underlying stream.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    /// A recognised option's subnegotiation did not match its sub-grammar.
    #[error("malformed {option} subnegotiation: {kind}")]
    MalformedSubnegotiation {
        /// The option whose sub-grammar was violated.
        option: TelnetOption,
        /// What exactly was wrong with the payload.
        kind: MalformedKind,
    },
}

impl CodecError {
    pub(crate) fn malformed(option: TelnetOption, kind: MalformedKind) -> CodecError {
        CodecError::MalformedSubnegotiation { option, kind }
    }
}

/// Specific structural violations inside a subnegotiation.
#[derive(Clone, Copy, Debug, Error, Eq, PartialEq)]
pub enum MalformedKind {
    /// The frame did not end with `IAC SE` where the grammar requires it.
    #[error("missing IAC SE terminator")]
    MissingTerminator,

    /// The payload did not start with the expected sub-command byte.
    #[error("expected sub-command {expected:#04x}, found {found:#04x}")]
    UnexpectedSubCommand {
        /// The sub-command the grammar requires at this position.
        expected: u8,
        /// The byte actually present.
        found: u8,
    },

    /// A NEW-ENVIRON entry used a kind marker other than VAR or USERVAR.
    #[error("unrecognised variable kind {0:#04x}")]
    UnknownVariableKind(u8),

    /// A variable or terminal name was empty.
    #[error("empty name")]
    EmptyName,

    /// A variable value was empty.
    #[error("empty value")]
    EmptyValue,
}
