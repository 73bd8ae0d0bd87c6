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

//! New Environment (RFC 1572).
//!
//! Inbound frames are unsolicited `INFO` updates, one variable per frame:
//! `IAC SB 39 INFO <kind> <name…> VALUE <value…> IAC SE`. The `SEND`
//! solicitation is outbound only; a peer-sent `SEND` or `IS` is rejected as a
//! structural violation.

use crate::result::{CodecError, CodecResult, MalformedKind};
use crate::{TelnetOption, consts};
use bytes::{BufMut, BytesMut};

/// Shortest legal update: single-byte name and value.
const MIN_FRAME_LENGTH: usize = 10;

/// Which variable namespace an entry belongs to.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum EnvironmentKind {
    /// A well-known variable (`VAR` marker).
    System,
    /// A user-defined variable (`USERVAR` marker).
    User,
}

impl std::fmt::Display for EnvironmentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EnvironmentKind::System => f.write_str("system"),
            EnvironmentKind::User => f.write_str("user"),
        }
    }
}

/// One decoded environment variable.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct EnvironmentEntry {
    /// The variable namespace.
    pub kind: EnvironmentKind,
    /// The variable name, never empty.
    pub name: String,
    /// The variable value, never empty.
    pub value: String,
}

/// Decodes a NEW-ENVIRON update from a frame slice starting at `IAC`.
pub(crate) fn decode_frame(frame: &[u8]) -> CodecResult<Option<(usize, EnvironmentEntry)>> {
    if frame.len() < MIN_FRAME_LENGTH {
        return Ok(None);
    }
    if frame[3] != consts::environ::INFO {
        return Err(CodecError::malformed(
            TelnetOption::EnvironmentVariables,
            MalformedKind::UnexpectedSubCommand {
                expected: consts::environ::INFO,
                found: frame[3],
            },
        ));
    }
    let kind = match frame[4] {
        consts::environ::VAR => EnvironmentKind::System,
        consts::environ::USERVAR => EnvironmentKind::User,
        other => {
            return Err(CodecError::malformed(
                TelnetOption::EnvironmentVariables,
                MalformedKind::UnknownVariableKind(other),
            ));
        }
    };
    // The name runs to the VALUE separator.
    let Some(at) = frame[5..]
        .iter()
        .position(|&byte| byte == consts::environ::VALUE)
    else {
        return Ok(None);
    };
    let separator = 5 + at;
    if separator == 5 {
        return Err(CodecError::malformed(
            TelnetOption::EnvironmentVariables,
            MalformedKind::EmptyName,
        ));
    }
    // The value runs to the next IAC.
    let Some(at) = frame[separator + 1..]
        .iter()
        .position(|&byte| byte == consts::IAC)
    else {
        return Ok(None);
    };
    let terminator = separator + 1 + at;
    if terminator == separator + 1 {
        return Err(CodecError::malformed(
            TelnetOption::EnvironmentVariables,
            MalformedKind::EmptyValue,
        ));
    }
    if terminator + 1 >= frame.len() {
        return Ok(None);
    }
    if frame[terminator + 1] != consts::SE {
        return Err(CodecError::malformed(
            TelnetOption::EnvironmentVariables,
            MalformedKind::MissingTerminator,
        ));
    }
    let name = String::from_utf8_lossy(&frame[5..separator]).into_owned();
    let value = String::from_utf8_lossy(&frame[separator + 1..terminator]).into_owned();
    Ok(Some((terminator + 2, EnvironmentEntry { kind, name, value })))
}

/// Writes `IAC SB 39 SEND IAC SE`, soliciting the peer's environment.
pub(crate) fn encode_send(dst: &mut BytesMut) {
    dst.reserve(6);
    dst.put_slice(&[
        consts::IAC,
        consts::SB,
        consts::option::ENVIRONMENT_VARIABLES,
        consts::environ::SEND,
        consts::IAC,
        consts::SE,
    ]);
}

#[cfg(test)]
mod tests {
    use super::{EnvironmentKind, decode_frame, encode_send};
    use crate::consts;
    use bytes::BytesMut;

    fn info_frame(kind: u8, name: &[u8], value: &[u8]) -> Vec<u8> {
        let mut frame = vec![
            consts::IAC,
            consts::SB,
            consts::option::ENVIRONMENT_VARIABLES,
            consts::environ::INFO,
            kind,
        ];
        frame.extend_from_slice(name);
        frame.push(consts::environ::VALUE);
        frame.extend_from_slice(value);
        frame.extend_from_slice(&[consts::IAC, consts::SE]);
        frame
    }

    #[test]
    fn decodes_a_system_variable() {
        let frame = info_frame(consts::environ::VAR, b"TERM", b"XTERM");
        let (consumed, entry) = decode_frame(&frame).unwrap().unwrap();
        assert_eq!(consumed, frame.len());
        assert_eq!(entry.kind, EnvironmentKind::System);
        assert_eq!(entry.name, "TERM");
        assert_eq!(entry.value, "XTERM");
    }

    #[test]
    fn decodes_a_user_variable() {
        let frame = info_frame(consts::environ::USERVAR, b"GROUP", b"wheel");
        let entry = decode_frame(&frame).unwrap().unwrap().1;
        assert_eq!(entry.kind, EnvironmentKind::User);
        assert_eq!(entry.name, "GROUP");
    }

    #[test]
    fn incomplete_frames_are_underflow() {
        let frame = info_frame(consts::environ::VAR, b"TERM", b"vt100");
        for len in 0..frame.len() {
            assert!(
                decode_frame(&frame[..len]).unwrap().is_none(),
                "prefix of {len} bytes should suspend"
            );
        }
    }

    #[test]
    fn rejects_a_send_from_the_peer() {
        let mut frame = info_frame(consts::environ::VAR, b"TERM", b"vt100");
        frame[3] = consts::environ::SEND;
        assert!(decode_frame(&frame).is_err());
    }

    #[test]
    fn rejects_empty_name_and_value() {
        let frame = info_frame(consts::environ::VAR, b"", b"vt100");
        assert!(decode_frame(&frame).is_err());
        let frame = info_frame(consts::environ::VAR, b"TERM", b"");
        assert!(decode_frame(&frame).is_err());
    }

    #[test]
    fn rejects_an_unknown_kind_marker() {
        let frame = info_frame(0x07, b"TERM", b"vt100");
        assert!(decode_frame(&frame).is_err());
    }

    #[test]
    fn send_solicitation_bytes() {
        let mut dst = BytesMut::new();
        encode_send(&mut dst);
        assert_eq!(&dst[..], &[0xFF, 0xFA, 0x27, 0x01, 0xFF, 0xF0]);
    }
}
