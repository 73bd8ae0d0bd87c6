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

//! Terminal Type (RFC 1091).
//!
//! Inbound frames are the peer's answer, `IAC SB 24 IS <name…> IAC SE`; the
//! name is lowercased before it leaves the decoder. The outbound direction is
//! only the `SEND` solicitation a server emits after the peer announces
//! `WILL TERMINAL-TYPE`.

use crate::result::{CodecError, CodecResult, MalformedKind};
use crate::{TelnetOption, consts};
use bytes::{BufMut, BytesMut};

/// Shortest legal answer: `IAC SB 24 IS <one name byte> IAC SE`.
const MIN_FRAME_LENGTH: usize = 7;

/// Decodes a terminal-type answer from a frame slice starting at `IAC`.
pub(crate) fn decode_frame(frame: &[u8]) -> CodecResult<Option<(usize, String)>> {
    if frame.len() < MIN_FRAME_LENGTH {
        return Ok(None);
    }
    if frame[3] != consts::ttype::IS {
        return Err(CodecError::malformed(
            TelnetOption::TerminalType,
            MalformedKind::UnexpectedSubCommand {
                expected: consts::ttype::IS,
                found: frame[3],
            },
        ));
    }
    // The name runs to the next IAC.
    let Some(at) = frame[4..].iter().position(|&byte| byte == consts::IAC) else {
        return Ok(None);
    };
    let end = 4 + at;
    if end + 1 >= frame.len() {
        return Ok(None);
    }
    if frame[end + 1] != consts::SE {
        return Err(CodecError::malformed(
            TelnetOption::TerminalType,
            MalformedKind::MissingTerminator,
        ));
    }
    if end == 4 {
        return Err(CodecError::malformed(
            TelnetOption::TerminalType,
            MalformedKind::EmptyName,
        ));
    }
    let name = String::from_utf8_lossy(&frame[4..end]).to_lowercase();
    Ok(Some((end + 2, name)))
}

/// Writes `IAC SB 24 SEND IAC SE`, soliciting the peer's terminal name.
pub(crate) fn encode_send(dst: &mut BytesMut) {
    dst.reserve(6);
    dst.put_slice(&[
        consts::IAC,
        consts::SB,
        consts::option::TERMINAL_TYPE,
        consts::ttype::SEND,
        consts::IAC,
        consts::SE,
    ]);
}
