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

//! Negotiate About Window Size (RFC 1073).

use crate::result::{CodecError, CodecResult, MalformedKind};
use crate::{TelnetOption, consts};
use byteorder::{BigEndian, ByteOrder};
use bytes::BufMut;

/// A NAWS frame is always `IAC SB 31 w_hi w_lo h_hi h_lo IAC SE`.
const FRAME_LENGTH: usize = 9;

/// Terminal dimensions carried by a NAWS subnegotiation.
///
/// Both fields are 16-bit big-endian on the wire. RFC 1073 reserves the
/// value 0 for "unspecified"; it is passed through untouched.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct WindowSize {
    /// Terminal width in character columns.
    pub columns: u16,
    /// Terminal height in rows.
    pub rows: u16,
}

impl WindowSize {
    /// Creates a window size from explicit dimensions.
    pub fn new(columns: u16, rows: u16) -> Self {
        WindowSize { columns, rows }
    }

    /// Writes the 4-byte big-endian payload.
    pub fn encode<B: BufMut>(&self, dst: &mut B) {
        dst.put_u16(self.columns);
        dst.put_u16(self.rows);
    }
}

impl Default for WindowSize {
    /// The traditional 80×24 terminal.
    fn default() -> Self {
        WindowSize {
            columns: 80,
            rows: 24,
        }
    }
}

impl std::fmt::Display for WindowSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.columns, self.rows)
    }
}

/// Decodes a NAWS subnegotiation from a frame slice starting at `IAC`.
pub(crate) fn decode_frame(frame: &[u8]) -> CodecResult<Option<(usize, WindowSize)>> {
    if frame.len() < FRAME_LENGTH {
        return Ok(None);
    }
    if frame[7] != consts::IAC || frame[8] != consts::SE {
        return Err(CodecError::malformed(
            TelnetOption::WindowSize,
            MalformedKind::MissingTerminator,
        ));
    }
    let columns = BigEndian::read_u16(&frame[3..5]);
    let rows = BigEndian::read_u16(&frame[5..7]);
    Ok(Some((FRAME_LENGTH, WindowSize { columns, rows })))
}
