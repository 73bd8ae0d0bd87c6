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

use crate::args::{environ, naws, ttype};
use crate::event::{OptionEvent, TelnetEvent};
use crate::message::TelnetMessage;
use crate::result::CodecResult;
use crate::{CodecError, TelnetCommand, TelnetOption, consts};
use bytes::{Buf, BufMut, Bytes, BytesMut};
use tokio_util::codec::{Decoder, Encoder};
use tracing::{trace, warn};

/// An `IAC IAC` escape collapses to this single literal data byte.
static LITERAL_IAC: [u8; 1] = [consts::IAC];

///
/// Incremental Telnet scanner and emitter.
///
/// The decoder walks the read buffer separating user data from `IAC` command
/// frames. User data is emitted as contiguous spans, frames are handed to the
/// per-option grammars, and anything incomplete stays in the buffer — the
/// buffer *is* the parse residue, so the event stream is identical no matter
/// how the transport chunks its reads.
///
/// The codec itself is stateless and direction-agnostic; it is typically
/// driven through `tokio_util::codec::Framed` or fed manually from a session
/// loop.
///
/// # Example
///
/// ```rust
/// use teleterm_codec::{TelnetCodec, TelnetEvent};
/// use tokio_util::codec::Decoder;
/// use bytes::BytesMut;
///
/// let mut codec = TelnetCodec::new();
/// let mut input = BytesMut::from(&b"login: \xFF\xFD\x01"[..]); // data + DO ECHO
/// while let Some(event) = codec.decode(&mut input).unwrap() {
///     match event {
///         TelnetEvent::Data(span) => println!("data: {span:?}"),
///         TelnetEvent::Option(option) => println!("option: {option}"),
///     }
/// }
/// ```
///
#[derive(Clone, Copy, Debug, Default)]
pub struct TelnetCodec;

impl TelnetCodec {
    /// Creates a new codec.
    pub fn new() -> TelnetCodec {
        TelnetCodec
    }
}

impl Decoder for TelnetCodec {
    type Item = TelnetEvent;
    type Error = CodecError;

    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<TelnetEvent>, Self::Error> {
        if src.is_empty() {
            return Ok(None);
        }

        // A maximal run of user bytes before the next IAC becomes one span.
        if src[0] != consts::IAC {
            let span = match src.iter().position(|&byte| byte == consts::IAC) {
                Some(at) => src.split_to(at),
                None => src.split(),
            };
            return Ok(Some(TelnetEvent::Data(span.freeze())));
        }

        // A frame head is the full three-byte window IAC <command> <option>;
        // with fewer bytes buffered the scanner suspends.
        if src.len() < 3 {
            return Ok(None);
        }

        let Some(command) = TelnetCommand::from_u8(src[1]) else {
            // IAC before a non-command byte is not a frame; both bytes pass
            // through as data.
            warn!(byte = src[1], "IAC before non-command byte");
            let span = src.split_to(2);
            return Ok(Some(TelnetEvent::Data(span.freeze())));
        };

        if command == TelnetCommand::Iac {
            // Escaped literal 0xFF: two wire bytes, one data byte.
            src.advance(2);
            return Ok(Some(TelnetEvent::Data(Bytes::from_static(&LITERAL_IAC))));
        }

        let option = TelnetOption::from_u8(src[2]);
        match decode_frame(command, option, &src[..]) {
            Ok(Some((consumed, event))) => {
                trace!(%event, consumed, "decoded option frame");
                src.advance(consumed);
                Ok(Some(TelnetEvent::Option(event)))
            }
            Ok(None) => Ok(None),
            Err(error) => {
                // Structural violation: abort the rest of this read. The
                // connection stays up; closing is the caller's decision.
                src.clear();
                Err(error)
            }
        }
    }

    fn decode_eof(&mut self, src: &mut BytesMut) -> Result<Option<TelnetEvent>, Self::Error> {
        match self.decode(src)? {
            Some(event) => Ok(Some(event)),
            None => {
                if !src.is_empty() {
                    // A frame truncated by connection end is dropped silently.
                    trace!(residue = src.len(), "discarding partial frame at end");
                    src.clear();
                }
                Ok(None)
            }
        }
    }
}

/// Decodes one frame from a slice beginning at `IAC`, returning the consumed
/// length and the event, or `None` when more bytes are needed.
fn decode_frame(
    command: TelnetCommand,
    option: TelnetOption,
    frame: &[u8],
) -> CodecResult<Option<(usize, OptionEvent)>> {
    if command != TelnetCommand::SubnegotiationBegin {
        // Everything but SB is the fixed three-byte form.
        return Ok(Some((3, acknowledgement(command, option))));
    }
    match option {
        TelnetOption::WindowSize => Ok(naws::decode_frame(frame)?.map(|(consumed, size)| {
            (
                consumed,
                OptionEvent::WindowSize {
                    command,
                    size: Some(size),
                },
            )
        })),
        TelnetOption::TerminalType => Ok(ttype::decode_frame(frame)?.map(|(consumed, name)| {
            (
                consumed,
                OptionEvent::TerminalType {
                    command,
                    name: Some(name),
                },
            )
        })),
        TelnetOption::EnvironmentVariables => {
            Ok(environ::decode_frame(frame)?.map(|(consumed, entry)| {
                (
                    consumed,
                    OptionEvent::Environment {
                        command,
                        entry: Some(entry),
                    },
                )
            }))
        }
        option => decode_opaque_subnegotiation(option, frame),
    }
}

/// Skips a subnegotiation without a decoded sub-grammar (unknown options, and
/// Linemode by design) to its `IAC SE` terminator, surfacing it opaquely.
fn decode_opaque_subnegotiation(
    option: TelnetOption,
    frame: &[u8],
) -> CodecResult<Option<(usize, OptionEvent)>> {
    let Some(at) = frame[3..]
        .windows(2)
        .position(|window| window == [consts::IAC, consts::SE])
    else {
        return Ok(None);
    };
    let data = Bytes::copy_from_slice(&frame[3..3 + at]);
    Ok(Some((
        3 + at + 2,
        OptionEvent::Unknown {
            command: TelnetCommand::SubnegotiationBegin,
            option: option.to_u8(),
            data,
        },
    )))
}

/// Builds the payload-free event for a fixed three-byte frame.
fn acknowledgement(command: TelnetCommand, option: TelnetOption) -> OptionEvent {
    match option {
        TelnetOption::TransmitBinary => OptionEvent::TransmitBinary(command),
        TelnetOption::Echo => OptionEvent::Echo(command),
        TelnetOption::SuppressGoAhead => OptionEvent::SuppressGoAhead(command),
        TelnetOption::Status => OptionEvent::Status(command),
        TelnetOption::TimingMark => OptionEvent::TimingMark(command),
        TelnetOption::TerminalSpeed => OptionEvent::TerminalSpeed(command),
        TelnetOption::RemoteFlowControl => OptionEvent::RemoteFlowControl(command),
        TelnetOption::Linemode => OptionEvent::Linemode(command),
        TelnetOption::XDisplayLocation => OptionEvent::XDisplayLocation(command),
        TelnetOption::Authentication => OptionEvent::Authentication(command),
        TelnetOption::WindowSize => OptionEvent::WindowSize {
            command,
            size: None,
        },
        TelnetOption::TerminalType => OptionEvent::TerminalType {
            command,
            name: None,
        },
        TelnetOption::EnvironmentVariables => OptionEvent::Environment {
            command,
            entry: None,
        },
        TelnetOption::Unknown(code) => OptionEvent::Unknown {
            command,
            option: code,
            data: Bytes::new(),
        },
    }
}

/// Appends data with IAC escaping: a literal `0xFF` goes out doubled.
fn put_escaped(data: &[u8], dst: &mut BytesMut) {
    let escapes = data.iter().filter(|&&byte| byte == consts::IAC).count();
    dst.reserve(data.len() + escapes);
    for &byte in data {
        if byte == consts::IAC {
            dst.put_u8(consts::IAC);
        }
        dst.put_u8(byte);
    }
}

fn put_negotiation(verb: u8, option: TelnetOption, dst: &mut BytesMut) {
    dst.reserve(3);
    dst.put_u8(consts::IAC);
    dst.put_u8(verb);
    dst.put_u8(option.to_u8());
}

impl Encoder<TelnetMessage> for TelnetCodec {
    type Error = CodecError;

    fn encode(&mut self, item: TelnetMessage, dst: &mut BytesMut) -> Result<(), Self::Error> {
        match item {
            TelnetMessage::Data(data) => put_escaped(&data, dst),
            TelnetMessage::Do(option) => put_negotiation(consts::DO, option, dst),
            TelnetMessage::Dont(option) => put_negotiation(consts::DONT, option, dst),
            TelnetMessage::Will(option) => put_negotiation(consts::WILL, option, dst),
            TelnetMessage::Wont(option) => put_negotiation(consts::WONT, option, dst),
            TelnetMessage::TerminalTypeRequest => ttype::encode_send(dst),
            TelnetMessage::EnvironmentRequest => environ::encode_send(dst),
            TelnetMessage::Subnegotiation(option, payload) => {
                dst.reserve(payload.len() + 5);
                dst.put_slice(&[consts::IAC, consts::SB, option.to_u8()]);
                put_escaped(&payload, dst);
                dst.put_slice(&[consts::IAC, consts::SE]);
            }
        }
        Ok(())
    }
}

impl Encoder<Bytes> for TelnetCodec {
    type Error = CodecError;

    fn encode(&mut self, item: Bytes, dst: &mut BytesMut) -> Result<(), Self::Error> {
        self.encode(TelnetMessage::Data(item), dst)
    }
}

impl Encoder<&[u8]> for TelnetCodec {
    type Error = CodecError;

    fn encode(&mut self, item: &[u8], dst: &mut BytesMut) -> Result<(), Self::Error> {
        put_escaped(item, dst);
        Ok(())
    }
}
