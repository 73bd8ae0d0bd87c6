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

//! The per-peer session state machine.

use crate::{SessionConfig, SessionError, SessionEvent};
use bytes::{BufMut, Bytes, BytesMut};
use std::collections::HashMap;
use teleterm_codec::{
    OptionEvent, TelnetCodec, TelnetCommand, TelnetEvent, TelnetMessage, TelnetOption, consts,
};
use tokio_util::codec::{Decoder, Encoder};
use tracing::{debug, trace};

/// Options solicited from the peer when a session opens in tty mode.
const TTY_HANDSHAKE: [TelnetOption; 4] = [
    TelnetOption::TransmitBinary,
    TelnetOption::TerminalType,
    TelnetOption::NAWS,
    TelnetOption::NEW_ENVIRON,
];

///
/// One connected peer: the codec, the parse residue, the outbound byte queue
/// and the state the peer has negotiated so far.
///
/// The session is sans-io. A transport adapter feeds inbound chunks through
/// [`Session::receive`] and drains [`Session::take_outgoing`] to the socket;
/// everything else — state mirroring, automatic replies, the outbound command
/// API — happens in between. [`SessionDriver`](crate::SessionDriver) is the
/// bundled tokio adapter, but any transport that can move bytes works.
///
/// State mirrored from the peer:
///
/// - window size, updated by NAWS subnegotiations (initially 80×24);
/// - terminal type, updated by TERMINAL-TYPE answers and a `TERM`
///   environment variable (initially `"ansi"`, always lowercase);
/// - the environment map, updated by NEW-ENVIRON updates.
///
/// Mutations land before the corresponding event is published, so a handler
/// reading `session.columns()` inside a window-size event sees the new value.
///
pub struct Session {
    codec: TelnetCodec,
    residue: BytesMut,
    outbox: BytesMut,
    config: SessionConfig,
    terminal: String,
    columns: u16,
    rows: u16,
    env: HashMap<String, String>,
    raw: bool,
    readable: bool,
    writable: bool,
    destroyed: bool,
}

impl Session {
    /// Creates a session with the default configuration.
    pub fn new() -> Session {
        Session::with_config(SessionConfig::default())
    }

    /// Creates a session with an explicit configuration.
    pub fn with_config(config: SessionConfig) -> Session {
        Session {
            codec: TelnetCodec::new(),
            residue: BytesMut::new(),
            outbox: BytesMut::new(),
            terminal: config.terminal_type.to_lowercase(),
            columns: config.columns,
            rows: config.rows,
            config,
            env: HashMap::new(),
            raw: false,
            readable: true,
            writable: true,
            destroyed: false,
        }
    }

    /// Runs the open handshake. In tty mode this solicits the peer's
    /// capabilities: `DO TRANSMIT_BINARY`, `DO TERMINAL_TYPE`, `DO NAWS`,
    /// `DO NEW_ENVIRON`.
    pub fn open(&mut self) -> Result<(), SessionError> {
        if self.config.tty {
            for option in TTY_HANDSHAKE {
                self.queue(TelnetMessage::Do(option))?;
            }
        }
        Ok(())
    }

    // ------------------------------------------------------------------
    // Inbound
    // ------------------------------------------------------------------

    /// Feeds one transport read through the parser and returns everything it
    /// produced, in wire order.
    ///
    /// A structural protocol violation becomes the final
    /// [`SessionEvent::Error`] of the batch: the rest of that read is
    /// dropped, but the session keeps accepting input. Empty reads are
    /// no-ops.
    pub fn receive(&mut self, chunk: &[u8]) -> Vec<SessionEvent> {
        self.residue.extend_from_slice(chunk);
        self.drain(false)
    }

    /// Signals end-of-stream: drains what is still decodable and silently
    /// discards a partially buffered frame, then marks the session
    /// unreadable.
    pub fn finish(&mut self) -> Vec<SessionEvent> {
        let events = self.drain(true);
        self.readable = false;
        events
    }

    fn drain(&mut self, eof: bool) -> Vec<SessionEvent> {
        let mut events = Vec::new();
        loop {
            let decoded = if eof {
                self.codec.decode_eof(&mut self.residue)
            } else {
                self.codec.decode(&mut self.residue)
            };
            match decoded {
                Ok(Some(TelnetEvent::Data(span))) => {
                    if self.config.debug {
                        trace!(len = span.len(), "user data span");
                    }
                    events.push(SessionEvent::Data(span));
                }
                Ok(Some(TelnetEvent::Option(option))) => {
                    if self.config.debug {
                        trace!(event = %option, "option frame");
                    }
                    match self.apply(&option) {
                        Ok(()) => events.push(SessionEvent::Option(option)),
                        Err(error) => {
                            events.push(SessionEvent::Error(error));
                            break;
                        }
                    }
                }
                Ok(None) => break,
                Err(error) => {
                    events.push(SessionEvent::Error(error.into()));
                    break;
                }
            }
        }
        events
    }

    /// Mirrors a decoded option onto the session before it is published.
    fn apply(&mut self, event: &OptionEvent) -> Result<(), SessionError> {
        match event {
            OptionEvent::WindowSize {
                size: Some(size), ..
            } => {
                self.columns = size.columns;
                self.rows = size.rows;
                debug!(columns = size.columns, rows = size.rows, "peer resized");
            }
            OptionEvent::TerminalType { command, name } => match name {
                Some(name) => {
                    self.terminal.clone_from(name);
                    debug!(terminal = %self.terminal, "peer announced terminal");
                }
                // The peer offers the option; ask for the name right away.
                None if *command == TelnetCommand::Will => {
                    self.queue(TelnetMessage::TerminalTypeRequest)?;
                }
                None => {}
            },
            OptionEvent::Environment {
                entry: Some(entry), ..
            } => {
                let value = if entry.name == "TERM" {
                    let value = entry.value.to_lowercase();
                    self.terminal.clone_from(&value);
                    value
                } else {
                    entry.value.clone()
                };
                self.env.insert(entry.name.clone(), value);
            }
            _ => {}
        }
        Ok(())
    }

    // ------------------------------------------------------------------
    // Outbound
    // ------------------------------------------------------------------

    /// Writes user data to the peer. `0xFF` bytes are escaped on the wire,
    /// and with `convert_lf` enabled a bare `\n` becomes `\r\n`.
    ///
    /// Each write converts independently: a `\r` at the end of one write
    /// does not suppress conversion at the start of the next.
    pub fn write(&mut self, bytes: &[u8]) -> Result<(), SessionError> {
        self.ensure_writable()?;
        let data = if self.config.convert_lf {
            convert_line_endings(bytes)
        } else {
            Bytes::copy_from_slice(bytes)
        };
        self.queue(TelnetMessage::Data(data))
    }

    /// Sends `IAC DO <option>`.
    pub fn send_do(&mut self, option: TelnetOption) -> Result<(), SessionError> {
        self.ensure_writable()?;
        self.queue(TelnetMessage::Do(option))
    }

    /// Sends `IAC DONT <option>`.
    pub fn send_dont(&mut self, option: TelnetOption) -> Result<(), SessionError> {
        self.ensure_writable()?;
        self.queue(TelnetMessage::Dont(option))
    }

    /// Sends `IAC WILL <option>`.
    pub fn send_will(&mut self, option: TelnetOption) -> Result<(), SessionError> {
        self.ensure_writable()?;
        self.queue(TelnetMessage::Will(option))
    }

    /// Sends `IAC WONT <option>`.
    pub fn send_wont(&mut self, option: TelnetOption) -> Result<(), SessionError> {
        self.ensure_writable()?;
        self.queue(TelnetMessage::Wont(option))
    }

    /// Solicits the peer's terminal name (`IAC SB 24 SEND IAC SE`).
    pub fn request_terminal_type(&mut self) -> Result<(), SessionError> {
        self.ensure_writable()?;
        self.queue(TelnetMessage::TerminalTypeRequest)
    }

    /// Solicits the peer's environment (`IAC SB 39 SEND IAC SE`).
    pub fn request_environment(&mut self) -> Result<(), SessionError> {
        self.ensure_writable()?;
        self.queue(TelnetMessage::EnvironmentRequest)
    }

    /// Switches the peer's terminal into or out of raw mode.
    ///
    /// Enabling emits exactly `WILL ECHO`, `WILL SUPPRESS_GO_AHEAD`,
    /// `DO SUPPRESS_GO_AHEAD`, in that order; the order is part of the
    /// public contract. Disabling emits the mirrored
    /// `WONT ECHO`, `WONT SUPPRESS_GO_AHEAD`, `DONT SUPPRESS_GO_AHEAD`.
    /// A no-op when the session is not writable.
    pub fn set_raw_mode(&mut self, enabled: bool) -> Result<(), SessionError> {
        if !self.writable || self.destroyed {
            return Ok(());
        }
        if enabled {
            self.queue(TelnetMessage::Will(TelnetOption::Echo))?;
            self.queue(TelnetMessage::Will(TelnetOption::SuppressGoAhead))?;
            self.queue(TelnetMessage::Do(TelnetOption::SuppressGoAhead))?;
        } else {
            self.queue(TelnetMessage::Wont(TelnetOption::Echo))?;
            self.queue(TelnetMessage::Wont(TelnetOption::SuppressGoAhead))?;
            self.queue(TelnetMessage::Dont(TelnetOption::SuppressGoAhead))?;
        }
        self.raw = enabled;
        Ok(())
    }

    /// Takes the bytes queued for the transport, if any.
    pub fn take_outgoing(&mut self) -> Option<Bytes> {
        if self.outbox.is_empty() {
            None
        } else {
            Some(self.outbox.split().freeze())
        }
    }

    fn queue(&mut self, message: TelnetMessage) -> Result<(), SessionError> {
        self.codec
            .encode(message, &mut self.outbox)
            .map_err(SessionError::from)
    }

    fn ensure_writable(&self) -> Result<(), SessionError> {
        if self.destroyed {
            Err(SessionError::Destroyed)
        } else if !self.writable {
            Err(SessionError::NotWritable)
        } else {
            Ok(())
        }
    }

    // ------------------------------------------------------------------
    // Lifecycle
    // ------------------------------------------------------------------

    /// Closes the write side. Queued bytes may still be flushed; new writes
    /// fail with [`SessionError::NotWritable`].
    pub fn end(&mut self) {
        self.writable = false;
    }

    /// Severs the session: both directions close, queued output and residue
    /// are dropped, and the session becomes permanently inert.
    pub fn destroy(&mut self) {
        self.readable = false;
        self.writable = false;
        self.destroyed = true;
        self.residue.clear();
        self.outbox.clear();
    }

    // ------------------------------------------------------------------
    // Getters
    // ------------------------------------------------------------------

    /// The configuration this session was created with.
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Current window width in columns.
    pub fn columns(&self) -> u16 {
        self.columns
    }

    /// Current window height in rows.
    pub fn rows(&self) -> u16 {
        self.rows
    }

    /// The peer's advertised terminal type, lowercase.
    pub fn terminal(&self) -> &str {
        &self.terminal
    }

    /// The peer-supplied environment.
    pub fn environment(&self) -> &HashMap<String, String> {
        &self.env
    }

    /// Whether raw mode was requested via [`Session::set_raw_mode`].
    pub fn is_raw(&self) -> bool {
        self.raw
    }

    /// Whether this session ran the interactive-terminal handshake.
    pub fn is_tty(&self) -> bool {
        self.config.tty
    }

    /// Whether the read side is still open.
    pub fn readable(&self) -> bool {
        self.readable && !self.destroyed
    }

    /// Whether the write side is still open.
    pub fn writable(&self) -> bool {
        self.writable && !self.destroyed
    }

    /// Whether the session was destroyed.
    pub fn destroyed(&self) -> bool {
        self.destroyed
    }
}

impl Default for Session {
    fn default() -> Self {
        Session::new()
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("terminal", &self.terminal)
            .field("columns", &self.columns)
            .field("rows", &self.rows)
            .field("raw", &self.raw)
            .field("readable", &self.readable)
            .field("writable", &self.writable)
            .field("destroyed", &self.destroyed)
            .finish()
    }
}

/// Rewrites every `\n` not already preceded by `\r` to `\r\n`.
fn convert_line_endings(bytes: &[u8]) -> Bytes {
    let mut converted = BytesMut::with_capacity(bytes.len() + 8);
    let mut previous = 0u8;
    for &byte in bytes {
        if byte == consts::LF && previous != consts::CR {
            converted.put_u8(consts::CR);
        }
        converted.put_u8(byte);
        previous = byte;
    }
    converted.freeze()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wire(session: &mut Session) -> Vec<u8> {
        session
            .take_outgoing()
            .map(|bytes| bytes.to_vec())
            .unwrap_or_default()
    }

    #[test]
    fn defaults_match_a_bare_terminal() {
        let session = Session::new();
        assert_eq!(session.terminal(), "ansi");
        assert_eq!(session.columns(), 80);
        assert_eq!(session.rows(), 24);
        assert!(!session.is_raw());
        assert!(!session.is_tty());
        assert!(session.readable());
        assert!(session.writable());
    }

    #[test]
    fn tty_sessions_open_with_the_capability_handshake() {
        let mut session = Session::with_config(SessionConfig::new().with_tty(true));
        session.open().unwrap();
        assert_eq!(
            wire(&mut session),
            vec![
                0xFF, 0xFD, 0x00, // DO TRANSMIT_BINARY
                0xFF, 0xFD, 0x18, // DO TERMINAL_TYPE
                0xFF, 0xFD, 0x1F, // DO NAWS
                0xFF, 0xFD, 0x27, // DO NEW_ENVIRON
            ]
        );
        assert!(session.is_tty());
    }

    #[test]
    fn plain_sessions_open_silently() {
        let mut session = Session::new();
        session.open().unwrap();
        assert!(session.take_outgoing().is_none());
    }

    #[test]
    fn lf_conversion_rewrites_bare_newlines_only() {
        let mut session = Session::new();
        session.write(b"one\ntwo\r\nthree\n").unwrap();
        assert_eq!(wire(&mut session), b"one\r\ntwo\r\nthree\r\n");
    }

    #[test]
    fn lf_conversion_can_be_disabled() {
        let mut session = Session::with_config(SessionConfig::new().with_convert_lf(false));
        session.write(b"one\ntwo").unwrap();
        assert_eq!(wire(&mut session), b"one\ntwo");
    }

    #[test]
    fn writes_escape_literal_iac_bytes() {
        let mut session = Session::new();
        session.write(&[0x01, 0xFF, 0x02]).unwrap();
        assert_eq!(wire(&mut session), vec![0x01, 0xFF, 0xFF, 0x02]);
    }

    #[test]
    fn raw_mode_emits_the_frozen_triplet() {
        let mut session = Session::new();
        session.set_raw_mode(true).unwrap();
        assert!(session.is_raw());
        assert_eq!(
            wire(&mut session),
            vec![0xFF, 0xFB, 0x01, 0xFF, 0xFB, 0x03, 0xFF, 0xFD, 0x03]
        );

        session.set_raw_mode(false).unwrap();
        assert!(!session.is_raw());
        assert_eq!(
            wire(&mut session),
            vec![0xFF, 0xFC, 0x01, 0xFF, 0xFC, 0x03, 0xFF, 0xFE, 0x03]
        );
    }

    #[test]
    fn raw_mode_is_a_noop_after_end() {
        let mut session = Session::new();
        session.end();
        session.set_raw_mode(true).unwrap();
        assert!(!session.is_raw());
        assert!(session.take_outgoing().is_none());
    }

    #[test]
    fn writes_fail_once_ended_or_destroyed() {
        let mut session = Session::new();
        session.end();
        assert!(matches!(
            session.write(b"late"),
            Err(SessionError::NotWritable)
        ));
        session.destroy();
        assert!(matches!(session.write(b"gone"), Err(SessionError::Destroyed)));
        assert!(!session.readable());
        assert!(session.destroyed());
    }

    #[test]
    fn term_variable_mirrors_into_the_terminal_type() {
        let mut session = Session::new();
        let mut frame = vec![0xFF, 0xFA, 0x27, 0x02, 0x00];
        frame.extend_from_slice(b"TERM");
        frame.push(0x01);
        frame.extend_from_slice(b"VT320");
        frame.extend_from_slice(&[0xFF, 0xF0]);

        let events = session.receive(&frame);
        assert_eq!(events.len(), 1);
        assert_eq!(session.terminal(), "vt320");
        assert_eq!(
            session.environment().get("TERM").map(String::as_str),
            Some("vt320")
        );
    }

    #[test]
    fn environment_names_are_never_empty() {
        let mut session = Session::new();
        // Empty name is rejected by the decoder before it can reach the map.
        let frame = [
            0xFF, 0xFA, 0x27, 0x02, 0x00, 0x01, b'v', b'a', b'l', 0xFF, 0xF0,
        ];
        let events = session.receive(&frame);
        assert!(matches!(events[..], [SessionEvent::Error(_)]));
        assert!(session.environment().is_empty());
    }

    #[test]
    fn finish_discards_a_partial_frame() {
        let mut session = Session::new();
        let events = session.receive(&[b'h', b'i', 0xFF, 0xFA, 0x1F]);
        assert!(matches!(
            events[..],
            [SessionEvent::Data(ref span)] if &span[..] == b"hi"
        ));

        let events = session.finish();
        assert!(events.is_empty());
        assert!(!session.readable());
    }
}
