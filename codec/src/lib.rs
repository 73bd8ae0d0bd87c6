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

//! # Teleterm Telnet Codec
//!
//! An incremental codec for the Telnet protocol (RFC 854 and the option RFCs
//! it cites), built for server-side session engines. It separates user data
//! from in-band `IAC` command sequences, decodes the option subnegotiations a
//! terminal server cares about, and encodes the outbound command vocabulary.
//!
//! ## Overview
//!
//! The decoder consumes arbitrarily chunked reads and produces:
//!
//! - **Data spans** — contiguous runs of user bytes, with the `IAC IAC`
//!   escape collapsed to a single literal `0xFF`.
//! - **Option events** — typed [`OptionEvent`] values for negotiation verbs
//!   (`DO`/`DONT`/`WILL`/`WONT`) over the known option registry, and for the
//!   three decoded subnegotiations: window size (NAWS), terminal type, and
//!   environment variables (NEW-ENVIRON).
//!
//! Options outside the registry are tolerated and surfaced as
//! [`OptionEvent::Unknown`]; their subnegotiations are skipped to the
//! `IAC SE` terminator without interpretation.
//!
//! Incomplete frames are never an error: the decoder leaves them in the read
//! buffer and resumes when more bytes arrive, so the event stream does not
//! depend on how the transport chunks its reads. Structural violations in a
//! recognised option's sub-grammar are errors ([`CodecError`]), but they
//! abort only the current read — whether to drop the connection is the
//! caller's decision.
//!
//! ## Usage
//!
//! ```rust
//! use teleterm_codec::{TelnetCodec, TelnetEvent, TelnetMessage, TelnetOption};
//! use tokio_util::codec::{Decoder, Encoder};
//! use bytes::BytesMut;
//!
//! let mut codec = TelnetCodec::new();
//!
//! // Ask the peer to negotiate about window size.
//! let mut outbound = BytesMut::new();
//! codec.encode(TelnetMessage::Do(TelnetOption::NAWS), &mut outbound).unwrap();
//! assert_eq!(&outbound[..], &[0xFF, 0xFD, 0x1F]);
//!
//! // Decode its resize announcement.
//! let mut inbound = BytesMut::from(&[0xFF, 0xFA, 0x1F, 0, 80, 0, 24, 0xFF, 0xF0][..]);
//! let event = codec.decode(&mut inbound).unwrap().unwrap();
//! assert!(matches!(event, TelnetEvent::Option(_)));
//! ```
//!
//! ## Related RFCs
//!
//! - RFC 854: Telnet Protocol Specification
//! - RFC 855: Telnet Option Specifications
//! - RFC 1073: Telnet Window Size Option
//! - RFC 1091: Telnet Terminal-Type Option
//! - RFC 1572: Telnet Environment Option

#![warn(
    clippy::cargo,
    missing_docs,
    clippy::pedantic,
    future_incompatible,
    rust_2018_idioms
)]
#![allow(
    clippy::option_if_let_else,
    clippy::module_name_repetitions,
    clippy::missing_errors_doc
)]

pub mod args;
mod codec;
mod command;
pub mod consts;
mod event;
mod message;
mod options;
mod result;

pub use self::args::environ::{EnvironmentEntry, EnvironmentKind};
pub use self::args::naws::WindowSize;
pub use self::codec::TelnetCodec;
pub use self::command::TelnetCommand;
pub use self::event::{OptionEvent, TelnetEvent};
pub use self::message::TelnetMessage;
pub use self::options::TelnetOption;
pub use self::result::{CodecError, CodecResult, MalformedKind};
