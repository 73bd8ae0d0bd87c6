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

//! # Teleterm Session Layer
//!
//! The per-peer half of the engine: [`Session`] binds the
//! [`teleterm_codec`] parser to the state a terminal server keeps for each
//! connection, and [`TelnetServer`] / [`SessionDriver`] provide the tokio
//! glue around it.
//!
//! ## Architecture
//!
//! ```text
//! TelnetServer
//!     ↓ accept + spawn
//! SessionDriver  ── reads/writes the socket
//!     ↓ receive()/take_outgoing()
//! Session        ── sans-io: parser state, peer state, outbound queue
//!     ↓ SessionEvent
//! SessionHandler ── the application
//! ```
//!
//! The [`Session`] is deliberately sans-io so the engine can be exercised —
//! and tested — without a socket: feed it byte chunks, collect events, drain
//! the outbound queue. The driver is one possible transport binding, not the
//! only one.
//!
//! ## What a session does for you
//!
//! - separates user data from Telnet commands, across any read chunking;
//! - mirrors peer state: window size from NAWS, terminal type from
//!   TERMINAL-TYPE and from a `TERM` environment variable, the NEW-ENVIRON
//!   variable map;
//! - answers `WILL TERMINAL-TYPE` with the `SEND` solicitation on its own;
//! - optionally opens with the tty capability handshake (`DO BINARY`,
//!   `DO TERMINAL-TYPE`, `DO NAWS`, `DO NEW-ENVIRON`);
//! - converts bare `\n` to `\r\n` on output, escapes literal `0xFF` bytes,
//!   and exposes the full `DO`/`DONT`/`WILL`/`WONT` command surface plus a
//!   raw-mode toggle with a stable emission order.

mod config;
mod driver;
mod error;
mod events;
mod handler;
mod server;
mod session;

pub use config::SessionConfig;
pub use driver::SessionDriver;
pub use error::{Result, SessionError};
pub use events::SessionEvent;
pub use handler::SessionHandler;
pub use server::{ServerConfig, TelnetServer};
pub use session::Session;

// The codec vocabulary is part of this crate's API surface.
pub use teleterm_codec::{
    EnvironmentEntry, EnvironmentKind, OptionEvent, TelnetCommand, TelnetOption, WindowSize,
};
