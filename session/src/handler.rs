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

//! Application callback seam.

use crate::{Session, SessionError};
use async_trait::async_trait;
use bytes::Bytes;
use teleterm_codec::OptionEvent;

/// Session event handler.
///
/// Implement this to receive a session's event stream. All methods have
/// default no-op bodies, so a handler only spells out what it cares about.
/// The session reference lets callbacks reply inline — anything queued is
/// flushed to the transport when the callback returns.
///
/// # Example
///
/// ```no_run
/// use teleterm_session::{Session, SessionHandler};
/// use async_trait::async_trait;
/// use bytes::Bytes;
///
/// struct Shout;
///
/// #[async_trait]
/// impl SessionHandler for Shout {
///     async fn on_data(&self, session: &mut Session, data: Bytes) {
///         let loud = data.to_ascii_uppercase();
///         let _ = session.write(&loud);
///     }
/// }
/// ```
#[async_trait]
pub trait SessionHandler: Send + Sync + 'static {
    /// Called once the session is open and the tty handshake, if any, has
    /// been queued.
    async fn on_connect(&self, _session: &mut Session) {}

    /// Called for every span of user data, in wire order.
    async fn on_data(&self, _session: &mut Session, _data: Bytes) {}

    /// Called for every decoded option event. Session state (window size,
    /// terminal, environment) is already updated when this runs.
    async fn on_option(&self, _session: &mut Session, _event: OptionEvent) {}

    /// Called for protocol violations and transport errors. Protocol
    /// violations do not close the session; transport errors do.
    async fn on_error(&self, _session: &mut Session, _error: SessionError) {}

    /// Called when the peer ends the stream or the session is destroyed.
    async fn on_disconnect(&self, _session: &mut Session) {}
}
