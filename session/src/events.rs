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

use bytes::Bytes;
use teleterm_codec::OptionEvent;

use crate::SessionError;

///
/// What a session publishes to the application, in strict wire order.
///
/// Option events carry their canonical name and short aliases via
/// [`OptionEvent::name`] and [`OptionEvent::aliases`]; applications that key
/// handlers by name can fan one event out under every spelling.
///
#[derive(Debug)]
pub enum SessionEvent {
    /// A span of user data, `IAC IAC` escapes already collapsed.
    Data(Bytes),
    /// A decoded option negotiation or subnegotiation. Session state
    /// (window size, terminal, environment) is updated before this is
    /// published.
    Option(OptionEvent),
    /// A structural protocol violation; the rest of that read was dropped
    /// and parsing resumes with the next one. The transport stays open.
    Error(SessionError),
}
