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

//! Error types for the session layer.

use teleterm_codec::CodecError;
use thiserror::Error;

/// Result type for session operations.
pub type Result<T> = std::result::Result<T, SessionError>;

/// Session error taxonomy.
///
/// Protocol violations (`Protocol`) never close the transport by themselves;
/// they surface as events and parsing resumes with the next read. Transport
/// errors are forwarded verbatim from the I/O layer.
#[derive(Debug, Error)]
pub enum SessionError {
    /// I/O error from the underlying transport.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    /// Structural protocol violation from the codec.
    #[error("protocol error: {0}")]
    Protocol(#[from] CodecError),

    /// A write was attempted after the write side was shut down.
    #[error("session is not writable")]
    NotWritable,

    /// An operation was attempted on a destroyed session.
    #[error("session has been destroyed")]
    Destroyed,
}

#[cfg(test)]
mod tests {
    use super::SessionError;

    #[test]
    fn display_formats() {
        assert_eq!(
            SessionError::NotWritable.to_string(),
            "session is not writable"
        );
        assert_eq!(
            SessionError::Destroyed.to_string(),
            "session has been destroyed"
        );
    }
}
