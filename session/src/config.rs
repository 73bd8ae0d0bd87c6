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

//! Per-session configuration.

/// Configuration applied to a session when it is created.
///
/// # Example
///
/// ```
/// use teleterm_session::SessionConfig;
///
/// let config = SessionConfig::new()
///     .with_tty(true)
///     .with_terminal_type("xterm-256color")
///     .with_window_size(120, 40);
/// ```
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Rewrite a bare `\n` to `\r\n` on output. Defaults to true.
    pub convert_lf: bool,

    /// Treat the peer as an interactive terminal: on open, proactively send
    /// `DO TRANSMIT_BINARY`, `DO TERMINAL_TYPE`, `DO NAWS` and
    /// `DO NEW_ENVIRON`. Defaults to false.
    pub tty: bool,

    /// Emit parse-trace events through `tracing`. Defaults to false.
    pub debug: bool,

    /// Terminal type assumed until the peer announces one.
    pub terminal_type: String,

    /// Window width assumed until the peer resizes.
    pub columns: u16,

    /// Window height assumed until the peer resizes.
    pub rows: u16,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            convert_lf: true,
            tty: false,
            debug: false,
            terminal_type: "ansi".to_string(),
            columns: 80,
            rows: 24,
        }
    }
}

impl SessionConfig {
    /// Creates a configuration with the defaults above.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable output LF conversion.
    pub fn with_convert_lf(mut self, enabled: bool) -> Self {
        self.convert_lf = enabled;
        self
    }

    /// Enable or disable the interactive-terminal handshake.
    pub fn with_tty(mut self, enabled: bool) -> Self {
        self.tty = enabled;
        self
    }

    /// Enable or disable parse-trace events.
    pub fn with_debug(mut self, enabled: bool) -> Self {
        self.debug = enabled;
        self
    }

    /// Set the assumed terminal type.
    pub fn with_terminal_type(mut self, terminal_type: impl Into<String>) -> Self {
        self.terminal_type = terminal_type.into();
        self
    }

    /// Set the assumed window size.
    pub fn with_window_size(mut self, columns: u16, rows: u16) -> Self {
        self.columns = columns;
        self.rows = rows;
        self
    }
}
