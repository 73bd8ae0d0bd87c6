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

//! TCP accept loop spawning one session per connection.

use crate::{SessionConfig, SessionDriver, SessionHandler};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{Instrument, debug, info, info_span, warn};

/// Server configuration: where to listen and what every session gets.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address the listener binds to.
    pub bind_address: SocketAddr,
    /// Configuration applied to every accepted session.
    pub session: SessionConfig,
}

impl ServerConfig {
    /// Creates a configuration listening on `bind_address` with default
    /// session settings.
    pub fn new(bind_address: SocketAddr) -> ServerConfig {
        ServerConfig {
            bind_address,
            session: SessionConfig::default(),
        }
    }

    /// Replaces the per-session configuration.
    pub fn with_session(mut self, session: SessionConfig) -> ServerConfig {
        self.session = session;
        self
    }
}

///
/// A Telnet server: accepts TCP connections and runs each one through a
/// [`SessionDriver`] on its own task.
///
/// # Example
///
/// ```no_run
/// use teleterm_session::{ServerConfig, SessionConfig, SessionHandler, TelnetServer};
/// use async_trait::async_trait;
/// use std::sync::Arc;
///
/// struct Quiet;
///
/// #[async_trait]
/// impl SessionHandler for Quiet {}
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let config = ServerConfig::new("127.0.0.1:2323".parse()?)
///     .with_session(SessionConfig::new().with_tty(true));
/// let server = TelnetServer::bind(config).await?;
/// server.serve(Arc::new(Quiet)).await?;
/// # Ok(())
/// # }
/// ```
///
pub struct TelnetServer {
    listener: TcpListener,
    session_config: SessionConfig,
}

impl TelnetServer {
    /// Binds the listener.
    pub async fn bind(config: ServerConfig) -> crate::Result<TelnetServer> {
        let listener = TcpListener::bind(config.bind_address).await?;
        Ok(TelnetServer {
            listener,
            session_config: config.session,
        })
    }

    /// The address the listener actually bound, useful with port 0.
    pub fn local_address(&self) -> crate::Result<SocketAddr> {
        Ok(self.listener.local_addr()?)
    }

    /// Accepts connections forever, one spawned task per session. Runs until
    /// the accept loop fails or the owning task is cancelled.
    pub async fn serve<H: SessionHandler>(self, handler: Arc<H>) -> crate::Result<()> {
        info!(address = %self.listener.local_addr()?, "telnet server listening");
        loop {
            let (socket, peer) = self.listener.accept().await?;
            let handler = Arc::clone(&handler);
            let config = self.session_config.clone();
            tokio::spawn(
                async move {
                    debug!("peer connected");
                    let driver = SessionDriver::new(socket, config);
                    if let Err(error) = driver.run(handler).await {
                        warn!(%error, "session task failed");
                    }
                    debug!("peer finished");
                }
                .instrument(info_span!("session", %peer)),
            );
        }
    }
}
