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

//! Transport adapter: binds a [`Session`] to an async byte stream.

use crate::{Session, SessionConfig, SessionEvent, SessionHandler};
use std::sync::Arc;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tracing::trace;

/// Read size per transport poll.
const READ_BUFFER_SIZE: usize = 8192;

///
/// Drives one session over an async duplex byte stream.
///
/// The driver owns the loop the session itself stays out of: read a chunk,
/// feed it through [`Session::receive`], hand each event to the handler, and
/// flush whatever the session queued. Back-pressure is the pull model itself:
/// while a handler callback runs, the socket is not being read.
///
pub struct SessionDriver<T> {
    transport: T,
    session: Session,
    write_closed: bool,
}

impl<T> SessionDriver<T>
where
    T: AsyncRead + AsyncWrite + Unpin + Send,
{
    /// Wraps a transport in a new session.
    pub fn new(transport: T, config: SessionConfig) -> SessionDriver<T> {
        SessionDriver {
            transport,
            session: Session::with_config(config),
            write_closed: false,
        }
    }

    /// The session being driven.
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Mutable access to the session, for setup before [`SessionDriver::run`].
    pub fn session_mut(&mut self) -> &mut Session {
        &mut self.session
    }

    /// Runs the session to completion: until the peer ends the stream, the
    /// session is destroyed, or the transport fails.
    ///
    /// Transport errors are forwarded to [`SessionHandler::on_error`] and
    /// terminate the loop; protocol violations are forwarded and do not.
    pub async fn run<H: SessionHandler>(mut self, handler: Arc<H>) -> crate::Result<()> {
        self.session.open()?;
        handler.on_connect(&mut self.session).await;
        self.flush().await?;

        let mut buffer = vec![0u8; READ_BUFFER_SIZE];
        loop {
            if self.session.destroyed() {
                break;
            }
            match self.transport.read(&mut buffer).await {
                Ok(0) => {
                    trace!("peer ended the stream");
                    let events = self.session.finish();
                    self.dispatch(events, handler.as_ref()).await;
                    let _ = self.flush().await;
                    handler.on_disconnect(&mut self.session).await;
                    break;
                }
                Ok(count) => {
                    let events = self.session.receive(&buffer[..count]);
                    self.dispatch(events, handler.as_ref()).await;
                    self.flush().await?;
                    if !self.session.writable() && !self.write_closed {
                        self.transport.shutdown().await?;
                        self.write_closed = true;
                    }
                }
                Err(error) => {
                    handler.on_error(&mut self.session, error.into()).await;
                    handler.on_disconnect(&mut self.session).await;
                    break;
                }
            }
        }
        Ok(())
    }

    async fn dispatch<H: SessionHandler>(&mut self, events: Vec<SessionEvent>, handler: &H) {
        for event in events {
            match event {
                SessionEvent::Data(data) => handler.on_data(&mut self.session, data).await,
                SessionEvent::Option(option) => handler.on_option(&mut self.session, option).await,
                SessionEvent::Error(error) => handler.on_error(&mut self.session, error).await,
            }
        }
    }

    async fn flush(&mut self) -> crate::Result<()> {
        while let Some(bytes) = self.session.take_outgoing() {
            self.transport.write_all(&bytes).await?;
        }
        self.transport.flush().await?;
        Ok(())
    }
}
