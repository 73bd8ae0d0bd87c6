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

//! A minimal echo server: `cargo run --example echo_server`, then
//! `telnet 127.0.0.1 2323`.

use async_trait::async_trait;
use bytes::Bytes;
use std::sync::Arc;
use teleterm_session::{
    OptionEvent, ServerConfig, Session, SessionConfig, SessionHandler, TelnetServer,
};

struct Echo;

#[async_trait]
impl SessionHandler for Echo {
    async fn on_connect(&self, session: &mut Session) {
        let _ = session.write(b"teleterm echo - type away\n");
    }

    async fn on_data(&self, session: &mut Session, data: Bytes) {
        let _ = session.write(&data);
    }

    async fn on_option(&self, session: &mut Session, event: OptionEvent) {
        tracing::info!(
            event = %event,
            terminal = session.terminal(),
            columns = session.columns(),
            rows = session.rows(),
            "option traffic"
        );
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    let config = ServerConfig::new("127.0.0.1:2323".parse()?)
        .with_session(SessionConfig::new().with_tty(true));
    let server = TelnetServer::bind(config).await?;
    server.serve(Arc::new(Echo)).await?;
    Ok(())
}
