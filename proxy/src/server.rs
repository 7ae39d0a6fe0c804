// Copyright 2024 Google LLC
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     https://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Listening socket setup and per-connection dispatch.

use crate::relay::handle_connection;
use crate::Result;
use log::{info, warn};
use std::net::TcpListener;
use std::thread;

/// Binds the listening socket on all interfaces and serves forever.
pub fn run(port: u16) -> Result<()> {
    let listener = TcpListener::bind(("0.0.0.0", port))?;
    serve(listener)
}

/// Accept loop: one detached handler thread per accepted connection.
///
/// Handler threads are not tracked; each one releases its own
/// resources when the relay engine returns.
pub fn serve(listener: TcpListener) -> Result<()> {
    info!("Proxy is listening on port {}", listener.local_addr()?.port());
    for stream in listener.incoming() {
        let stream = match stream {
            Ok(stream) => stream,
            Err(e) => {
                warn!("Accept error: {}", e);
                continue;
            }
        };
        if let Ok(peer) = stream.peer_addr() {
            info!("Accepted connection from ({}, {})", peer.ip(), peer.port());
        }
        let spawned = thread::Builder::new()
            .name("proxy_connection".to_string())
            .spawn(move || handle_connection(stream));
        if let Err(e) = spawned {
            // The closure is dropped with its stream, closing the socket.
            warn!("Failed to spawn connection handler: {}", e);
        }
    }
    Ok(())
}
