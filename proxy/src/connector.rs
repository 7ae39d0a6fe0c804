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

//! Upstream connection establishment.

use crate::error::Error;
use crate::Result;
use log::debug;
use std::net::{TcpStream, ToSocketAddrs};

/// Opens a TCP connection to the origin server at `host:port`.
///
/// Name resolution takes the first resolved address. Resolution and
/// connect failures are reported as distinct error variants so the
/// relay engine can answer the client accordingly.
pub fn connect(host: &str, port: u16) -> Result<TcpStream> {
    let addr = (host, port)
        .to_socket_addrs()
        .map_err(|_| Error::HostResolution { host: host.to_string(), port })?
        .next()
        .ok_or(Error::HostResolution { host: host.to_string(), port })?;
    debug!("Connecting to end server at {}", addr);
    TcpStream::connect(addr)
        .map_err(|source| Error::UpstreamConnect { host: host.to_string(), port, source })
}
