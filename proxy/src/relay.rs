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

//! Relay engine: serves one proxied request to completion.
//!
//! The engine reads the client's request line, filters and rewrites
//! the client's headers into a plain HTTP/1.0 retrieval, sends it to
//! the origin server, and streams the response bytes back unchanged.
//!
//! Each connection advances through an explicit state machine:
//! Init -> RequestParsed -> HeadersForwarded -> Relaying -> Closed,
//! with error exits going straight to Closed. The upstream stream is
//! owned by the state value, so relaying before the request phase has
//! completed is unrepresentable.

use crate::connector;
use crate::parser::{parse_request_line, ParseResult, RequestLine};
use crate::response::write_client_error;
use crate::rewriter::{classify, HeaderAction, CONNECTION_CLOSE, PROXY_CONNECTION_CLOSE, USER_AGENT};
use log::{debug, warn};
use std::io::{self, BufRead, BufReader, Read, Write};
use std::net::TcpStream;

/// Chunk size for the upstream-to-client copy loop.
const RELAY_CHUNK_SIZE: usize = 8192;

/// Per-connection resources, owned by exactly one handler thread.
///
/// `reader` wraps a clone of the client socket descriptor; `client`
/// is the write half. Both close when the context drops.
struct ConnectionContext {
    client: TcpStream,
    reader: BufReader<TcpStream>,
    host_seen: bool,
}

enum RelayState {
    Init,
    RequestParsed(RequestLine),
    HeadersForwarded(TcpStream),
    Relaying(TcpStream),
    Closed,
}

/// Serves one accepted client connection and returns when it is done.
///
/// The client stream is closed on return; every exit path, including
/// early failures, releases both sockets.
pub fn handle_connection(client: TcpStream) {
    let reader = match client.try_clone() {
        Ok(stream) => BufReader::new(stream),
        Err(e) => {
            warn!("Failed to clone client stream: {}", e);
            return;
        }
    };
    let mut ctx = ConnectionContext { client, reader, host_seen: false };

    let mut state = RelayState::Init;
    loop {
        state = match state {
            RelayState::Init => read_request(&mut ctx),
            RelayState::RequestParsed(request) => send_request(&mut ctx, request),
            RelayState::HeadersForwarded(upstream) => {
                debug!("Request forwarded, relaying response");
                RelayState::Relaying(upstream)
            }
            RelayState::Relaying(upstream) => relay_response(&mut ctx, upstream),
            RelayState::Closed => break,
        };
    }
}

/// Reads and validates the request line.
fn read_request(ctx: &mut ConnectionContext) -> RelayState {
    let mut line = String::new();
    match ctx.reader.read_line(&mut line) {
        // EOF before a request line: nothing to respond to.
        Ok(0) => return RelayState::Closed,
        Ok(_) => {}
        Err(e) => {
            debug!("Failed to read request line: {}", e);
            return RelayState::Closed;
        }
    }

    let request = match parse_request_line(&line) {
        ParseResult::Request(request) => request,
        ParseResult::Malformed => {
            write_client_error(&mut ctx.client, "400", "Bad request", "Parse fail");
            return RelayState::Closed;
        }
    };

    if request.method.is_empty() || request.path.is_empty() || request.host.is_empty() {
        write_client_error(&mut ctx.client, "400", "Bad request", "Invalid header");
        return RelayState::Closed;
    }

    if !request.method.eq_ignore_ascii_case("GET") {
        write_client_error(
            &mut ctx.client,
            "501",
            "Not implemented",
            "Tiny does not support this method",
        );
        return RelayState::Closed;
    }

    debug!("{} {}", request.method, request.target_uri);
    RelayState::RequestParsed(request)
}

/// Connects to the origin server and sends the rewritten request.
fn send_request(ctx: &mut ConnectionContext, request: RequestLine) -> RelayState {
    let mut upstream = match connector::connect(&request.host, request.port) {
        Ok(stream) => stream,
        Err(e) => {
            warn!("{}", e);
            write_client_error(
                &mut ctx.client,
                "502",
                "Bad gateway",
                "Tiny could not connect to the end server",
            );
            return RelayState::Closed;
        }
    };

    let request_line = format!("GET {} HTTP/1.0\r\n", request.path);
    if let Err(e) = upstream.write_all(request_line.as_bytes()) {
        debug!("Failed to write request line to end server: {}", e);
        return RelayState::Closed;
    }

    if let Err(e) = forward_headers(ctx, &request, &mut upstream) {
        debug!("Failed to forward headers to end server: {}", e);
        return RelayState::Closed;
    }

    RelayState::HeadersForwarded(upstream)
}

/// Forwards the client's header block, applying the rewrite policy,
/// then completes the upstream request.
fn forward_headers(
    ctx: &mut ConnectionContext,
    request: &RequestLine,
    upstream: &mut TcpStream,
) -> io::Result<()> {
    loop {
        let mut line = String::new();
        let n = ctx.reader.read_line(&mut line)?;
        if n == 0 || line == "\r\n" || line == "\n" {
            break;
        }
        match classify(&line) {
            HeaderAction::HostMarker => {
                upstream.write_all(line.as_bytes())?;
                ctx.host_seen = true;
            }
            HeaderAction::Suppressed => {}
            HeaderAction::PassThrough => upstream.write_all(line.as_bytes())?,
        }
    }

    if !ctx.host_seen {
        let host_line = format!("Host: {}:{}\r\n", request.host, request.port);
        upstream.write_all(host_line.as_bytes())?;
    }
    let user_agent_line = format!("User-Agent: {}\r\n", USER_AGENT);
    upstream.write_all(user_agent_line.as_bytes())?;
    upstream.write_all(CONNECTION_CLOSE.as_bytes())?;
    upstream.write_all(PROXY_CONNECTION_CLOSE.as_bytes())?;
    upstream.write_all(b"\r\n")?;
    Ok(())
}

/// Streams the origin server's response to the client unchanged.
fn relay_response(ctx: &mut ConnectionContext, mut upstream: TcpStream) -> RelayState {
    let mut buf = [0u8; RELAY_CHUNK_SIZE];
    loop {
        let n = match upstream.read(&mut buf) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) => {
                debug!("Failed to read from end server: {}", e);
                break;
            }
        };
        if let Err(e) = ctx.client.write_all(&buf[..n]) {
            debug!("Failed to write to client: {}", e);
            break;
        }
    }
    RelayState::Closed
}
