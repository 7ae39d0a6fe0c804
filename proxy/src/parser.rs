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

//! Request line parsing for the proxy.
//!
//! This module implements the request line part of the HTTP Message
//! Format from (RFC 9112)[https://www.rfc-editor.org/rfc/rfc9112].
//!
//! It is only used for deciding where to forward a client request and
//! is not meant to implement all aspects of RFC 9112. In particular,
//! it does not implement the following:
//! * asterisk-form and authority-form request targets
//! * percent-decoding of the request target
//!
//! The main function is `parse_request_line` which is called once per
//! connection with the first line read from the client.

use http::Uri;

const DEFAULT_PORT: u16 = 80;

/// A decomposed request line.
///
/// `host` is empty when the request target carried no authority
/// (an origin-form target such as `/index.html`); the relay engine
/// rejects such requests before contacting any origin server.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestLine {
    pub method: String,
    pub target_uri: String,
    pub host: String,
    pub port: u16,
    pub path: String,
}

/// Outcome of parsing the first line of a connection.
#[derive(Debug, PartialEq)]
pub enum ParseResult {
    Request(RequestLine),
    Malformed,
}

/// Parses a `METHOD SP URI SP VERSION` request line.
///
/// Pure function of the input text; any structural failure yields
/// `Malformed` with no partial request.
pub fn parse_request_line(line: &str) -> ParseResult {
    match try_parse(line) {
        Some(request) => ParseResult::Request(request),
        None => ParseResult::Malformed,
    }
}

fn try_parse(line: &str) -> Option<RequestLine> {
    let mut parts = line.split_whitespace();
    let method = parts.next()?;
    let uri = parts.next()?;
    let version = parts.next()?;
    if parts.next().is_some() {
        return None;
    }
    match version {
        "HTTP/0.9" | "HTTP/1.0" | "HTTP/1.1" | "HTTP/2.0" | "HTTP/3.0" => {}
        _ => return None,
    }
    let parsed = uri.parse::<Uri>().ok()?;
    let host = parsed.host().unwrap_or("").to_string();
    let port = parsed.port_u16().unwrap_or(DEFAULT_PORT);
    let path = match parsed.path_and_query() {
        Some(path) if !path.as_str().is_empty() => path.as_str().to_string(),
        _ => "/".to_string(),
    };
    Some(RequestLine {
        method: method.to_string(),
        target_uri: uri.to_string(),
        host,
        port,
        path,
    })
}
