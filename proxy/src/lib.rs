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

//! # Tiny Proxy
//!
//! This crate provides a forwarding HTTP proxy that accepts client
//! requests, sanitizes them, and relays them to the origin server as
//! plain HTTP/1.0 retrievals.
//!
//! Each accepted connection is served to completion by its own
//! detached thread: the request line is parsed, the client's headers
//! are filtered and rewritten, the rewritten request is sent to the
//! origin server, and the response bytes are streamed back to the
//! client unmodified.
//!
//! The main component is the relay engine in the `relay` module,
//! which drives the per-connection state machine. The `server` module
//! owns the listening socket and spawns one handler thread per
//! connection.
//!
//! ## Limitations
//!
//! * Only the GET method is supported.
//! * Connections are not kept alive; one request per connection.
//! * No CONNECT tunneling and no chunked transfer-encoding support.

pub mod args;
pub mod connector;
pub mod error;
pub mod parser;
pub mod relay;
pub mod response;
pub mod rewriter;
pub mod server;

pub use error::Error;

pub type Result<T> = core::result::Result<T, Error>;
