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

//! Client error pages.
//!
//! Writes a fixed-template HTML error page directly to the client
//! stream. Delivery is best effort: an oversized page or a failed
//! write drops the page without reporting an error to the caller, so
//! error delivery can never take down a connection handler.

use log::error;
use std::io::Write;

/// Upper bound on the rendered page body, in bytes.
const MAX_BODY_LEN: usize = 8192;
/// Upper bound on the rendered response headers, in bytes.
const MAX_HEADER_LEN: usize = 8192;

/// Writes an HTTP/1.0 error response with the given status line pair
/// and explanatory message.
pub fn write_client_error<W: Write>(stream: &mut W, status: &str, short_msg: &str, long_msg: &str) {
    let body = format!(
        "<!DOCTYPE html>\r\n\
         <html>\r\n\
         <head><title>Tiny Error</title></head>\r\n\
         <body bgcolor=\"ffffff\">\r\n\
         <h1>{}: {}</h1>\r\n\
         <p>{}</p>\r\n\
         <hr /><em>The Tiny Web server</em>\r\n\
         </body></html>\r\n",
        status, short_msg, long_msg
    );
    if body.len() >= MAX_BODY_LEN {
        // overflow, drop the page
        return;
    }

    let headers = format!(
        "HTTP/1.0 {} {}\r\nContent-Type: text/html\r\nContent-Length: {}\r\n\r\n",
        status,
        short_msg,
        body.len()
    );
    if headers.len() >= MAX_HEADER_LEN {
        return;
    }

    if let Err(e) = stream.write_all(headers.as_bytes()) {
        error!("Error writing error response headers to client: {}", e);
        return;
    }
    if let Err(e) = stream.write_all(body.as_bytes()) {
        error!("Error writing error response body to client: {}", e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{self, Cursor};

    #[test]
    fn test_write_client_error() {
        let mut stream = Cursor::new(Vec::new());
        write_client_error(&mut stream, "400", "Bad request", "Parse fail");
        let written_bytes = stream.get_ref();

        let expected_body = "<!DOCTYPE html>\r\n\
             <html>\r\n\
             <head><title>Tiny Error</title></head>\r\n\
             <body bgcolor=\"ffffff\">\r\n\
             <h1>400: Bad request</h1>\r\n\
             <p>Parse fail</p>\r\n\
             <hr /><em>The Tiny Web server</em>\r\n\
             </body></html>\r\n";
        let expected = format!(
            "HTTP/1.0 400 Bad request\r\nContent-Type: text/html\r\nContent-Length: {}\r\n\r\n{}",
            expected_body.len(),
            expected_body
        );
        assert_eq!(written_bytes, expected.as_bytes());
    }

    #[test]
    fn test_status_line_leads_the_response() {
        let mut stream = Cursor::new(Vec::new());
        write_client_error(&mut stream, "501", "Not implemented", "Tiny does not support this method");
        assert!(stream.get_ref().starts_with(b"HTTP/1.0 501 Not implemented\r\n"));
    }

    #[test]
    fn test_oversized_body_is_dropped() {
        let mut stream = Cursor::new(Vec::new());
        let long_msg = "x".repeat(MAX_BODY_LEN);
        write_client_error(&mut stream, "400", "Bad request", &long_msg);
        assert!(stream.get_ref().is_empty());
    }

    #[test]
    fn test_write_failure_is_swallowed() {
        struct FailingWriter;
        impl Write for FailingWriter {
            fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
                Err(io::Error::new(io::ErrorKind::BrokenPipe, "peer gone"))
            }
            fn flush(&mut self) -> io::Result<()> {
                Ok(())
            }
        }

        let mut stream = FailingWriter;
        write_client_error(&mut stream, "400", "Bad request", "Parse fail");
    }
}
