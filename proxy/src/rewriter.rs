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

//! Header filtering and rewriting policy.
//!
//! The proxy presents itself to the origin server as a simple,
//! non-persistent HTTP/1.0 client regardless of what the browser
//! sent, so hop-by-hop and identifying headers are normalized here
//! rather than forwarded.

/// User-Agent string sent on every upstream request.
pub const USER_AGENT: &str =
    "Mozilla/5.0 (X11; Linux x86_64; rv:3.10.0) Gecko/20250408 Firefox/63.0.1";

/// Fixed connection header lines appended after the client's headers.
pub const CONNECTION_CLOSE: &str = "Connection: close\r\n";
pub const PROXY_CONNECTION_CLOSE: &str = "Proxy-Connection: close\r\n";

/// What the relay engine does with one client header line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HeaderAction {
    /// Forwarded to the origin server unchanged.
    PassThrough,
    /// Dropped; a fixed replacement is injected after the header block.
    Suppressed,
    /// Forwarded verbatim, and suppresses the synthesized Host header.
    HostMarker,
}

/// Classifies one raw header line.
///
/// The blank end-of-headers line is detected by the caller, not here.
pub fn classify(line: &str) -> HeaderAction {
    if has_prefix_ignore_case(line, "Host:") {
        HeaderAction::HostMarker
    } else if has_prefix_ignore_case(line, "Connection:")
        || has_prefix_ignore_case(line, "Proxy-Connection:")
        || has_prefix_ignore_case(line, "User-Agent:")
    {
        HeaderAction::Suppressed
    } else {
        HeaderAction::PassThrough
    }
}

fn has_prefix_ignore_case(line: &str, prefix: &str) -> bool {
    line.len() >= prefix.len()
        && line.as_bytes()[..prefix.len()].eq_ignore_ascii_case(prefix.as_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify() {
        let data = [
            ("Host: example.com\r\n", HeaderAction::HostMarker),
            ("host: example.com\r\n", HeaderAction::HostMarker),
            ("HOST: example.com\r\n", HeaderAction::HostMarker),
            ("Connection: keep-alive\r\n", HeaderAction::Suppressed),
            ("connection: close\r\n", HeaderAction::Suppressed),
            ("Proxy-Connection: keep-alive\r\n", HeaderAction::Suppressed),
            ("User-Agent: curl/8.0\r\n", HeaderAction::Suppressed),
            ("user-agent: curl/8.0\r\n", HeaderAction::Suppressed),
            ("Accept: */*\r\n", HeaderAction::PassThrough),
            ("Accept-Encoding: gzip\r\n", HeaderAction::PassThrough),
            ("Hostname: not-a-host-header\r\n", HeaderAction::PassThrough),
            ("X-Forwarded-For: 10.0.0.1\r\n", HeaderAction::PassThrough),
        ];

        for (input, expected) in data {
            assert_eq!(classify(input), expected, "For input: {:?}", input);
        }
    }

    #[test]
    fn test_classify_short_line() {
        assert_eq!(classify("Ho"), HeaderAction::PassThrough);
    }

    #[test]
    fn test_user_agent_is_a_full_product_string() {
        assert!(USER_AGENT.starts_with("Mozilla/5.0"));
        assert!(!USER_AGENT.contains('\r'));
    }
}
