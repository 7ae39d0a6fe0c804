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

use clap::Parser;

/// Forwarding HTTP/1.0 proxy.
#[derive(Debug, Parser)]
pub struct ProxyArgs {
    /// Port to listen on for client connections
    pub port: u16,

    /// Log debug messages in addition to info and above
    #[arg(short, long)]
    pub verbose: bool,
}
