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

//! Time display helpers for log lines.

use chrono::Local;

/// Current local time formatted for a log line prefix.
///
/// Format: `MM-DD hh:mm:ss.sss`
pub fn log_current_time() -> String {
    Local::now().format("%m-%d %H:%M:%S%.3f").to_string()
}
