// Copyright 2025 Fernando Borretti
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::fmt::Display;

use chrono::DateTime;
use chrono::Local;
use chrono::TimeZone;
use chrono::Utc;

/// The format the disposition spreadsheet expects, e.g. `03/14/2025, 02:05:09 PM`.
const WEBHOOK_FORMAT: &str = "%m/%d/%Y, %I:%M:%S %p";

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    #[cfg(test)]
    pub fn new(ts: DateTime<Utc>) -> Self {
        Self(ts)
    }

    pub fn now() -> Self {
        Self(Utc::now())
    }

    /// Format in the agent's local time zone.
    pub fn webhook_format(self) -> String {
        self.webhook_format_in(&Local)
    }

    pub fn webhook_format_in<Tz: TimeZone>(self, tz: &Tz) -> String
    where
        Tz::Offset: Display,
    {
        self.0.with_timezone(tz).format(WEBHOOK_FORMAT).to_string()
    }
}

#[cfg(test)]
mod tests {
    use chrono::FixedOffset;

    use super::*;

    #[test]
    fn test_webhook_format() {
        let ts = Timestamp::new(Utc.with_ymd_and_hms(2025, 3, 14, 14, 5, 9).unwrap());
        assert_eq!(ts.webhook_format_in(&Utc), "03/14/2025, 02:05:09 PM");
    }

    #[test]
    fn test_webhook_format_morning_with_offset() {
        let ts = Timestamp::new(Utc.with_ymd_and_hms(2025, 7, 4, 13, 0, 0).unwrap());
        let eastern = FixedOffset::west_opt(4 * 3600).unwrap();
        assert_eq!(ts.webhook_format_in(&eastern), "07/04/2025, 09:00:00 AM");
    }
}
