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
use std::fmt::Formatter;

use chrono::DateTime;
use chrono::Duration;
use chrono::Local;
use chrono::NaiveDateTime;
use chrono::TimeZone;
use chrono::Utc;
use serde::Deserialize;
use serde::Deserializer;
use serde::Serialize;
use serde::Serializer;
use serde::de::Error;

use crate::error::ErrorReport;
use crate::error::Fallible;
use crate::types::date::Date;

/// The on-disk format: local wall-clock time, second precision.
const FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// An instant, held in UTC and rendered in local time.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    #[cfg(test)]
    pub fn new(ts: DateTime<Utc>) -> Self {
        Self(ts)
    }

    pub fn now() -> Self {
        Self(Utc::now())
    }

    pub fn local_date(self) -> Date {
        let ts = self.0.with_timezone(&Local);
        Date::new(ts.date_naive())
    }

    pub fn plus_days(self, days: u32) -> Self {
        Self(self.0 + Duration::days(i64::from(days)))
    }

    pub fn to_local_string(self) -> String {
        self.0.with_timezone(&Local).format(FORMAT).to_string()
    }

    pub fn from_local_str(s: &str) -> Fallible<Self> {
        let naive = NaiveDateTime::parse_from_str(s, FORMAT)
            .map_err(|e| ErrorReport::corrupt(format!("invalid timestamp {s:?}: {e}")))?;
        // A repeated wall-clock hour resolves to its first occurrence.
        let local = Local
            .from_local_datetime(&naive)
            .earliest()
            .ok_or_else(|| ErrorReport::corrupt(format!("nonexistent local time {s:?}")))?;
        Ok(Self(local.with_timezone(&Utc)))
    }
}

impl Display for Timestamp {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_local_string())
    }
}

impl Serialize for Timestamp {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_local_string())
    }
}

impl<'de> Deserialize<'de> for Timestamp {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let string = String::deserialize(deserializer)?;
        Timestamp::from_local_str(&string).map_err(D::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    #[test]
    fn test_local_string_round_trip() -> Fallible<()> {
        let ts = Timestamp::from_local_str("2025-03-14 09:26:53")?;
        assert_eq!(ts.to_local_string(), "2025-03-14 09:26:53");
        Ok(())
    }

    #[test]
    fn test_invalid_string() {
        assert!(Timestamp::from_local_str("2025-03-14").is_err());
        assert!(Timestamp::from_local_str("yesterday").is_err());
        assert!(Timestamp::from_local_str("2025-13-01 00:00:00").is_err());
    }

    #[test]
    fn test_plus_days() {
        let start = Utc.with_ymd_and_hms(2025, 1, 30, 12, 0, 0).unwrap();
        let ts = Timestamp::new(start).plus_days(5);
        let expected = Utc.with_ymd_and_hms(2025, 2, 4, 12, 0, 0).unwrap();
        assert_eq!(ts, Timestamp::new(expected));
    }

    #[test]
    fn test_local_date() {
        let naive = NaiveDate::from_ymd_opt(2025, 6, 1)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap();
        let local = Local.from_local_datetime(&naive).earliest().unwrap();
        let ts = Timestamp::new(local.with_timezone(&Utc));
        assert_eq!(ts.local_date().to_string(), "2025-06-01");
    }

    #[test]
    fn test_ordering() {
        let a = Timestamp::new(Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap());
        let b = a.plus_days(1);
        assert!(a < b);
    }
}
