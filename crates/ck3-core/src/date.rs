// CK3 Save - Crusader Kings III save-file reader
//
// Copyright (c) 2025 ck3-save contributors.
//
// SPDX-License-Identifier: Apache-2.0
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE file at the
// root of this repository or at: http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! In-game calendar dates.
//!
//! Saves write dates as `YYYY.MM.DD` with no zero padding (`867.1.1`). Dates
//! order by year, then month, then day.

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// A calendar date from a save file.
///
/// # Examples
///
/// ```
/// use ck3_core::Date;
///
/// let birth: Date = "1.1.1".parse().unwrap();
/// let now = Date::new(60, 6, 1);
/// assert!(birth < now);
/// assert_eq!(birth.age(&now), 59);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Date {
    pub year: i32,
    pub month: u32,
    pub day: u32,
}

/// A string that is not of the form `digits.digits.digits`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid date: {0:?}")]
pub struct DateParseError(pub String);

impl Date {
    pub const fn new(year: i32, month: u32, day: u32) -> Self {
        Self { year, month, day }
    }

    /// Whole years elapsed between `self` and `current`.
    ///
    /// The year difference is decremented by one when `current` falls earlier
    /// in its year than `self` does. Negative when `current` precedes `self`.
    pub fn age(&self, current: &Date) -> i32 {
        let mut age = current.year - self.year;
        if (current.month, current.day) < (self.month, self.day) {
            age -= 1;
        }
        age
    }
}

impl FromStr for Date {
    type Err = DateParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || DateParseError(s.to_string());
        let mut parts = s.split('.');
        let (Some(year), Some(month), Some(day), None) =
            (parts.next(), parts.next(), parts.next(), parts.next())
        else {
            return Err(err());
        };
        let all_digits = |p: &str| !p.is_empty() && p.bytes().all(|b| b.is_ascii_digit());
        if !(all_digits(year) && all_digits(month) && all_digits(day)) {
            return Err(err());
        }
        Ok(Self {
            year: year.parse().map_err(|_| err())?,
            month: month.parse().map_err(|_| err())?,
            day: day.parse().map_err(|_| err())?,
        })
    }
}

impl fmt::Display for Date {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.year, self.month, self.day)
    }
}
