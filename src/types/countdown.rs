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

use serde::Deserialize;
use serde::Serialize;

/// The number of reviews left before a story is promoted. Always in
/// `0..=9`; out-of-range inputs saturate to the nearest bound.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default, Serialize, Deserialize)]
#[serde(from = "i64", into = "u8")]
pub struct Countdown(u8);

impl Countdown {
    pub const MIN: u8 = 0;
    pub const MAX: u8 = 9;

    pub fn saturating(value: i64) -> Self {
        Self(value.clamp(Self::MIN as i64, Self::MAX as i64) as u8)
    }

    pub fn value(self) -> u8 {
        self.0
    }
}

impl From<i64> for Countdown {
    fn from(value: i64) -> Self {
        Countdown::saturating(value)
    }
}

impl From<Countdown> for u8 {
    fn from(value: Countdown) -> Self {
        value.0
    }
}

impl Display for Countdown {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_saturating() {
        assert_eq!(Countdown::saturating(4).value(), 4);
        assert_eq!(Countdown::saturating(0).value(), 0);
        assert_eq!(Countdown::saturating(9).value(), 9);
        assert_eq!(Countdown::saturating(10).value(), 9);
        assert_eq!(Countdown::saturating(-3).value(), 0);
        assert_eq!(Countdown::saturating(i64::MAX).value(), 9);
    }

    #[test]
    fn test_deserialize_saturates() {
        let c: Countdown = serde_json::from_str("12").unwrap();
        assert_eq!(c.value(), 9);
        let c: Countdown = serde_json::from_str("7").unwrap();
        assert_eq!(serde_json::to_string(&c).unwrap(), "7");
    }
}
