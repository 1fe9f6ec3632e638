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

use crate::error::Fallible;
use crate::error::fail;
use crate::kana::is_kana_reading;
use crate::mora::mora_count;
use crate::types::pitch::PitchDescriptor;
use crate::types::pitch::Reading;

/// Formats a reading with the high-pitch mora in brackets, or a trailing
/// `?` when the pitch is unknown.
pub fn format_segments(reading: &Reading) -> String {
    match reading.pitch() {
        Some(_) => {
            let segments = reading.segments();
            format!(
                "{}[{}]{}",
                segments.pre_drop, segments.drop, segments.post_drop
            )
        }
        None => format!("{}?", reading.text()),
    }
}

pub fn print_pitch(reading: &str, pitch: Option<&str>) -> Fallible<()> {
    if !is_kana_reading(reading) {
        return fail(format!("{reading:?} is not a kana reading."));
    }
    let descriptor = match pitch {
        Some(pitch) => match PitchDescriptor::parse(pitch) {
            Some(descriptor) => Some(descriptor),
            None => return fail(format!("invalid pitch descriptor: {pitch:?}.")),
        },
        None => None,
    };
    let reading = Reading::new(reading, descriptor);
    println!("{}", format_segments(&reading));
    log::debug!("{} morae.", mora_count(reading.text()));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_segments() {
        let reading = Reading::new("きょう", PitchDescriptor::parse("2,3"));
        assert_eq!(format_segments(&reading), "きょ[う]");
        let reading = Reading::new("しゃしん", PitchDescriptor::parse("1"));
        assert_eq!(format_segments(&reading), "[しゃ]しん");
    }

    #[test]
    fn test_format_segments_flat() {
        let reading = Reading::new("さくら", PitchDescriptor::parse("0"));
        assert_eq!(format_segments(&reading), "[]さくら");
    }

    #[test]
    fn test_format_segments_unknown() {
        let reading = Reading::new("ねこ", None);
        assert_eq!(format_segments(&reading), "ねこ?");
    }

    #[test]
    fn test_print_pitch_rejects_bad_descriptor() {
        let result = print_pitch("ねこ", Some("high"));
        assert!(result.is_err());
        assert!(print_pitch("", None).is_err());
        assert!(print_pitch("今日", Some("1")).is_err());
        assert!(print_pitch("ねこ", Some("1")).is_ok());
    }
}
