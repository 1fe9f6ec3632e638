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

use crate::kana::is_small_kana;
use crate::types::pitch::PitchDescriptor;

/// A reading split around its pitch drop. The three spans borrow from the
/// reading and concatenate back to it.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Segments<'a> {
    /// The mora before the drop.
    pub pre_drop: &'a str,
    /// The single mora on which pitch falls.
    pub drop: &'a str,
    /// Everything after the drop.
    pub post_drop: &'a str,
}

/// Splits a reading into mora. A character followed by a small ya, yu or yo
/// forms one mora with it; every other character is a mora on its own.
pub fn moras(reading: &str) -> Vec<&str> {
    let mut moras = Vec::new();
    let mut chars = reading.char_indices().peekable();
    while let Some((start, c)) = chars.next() {
        let mut end = start + c.len_utf8();
        if let Some(&(_, next)) = chars.peek() {
            if is_small_kana(next) {
                end += next.len_utf8();
                chars.next();
            }
        }
        moras.push(&reading[start..end]);
    }
    moras
}

pub fn mora_count(reading: &str) -> usize {
    moras(reading).len()
}

/// Splits `reading` at its pitch drop.
///
/// Without a pitch, or with a flat pitch (drop at zero), the whole reading is
/// returned as the last span. Drop positions past the end of the reading
/// saturate: the drop and post-drop spans come back empty.
pub fn segment(reading: &str, pitch: Option<PitchDescriptor>) -> Segments<'_> {
    let drop_mora = match pitch {
        Some(PitchDescriptor { drop_mora, .. }) if drop_mora > 0 => drop_mora as usize,
        _ => {
            return Segments {
                pre_drop: "",
                drop: "",
                post_drop: reading,
            };
        }
    };
    // Byte offset where each mora starts, plus the end of the string.
    let mut boundaries: Vec<usize> = Vec::new();
    let mut offset = 0;
    for mora in moras(reading) {
        boundaries.push(offset);
        offset += mora.len();
    }
    boundaries.push(reading.len());
    let count = boundaries.len() - 1;
    let drop_start = boundaries[(drop_mora - 1).min(count)];
    let drop_end = boundaries[drop_mora.min(count)];
    Segments {
        pre_drop: &reading[..drop_start],
        drop: &reading[drop_start..drop_end],
        post_drop: &reading[drop_end..],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pitch(drop_mora: u32, rise_mora: u32) -> Option<PitchDescriptor> {
        Some(PitchDescriptor::new(drop_mora, Some(rise_mora)))
    }

    fn spans(segments: Segments<'_>) -> (&str, &str, &str) {
        (segments.pre_drop, segments.drop, segments.post_drop)
    }

    #[test]
    fn test_moras_pairs_small_kana() {
        assert_eq!(moras("きょう"), vec!["きょ", "う"]);
        assert_eq!(moras("しゃしん"), vec!["しゃ", "し", "ん"]);
        assert_eq!(moras("キャンュ"), vec!["キャ", "ンュ"]);
    }

    #[test]
    fn test_moras_without_pairing() {
        assert_eq!(moras("がっこう"), vec!["が", "っ", "こ", "う"]);
        assert_eq!(moras(""), Vec::<&str>::new());
    }

    #[test]
    fn test_moras_leading_and_trailing_small_kana() {
        // Nothing precedes the first character, so it stands alone.
        assert_eq!(moras("ょう"), vec!["ょ", "う"]);
        assert_eq!(moras("ゃ"), vec!["ゃ"]);
        // A small kana whose predecessor already paired stands alone.
        assert_eq!(moras("きょょ"), vec!["きょ", "ょ"]);
    }

    #[test]
    fn test_mora_count() {
        assert_eq!(mora_count("きょう"), 2);
        assert_eq!(mora_count("とうきょう"), 4);
    }

    #[test]
    fn test_segment_flat_or_unknown() {
        for reading in ["", "きょう", "がっこう", "ゃ"] {
            assert_eq!(spans(segment(reading, pitch(0, 1))), ("", "", reading));
            assert_eq!(spans(segment(reading, None)), ("", "", reading));
        }
    }

    #[test]
    fn test_segment_kyou() {
        assert_eq!(spans(segment("きょう", pitch(2, 3))), ("きょ", "う", ""));
        assert_eq!(spans(segment("きょう", pitch(1, 2))), ("", "きょ", "う"));
    }

    #[test]
    fn test_segment_gakkou() {
        assert_eq!(
            spans(segment("がっこう", pitch(1, 2))),
            ("", "が", "っこう")
        );
        assert_eq!(
            spans(segment("がっこう", pitch(3, 1))),
            ("がっ", "こ", "う")
        );
    }

    #[test]
    fn test_segment_out_of_range_saturates() {
        assert_eq!(spans(segment("きょう", pitch(3, 1))), ("きょう", "", ""));
        assert_eq!(spans(segment("きょう", pitch(100, 1))), ("きょう", "", ""));
        assert_eq!(spans(segment("", pitch(1, 1))), ("", "", ""));
    }

    #[test]
    fn test_segment_is_lossless() {
        let readings = ["とうきょう", "しゃしん", "がっこう", "ちゃんちゅう", "ゅきゅ"];
        for reading in readings {
            for drop_mora in 1..=mora_count(reading) as u32 {
                let s = segment(reading, pitch(drop_mora, 0));
                assert_eq!(format!("{}{}{}", s.pre_drop, s.drop, s.post_drop), reading);
                assert_eq!(mora_count(s.drop), 1);
                assert_eq!(mora_count(s.pre_drop), drop_mora as usize - 1);
            }
        }
    }
}
