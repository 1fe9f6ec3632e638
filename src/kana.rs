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

use wana_kana::utils::is_char_kana;

/// The small kana that fuse with the preceding character into a single
/// palatalized mora.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum SmallKana {
    HiraganaYa,
    HiraganaYu,
    HiraganaYo,
    KatakanaYa,
    KatakanaYu,
    KatakanaYo,
}

impl SmallKana {
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            'ゃ' => Some(SmallKana::HiraganaYa),
            'ゅ' => Some(SmallKana::HiraganaYu),
            'ょ' => Some(SmallKana::HiraganaYo),
            'ャ' => Some(SmallKana::KatakanaYa),
            'ュ' => Some(SmallKana::KatakanaYu),
            'ョ' => Some(SmallKana::KatakanaYo),
            _ => None,
        }
    }
}

pub fn is_small_kana(c: char) -> bool {
    SmallKana::from_char(c).is_some()
}

/// True if `reading` is non-empty and made of kana only.
pub fn is_kana_reading(reading: &str) -> bool {
    !reading.is_empty() && reading.chars().all(is_char_kana)
}

/// The distinct characters of `word` that may have a kanji record, in order
/// of first appearance. Kana and whitespace never do; everything else is
/// matched against the dictionary's literals as-is.
pub fn lookup_chars(word: &str) -> Vec<char> {
    let mut seen = Vec::new();
    for c in word.chars() {
        if is_char_kana(c) || c.is_whitespace() || seen.contains(&c) {
            continue;
        }
        seen.push(c);
    }
    seen
}
