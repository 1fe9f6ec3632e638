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

use serde::Deserialize;
use serde::Serialize;

const ON_READING: &str = "ja_on";
const KUN_READING: &str = "ja_kun";

/// A KANJIDIC character record.
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct KanjiCharacter {
    pub literal: String,
    #[serde(default)]
    pub misc: KanjiMisc,
    #[serde(default)]
    pub readingmeaning: ReadingMeaning,
}

#[derive(Clone, PartialEq, Debug, Default, Serialize, Deserialize)]
pub struct KanjiMisc {
    #[serde(default)]
    pub stroke_count: Option<u32>,
    #[serde(default)]
    pub frequency: Option<u32>,
}

#[derive(Clone, PartialEq, Debug, Default, Serialize, Deserialize)]
pub struct ReadingMeaning {
    #[serde(default)]
    pub group: Vec<ReadingMeaningGroup>,
}

#[derive(Clone, PartialEq, Debug, Default, Serialize, Deserialize)]
pub struct ReadingMeaningGroup {
    #[serde(default)]
    pub reading: Vec<KanjiReading>,
    #[serde(default)]
    pub meaning: Vec<KanjiMeaning>,
}

#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct KanjiReading {
    /// `ja_on`, `ja_kun`, or a non-Japanese reading type.
    #[serde(rename = "type")]
    pub kind: String,
    pub value: String,
}

#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct KanjiMeaning {
    /// Absent for the default (English) meanings.
    #[serde(default)]
    pub language: Option<String>,
    pub value: String,
}

impl ReadingMeaningGroup {
    pub fn onyomi(&self) -> impl Iterator<Item = &str> {
        self.readings_of(ON_READING)
    }

    pub fn kunyomi(&self) -> impl Iterator<Item = &str> {
        self.readings_of(KUN_READING)
    }

    fn readings_of<'a>(&'a self, kind: &'a str) -> impl Iterator<Item = &'a str> {
        self.reading
            .iter()
            .filter(move |r| r.kind == kind)
            .map(|r| r.value.as_str())
    }

    pub fn default_meanings(&self) -> impl Iterator<Item = &str> {
        self.meaning
            .iter()
            .filter(|m| m.language.as_deref().is_none_or(str::is_empty))
            .map(|m| m.value.as_str())
    }
}

/// Response of the kanji endpoint.
#[derive(Clone, PartialEq, Debug, Default, Deserialize)]
pub struct KanjiResponse {
    #[serde(default)]
    pub kanji: Vec<KanjiCharacter>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn group() -> ReadingMeaningGroup {
        let json = r#"{
            "reading": [
                {"type": "pinyin", "value": "ri4"},
                {"type": "ja_on", "value": "ニチ"},
                {"type": "ja_on", "value": "ジツ"},
                {"type": "ja_kun", "value": "ひ"}
            ],
            "meaning": [
                {"value": "day"},
                {"language": "fr", "value": "jour"},
                {"value": "sun"}
            ]
        }"#;
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_readings_by_type() {
        let g = group();
        assert_eq!(g.onyomi().collect::<Vec<_>>(), vec!["ニチ", "ジツ"]);
        assert_eq!(g.kunyomi().collect::<Vec<_>>(), vec!["ひ"]);
    }

    #[test]
    fn test_default_meanings() {
        let g = group();
        assert_eq!(g.default_meanings().collect::<Vec<_>>(), vec!["day", "sun"]);
    }

    #[test]
    fn test_deserialize_minimal_character() {
        let k: KanjiCharacter = serde_json::from_str(r#"{"literal": "日"}"#).unwrap();
        assert_eq!(k.literal, "日");
        assert_eq!(k.misc, KanjiMisc::default());
        assert!(k.readingmeaning.group.is_empty());
    }
}
