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

use crate::types::kanji::KanjiCharacter;
use crate::types::pitch::PitchDescriptor;
use crate::types::pitch::Reading;

/// A dictionary entry as returned by the word search endpoint.
#[derive(Clone, PartialEq, Debug, Default, Serialize, Deserialize)]
pub struct DictionaryEntry {
    #[serde(default)]
    pub readings: Vec<EntryReading>,
    #[serde(default)]
    pub kanji_spellings: Vec<KanjiSpelling>,
    #[serde(default)]
    pub senses: Vec<Sense>,
}

#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct EntryReading {
    pub reading: String,
    /// Comma-separated mora positions, e.g. `"2,3"`.
    #[serde(default)]
    pub pitch: Option<String>,
}

impl EntryReading {
    pub fn to_reading(&self) -> Reading {
        let pitch = self.pitch.as_deref().and_then(PitchDescriptor::parse);
        Reading::new(self.reading.clone(), pitch)
    }
}

#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct KanjiSpelling {
    pub kanji_spelling: String,
}

#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct Sense {
    #[serde(default)]
    pub parts_of_speech: Vec<String>,
    #[serde(default)]
    pub glosses: Vec<Gloss>,
}

#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct Gloss {
    pub value: String,
}

/// Response of the word search endpoint. Matches at the start of a spelling
/// are listed apart from matches in the middle.
#[derive(Clone, PartialEq, Debug, Default, Deserialize)]
pub struct WordSearchResults {
    #[serde(default)]
    pub entries_start: Vec<DictionaryEntry>,
    #[serde(default)]
    pub count_start: usize,
    #[serde(default)]
    pub entries_mid: Vec<DictionaryEntry>,
    #[serde(default)]
    pub count_mid: usize,
    #[serde(default)]
    pub kanji: Vec<KanjiCharacter>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_entry() {
        let json = r#"{
            "readings": [
                {"reading": "きょう", "pitch": "1,2"},
                {"reading": "こんにち"}
            ],
            "kanji_spellings": [{"kanji_spelling": "今日"}],
            "senses": [
                {"parts_of_speech": ["noun"], "glosses": [{"value": "today"}, {"value": "this day"}]}
            ]
        }"#;
        let entry: DictionaryEntry = serde_json::from_str(json).unwrap();
        assert_eq!(entry.readings.len(), 2);
        assert_eq!(entry.kanji_spellings[0].kanji_spelling, "今日");
        assert_eq!(entry.senses[0].glosses[1].value, "this day");
        let known = entry.readings[0].to_reading();
        assert_eq!(known.pitch(), Some(PitchDescriptor::new(1, Some(2))));
        let unknown = entry.readings[1].to_reading();
        assert_eq!(unknown.pitch(), None);
    }

    #[test]
    fn test_missing_arrays_are_empty() {
        let entry: DictionaryEntry = serde_json::from_str("{}").unwrap();
        assert_eq!(entry, DictionaryEntry::default());
    }

    #[test]
    fn test_empty_pitch_is_unknown() {
        let reading = EntryReading {
            reading: "ねこ".to_string(),
            pitch: Some(String::new()),
        };
        assert_eq!(reading.to_reading().pitch(), None);
    }
}
