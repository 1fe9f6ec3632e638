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
use serde::Deserializer;
use serde::Serialize;
use serde_json::Value;

use crate::types::countdown::Countdown;
use crate::types::timestamp::Timestamp;

/// Raw id of the pseudo-story that stands for "every top-rank story".
/// Story ids allocated by the storage service are never negative.
pub const DRILL_ALL_IN_PROGRESS: i64 = -1;

#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StoryId(i64);

impl StoryId {
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    pub fn into_inner(self) -> i64 {
        self.0
    }
}

impl Display for StoryId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// What a drill session is about: one story, or every story in the highest
/// rank tier at once.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum DrillTarget {
    AllInProgress,
    Story(StoryId),
}

impl DrillTarget {
    pub fn from_raw(id: i64) -> Self {
        if id == DRILL_ALL_IN_PROGRESS {
            DrillTarget::AllInProgress
        } else {
            DrillTarget::Story(StoryId::new(id))
        }
    }

    pub fn into_raw(self) -> i64 {
        match self {
            DrillTarget::AllInProgress => DRILL_ALL_IN_PROGRESS,
            DrillTarget::Story(id) => id.into_inner(),
        }
    }
}

/// Where the learner is with a story.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum StoryState {
    #[default]
    Unread,
    Active,
    Inactive,
}

impl StoryState {
    pub const ALL: [StoryState; 3] = [StoryState::Unread, StoryState::Active, StoryState::Inactive];

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "unread" => Some(StoryState::Unread),
            "active" => Some(StoryState::Active),
            "inactive" => Some(StoryState::Inactive),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            StoryState::Unread => "unread",
            StoryState::Active => "active",
            StoryState::Inactive => "inactive",
        }
    }
}

impl From<String> for StoryState {
    fn from(value: String) -> Self {
        StoryState::parse(&value).unwrap_or_default()
    }
}

impl From<StoryState> for String {
    fn from(value: StoryState) -> Self {
        value.as_str().to_string()
    }
}

/// A story as the storage service returns it. Missing or `null` fields read
/// as their defaults; only the id is required.
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct Story {
    pub id: StoryId,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub link: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub content: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub countdown: Countdown,
    /// Higher ranks are drilled sooner. Unbounded in both directions.
    #[serde(default, deserialize_with = "null_as_default")]
    pub rank: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub read_count: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub date_added: Timestamp,
    #[serde(default, deserialize_with = "null_as_default")]
    pub date_last_read: Timestamp,
    #[serde(default, deserialize_with = "null_as_default")]
    pub state: StoryState,
    /// Ids of the words in the story. Opaque to this crate.
    #[serde(default)]
    pub words: Value,
    /// Tokenizer output for the story. Opaque to this crate.
    #[serde(default)]
    pub tokens: Value,
}

/// The readable part of a story, as returned by `/story/{id}`. The service
/// leaves the id out of this response.
#[derive(Clone, PartialEq, Debug, Default, Deserialize)]
pub struct StoryText {
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub link: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub content: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub state: StoryState,
    #[serde(default)]
    pub words: Value,
    #[serde(default)]
    pub tokens: Value,
}

impl StoryText {
    /// The non-blank lines of the content, trimmed.
    pub fn paragraphs(&self) -> impl Iterator<Item = &str> {
        self.content
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl Story {
    pub fn new(id: i64, title: impl Into<String>) -> Self {
        Self {
            id: StoryId::new(id),
            title: title.into(),
            link: String::new(),
            content: String::new(),
            countdown: Countdown::default(),
            rank: 0,
            read_count: 0,
            date_added: Timestamp::default(),
            date_last_read: Timestamp::default(),
            state: StoryState::default(),
            words: Value::Null,
            tokens: Value::Null,
        }
    }
}
