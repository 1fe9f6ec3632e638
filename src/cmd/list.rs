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

use clap::ValueEnum;
use serde::Serialize;

use crate::config::Config;
use crate::error::Fallible;
use crate::rank::ingest;
use crate::sync::StoryService;
use crate::types::story::Story;
use crate::types::timestamp::Timestamp;

#[derive(ValueEnum, Clone, Copy, Default)]
pub enum ListFormat {
    /// One line per story.
    #[default]
    Text,
    /// JSON output.
    Json,
}

impl Display for ListFormat {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ListFormat::Text => write!(f, "text"),
            ListFormat::Json => write!(f, "json"),
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ListedStory<'a> {
    id: i64,
    title: &'a str,
    rank: i64,
    countdown: u8,
    read_count: u32,
    days_since_read: i64,
}

impl<'a> ListedStory<'a> {
    fn new(story: &'a Story, now: Timestamp) -> Self {
        Self {
            id: story.id.into_inner(),
            title: &story.title,
            rank: story.rank,
            countdown: story.countdown.value(),
            read_count: story.read_count,
            days_since_read: story.date_last_read.days_until(now),
        }
    }
}

fn format_line(story: &ListedStory) -> String {
    format!(
        "{:>5}  rank {:>3}  countdown {}  read {:>3}  {:>4}d  {}",
        story.id, story.rank, story.countdown, story.read_count, story.days_since_read, story.title
    )
}

pub async fn print_stories(config: &Config, format: ListFormat) -> Fallible<()> {
    let service = StoryService::new(&config.backend);
    let collection = ingest(service.fetch_stories().await?);
    let now = Timestamp::now();
    let listed: Vec<ListedStory> = collection
        .order(config.view)
        .into_iter()
        .map(|story| ListedStory::new(story, now))
        .collect();
    match format {
        ListFormat::Text => {
            for story in &listed {
                println!("{}", format_line(story));
            }
        }
        ListFormat::Json => {
            let json = serde_json::to_string_pretty(&listed)?;
            println!("{json}");
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_line() {
        let mut story = Story::new(7, "桃太郎");
        story.rank = 3;
        story.read_count = 2;
        story.date_last_read = Timestamp::new(0);
        let listed = ListedStory::new(&story, Timestamp::new(86_400 * 4));
        assert_eq!(
            format_line(&listed),
            "    7  rank   3  countdown 0  read   2     4d  桃太郎"
        );
    }

    #[test]
    fn test_json_keys() -> Fallible<()> {
        let story = Story::new(1, "かぐや姫");
        let json = serde_json::to_value(ListedStory::new(&story, Timestamp::new(0)))?;
        assert_eq!(json["readCount"], 0);
        assert_eq!(json["daysSinceRead"], 0);
        assert_eq!(json["title"], "かぐや姫");
        Ok(())
    }
}
