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

use std::cmp::Ordering;
use std::collections::HashMap;

use clap::ValueEnum;
use serde::Deserialize;
use serde::Serialize;

use crate::types::countdown::Countdown;
use crate::types::story::DrillTarget;
use crate::types::story::Story;
use crate::types::story::StoryId;
use crate::types::story::StoryState;

/// How the story list is presented.
#[derive(ValueEnum, Clone, Copy, PartialEq, Eq, Debug, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OrderContext {
    /// Highest rank first; within a rank, least recently read first.
    #[default]
    Rank,
    /// Newest first.
    DateAdded,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum RankDelta {
    Up,
    Down,
}

impl RankDelta {
    fn value(self) -> i64 {
        match self {
            RankDelta::Up => 1,
            RankDelta::Down => -1,
        }
    }
}

/// The fields of a story that are sent back to the storage service on an
/// update: the id and the fields the client edits. The read count and dates
/// belong to the server and are never sent.
#[derive(Clone, PartialEq, Debug, Serialize)]
pub struct UpdatePayload {
    pub id: StoryId,
    pub countdown: Countdown,
    pub rank: i64,
    pub state: StoryState,
}

pub fn compare(a: &Story, b: &Story, context: OrderContext) -> Ordering {
    match context {
        OrderContext::Rank => b
            .rank
            .cmp(&a.rank)
            .then(a.date_last_read.cmp(&b.date_last_read)),
        OrderContext::DateAdded => b.date_added.cmp(&a.date_added),
    }
}

/// Sorts stories into presentation order. Stable: stories that compare
/// equal keep their relative order.
pub fn order_stories(stories: &mut [&Story], context: OrderContext) {
    stories.sort_by(|a, b| compare(a, b, context));
}

pub fn apply_countdown(story: &Story, value: i64) -> Story {
    Story {
        countdown: Countdown::saturating(value),
        ..story.clone()
    }
}

pub fn bump_rank(story: &Story, delta: RankDelta) -> Story {
    Story {
        rank: story.rank.saturating_add(delta.value()),
        ..story.clone()
    }
}

pub fn to_update_payload(story: &Story) -> UpdatePayload {
    UpdatePayload {
        id: story.id,
        countdown: story.countdown,
        rank: story.rank,
        state: story.state,
    }
}

/// Where a story stands relative to the storage service.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum SyncState {
    /// Matches the last snapshot from the service.
    Clean,
    /// Edited locally; the edit has not been seen in a snapshot yet.
    PendingSync,
    /// A snapshot arrived that disagrees with the local edit. The edit was
    /// kept and has to be sent again, or discarded.
    ConflictPending,
}

/// The user-editable fields of a story that have been changed locally.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
struct LocalEdit {
    countdown: Option<Countdown>,
    rank: Option<i64>,
    state: Option<StoryState>,
}

impl LocalEdit {
    fn apply(&self, story: &Story) -> Story {
        let mut story = story.clone();
        if let Some(countdown) = self.countdown {
            story.countdown = countdown;
        }
        if let Some(rank) = self.rank {
            story.rank = rank;
        }
        if let Some(state) = self.state {
            story.state = state;
        }
        story
    }

    fn confirmed_by(&self, story: &Story) -> bool {
        self.countdown.is_none_or(|c| c == story.countdown)
            && self.rank.is_none_or(|r| r == story.rank)
            && self.state.is_none_or(|s| s == story.state)
    }
}

struct Entry {
    /// The record as last fetched.
    server: Story,
    /// The record as the user sees it: `server` plus `edit`.
    current: Story,
    edit: Option<LocalEdit>,
    sync: SyncState,
}

impl Entry {
    fn clean(story: Story) -> Self {
        Self {
            current: story.clone(),
            server: story,
            edit: None,
            sync: SyncState::Clean,
        }
    }
}

/// A learner's stories, keyed by id, in the order the service listed them.
///
/// The collection is replaced wholesale on every fetch. Local edits are
/// applied immediately and tracked per story until a later fetch confirms
/// them.
pub struct StoryCollection {
    version: u64,
    entries: Vec<Entry>,
    index: HashMap<StoryId, usize>,
}

/// Builds a fresh collection from a full story list. If an id appears more
/// than once, the last record wins but keeps the first one's position.
pub fn ingest(stories: Vec<Story>) -> StoryCollection {
    let mut collection = StoryCollection::new();
    collection.replace(stories);
    collection
}

impl StoryCollection {
    pub fn new() -> Self {
        Self {
            version: 0,
            entries: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Incremented on every refresh and every local edit.
    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, id: StoryId) -> Option<&Story> {
        self.index.get(&id).map(|&i| &self.entries[i].current)
    }

    pub fn sync_state(&self, id: StoryId) -> Option<SyncState> {
        self.index.get(&id).map(|&i| self.entries[i].sync)
    }

    pub fn order(&self, context: OrderContext) -> Vec<&Story> {
        let mut stories: Vec<&Story> = self.entries.iter().map(|e| &e.current).collect();
        order_stories(&mut stories, context);
        stories
    }

    fn replace(&mut self, stories: Vec<Story>) {
        self.entries.clear();
        self.index.clear();
        for story in stories {
            match self.index.get(&story.id) {
                Some(&i) => self.entries[i] = Entry::clean(story),
                None => {
                    self.index.insert(story.id, self.entries.len());
                    self.entries.push(Entry::clean(story));
                }
            }
        }
        self.version += 1;
    }

    /// Replaces the collection with a new snapshot from the service, carrying
    /// over local edits the snapshot does not yet reflect.
    pub fn refresh(&mut self, stories: Vec<Story>) {
        let mut edits: HashMap<StoryId, LocalEdit> = HashMap::new();
        for entry in &self.entries {
            if let Some(edit) = entry.edit {
                edits.insert(entry.server.id, edit);
            }
        }
        self.replace(stories);
        for entry in self.entries.iter_mut() {
            let Some(edit) = edits.remove(&entry.server.id) else {
                continue;
            };
            if edit.confirmed_by(&entry.server) {
                continue;
            }
            log::debug!(
                "Story {} changed on the server while an edit was pending.",
                entry.server.id
            );
            entry.current = edit.apply(&entry.server);
            entry.edit = Some(edit);
            entry.sync = SyncState::ConflictPending;
        }
    }

    fn edit(&mut self, id: StoryId, f: impl FnOnce(&Story) -> Story) -> Option<UpdatePayload> {
        let &i = self.index.get(&id)?;
        let entry = &mut self.entries[i];
        let updated = f(&entry.current);
        let mut edit = entry.edit.unwrap_or_default();
        if updated.countdown != entry.current.countdown {
            edit.countdown = Some(updated.countdown);
        }
        if updated.rank != entry.current.rank {
            edit.rank = Some(updated.rank);
        }
        if updated.state != entry.current.state {
            edit.state = Some(updated.state);
        }
        entry.current = updated;
        entry.edit = Some(edit);
        entry.sync = SyncState::PendingSync;
        self.version += 1;
        Some(to_update_payload(&entry.current))
    }

    /// Sets a story's countdown locally. Returns the payload to send to the
    /// service, or `None` if there is no such story.
    pub fn set_countdown(&mut self, id: StoryId, value: i64) -> Option<UpdatePayload> {
        self.edit(id, |story| apply_countdown(story, value))
    }

    pub fn bump_rank(&mut self, id: StoryId, delta: RankDelta) -> Option<UpdatePayload> {
        self.edit(id, |story| bump_rank(story, delta))
    }

    pub fn set_state(&mut self, id: StoryId, state: StoryState) -> Option<UpdatePayload> {
        self.edit(id, |story| Story {
            state,
            ..story.clone()
        })
    }

    /// Drops a story's local edit in favour of the last server snapshot.
    /// Returns false if there is no such story.
    pub fn discard_local_edit(&mut self, id: StoryId) -> bool {
        let Some(&i) = self.index.get(&id) else {
            return false;
        };
        let entry = &mut self.entries[i];
        entry.current = entry.server.clone();
        entry.edit = None;
        entry.sync = SyncState::Clean;
        self.version += 1;
        true
    }

    /// Keeps a conflicting local edit and returns its payload so it can be
    /// sent again. Returns `None` if the story has no local edit.
    pub fn retry(&mut self, id: StoryId) -> Option<UpdatePayload> {
        let &i = self.index.get(&id)?;
        let entry = &mut self.entries[i];
        entry.edit?;
        entry.sync = SyncState::PendingSync;
        self.version += 1;
        Some(to_update_payload(&entry.current))
    }

    /// Payloads of the stories whose local edits lost a race with a refresh.
    pub fn conflicts(&self) -> Vec<UpdatePayload> {
        self.entries
            .iter()
            .filter(|e| e.sync == SyncState::ConflictPending)
            .map(|e| to_update_payload(&e.current))
            .collect()
    }

    /// The stories a drill target covers, in rank order. The all-in-progress
    /// target covers every story in the highest rank tier.
    pub fn resolve_drill_target(&self, target: DrillTarget) -> Vec<&Story> {
        match target {
            DrillTarget::Story(id) => self.get(id).into_iter().collect(),
            DrillTarget::AllInProgress => {
                let ordered = self.order(OrderContext::Rank);
                match ordered.first() {
                    Some(top) => {
                        let top_rank = top.rank;
                        ordered
                            .into_iter()
                            .take_while(|s| s.rank == top_rank)
                            .collect()
                    }
                    None => Vec::new(),
                }
            }
        }
    }
}

impl Default for StoryCollection {
    fn default() -> Self {
        Self::new()
    }
}
