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

use maud::Markup;
use maud::html;

use crate::kana::lookup_chars;
use crate::rank::OrderContext;
use crate::rank::StoryCollection;
use crate::rank::SyncState;
use crate::types::countdown::Countdown;
use crate::types::entry::DictionaryEntry;
use crate::types::kanji::KanjiCharacter;
use crate::types::pitch::Reading;
use crate::types::story::DrillTarget;
use crate::types::story::Story;
use crate::types::story::StoryState;
use crate::types::story::StoryText;
use crate::types::timestamp::Timestamp;

const UNKNOWN_PITCH_MARK: &str = "﹖";

/// Renders a reading with the mora where pitch falls highlighted. Readings
/// without a known pitch are marked as such rather than shown flat.
pub fn render_reading(reading: &Reading) -> Markup {
    match reading.pitch() {
        Some(_) => {
            let segments = reading.segments();
            html! {
                span.reading {
                    (segments.pre_drop)
                    span.high_pitch { (segments.drop) }
                    (segments.post_drop)
                }
            }
        }
        None => html! {
            span.reading.unknown_pitch {
                (reading.text()) (UNKNOWN_PITCH_MARK)
            }
        },
    }
}

pub fn render_entry(entry: &DictionaryEntry) -> Markup {
    html! {
        div.entry {
            div.word {
                div.readings {
                    @for reading in &entry.readings {
                        (render_reading(&reading.to_reading()))
                    }
                }
                div.kanji_spellings {
                    @for spelling in &entry.kanji_spellings {
                        span.kanji_spelling { (spelling.kanji_spelling) }
                    }
                }
                div.senses {
                    @for sense in &entry.senses {
                        @let glosses = sense.glosses.iter().map(|g| g.value.as_str()).collect::<Vec<_>>();
                        span.sense {
                            span {
                                @for pos in &sense.parts_of_speech {
                                    span.pos { (pos) }
                                    " "
                                }
                            }
                            span.glosses { (glosses.join("; ")) }
                        }
                    }
                }
            }
        }
    }
}

/// Renders the records whose literal appears in `word`, in the order they
/// appear, each at most once.
pub fn render_kanji(kanji: &[KanjiCharacter], word: &str) -> Markup {
    let mut matches: Vec<&KanjiCharacter> = Vec::new();
    for ch in lookup_chars(word) {
        let literal = ch.to_string();
        matches.extend(kanji.iter().filter(|k| k.literal == literal));
    }
    html! {
        @for k in matches {
            @for group in &k.readingmeaning.group {
                @let meanings = group.default_meanings().collect::<Vec<_>>();
                div.kanji {
                    div {
                        span.literal { (k.literal) }
                        div {
                            span.onyomi_readings {
                                @for r in group.onyomi() {
                                    span.kanji_reading { (r) }
                                }
                            }
                        }
                        div {
                            span.kunyomi_readings {
                                @for r in group.kunyomi() {
                                    span.kanji_reading { (r) }
                                }
                            }
                        }
                    }
                    div.kanji_meanings { (meanings.join("; ")) }
                    div.kanji_misc {
                        @if let Some(strokes) = k.misc.stroke_count.filter(|&n| n > 0) {
                            span.strokes { "strokes: " (strokes) }
                        }
                        @if let Some(frequency) = k.misc.frequency.filter(|&n| n > 0) {
                            span.frequency { "frequency: " (frequency) }
                        }
                    }
                }
            }
        }
    }
}

fn sync_class(sync: SyncState) -> &'static str {
    match sync {
        SyncState::Clean => "clean",
        SyncState::PendingSync => "pending",
        SyncState::ConflictPending => "conflict",
    }
}

fn story_title(story: &Story) -> Markup {
    if story.link.is_empty() {
        html! { span.story_title { (story.title) } }
    } else {
        html! { a.story_title href=(story.link) { (story.title) } }
    }
}

/// The reading view: the story's paragraphs, with lookup forms for words
/// and kanji met along the way.
pub fn render_story_text(text: &StoryText) -> Markup {
    html! {
        h1 {
            @if text.link.is_empty() {
                (text.title)
            } @else {
                a href=(text.link) { (text.title) }
            }
        }
        p.story_state { (text.state.as_str()) }
        form.lookup action="/word" method="get" {
            input type="search" name="q" placeholder="単語";
            input type="submit" value="Look up word";
            input type="submit" value="Look up kanji" formaction="/kanji";
        }
        div.story_content {
            @for paragraph in text.paragraphs() {
                p { (paragraph) }
            }
        }
    }
}

/// The catalog table: one row per story, in presentation order, with the
/// countdown stepper and rank buttons posting back to `/`.
pub fn render_story_table(
    collection: &StoryCollection,
    context: OrderContext,
    now: Timestamp,
) -> Markup {
    html! {
        table.story_table {
            tr {
                th title="reviews remaining before promotion" { "Countdown" }
                th { "Rank" }
                th title="number of times this story has been read" { "Read count" }
                th title="days since this story was last read" { "Last read" }
                th { "State" }
                th { "Title" }
            }
            @for story in collection.order(context) {
                @let id = story.id.into_inner();
                @let sync = collection.sync_state(story.id).unwrap_or(SyncState::Clean);
                tr class=(sync_class(sync)) {
                    td {
                        form action="/" method="post" {
                            input type="hidden" name="action" value="Countdown";
                            input type="hidden" name="story_id" value=(id);
                            input.count_spinner type="number" name="value"
                                min=(Countdown::MIN) max=(Countdown::MAX) step="1"
                                value=(story.countdown.value()) onchange="this.form.submit()";
                        }
                    }
                    td.rank {
                        form action="/" method="post" {
                            input type="hidden" name="story_id" value=(id);
                            button type="submit" name="action" value="RankDown" { "-" }
                            span.rank_value { (story.rank) }
                            button type="submit" name="action" value="RankUp" { "+" }
                        }
                    }
                    td { (story.read_count) }
                    td { (story.date_last_read.days_until(now)) "d" }
                    td {
                        form action="/" method="post" {
                            input type="hidden" name="action" value="SetState";
                            input type="hidden" name="story_id" value=(id);
                            select name="value" onchange="this.form.submit()" {
                                @for state in StoryState::ALL {
                                    option value=(state.as_str()) selected[state == story.state] {
                                        (state.as_str())
                                    }
                                }
                            }
                        }
                    }
                    td {
                        (story_title(story))
                        " "
                        a.read href={ "/story/" (id) } { "read" }
                        " "
                        a.drill href={ "/drill/" (DrillTarget::Story(story.id).into_raw()) } { "drill" }
                        @if sync == SyncState::ConflictPending {
                            form.conflict action="/" method="post" {
                                input type="hidden" name="story_id" value=(id);
                                input type="submit" name="action" value="Resend"
                                    title="Changed on the server. Send the local edit again.";
                                input type="submit" name="action" value="Discard"
                                    title="Changed on the server. Discard the local edit.";
                            }
                        }
                    }
                }
            }
        }
    }
}
