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

use axum::extract::Path;
use axum::extract::Query;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Html;
use maud::Markup;
use maud::html;
use serde::Deserialize;

use crate::cmd::serve::state::ServerState;
use crate::cmd::serve::template::page_template;
use crate::rank::OrderContext;
use crate::render::render_entry;
use crate::render::render_kanji;
use crate::render::render_story_table;
use crate::render::render_story_text;
use crate::types::story::DrillTarget;
use crate::types::story::StoryId;
use crate::types::timestamp::Timestamp;

#[derive(Deserialize)]
pub struct ViewQuery {
    view: Option<OrderContext>,
}

#[derive(Deserialize)]
pub struct LookupQuery {
    #[serde(default)]
    q: String,
}

/// Replaces the collection with a fresh snapshot from the storage service.
/// On failure the previous collection is kept and the error is recorded.
async fn refresh(state: &ServerState) {
    match state.service.fetch_stories().await {
        Ok(stories) => {
            let mut mutable = state.mutable.lock().unwrap();
            mutable.collection.refresh(stories);
            log::debug!("Collection at version {}.", mutable.collection.version());
            for payload in mutable.collection.conflicts() {
                log::info!("Story {} has a local edit the server does not reflect.", payload.id);
            }
        }
        Err(e) => {
            log::error!("{e}");
            state.mutable.lock().unwrap().last_error = Some(e.to_string());
        }
    }
}

fn page(title: &str, body: Markup) -> Html<String> {
    Html(page_template(title, body).into_string())
}

pub async fn get_handler(
    State(state): State<ServerState>,
    Query(query): Query<ViewQuery>,
) -> (StatusCode, Html<String>) {
    refresh(&state).await;
    let view = query.view.unwrap_or(state.view);
    let mut mutable = state.mutable.lock().unwrap();
    let last_error = mutable.last_error.take();
    let body = html! {
        @if let Some(error) = last_error {
            p.error { (error) }
        }
        @if mutable.collection.is_empty() {
            p { "No stories yet." }
        } @else {
            (render_story_table(&mutable.collection, view, Timestamp::now()))
        }
    };
    (StatusCode::OK, page("Stories", body))
}

pub async fn drill_handler(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> (StatusCode, Html<String>) {
    refresh(&state).await;
    let target = DrillTarget::from_raw(id);
    let mutable = state.mutable.lock().unwrap();
    let stories = mutable.collection.resolve_drill_target(target);
    let heading = match target {
        DrillTarget::AllInProgress => "All top-rank stories".to_string(),
        DrillTarget::Story(_) => match stories.first() {
            Some(story) => story.title.clone(),
            None => return (StatusCode::NOT_FOUND, page("Not Found", html! { p { "No such story." } })),
        },
    };
    let body = html! {
        h1 { (heading) }
        @if stories.is_empty() {
            p { "Nothing to drill." }
        } @else {
            ul.drill_stories {
                @for story in &stories {
                    li {
                        a href={ "/story/" (story.id.into_inner()) } { (story.title) }
                        " (rank " (story.rank) ", countdown " (story.countdown.to_string())
                        ", read " (story.read_count) " times, added "
                        (story.date_added.to_string()) ")"
                    }
                }
            }
        }
    };
    (StatusCode::OK, page(&heading, body))
}

/// The reading view for one story. Only stories in the catalog are served.
pub async fn story_handler(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> (StatusCode, Html<String>) {
    let id = StoryId::new(id);
    let known = state.mutable.lock().unwrap().collection.get(id).is_some();
    if !known {
        return (StatusCode::NOT_FOUND, page("Not Found", html! { p { "No such story." } }));
    }
    match state.service.fetch_story(id).await {
        Ok(text) => (StatusCode::OK, page(&text.title, render_story_text(&text))),
        Err(e) => {
            log::error!("{e}");
            (StatusCode::BAD_GATEWAY, page("Story", html! { p.error { (e.to_string()) } }))
        }
    }
}

pub async fn word_handler(
    State(state): State<ServerState>,
    Query(query): Query<LookupQuery>,
) -> (StatusCode, Html<String>) {
    let word = query.q.trim();
    if word.is_empty() {
        return (StatusCode::OK, page("Look up", html! { p { "Enter a word to look up." } }));
    }
    match state.service.search_word(word).await {
        Ok(results) => {
            let body = html! {
                h1 { (word) }
                h2 { "Starting with " (word) " (" (results.count_start) ")" }
                @for entry in &results.entries_start {
                    (render_entry(entry))
                }
                @if !results.entries_mid.is_empty() {
                    h2 { "Containing " (word) " (" (results.count_mid) ")" }
                    @for entry in &results.entries_mid {
                        (render_entry(entry))
                    }
                }
                div.kanji_results {
                    (render_kanji(&results.kanji, word))
                }
            };
            (StatusCode::OK, page(word, body))
        }
        Err(e) => {
            log::error!("{e}");
            (StatusCode::BAD_GATEWAY, page(word, html! { p.error { (e.to_string()) } }))
        }
    }
}

pub async fn kanji_handler(
    State(state): State<ServerState>,
    Query(query): Query<LookupQuery>,
) -> (StatusCode, Html<String>) {
    let word = query.q.trim();
    match state.service.lookup_kanji(word).await {
        Ok(kanji) => {
            let body = html! {
                h1 { (word) }
                @if kanji.is_empty() {
                    p { "No kanji found." }
                } @else {
                    (render_kanji(&kanji, word))
                }
            };
            (StatusCode::OK, page(word, body))
        }
        Err(e) => {
            log::error!("{e}");
            (StatusCode::BAD_GATEWAY, page(word, html! { p.error { (e.to_string()) } }))
        }
    }
}
