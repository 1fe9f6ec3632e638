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

use reqwest::Client;
use serde::Serialize;

use crate::error::Fallible;
use crate::rank::UpdatePayload;
use crate::types::entry::WordSearchResults;
use crate::types::kanji::KanjiCharacter;
use crate::types::kanji::KanjiResponse;
use crate::types::story::Story;
use crate::types::story::StoryId;
use crate::types::story::StoryText;

/// Client for the storage and dictionary service. Requests are made once;
/// failures are returned to the caller as-is.
#[derive(Clone)]
pub struct StoryService {
    client: Client,
    base_url: String,
}

#[derive(Serialize)]
struct WordSearchRequest<'a> {
    word: &'a str,
}

impl StoryService {
    pub fn new(base_url: &str) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Fetches every story. The service sends `null` for an empty list.
    pub async fn fetch_stories(&self) -> Fallible<Vec<Story>> {
        let stories: Option<Vec<Story>> = self
            .client
            .get(self.url("/stories_list"))
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        let stories = stories.unwrap_or_default();
        log::debug!("Fetched {} stories.", stories.len());
        Ok(stories)
    }

    /// Fetches the text of one story. The service answers an unknown id with
    /// an all-null record, which reads as an empty text.
    pub async fn fetch_story(&self, id: StoryId) -> Fallible<StoryText> {
        let text: StoryText = self
            .client
            .get(self.url(&format!("/story/{id}")))
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        log::debug!("Fetched story {id} ({} bytes).", text.content.len());
        Ok(text)
    }

    pub async fn update_story(&self, payload: &UpdatePayload) -> Fallible<()> {
        log::debug!("Sending update for story {}.", payload.id);
        self.client
            .post(self.url("/update_story"))
            .json(payload)
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }

    pub async fn lookup_kanji(&self, word: &str) -> Fallible<Vec<KanjiCharacter>> {
        let response: KanjiResponse = self
            .client
            .post(self.url("/kanji"))
            .json(word)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(response.kanji)
    }

    pub async fn search_word(&self, word: &str) -> Fallible<WordSearchResults> {
        let results: WordSearchResults = self
            .client
            .post(self.url("/word_search"))
            .json(&WordSearchRequest { word })
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(results)
    }
}

#[cfg(test)]
mod tests {
    use axum::Json;
    use axum::Router;
    use axum::extract::Path;
    use axum::routing::get;
    use serde_json::Value;
    use serde_json::json;
    use tokio::net::TcpListener;
    use tokio::spawn;

    use super::*;
    use crate::types::story::StoryState;

    #[test]
    fn test_base_url_trailing_slash() {
        let service = StoryService::new("http://localhost:8080/");
        assert_eq!(service.base_url(), "http://localhost:8080");
        assert_eq!(service.url("/kanji"), "http://localhost:8080/kanji");
    }

    #[tokio::test]
    async fn test_unreachable_service() {
        let port = portpicker::pick_unused_port().unwrap();
        let service = StoryService::new(&format!("http://127.0.0.1:{port}"));
        let result = service.fetch_stories().await;
        assert!(result.is_err());
        let message = result.err().unwrap().to_string();
        assert!(message.starts_with("error: request to storage service failed"));
    }

    #[tokio::test]
    async fn test_fetch_story() -> Fallible<()> {
        async fn story(Path(id): Path<i64>) -> Json<Value> {
            if id == 7 {
                Json(json!({
                    "state": "active",
                    "words": "[]",
                    "title": "かぐや姫",
                    "link": "",
                    "tokens": null,
                    "content": "いまはむかし、\nたけとりの翁といふものありけり。"
                }))
            } else {
                Json(json!({
                    "state": null, "words": null, "title": null,
                    "link": null, "tokens": null, "content": null
                }))
            }
        }
        let app = Router::new().route("/story/{id}", get(story));
        let port = portpicker::pick_unused_port().unwrap();
        let listener = TcpListener::bind(("127.0.0.1", port)).await?;
        spawn(async move { axum::serve(listener, app).await });

        let service = StoryService::new(&format!("http://127.0.0.1:{port}"));
        let text = service.fetch_story(StoryId::new(7)).await?;
        assert_eq!(text.title, "かぐや姫");
        assert_eq!(text.state, StoryState::Active);
        assert_eq!(text.paragraphs().count(), 2);

        let text = service.fetch_story(StoryId::new(8)).await?;
        assert_eq!(text, StoryText::default());
        Ok(())
    }
}
