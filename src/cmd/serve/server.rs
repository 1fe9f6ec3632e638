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

use std::sync::Arc;
use std::sync::Mutex;
use std::time::Duration;

use axum::Router;
use axum::http::HeaderName;
use axum::http::StatusCode;
use axum::http::header::CACHE_CONTROL;
use axum::http::header::CONTENT_TYPE;
use axum::response::Html;
use axum::routing::get;
use axum::routing::post;
use tokio::net::TcpListener;
use tokio::net::TcpStream;
use tokio::time::sleep;

use crate::cmd::serve::get::drill_handler;
use crate::cmd::serve::get::get_handler;
use crate::cmd::serve::get::kanji_handler;
use crate::cmd::serve::get::story_handler;
use crate::cmd::serve::get::word_handler;
use crate::cmd::serve::post::post_handler;
use crate::cmd::serve::state::MutableState;
use crate::cmd::serve::state::ServerState;
use crate::config::Config;
use crate::error::Fallible;
use crate::rank::ingest;
use crate::sync::StoryService;

pub async fn start_server(config: Config, open_browser: bool) -> Fallible<()> {
    let service = StoryService::new(&config.backend);
    log::debug!("Loading stories from {}...", service.base_url());
    let collection = ingest(service.fetch_stories().await?);
    log::debug!("Loaded {} stories.", collection.len());

    let state = ServerState {
        service,
        view: config.view,
        mutable: Arc::new(Mutex::new(MutableState {
            collection,
            last_error: None,
        })),
    };
    let app = Router::new();
    let app = app.route("/", get(get_handler));
    let app = app.route("/", post(post_handler));
    let app = app.route("/drill/{id}", get(drill_handler));
    let app = app.route("/story/{id}", get(story_handler));
    let app = app.route("/word", get(word_handler));
    let app = app.route("/kanji", get(kanji_handler));
    let app = app.route("/style.css", get(stylesheet));
    let app = app.fallback(not_found_handler);
    let app = app.with_state(state);
    let bind = format!("0.0.0.0:{}", config.port);

    if open_browser {
        // Wait for the listener before opening the page.
        let local_addr = format!("127.0.0.1:{}", config.port);
        let url = format!("http://{local_addr}/");
        tokio::spawn(async move {
            loop {
                if let Ok(stream) = TcpStream::connect(local_addr.as_str()).await {
                    drop(stream);
                    break;
                }
                sleep(Duration::from_millis(1)).await;
            }
            if let Err(e) = open::that(&url) {
                log::error!("Failed to open {url}: {e}");
            }
        });
    }

    log::info!("Serving on http://{bind}/");
    let listener = TcpListener::bind(bind.as_str()).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => log::debug!("Shutting down."),
        Err(e) => {
            log::error!("Failed to listen for Ctrl-C: {e}");
            std::future::pending::<()>().await
        }
    }
}

async fn stylesheet() -> (StatusCode, [(HeaderName, &'static str); 2], &'static [u8]) {
    let bytes = include_bytes!("style.css");
    (
        StatusCode::OK,
        [
            (CONTENT_TYPE, "text/css"),
            (CACHE_CONTROL, "public, max-age=604800, immutable"),
        ],
        bytes,
    )
}

async fn not_found_handler() -> (StatusCode, Html<String>) {
    (StatusCode::NOT_FOUND, Html("Not Found".to_string()))
}
