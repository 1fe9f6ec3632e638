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

use axum::Form;
use axum::extract::State;
use axum::response::Redirect;
use serde::Deserialize;

use crate::cmd::serve::state::ServerState;
use crate::error::Fallible;
use crate::error::fail;
use crate::rank::RankDelta;
use crate::rank::UpdatePayload;
use crate::types::story::DrillTarget;
use crate::types::story::StoryState;

#[derive(Debug, Deserialize)]
enum Action {
    RankUp,
    RankDown,
    Countdown,
    SetState,
    Resend,
    Discard,
}

#[derive(Deserialize)]
pub struct FormData {
    action: Action,
    story_id: i64,
    /// Sent by the countdown stepper and the state selector.
    #[serde(default)]
    value: Option<String>,
}

pub async fn post_handler(
    State(state): State<ServerState>,
    Form(form): Form<FormData>,
) -> Redirect {
    match action_handler(&state, form).await {
        Ok(_) => {}
        Err(e) => {
            log::error!("{e}");
            state.mutable.lock().unwrap().last_error = Some(e.to_string());
        }
    }
    Redirect::to("/")
}

async fn action_handler(state: &ServerState, form: FormData) -> Fallible<()> {
    let id = match DrillTarget::from_raw(form.story_id) {
        DrillTarget::Story(id) => id,
        DrillTarget::AllInProgress => {
            return fail("the all-in-progress drill target cannot be edited.");
        }
    };
    let value = form.value.as_deref().map(str::trim);
    // The lock is released before the update goes out.
    let payload: Option<UpdatePayload> = {
        let mut mutable = state.mutable.lock().unwrap();
        let collection = &mut mutable.collection;
        if collection.get(id).is_none() {
            return fail(format!("no story with id {id}."));
        }
        match form.action {
            Action::RankUp => collection.bump_rank(id, RankDelta::Up),
            Action::RankDown => collection.bump_rank(id, RankDelta::Down),
            Action::Countdown => match value {
                Some(value) => collection.set_countdown(id, value.parse::<i64>()?),
                None => return fail("countdown value missing."),
            },
            Action::SetState => match value.and_then(StoryState::parse) {
                Some(state) => collection.set_state(id, state),
                None => return fail(format!("invalid story state: {value:?}.")),
            },
            Action::Resend => collection.retry(id),
            Action::Discard => {
                collection.discard_local_edit(id);
                None
            }
        }
    };
    if let Some(payload) = payload {
        state.service.update_story(&payload).await?;
    }
    Ok(())
}
