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

use maud::DOCTYPE;
use maud::Markup;
use maud::html;

use crate::types::story::DrillTarget;

pub fn page_template(title: &str, body: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="ja" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { (title) " · dokusho" }
                link rel="stylesheet" href="/style.css";
            }
            body {
                nav {
                    a href="/?view=rank" { "By rank" }
                    a href="/?view=date-added" { "Newest" }
                    a href={ "/drill/" (DrillTarget::AllInProgress.into_raw()) } { "Drill top rank" }
                    form action="/word" method="get" style="display: inline" {
                        input type="search" name="q" placeholder="単語";
                        input type="submit" value="Look up";
                    }
                }
                (body)
            }
        }
    }
}
