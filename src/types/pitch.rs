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

use crate::mora::Segments;
use crate::mora::segment;

/// A pitch-accent pattern, as 1-based mora positions.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct PitchDescriptor {
    /// The mora after which pitch falls. Zero means flat (no drop).
    pub drop_mora: u32,
    /// The mora where pitch rises. Carried through but not rendered.
    pub rise_mora: Option<u32>,
}

impl PitchDescriptor {
    pub fn new(drop_mora: u32, rise_mora: Option<u32>) -> Self {
        Self {
            drop_mora,
            rise_mora,
        }
    }

    /// Parses the dictionary's `"drop,rise,..."` form. Only the first two
    /// fields are consumed. Returns `None` when the drop field is missing or
    /// not a non-negative integer, which callers treat as unknown pitch.
    pub fn parse(s: &str) -> Option<Self> {
        let mut fields = s.split(',').map(|field| field.trim().parse::<u32>());
        let drop_mora = fields.next()?.ok()?;
        let rise_mora = fields.next().and_then(|field| field.ok());
        Some(Self::new(drop_mora, rise_mora))
    }
}

/// A kana reading and its pitch accent, if known.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Reading {
    text: String,
    pitch: Option<PitchDescriptor>,
}

impl Reading {
    pub fn new(text: impl Into<String>, pitch: Option<PitchDescriptor>) -> Self {
        Self {
            text: text.into(),
            pitch,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn pitch(&self) -> Option<PitchDescriptor> {
        self.pitch
    }

    pub fn segments(&self) -> Segments<'_> {
        segment(&self.text, self.pitch)
    }
}
