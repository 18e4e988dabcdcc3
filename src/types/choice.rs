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
use std::str::FromStr;

use crate::error::SessionError;

/// The letter of a multiple-choice answer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ChoiceLetter {
    A,
    B,
    C,
    D,
}

impl ChoiceLetter {
    pub const ALL: [ChoiceLetter; 4] = [
        ChoiceLetter::A,
        ChoiceLetter::B,
        ChoiceLetter::C,
        ChoiceLetter::D,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ChoiceLetter::A => "A",
            ChoiceLetter::B => "B",
            ChoiceLetter::C => "C",
            ChoiceLetter::D => "D",
        }
    }
}

impl FromStr for ChoiceLetter {
    type Err = SessionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "A" => Ok(ChoiceLetter::A),
            "B" => Ok(ChoiceLetter::B),
            "C" => Ok(ChoiceLetter::C),
            "D" => Ok(ChoiceLetter::D),
            _ => Err(SessionError::InvalidChoice(s.to_string())),
        }
    }
}

impl Display for ChoiceLetter {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
