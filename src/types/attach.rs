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

use serde::Deserialize;

/// An upsell service, with the customer phrases that should make the agent
/// think of it.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct AttachService {
    pub name: String,
    #[serde(rename = "phrases")]
    pub trigger_phrases: Vec<String>,
    pub pitch: String,
    pub benefit: String,
}
