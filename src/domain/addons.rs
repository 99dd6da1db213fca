// Copyright 2025 JiangLong.
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

use super::status::CmdFailure;
use serde::{Deserialize, Serialize};

/// Addon inventory reported by the addons status script.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddonsStatus {
    #[serde(rename = "error", default)]
    pub failure: Option<CmdFailure>,
    #[serde(default)]
    pub enabled_addons: Vec<String>,
    #[serde(default)]
    pub available_addons: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserializes_addon_lists() {
        let payload = r#"{
            "enabledAddons": ["ingress", "registry"],
            "availableAddons": ["ingress", "registry", "dashboard"]
        }"#;

        let status: AddonsStatus = serde_json::from_str(payload).unwrap();
        assert_eq!(status.enabled_addons, vec!["ingress", "registry"]);
        assert_eq!(status.available_addons.len(), 3);
        assert!(status.failure.is_none());
    }
}
