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

//! Container image inventory as produced by the image script.

use super::status::CmdFailure;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContainerImage {
    #[serde(rename = "imageid")]
    pub image_id: String,
    pub repository: String,
    pub tag: String,
    pub node: String,
    pub size: String,
}

/// An image pushed to the local registry addon.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PushedImage {
    pub name: String,
    pub tag: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoadedImages {
    #[serde(rename = "error", default)]
    pub failure: Option<CmdFailure>,
    #[serde(rename = "containerimages", default)]
    pub container_images: Vec<ContainerImage>,
    #[serde(rename = "containerregistry", default)]
    pub container_registry: Option<String>,
    #[serde(rename = "pushedimages", default)]
    pub pushed_images: Vec<PushedImage>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserializes_image_inventory() {
        let payload = r#"{
            "containerimages": [{
                "imageid": "042a816809aa",
                "repository": "docker.io/library/alpine",
                "tag": "3.20",
                "node": "cp-1",
                "size": "7.8MB"
            }],
            "containerregistry": "registry.local",
            "pushedimages": [{"name": "registry.local/alpine", "tag": "v1"}]
        }"#;

        let images: LoadedImages = serde_json::from_str(payload).unwrap();
        assert!(images.failure.is_none());
        assert_eq!(images.container_images.len(), 1);
        assert_eq!(images.container_images[0].image_id, "042a816809aa");
        assert_eq!(images.container_registry.as_deref(), Some("registry.local"));
        assert_eq!(images.pushed_images[0].name, "registry.local/alpine");
    }

    #[test]
    fn test_empty_payload_uses_defaults() {
        let images: LoadedImages = serde_json::from_str("{}").unwrap();
        assert!(images.container_images.is_empty());
        assert!(images.container_registry.is_none());
        assert!(images.pushed_images.is_empty());
    }
}
