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

//! Cluster status payload as produced by the status script.

use serde::{Deserialize, Serialize};

/// Failure reported by a script inside its structured result, as opposed to
/// a failure of the script process itself.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CmdFailure {
    pub severity: u8,
    pub code: String,
    pub message: String,
}

/// Minimal structured result for scripts reporting only success or failure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CmdResult {
    #[serde(rename = "error", default)]
    pub failure: Option<CmdFailure>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunningState {
    pub is_running: bool,
    #[serde(default)]
    pub issues: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Capacity {
    pub cpu: String,
    pub storage: String,
    pub memory: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Node {
    pub status: String,
    pub name: String,
    pub role: String,
    pub age: String,
    pub kubelet_version: String,
    pub kernel_version: String,
    pub os_image: String,
    pub container_runtime: String,
    pub internal_ip: String,
    pub is_ready: bool,
    pub capacity: Capacity,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pod {
    pub status: String,
    pub namespace: String,
    pub name: String,
    pub ready: String,
    pub restarts: String,
    pub age: String,
    pub ip: String,
    pub node: String,
    pub is_running: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct K8sVersionInfo {
    pub k8s_server_version: String,
    pub k8s_client_version: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClusterStatus {
    #[serde(rename = "error", default)]
    pub failure: Option<CmdFailure>,
    #[serde(default)]
    pub running_state: Option<RunningState>,
    #[serde(default)]
    pub nodes: Vec<Node>,
    #[serde(default)]
    pub pods: Vec<Pod>,
    #[serde(default)]
    pub k8s_version_info: Option<K8sVersionInfo>,
}
