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

//! Domain types of the cluster CLI

pub mod addons;
pub mod images;
pub mod setup;
pub mod status;

pub use self::addons::AddonsStatus;
pub use self::images::{ContainerImage, LoadedImages, PushedImage};
pub use self::setup::{determine_ps_version, SetupConfig, SetupName};
pub use self::status::{
    Capacity, ClusterStatus, CmdFailure, CmdResult, K8sVersionInfo, Node, Pod, RunningState,
};
