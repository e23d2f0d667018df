// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Request types for the API.

use psycad_core::Shape;
use serde::Deserialize;

/// Query options for mesh requests.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MeshOptions {
    /// Skip cache lookup if true.
    #[serde(default)]
    pub skip_cache: bool,
}

/// Body of `POST /api/v1/mesh/batch`.
#[derive(Debug, Clone, Deserialize)]
pub struct BatchRequest {
    pub shapes: Vec<Shape>,
}
