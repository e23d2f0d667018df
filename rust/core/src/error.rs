// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use thiserror::Error;

/// Result type for shape descriptor operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while reading or validating a shape descriptor
#[derive(Error, Debug)]
pub enum Error {
    #[error("Malformed shape JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid parameter {name} = {value}: {reason}")]
    InvalidParameter {
        name: String,
        value: f64,
        reason: &'static str,
    },

    #[error("Unknown parameter: {0}")]
    UnknownParameter(String),
}

impl Error {
    /// Create an invalid parameter error
    pub fn invalid(name: impl Into<String>, value: f64, reason: &'static str) -> Self {
        Error::InvalidParameter {
            name: name.into(),
            value,
            reason,
        }
    }
}
