// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use thiserror::Error;

/// Result type for geometry operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while turning a shape into mesh buffers
#[derive(Error, Debug)]
pub enum Error {
    #[error("Unsupported shape type: {0}")]
    UnsupportedShape(String),

    #[error("Operation {index} ({operation}) failed: {reason}")]
    GeometryOperation {
        index: usize,
        operation: &'static str,
        reason: String,
    },

    #[error("Operand of operation {index} failed: {source}")]
    InOperand { index: usize, source: Box<Error> },

    #[error("Mesh is missing the {0} attribute")]
    MissingAttribute(&'static str),

    #[error("Invalid parameter {name} = {value}: {reason}")]
    InvalidParameter {
        name: String,
        value: f64,
        reason: &'static str,
    },

    #[error("Triangulation failed: {0}")]
    TriangulationError(String),

    #[error("Shape descriptor error: {0}")]
    CoreError(psycad_core::Error),
}

impl From<psycad_core::Error> for Error {
    fn from(err: psycad_core::Error) -> Self {
        match err {
            psycad_core::Error::InvalidParameter {
                name,
                value,
                reason,
            } => Error::InvalidParameter {
                name,
                value,
                reason,
            },
            other => Error::CoreError(other),
        }
    }
}

impl Error {
    /// The innermost error, looking through operand wrappers
    pub fn root(&self) -> &Error {
        match self {
            Error::InOperand { source, .. } => source.root(),
            other => other,
        }
    }

    /// Owned form of [`Error::root`]
    pub fn into_root(self) -> Error {
        match self {
            Error::InOperand { source, .. } => (*source).into_root(),
            other => other,
        }
    }

    /// Operation indices from the outermost shape down to the failing step
    pub fn operation_path(&self) -> Vec<usize> {
        match self {
            Error::InOperand { index, source } => {
                let mut path = vec![*index];
                path.extend(source.operation_path());
                path
            }
            Error::GeometryOperation { index, .. } => vec![*index],
            _ => Vec::new(),
        }
    }

    pub(crate) fn operation(index: usize, operation: &'static str, reason: impl Into<String>) -> Self {
        Error::GeometryOperation {
            index,
            operation,
            reason: reason.into(),
        }
    }
}
