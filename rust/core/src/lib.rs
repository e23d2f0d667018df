// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # psycad Core
//!
//! Shape descriptors for the parametric CAD mesh pipeline.
//!
//! A [`Shape`] describes one solid: a primitive kind, its dimensions, a pose,
//! a material, and an ordered list of operations. Descriptors are produced by
//! the chat service or the parameter panel and consumed by
//! `psycad-geometry`, which turns them into renderable buffers.
//!
//! ## Quick Start
//!
//! ```rust
//! use psycad_core::{Shape, Primitive};
//!
//! let shape = Shape::from_json(r#"{"shape": "cylinder", "parameters": {"radius": 0.25}}"#).unwrap();
//! assert_eq!(shape.shape, Primitive::Cylinder);
//! assert!(shape.validate().is_ok());
//! ```

pub mod color;
pub mod error;
pub mod parameters;
pub mod shape;
pub mod validation;

pub use color::parse_css_color;
pub use error::{Error, Result};
pub use parameters::{parameter_specs, ParameterSpec};
pub use shape::{
    BooleanOp, Feature, Material, Operation, OperationStep, OperationType, Operator, Primitive,
    Shape, ShapeKind, ShapeParameters, DEFAULT_LINEAR, DEFAULT_RADIUS, DEFAULT_SEGMENTS,
};
