// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Shape descriptor
//!
//! Plain data describing one parametric solid. Descriptors arrive as JSON
//! from the chat service or the parameter panel and are rebuilt from scratch
//! every time geometry must be recomputed.

use crate::color::parse_css_color;
use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Default for `width`, `height` and `depth`
pub const DEFAULT_LINEAR: f64 = 1.0;
/// Default for `radius`
pub const DEFAULT_RADIUS: f64 = 0.5;
/// Default radial/latitude subdivision count
pub const DEFAULT_SEGMENTS: u32 = 32;

/// How the solid is constructed. Only `Primitive` has geometry of its own;
/// the other kinds are built from their `shape` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeKind {
    #[default]
    Primitive,
    Extrusion,
    Revolution,
}

/// Primitive solid kind.
///
/// Unrecognised names are kept verbatim so the builder can report them.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Primitive {
    Cube,
    Cylinder,
    Sphere,
    Cone,
    Other(String),
}

impl Primitive {
    /// Name as it appears in JSON
    pub fn as_str(&self) -> &str {
        match self {
            Primitive::Cube => "cube",
            Primitive::Cylinder => "cylinder",
            Primitive::Sphere => "sphere",
            Primitive::Cone => "cone",
            Primitive::Other(name) => name,
        }
    }

    /// Whether the primitive builder knows this kind
    pub fn is_supported(&self) -> bool {
        !matches!(self, Primitive::Other(_))
    }
}

impl From<String> for Primitive {
    fn from(name: String) -> Self {
        match name.as_str() {
            "cube" => Primitive::Cube,
            "cylinder" => Primitive::Cylinder,
            "sphere" => Primitive::Sphere,
            "cone" => Primitive::Cone,
            _ => Primitive::Other(name),
        }
    }
}

impl From<&str> for Primitive {
    fn from(name: &str) -> Self {
        Primitive::from(name.to_string())
    }
}

impl From<Primitive> for String {
    fn from(primitive: Primitive) -> Self {
        match primitive {
            Primitive::Other(name) => name,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for Primitive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Named numeric dimensions. Absent values fall back to the defaults above.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ShapeParameters {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub depth: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub radius: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub segments: Option<f64>,
}

impl ShapeParameters {
    #[inline]
    pub fn width(&self) -> f64 {
        self.width.unwrap_or(DEFAULT_LINEAR)
    }

    #[inline]
    pub fn height(&self) -> f64 {
        self.height.unwrap_or(DEFAULT_LINEAR)
    }

    #[inline]
    pub fn depth(&self) -> f64 {
        self.depth.unwrap_or(DEFAULT_LINEAR)
    }

    #[inline]
    pub fn radius(&self) -> f64 {
        self.radius.unwrap_or(DEFAULT_RADIUS)
    }

    /// Subdivision count. Validated descriptors always hold an integer >= 3.
    #[inline]
    pub fn segments(&self) -> u32 {
        self.segments
            .map(|s| s as u32)
            .unwrap_or(DEFAULT_SEGMENTS)
    }

    /// Look up a dimension by name
    pub fn get(&self, name: &str) -> Option<f64> {
        match name {
            "width" => self.width,
            "height" => self.height,
            "depth" => self.depth,
            "radius" => self.radius,
            "segments" => self.segments,
            _ => None,
        }
    }

    /// Edit one dimension in place, as the parameter panel does.
    ///
    /// The value is validated with the same rules as [`Shape::validate`].
    pub fn set(&mut self, name: &str, value: f64) -> Result<()> {
        let slot = match name {
            "width" => &mut self.width,
            "height" => &mut self.height,
            "depth" => &mut self.depth,
            "radius" => &mut self.radius,
            "segments" => &mut self.segments,
            _ => return Err(crate::Error::UnknownParameter(name.to_string())),
        };
        crate::validation::check_parameter(name, value)?;
        *slot = Some(value);
        Ok(())
    }
}

/// Operation family
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OperationType {
    Boolean,
    Fillet,
    Chamfer,
}

/// Operator tag carried next to the operation type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operator {
    Union,
    Difference,
    Intersection,
    #[default]
    Edge,
}

impl Operator {
    pub fn as_str(&self) -> &'static str {
        match self {
            Operator::Union => "union",
            Operator::Difference => "difference",
            Operator::Intersection => "intersection",
            Operator::Edge => "edge",
        }
    }
}

/// CSG combinator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BooleanOp {
    Union,
    Difference,
    Intersection,
}

impl BooleanOp {
    pub fn as_str(&self) -> &'static str {
        match self {
            BooleanOp::Union => "union",
            BooleanOp::Difference => "difference",
            BooleanOp::Intersection => "intersection",
        }
    }
}

/// Edge refinement features that are declared but have no geometry yet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Feature {
    Fillet,
    Chamfer,
}

impl Feature {
    pub fn as_str(&self) -> &'static str {
        match self {
            Feature::Fillet => "fillet",
            Feature::Chamfer => "chamfer",
        }
    }
}

/// What the operation applier does with one operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationStep {
    /// Combine the current solid with the second operand
    Boolean(BooleanOp),
    /// Recognised but without an implementation; geometry passes through
    NotImplemented(Feature),
    /// `boolean` paired with a non-boolean operator
    Skipped,
}

/// One entry of a shape's ordered operation list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Operation {
    #[serde(rename = "type")]
    pub kind: OperationType,
    #[serde(default)]
    pub operation: Operator,
    #[serde(default)]
    pub parameters: BTreeMap<String, f64>,
    /// Second boolean operand. When absent the placeholder unit cube is used.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operand: Option<Box<Shape>>,
}

impl Operation {
    /// Boolean operation against the placeholder operand
    pub fn boolean(op: BooleanOp) -> Self {
        let operation = match op {
            BooleanOp::Union => Operator::Union,
            BooleanOp::Difference => Operator::Difference,
            BooleanOp::Intersection => Operator::Intersection,
        };
        Self {
            kind: OperationType::Boolean,
            operation,
            parameters: BTreeMap::new(),
            operand: None,
        }
    }

    pub fn fillet(radius: f64) -> Self {
        Self {
            kind: OperationType::Fillet,
            operation: Operator::Edge,
            parameters: BTreeMap::from([("radius".to_string(), radius)]),
            operand: None,
        }
    }

    pub fn chamfer(distance: f64) -> Self {
        Self {
            kind: OperationType::Chamfer,
            operation: Operator::Edge,
            parameters: BTreeMap::from([("distance".to_string(), distance)]),
            operand: None,
        }
    }

    /// Use `shape` as the second operand instead of the placeholder
    pub fn with_operand(mut self, shape: Shape) -> Self {
        self.operand = Some(Box::new(shape));
        self
    }

    /// Resolve the tagged pair into the step the applier dispatches on
    pub fn step(&self) -> OperationStep {
        match (self.kind, self.operation) {
            (OperationType::Boolean, Operator::Union) => OperationStep::Boolean(BooleanOp::Union),
            (OperationType::Boolean, Operator::Difference) => {
                OperationStep::Boolean(BooleanOp::Difference)
            }
            (OperationType::Boolean, Operator::Intersection) => {
                OperationStep::Boolean(BooleanOp::Intersection)
            }
            (OperationType::Boolean, Operator::Edge) => OperationStep::Skipped,
            (OperationType::Fillet, _) => OperationStep::NotImplemented(Feature::Fillet),
            (OperationType::Chamfer, _) => OperationStep::NotImplemented(Feature::Chamfer),
        }
    }
}

/// Surface appearance. Carried through the pipeline untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Material {
    #[serde(default = "default_color")]
    pub color: String,
    #[serde(default)]
    pub metalness: f64,
    #[serde(default = "default_roughness")]
    pub roughness: f64,
}

fn default_color() -> String {
    "#ffffff".to_string()
}

fn default_roughness() -> f64 {
    1.0
}

impl Material {
    /// Colour as RGBA in 0-1 range, `None` if the string is not a supported CSS colour
    pub fn rgba(&self) -> Option<[f32; 4]> {
        parse_css_color(&self.color)
    }
}

impl Default for Material {
    fn default() -> Self {
        Self {
            color: default_color(),
            metalness: 0.0,
            roughness: 1.0,
        }
    }
}

/// Root descriptor of one parametric solid
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shape {
    #[serde(rename = "type", default)]
    pub kind: ShapeKind,
    pub shape: Primitive,
    #[serde(default)]
    pub parameters: ShapeParameters,
    #[serde(default)]
    pub position: [f64; 3],
    /// Euler angles in radians, applied X then Y then Z
    #[serde(default)]
    pub rotation: [f64; 3],
    #[serde(default)]
    pub operations: Vec<Operation>,
    #[serde(default)]
    pub material: Material,
}

impl Shape {
    /// Primitive at the origin with default parameters and material
    pub fn new(primitive: impl Into<Primitive>) -> Self {
        Self {
            kind: ShapeKind::Primitive,
            shape: primitive.into(),
            parameters: ShapeParameters::default(),
            position: [0.0; 3],
            rotation: [0.0; 3],
            operations: Vec::new(),
            material: Material::default(),
        }
    }

    /// Parse a descriptor from JSON
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serialize the descriptor back to JSON
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn with_parameters(mut self, parameters: ShapeParameters) -> Self {
        self.parameters = parameters;
        self
    }

    pub fn at(mut self, position: [f64; 3]) -> Self {
        self.position = position;
        self
    }

    pub fn rotated(mut self, rotation: [f64; 3]) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn with_operation(mut self, operation: Operation) -> Self {
        self.operations.push(operation);
        self
    }

    pub fn with_material(mut self, material: Material) -> Self {
        self.material = material;
        self
    }
}
