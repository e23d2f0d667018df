// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Descriptor validation
//!
//! Rejects values that would produce degenerate geometry before any mesh is
//! built. Absent parameters are fine; they take their defaults.

use crate::error::{Error, Result};
use crate::shape::Shape;

/// Minimum subdivision count for curved primitives
pub const MIN_SEGMENTS: f64 = 3.0;

/// Upper bound on subdivisions; keeps a single primitive under ~1M vertices
pub const MAX_SEGMENTS: f64 = 1024.0;

/// Validate a single named dimension
pub fn check_parameter(name: &str, value: f64) -> Result<()> {
    if !value.is_finite() {
        return Err(Error::invalid(name, value, "must be a finite number"));
    }
    if name == "segments" {
        if value.fract() != 0.0 {
            return Err(Error::invalid(name, value, "must be an integer"));
        }
        if value < MIN_SEGMENTS {
            return Err(Error::invalid(name, value, "must be at least 3"));
        }
        if value > MAX_SEGMENTS {
            return Err(Error::invalid(name, value, "must be at most 1024"));
        }
    } else if value <= 0.0 {
        return Err(Error::invalid(name, value, "must be greater than zero"));
    }
    Ok(())
}

fn check_vector(name: &str, values: &[f64; 3]) -> Result<()> {
    for (axis, value) in values.iter().enumerate() {
        if !value.is_finite() {
            return Err(Error::invalid(
                format!("{name}[{axis}]"),
                *value,
                "must be a finite number",
            ));
        }
    }
    Ok(())
}

impl Shape {
    /// Check every dimension, the pose, and nested operands.
    pub fn validate(&self) -> Result<()> {
        self.validate_at("")
    }

    fn validate_at(&self, prefix: &str) -> Result<()> {
        let p = &self.parameters;
        let dimensions = [
            ("width", p.width),
            ("height", p.height),
            ("depth", p.depth),
            ("radius", p.radius),
            ("segments", p.segments),
        ];
        for (name, value) in dimensions {
            if let Some(value) = value {
                check_parameter(name, value).map_err(|e| with_prefix(e, prefix))?;
            }
        }

        check_vector("position", &self.position).map_err(|e| with_prefix(e, prefix))?;
        check_vector("rotation", &self.rotation).map_err(|e| with_prefix(e, prefix))?;

        for (index, operation) in self.operations.iter().enumerate() {
            if let Some(operand) = &operation.operand {
                operand.validate_at(&format!("{prefix}operations[{index}].operand."))?;
            }
        }
        Ok(())
    }
}

fn with_prefix(error: Error, prefix: &str) -> Error {
    match error {
        Error::InvalidParameter {
            name,
            value,
            reason,
        } if !prefix.is_empty() => Error::InvalidParameter {
            name: format!("{prefix}{name}"),
            value,
            reason,
        },
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shape::{BooleanOp, Operation, Primitive, ShapeParameters};

    #[test]
    fn test_defaults_are_valid() {
        for primitive in ["cube", "cylinder", "sphere", "cone"] {
            assert!(Shape::new(primitive).validate().is_ok());
        }
    }

    #[test]
    fn test_rejects_non_positive_dimensions() {
        let shape = Shape::new(Primitive::Cube).with_parameters(ShapeParameters {
            width: Some(0.0),
            ..Default::default()
        });
        match shape.validate() {
            Err(Error::InvalidParameter { name, value, .. }) => {
                assert_eq!(name, "width");
                assert_eq!(value, 0.0);
            }
            other => panic!("expected InvalidParameter, got {:?}", other),
        }
    }

    #[test]
    fn test_rejects_bad_segments() {
        for segments in [2.0, 8.5, 4096.0, f64::NAN] {
            let shape = Shape::new(Primitive::Sphere).with_parameters(ShapeParameters {
                segments: Some(segments),
                ..Default::default()
            });
            assert!(shape.validate().is_err(), "segments = {segments}");
        }
    }

    #[test]
    fn test_rejects_non_finite_pose() {
        let shape = Shape::new(Primitive::Cube).at([0.0, f64::INFINITY, 0.0]);
        match shape.validate() {
            Err(Error::InvalidParameter { name, .. }) => assert_eq!(name, "position[1]"),
            other => panic!("expected InvalidParameter, got {:?}", other),
        }
    }

    #[test]
    fn test_nested_operand_errors_name_their_path() {
        let operand = Shape::new(Primitive::Cylinder).with_parameters(ShapeParameters {
            radius: Some(-0.2),
            ..Default::default()
        });
        let shape = Shape::new(Primitive::Cube)
            .with_operation(Operation::fillet(0.1))
            .with_operation(Operation::boolean(BooleanOp::Difference).with_operand(operand));
        match shape.validate() {
            Err(Error::InvalidParameter { name, .. }) => {
                assert_eq!(name, "operations[1].operand.radius")
            }
            other => panic!("expected InvalidParameter, got {:?}", other),
        }
    }
}
