// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Parameter panel descriptors
//!
//! Each primitive exposes a fixed set of editable dimensions. The panel
//! renders one slider per [`ParameterSpec`] and writes edits back through
//! [`ShapeParameters::set`](crate::ShapeParameters::set).

use crate::shape::{Primitive, Shape, DEFAULT_LINEAR, DEFAULT_RADIUS, DEFAULT_SEGMENTS};
use serde::Serialize;

/// One slider in the parameter panel
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParameterSpec {
    pub name: &'static str,
    /// Current value (the default when the shape leaves it unset)
    pub value: f64,
    pub default: f64,
    pub min: f64,
    pub max: f64,
    pub step: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit: Option<&'static str>,
}

impl ParameterSpec {
    fn linear(name: &'static str, default: f64) -> Self {
        Self {
            name,
            value: default,
            default,
            min: 0.1,
            max: 10.0,
            step: 0.1,
            unit: Some("m"),
        }
    }

    fn segments() -> Self {
        Self {
            name: "segments",
            value: DEFAULT_SEGMENTS as f64,
            default: DEFAULT_SEGMENTS as f64,
            min: 3.0,
            max: 128.0,
            step: 1.0,
            unit: None,
        }
    }
}

/// Editable dimensions of a primitive, at their defaults.
///
/// Unsupported primitives have no panel.
pub fn parameter_specs(primitive: &Primitive) -> Vec<ParameterSpec> {
    match primitive {
        Primitive::Cube => vec![
            ParameterSpec::linear("width", DEFAULT_LINEAR),
            ParameterSpec::linear("height", DEFAULT_LINEAR),
            ParameterSpec::linear("depth", DEFAULT_LINEAR),
        ],
        Primitive::Cylinder | Primitive::Cone => vec![
            ParameterSpec::linear("radius", DEFAULT_RADIUS),
            ParameterSpec::linear("height", DEFAULT_LINEAR),
            ParameterSpec::segments(),
        ],
        Primitive::Sphere => vec![
            ParameterSpec::linear("radius", DEFAULT_RADIUS),
            ParameterSpec::segments(),
        ],
        Primitive::Other(_) => Vec::new(),
    }
}

impl Shape {
    /// Panel descriptors filled with this shape's current values
    pub fn parameter_panel(&self) -> Vec<ParameterSpec> {
        parameter_specs(&self.shape)
            .into_iter()
            .map(|mut spec| {
                if let Some(value) = self.parameters.get(spec.name) {
                    spec.value = value;
                }
                spec
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shape::ShapeParameters;

    #[test]
    fn test_panel_per_primitive() {
        let names = |p: Primitive| -> Vec<&'static str> {
            parameter_specs(&p).iter().map(|s| s.name).collect()
        };
        assert_eq!(names(Primitive::Cube), vec!["width", "height", "depth"]);
        assert_eq!(names(Primitive::Cone), vec!["radius", "height", "segments"]);
        assert_eq!(names(Primitive::Sphere), vec!["radius", "segments"]);
        assert!(names(Primitive::Other("torus".into())).is_empty());
    }

    #[test]
    fn test_panel_reflects_current_values() {
        let mut shape = Shape::new(Primitive::Sphere).with_parameters(ShapeParameters {
            radius: Some(2.0),
            ..Default::default()
        });
        shape.parameters.set("segments", 12.0).unwrap();

        let panel = shape.parameter_panel();
        assert_eq!(panel[0].value, 2.0);
        assert_eq!(panel[0].default, DEFAULT_RADIUS);
        assert_eq!(panel[1].value, 12.0);
    }

    #[test]
    fn test_slider_bounds_pass_validation() {
        for primitive in [Primitive::Cube, Primitive::Cylinder, Primitive::Sphere, Primitive::Cone] {
            for spec in parameter_specs(&primitive) {
                let mut params = ShapeParameters::default();
                assert!(params.set(spec.name, spec.min).is_ok(), "{} min", spec.name);
                assert!(params.set(spec.name, spec.max).is_ok(), "{} max", spec.name);
            }
        }
    }
}
