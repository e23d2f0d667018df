// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Operation applier
//!
//! Folds a shape's operation list over its posed base mesh, in list order.
//! Boolean steps combine the running mesh with a second operand; fillet and
//! chamfer resolve to [`OperationStep::NotImplemented`] and leave the mesh
//! as it is, recording a [`Notice`] so callers can tell they were requested.
//!
//! Meshes carry no material. The shape's own material is attached to the
//! output by the caller, so a boolean never picks up the operand's material.

use crate::csg;
use crate::error::{Error, Result};
use crate::mesh::Mesh;
use crate::pipeline::build_solid;
use crate::primitives::box_mesh;
use psycad_core::{Feature, Operation, OperationStep};
use serde::{Deserialize, Serialize};

/// Non-fatal information about an operation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Notice {
    /// The operation is recognised but has no geometry implementation
    NotImplemented { index: usize, feature: Feature },
    /// A `boolean` operation carried a non-boolean operator
    Skipped { index: usize, operator: String },
    /// Notice raised while building the second operand of operation `index`
    InOperand { index: usize, notice: Box<Notice> },
}

/// Running state of the fold
#[derive(Debug, Clone)]
pub struct Applied {
    pub mesh: Mesh,
    pub notices: Vec<Notice>,
}

/// Second operand used when an operation names none: a unit cube at the origin
pub fn placeholder_operand() -> Mesh {
    box_mesh(1.0, 1.0, 1.0)
}

/// Apply `operations` to `base` in order, threading the mesh through each step
pub fn apply_operations(base: Mesh, operations: &[Operation]) -> Result<Applied> {
    let initial = Applied {
        mesh: base,
        notices: Vec::new(),
    };

    operations
        .iter()
        .enumerate()
        .try_fold(initial, |state, (index, operation)| {
            apply_operation(state, index, operation)
        })
}

fn apply_operation(mut state: Applied, index: usize, operation: &Operation) -> Result<Applied> {
    match operation.step() {
        OperationStep::Boolean(op) => {
            let operand = match &operation.operand {
                Some(shape) => {
                    let built = build_solid(shape).map_err(|e| Error::InOperand {
                        index,
                        source: Box::new(e),
                    })?;
                    state.notices.extend(built.notices.into_iter().map(|notice| {
                        Notice::InOperand {
                            index,
                            notice: Box::new(notice),
                        }
                    }));
                    built.mesh
                }
                None => placeholder_operand(),
            };

            let mesh = csg::boolean(&state.mesh, &operand, op)
                .map_err(|e| Error::operation(index, op.as_str(), e.to_string()))?;

            tracing::debug!(
                index,
                operation = op.as_str(),
                vertices_before = state.mesh.vertex_count(),
                vertices_after = mesh.vertex_count(),
                "Applied boolean operation"
            );
            if mesh.is_empty() {
                tracing::debug!(index, operation = op.as_str(), "Boolean produced an empty solid");
            }

            state.mesh = mesh;
        }
        OperationStep::NotImplemented(feature) => {
            tracing::warn!(index, feature = feature.as_str(), "Operation not implemented, geometry unchanged");
            state.notices.push(Notice::NotImplemented { index, feature });
        }
        OperationStep::Skipped => {
            let operator = operation.operation.as_str();
            tracing::warn!(index, operator, "Boolean operation without a boolean operator skipped");
            state.notices.push(Notice::Skipped {
                index,
                operator: operator.to_string(),
            });
        }
    }
    Ok(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use psycad_core::{BooleanOp, Operator, OperationType};
    use std::collections::BTreeMap;

    #[test]
    fn test_empty_list_is_identity() {
        let base = box_mesh(2.0, 1.0, 1.0);
        let applied = apply_operations(base.clone(), &[]).unwrap();
        assert_eq!(applied.mesh, base);
        assert!(applied.notices.is_empty());
    }

    #[test]
    fn test_fillet_and_chamfer_pass_through() {
        let base = box_mesh(2.0, 2.0, 2.0);
        let ops = [Operation::fillet(0.1), Operation::chamfer(0.05)];
        let applied = apply_operations(base.clone(), &ops).unwrap();
        assert_eq!(applied.mesh, base);
        assert_eq!(
            applied.notices,
            vec![
                Notice::NotImplemented { index: 0, feature: Feature::Fillet },
                Notice::NotImplemented { index: 1, feature: Feature::Chamfer },
            ]
        );
    }

    #[test]
    fn test_boolean_with_edge_operator_is_skipped() {
        let base = box_mesh(1.0, 1.0, 1.0);
        let op = Operation {
            kind: OperationType::Boolean,
            operation: Operator::Edge,
            parameters: BTreeMap::new(),
            operand: None,
        };
        let applied = apply_operations(base.clone(), &[op]).unwrap();
        assert_eq!(applied.mesh, base);
        assert_eq!(
            applied.notices,
            vec![Notice::Skipped { index: 0, operator: "edge".to_string() }]
        );
    }

    #[test]
    fn test_failure_names_operation_index() {
        // Running mesh made of a single zero-area triangle
        let mut flat = Mesh::new();
        let uv = nalgebra::Point2::origin();
        for x in [0.0, 1.0, 2.0] {
            flat.add_vertex(nalgebra::Point3::new(x, 0.0, 0.0), nalgebra::Vector3::z(), uv);
        }
        flat.add_triangle(0, 1, 2);

        let ops = [Operation::fillet(0.1), Operation::boolean(BooleanOp::Union)];
        match apply_operations(flat, &ops) {
            Err(Error::GeometryOperation { index, operation, .. }) => {
                assert_eq!(index, 1);
                assert_eq!(operation, "union");
            }
            other => panic!("expected GeometryOperation, got {:?}", other.map(|a| a.notices)),
        }
    }
}
