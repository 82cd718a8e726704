// Copyright 2025 the Masonry Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Whole-tree validation: connection capabilities and argument types.

use alloc::vec::Vec;

use crate::error::{Edge, ValidationError};
use crate::registry::Registry;
use crate::stack::{Stack, check_child};
use crate::types::{BrickId, BrickKind, BrickType};

impl Stack {
    /// Whether the tree is free of validation errors.
    ///
    /// Always `true` while validation is disabled.
    pub fn validate(&self, registry: &Registry) -> bool {
        !self.is_validation_enabled() || self.validation_errors(registry).is_empty()
    }

    /// Every validation finding, in pre-order.
    ///
    /// An instruction nested in a block counts as connected above (to the
    /// previous instruction or to the nest's top notch) and as connected below
    /// when another instruction follows it. Roots stand alone. An argument
    /// slot is matched by the child whose brick identifier equals the slot
    /// identifier; an unmatched slot is not an error. Every child is checked
    /// against what its parent currently accepts.
    pub fn validation_errors(&self, registry: &Registry) -> Vec<ValidationError> {
        let mut errors = Vec::new();
        let mut pending: Vec<&BrickId> = self.roots().iter().rev().collect();
        while let Some(id) = pending.pop() {
            self.check_node(registry, id, &mut errors);
            pending.extend(self.children_of(id).iter().rev());
        }
        errors
    }

    fn check_node(&self, registry: &Registry, id: &BrickId, errors: &mut Vec<ValidationError>) {
        let Some(brick) = registry.get(id) else {
            errors.push(ValidationError::MissingBrick { node: id.clone() });
            return;
        };

        if let Some(allowed) = brick.connections() {
            let (above, below) = self.connected_edges(registry, id);
            if above && !allowed.above {
                errors.push(ValidationError::InvalidConnection {
                    node: id.clone(),
                    edge: Edge::Above,
                });
            }
            if below && !allowed.below {
                errors.push(ValidationError::InvalidConnection {
                    node: id.clone(),
                    edge: Edge::Below,
                });
            }
        }

        let children = self.children_of(id);
        // Bricks can be reconfigured or replaced in the registry after insertion.
        for child in children {
            if let Some(child_brick) = registry.get(child)
                && check_child(brick, child_brick).is_err()
            {
                errors.push(ValidationError::InvalidChild {
                    node: id.clone(),
                    child: child.clone(),
                });
            }
        }
        for slot in brick.args() {
            let Some(child) = children.iter().find(|c| slot.id.matches(c)) else {
                continue;
            };
            if let Some(found) = registry.get(child).and_then(|c| c.data_type())
                && !slot.data_type.accepts(found)
            {
                errors.push(ValidationError::TypeMismatch {
                    arg: slot.id.clone(),
                    node: id.clone(),
                    expected: slot.data_type,
                    found,
                });
            }
        }
    }

    /// Which vertical edges of instruction `id` are joined to something.
    fn connected_edges(&self, registry: &Registry, id: &BrickId) -> (bool, bool) {
        let Some(parent) = self.parent_of(id) else {
            return (false, false);
        };
        let in_nest = registry
            .get(parent)
            .is_some_and(|p| p.brick_type() == BrickType::Block);
        let chain: Vec<&BrickId> = self
            .children_of(parent)
            .iter()
            .filter(|c| {
                registry
                    .get(c)
                    .is_some_and(|b| b.kind() == BrickKind::Instruction)
            })
            .collect();
        let Some(at) = chain.iter().position(|c| *c == id) else {
            return (false, false);
        };
        (in_nest || at > 0, at + 1 < chain.len())
    }
}
