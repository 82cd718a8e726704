// Copyright 2025 the Masonry Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The registry: a flat identifier to brick lookup table, plus the brick factories.

use alloc::format;
use hashbrown::HashMap;

use crate::brick::Brick;
use crate::error::ConfigurationError;
use crate::factory::{BlockParams, BrickParams, ExpressionParams, StatementParams, ValueParams};
use crate::types::BrickId;

/// Owns every brick of a document or session, keyed by identifier.
///
/// The registry is a lookup table, not an ownership authority over stacks:
/// deleting a brick does not detach it from any [`Stack`](crate::Stack).
///
/// ## Example
///
/// ```rust
/// use masonry_brick::{BrickParams, DataType, Registry, ValueParams};
///
/// let mut registry = Registry::new();
/// let id = registry
///     .create_value(ValueParams {
///         brick: BrickParams::labeled("pi"),
///         data_type: DataType::Number,
///         ..ValueParams::default()
///     })
///     .unwrap();
///
/// assert_eq!(registry.get(&id).unwrap().label(), "pi");
/// assert!(registry.delete(&id));
/// assert!(registry.get(&id).is_none());
/// ```
#[derive(Clone, Debug, Default)]
pub struct Registry {
    bricks: HashMap<BrickId, Brick>,
    next_id: u64,
}

impl Registry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `brick`, returning any brick previously stored under its identifier.
    pub fn add(&mut self, brick: Brick) -> Option<Brick> {
        self.bricks.insert(brick.id().clone(), brick)
    }

    /// Look up a brick.
    pub fn get(&self, id: &BrickId) -> Option<&Brick> {
        self.bricks.get(id)
    }

    /// Look up a brick mutably.
    pub fn get_mut(&mut self, id: &BrickId) -> Option<&mut Brick> {
        self.bricks.get_mut(id)
    }

    /// Remove a brick; returns whether it was present.
    pub fn delete(&mut self, id: &BrickId) -> bool {
        self.bricks.remove(id).is_some()
    }

    /// Whether a brick with this identifier is registered.
    pub fn contains(&self, id: &BrickId) -> bool {
        self.bricks.contains_key(id)
    }

    /// Number of registered bricks.
    pub fn len(&self) -> usize {
        self.bricks.len()
    }

    /// Whether no bricks are registered.
    pub fn is_empty(&self) -> bool {
        self.bricks.is_empty()
    }

    /// Iterate registered bricks in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = &Brick> + '_ {
        self.bricks.values()
    }

    /// Create and register a value brick.
    ///
    /// # Errors
    ///
    /// See [`ValueParams::build`]; also fails if the requested identifier is taken.
    pub fn create_value(&mut self, mut params: ValueParams) -> Result<BrickId, ConfigurationError> {
        let id = self.claim_id(&mut params.brick)?;
        Ok(self.register(params.build(id)?))
    }

    /// Create and register an expression brick.
    ///
    /// # Errors
    ///
    /// See [`ExpressionParams::build`]; also fails if the requested identifier is taken.
    pub fn create_expression(
        &mut self,
        mut params: ExpressionParams,
    ) -> Result<BrickId, ConfigurationError> {
        let id = self.claim_id(&mut params.brick)?;
        Ok(self.register(params.build(id)?))
    }

    /// Create and register a statement brick.
    ///
    /// # Errors
    ///
    /// See [`StatementParams::build`]; also fails if the requested identifier is taken.
    pub fn create_statement(
        &mut self,
        mut params: StatementParams,
    ) -> Result<BrickId, ConfigurationError> {
        let id = self.claim_id(&mut params.brick)?;
        Ok(self.register(params.build(id)?))
    }

    /// Create and register a block brick.
    ///
    /// # Errors
    ///
    /// See [`BlockParams::build`]; also fails if the requested identifier is taken.
    pub fn create_block(&mut self, mut params: BlockParams) -> Result<BrickId, ConfigurationError> {
        let id = self.claim_id(&mut params.brick)?;
        Ok(self.register(params.build(id)?))
    }

    /// Take the requested identifier, or mint a fresh one.
    fn claim_id(&mut self, params: &mut BrickParams) -> Result<BrickId, ConfigurationError> {
        match params.id.take() {
            Some(id) if self.contains(&id) => Err(ConfigurationError::DuplicateBrick(id)),
            Some(id) => Ok(id),
            None => loop {
                self.next_id += 1;
                let id = BrickId::new(format!("brick-{}", self.next_id));
                if !self.contains(&id) {
                    break Ok(id);
                }
            },
        }
    }

    fn register(&mut self, brick: Brick) -> BrickId {
        let id = brick.id().clone();
        log::debug!("registered {:?} brick `{id}`", brick.brick_type());
        self.add(brick);
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ArgSlot, BrickType, DataType};
    use alloc::vec;

    #[test]
    fn factories_register_with_fresh_ids() {
        let mut registry = Registry::new();
        let a = registry.create_statement(StatementParams::default()).unwrap();
        let b = registry.create_block(BlockParams::default()).unwrap();
        assert_ne!(a, b);
        assert_eq!(registry.len(), 2);
        assert_eq!(registry.get(&a).unwrap().brick_type(), BrickType::Statement);
        assert_eq!(registry.get(&b).unwrap().brick_type(), BrickType::Block);
    }

    #[test]
    fn minted_ids_skip_taken_ones() {
        let mut registry = Registry::new();
        registry
            .create_value(ValueParams {
                brick: BrickParams::default().with_id("brick-1"),
                ..ValueParams::default()
            })
            .unwrap();
        let minted = registry.create_value(ValueParams::default()).unwrap();
        assert_eq!(minted.as_str(), "brick-2");
    }

    #[test]
    fn requested_id_must_be_free() {
        let mut registry = Registry::new();
        let params = || StatementParams {
            brick: BrickParams::default().with_id("loop"),
            ..StatementParams::default()
        };
        registry.create_statement(params()).unwrap();
        assert_eq!(
            registry.create_statement(params()),
            Err(ConfigurationError::DuplicateBrick(BrickId::from("loop")))
        );
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn failed_construction_registers_nothing() {
        let mut registry = Registry::new();
        let err = registry.create_expression(ExpressionParams {
            args: vec![
                ArgSlot::new("x", "x", DataType::Number),
                ArgSlot::new("x", "again", DataType::Number),
            ],
            ..ExpressionParams::default()
        });
        assert!(matches!(err, Err(ConfigurationError::DuplicateArgument(_))));
        let err = registry.create_value(ValueParams {
            brick: BrickParams {
                scale: 0.0,
                ..BrickParams::default()
            },
            ..ValueParams::default()
        });
        assert!(matches!(err, Err(ConfigurationError::Shape(_))));
        assert!(registry.is_empty());
    }

    #[test]
    fn delete_reports_presence() {
        let mut registry = Registry::new();
        let id = registry.create_value(ValueParams::default()).unwrap();
        assert!(registry.delete(&id));
        assert!(!registry.delete(&id));
        assert!(registry.get(&id).is_none());
    }

    #[test]
    fn add_replaces_same_id() {
        let mut registry = Registry::new();
        let first = ValueParams::default().build(BrickId::from("v")).unwrap();
        let second = ValueParams {
            brick: BrickParams::labeled("second"),
            ..ValueParams::default()
        }
        .build(BrickId::from("v"))
        .unwrap();
        assert!(registry.add(first).is_none());
        assert!(registry.add(second).is_some());
        assert_eq!(registry.get(&BrickId::from("v")).unwrap().label(), "second");
    }
}
