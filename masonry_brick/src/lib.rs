// Copyright 2025 the Masonry Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Masonry Brick: typed program bricks and the tree that composes them.
//!
//! A brick is one puzzle piece of a block-based program editor. This crate
//! models the four brick variants, keeps them in a [`Registry`], and assembles
//! them into a program in a [`Stack`].
//!
//! ## Bricks
//!
//! - Argument bricks produce a typed value: [`BrickType::Value`] (a literal or
//!   variable, optionally editable) and [`BrickType::Expression`] (an operation
//!   over argument slots).
//! - Instruction bricks perform an action: [`BrickType::Statement`] and
//!   [`BrickType::Block`], which also owns a nested region of further instructions.
//!
//! Each [`Brick`] generates its unit-space outline once (via [`masonry_path`]) and
//! applies its current scale, measured argument extents, and highlight state on
//! read. See [`Brick::bbox_brick`] and [`Brick::render_props`].
//!
//! ## Registry
//!
//! [`Registry`] is a flat identifier lookup with one factory per variant, taking
//! [`ValueParams`], [`ExpressionParams`], [`StatementParams`], or [`BlockParams`].
//!
//! ## Stack
//!
//! [`Stack`] is an ordered forest of bricks. Edits ([`Stack::add_node`],
//! [`Stack::remove_node`], [`Stack::move_node`], [`Stack::collapse`],
//! [`Stack::expand`]) are atomic and keep every block's nest extent equal to the
//! widest child by the summed child heights. [`Stack::validation_errors`] lists
//! connection and argument-type problems without rejecting anything.
//!
//! ```rust
//! use masonry_brick::{
//!     ArgSlot, BlockParams, BrickParams, DataType, Registry, Stack, StackNode,
//!     StatementParams, ValueParams,
//! };
//!
//! let mut registry = Registry::new();
//! let repeat = registry
//!     .create_block(BlockParams {
//!         brick: BrickParams::labeled("repeat"),
//!         args: vec![ArgSlot::new("times", "times", DataType::Number)],
//!         ..BlockParams::default()
//!     })
//!     .unwrap();
//! let times = registry
//!     .create_value(ValueParams {
//!         brick: BrickParams::labeled("4").with_id("times"),
//!         data_type: DataType::Number,
//!         ..ValueParams::default()
//!     })
//!     .unwrap();
//! let step = registry
//!     .create_statement(StatementParams {
//!         brick: BrickParams::labeled("step"),
//!         ..StatementParams::default()
//!     })
//!     .unwrap();
//!
//! let mut stack = Stack::new("main");
//! stack
//!     .add_node(
//!         &mut registry,
//!         StackNode::new(repeat.clone())
//!             .with_child(StackNode::new(times))
//!             .with_child(StackNode::new(step)),
//!         None,
//!     )
//!     .unwrap();
//!
//! assert!(stack.validate(&registry));
//! assert!(registry.get(&repeat).unwrap().nest_extent().unwrap().height > 0.0);
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod brick;
mod error;
mod factory;
mod registry;
mod render;
mod stack;
mod types;
mod validate;

pub use brick::{
    ARG_ROW_LENGTH_Y, ArgumentSlots, Brick, DEFAULT_INNER_LENGTH_X, DEFAULT_NEST_LENGTH_Y,
    NestedRegion, Variant, VerticalConnections,
};
pub use error::{ConfigurationError, Edge, StructuralError, ValidationError};
pub use factory::{BlockParams, BrickParams, ExpressionParams, StatementParams, ValueParams};
pub use registry::Registry;
pub use render::{ArgRenderProps, ConnectionPoints, RenderExtras, RenderProps};
pub use stack::{Stack, StackNode};
pub use types::{
    ArgId, ArgSlot, BrickId, BrickKind, BrickStyle, BrickType, Color, DataType, InputMode, Literal,
};
