// Copyright 2025 the Masonry Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-variant construction parameters.
//!
//! Each parameter struct has a `Default` so callers only spell out what they
//! need. [`Registry`](crate::Registry) turns them into registered bricks.

use alloc::string::String;
use alloc::vec::Vec;

use crate::brick::{
    ArgumentSlots, Brick, DEFAULT_INNER_LENGTH_X, DEFAULT_NEST_LENGTH_Y, Variant,
    VerticalConnections,
};
use crate::error::ConfigurationError;
use crate::types::{ArgSlot, BrickId, BrickStyle, DataType, InputMode, Literal};

/// Parameters shared by every variant.
#[derive(Clone, Debug, PartialEq)]
pub struct BrickParams {
    /// Requested identifier; a fresh one is minted when `None`.
    pub id: Option<BrickId>,
    /// Internal bookkeeping name.
    pub name: String,
    /// Display label.
    pub label: String,
    /// Optional glyph.
    pub glyph: Option<String>,
    /// Colours.
    pub style: BrickStyle,
    /// Scale factor; must be positive.
    pub scale: f64,
    /// Body width in unit space; must be positive.
    pub inner_length_x: f64,
}

impl Default for BrickParams {
    fn default() -> Self {
        Self {
            id: None,
            name: String::new(),
            label: String::new(),
            glyph: None,
            style: BrickStyle::default(),
            scale: 1.0,
            inner_length_x: DEFAULT_INNER_LENGTH_X,
        }
    }
}

impl BrickParams {
    /// Parameters with the given label and defaults elsewhere.
    pub fn labeled(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            ..Self::default()
        }
    }

    /// Request a specific identifier.
    #[must_use]
    pub fn with_id(mut self, id: impl Into<BrickId>) -> Self {
        self.id = Some(id.into());
        self
    }

    fn build(self, id: BrickId, variant: Variant) -> Result<Brick, ConfigurationError> {
        Brick::new(
            id,
            self.name,
            self.label,
            self.glyph,
            self.style,
            self.scale,
            self.inner_length_x,
            variant,
        )
    }
}

/// Parameters of a value brick.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ValueParams {
    /// Shared parameters.
    pub brick: BrickParams,
    /// Declared output type.
    pub data_type: DataType,
    /// Whether the value is editable.
    pub dynamic: bool,
    /// Initial literal, for dynamic values.
    pub value: Option<Literal>,
    /// Editing mode, for dynamic values.
    pub input: Option<InputMode>,
}

impl ValueParams {
    /// Build an unregistered value brick.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError`] for invalid shape parameters or a literal
    /// that contradicts `data_type`.
    pub fn build(self, id: BrickId) -> Result<Brick, ConfigurationError> {
        let variant = Variant::Value {
            data_type: self.data_type,
            dynamic: self.dynamic,
            value: self.value,
            input: self.input,
        };
        self.brick.build(id, variant)
    }
}

/// Parameters of an expression brick.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ExpressionParams {
    /// Shared parameters.
    pub brick: BrickParams,
    /// Declared output type.
    pub data_type: DataType,
    /// Argument slots.
    pub args: Vec<ArgSlot>,
}

impl ExpressionParams {
    /// Build an unregistered expression brick.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError`] for invalid shape parameters or duplicate slots.
    pub fn build(self, id: BrickId) -> Result<Brick, ConfigurationError> {
        let variant = Variant::Expression {
            data_type: self.data_type,
            args: ArgumentSlots::new(self.args)?,
        };
        self.brick.build(id, variant)
    }
}

/// Parameters of a statement brick.
#[derive(Clone, Debug, PartialEq)]
pub struct StatementParams {
    /// Shared parameters.
    pub brick: BrickParams,
    /// Argument slots.
    pub args: Vec<ArgSlot>,
    /// Whether an instruction may connect above.
    pub connect_above: bool,
    /// Whether an instruction may connect below.
    pub connect_below: bool,
}

impl Default for StatementParams {
    fn default() -> Self {
        Self {
            brick: BrickParams::default(),
            args: Vec::new(),
            connect_above: true,
            connect_below: true,
        }
    }
}

impl StatementParams {
    /// Build an unregistered statement brick.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError`] for invalid shape parameters or duplicate slots.
    pub fn build(self, id: BrickId) -> Result<Brick, ConfigurationError> {
        let variant = Variant::Statement {
            args: ArgumentSlots::new(self.args)?,
            connections: VerticalConnections {
                above: self.connect_above,
                below: self.connect_below,
            },
        };
        self.brick.build(id, variant)
    }
}

/// Parameters of a block brick.
#[derive(Clone, Debug, PartialEq)]
pub struct BlockParams {
    /// Shared parameters.
    pub brick: BrickParams,
    /// Argument slots.
    pub args: Vec<ArgSlot>,
    /// Whether an instruction may connect above.
    pub connect_above: bool,
    /// Whether an instruction may connect below.
    pub connect_below: bool,
    /// Unit-space height reserved for the nest; must be positive.
    pub nest_length_y: f64,
    /// Whether the block starts folded.
    pub folded: bool,
}

impl Default for BlockParams {
    fn default() -> Self {
        Self {
            brick: BrickParams::default(),
            args: Vec::new(),
            connect_above: true,
            connect_below: true,
            nest_length_y: DEFAULT_NEST_LENGTH_Y,
            folded: false,
        }
    }
}

impl BlockParams {
    /// Build an unregistered block brick.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError`] for invalid shape parameters or duplicate slots.
    pub fn build(self, id: BrickId) -> Result<Brick, ConfigurationError> {
        let variant = Variant::block(
            ArgumentSlots::new(self.args)?,
            VerticalConnections {
                above: self.connect_above,
                below: self.connect_below,
            },
            self.nest_length_y,
            self.folded,
        );
        self.brick.build(id, variant)
    }
}
