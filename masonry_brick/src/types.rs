// Copyright 2025 the Masonry Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Identifiers, discriminants, data types and style.

use alloc::string::String;
use core::fmt;

/// Identifier of a brick; unique within a [`Registry`](crate::Registry).
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BrickId(String);

impl BrickId {
    /// Wrap a string as an identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BrickId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for BrickId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for BrickId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Identifier of an argument slot, unique within its brick.
///
/// A child whose [`BrickId`] has the same text fills the slot.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ArgId(String);

impl ArgId {
    /// Wrap a string as an identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether `brick` fills this slot.
    pub fn matches(&self, brick: &BrickId) -> bool {
        self.0 == brick.0
    }
}

impl fmt::Display for ArgId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ArgId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// Whether a brick produces a value or performs an action.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BrickKind {
    /// Value and expression bricks.
    Argument,
    /// Statement and block bricks.
    Instruction,
}

/// The four brick variants.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BrickType {
    /// A literal or named value.
    Value,
    /// A value computed from arguments.
    Expression,
    /// A single instruction.
    Statement,
    /// An instruction enclosing a nested stack of instructions.
    Block,
}

impl BrickType {
    /// The kind this type belongs to.
    pub const fn kind(self) -> BrickKind {
        match self {
            Self::Value | Self::Expression => BrickKind::Argument,
            Self::Statement | Self::Block => BrickKind::Instruction,
        }
    }
}

/// Declared data type of a produced value or an argument slot.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum DataType {
    /// Wildcard; as a slot type it accepts every value.
    #[default]
    Any,
    /// `true` / `false`.
    Boolean,
    /// A number.
    Number,
    /// A string.
    String,
}

impl DataType {
    /// Whether a slot of this type accepts a value of type `value`.
    pub fn accepts(self, value: Self) -> bool {
        self == Self::Any || self == value
    }
}

/// Literal held by a dynamic value brick.
#[derive(Clone, Debug, PartialEq)]
pub enum Literal {
    /// A boolean.
    Boolean(bool),
    /// A number.
    Number(f64),
    /// A string.
    String(String),
}

impl Literal {
    /// The data type of this literal.
    pub fn data_type(&self) -> DataType {
        match self {
            Self::Boolean(_) => DataType::Boolean,
            Self::Number(_) => DataType::Number,
            Self::String(_) => DataType::String,
        }
    }
}

/// How a dynamic value brick is edited.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum InputMode {
    /// A checkbox.
    Boolean,
    /// A number box.
    Number,
    /// A text box.
    String,
    /// A dropdown.
    Options,
}

/// A colour as understood by the rendering layer.
#[derive(Clone, Debug, PartialEq)]
pub enum Color {
    /// Red, green, blue.
    Rgb(f64, f64, f64),
    /// Hue, saturation, lightness.
    Hsl(f64, f64, f64),
    /// Any CSS colour string (`"#ff8800"`, `"teal"`).
    Css(String),
}

impl From<&str> for Color {
    fn from(css: &str) -> Self {
        Self::Css(css.into())
    }
}

/// Colours of a brick.
#[derive(Clone, Debug, PartialEq)]
pub struct BrickStyle {
    /// Background.
    pub color_bg: Color,
    /// Foreground (label and glyph).
    pub color_fg: Color,
    /// Background while highlighted.
    pub color_bg_highlight: Color,
    /// Foreground while highlighted.
    pub color_fg_highlight: Color,
    /// Outline stroke.
    pub outline: Color,
}

impl Default for BrickStyle {
    fn default() -> Self {
        Self {
            color_bg: Color::from("#ffffff"),
            color_fg: Color::from("#000000"),
            color_bg_highlight: Color::from("#ffd54f"),
            color_fg_highlight: Color::from("#000000"),
            outline: Color::from("#595959"),
        }
    }
}

/// Declaration of one argument slot.
#[derive(Clone, Debug, PartialEq)]
pub struct ArgSlot {
    /// Slot identifier.
    pub id: ArgId,
    /// Label drawn next to the slot.
    pub label: String,
    /// Type the slot accepts.
    pub data_type: DataType,
}

impl ArgSlot {
    /// Declare a slot.
    pub fn new(id: impl Into<String>, label: impl Into<String>, data_type: DataType) -> Self {
        Self {
            id: ArgId::new(id),
            label: label.into(),
            data_type,
        }
    }
}
