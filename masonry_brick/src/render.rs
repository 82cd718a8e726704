// Copyright 2025 the Masonry Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Render properties: the whole contract between a brick and the drawing layer.

use alloc::string::String;
use alloc::vec::Vec;
use kurbo::{Point, Size};

use crate::types::Color;

/// Argument labels and slot extents of an argument-bearing brick.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ArgRenderProps {
    /// Slot labels in declaration order.
    pub label_args: Vec<String>,
    /// Slot extents in declaration order; measured extents where reported.
    pub bounding_box_args: Vec<Size>,
}

/// Where other bricks attach to a brick, at its current scale.
///
/// Each anchor is the top-left corner of the matching notch or slot box; a
/// connection the brick does not have is `None` (or, for slots, absent).
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ConnectionPoints {
    /// One per argument slot, in declaration order.
    pub args_incoming: Vec<Point>,
    /// The outgoing tab of value and expression bricks.
    pub args_outgoing: Option<Point>,
    /// The top insertion notch.
    pub top: Option<Point>,
    /// The bottom insertion notch.
    pub bottom: Option<Point>,
    /// The notch under a block's nest ceiling.
    pub top_inner: Option<Point>,
}

/// Variant-specific render properties.
#[derive(Clone, Debug, PartialEq)]
pub enum RenderExtras {
    /// Value bricks carry nothing extra.
    Value,
    /// Expression bricks.
    Expression(ArgRenderProps),
    /// Statement bricks.
    Statement(ArgRenderProps),
    /// Block bricks.
    Block {
        /// Argument labels and extents.
        args: ArgRenderProps,
        /// Extent of the nested contents.
        bounding_box_nest: Size,
        /// Whether the nested contents are hidden.
        folded: bool,
    },
}

/// Properties required to draw one brick.
///
/// `path` is SVG path data in unit space; the renderer applies `scale`.
#[derive(Clone, Debug, PartialEq)]
pub struct RenderProps {
    /// Outline as SVG path data, unscaled.
    pub path: String,
    /// Display label.
    pub label: String,
    /// Optional glyph.
    pub glyph: Option<String>,
    /// Background, or its highlighted variant while highlighted.
    pub color_bg: Color,
    /// Foreground, or its highlighted variant while highlighted.
    pub color_fg: Color,
    /// Outline stroke.
    pub outline: Color,
    /// Scale factor to draw at.
    pub scale: f64,
    /// Variant-specific extras.
    pub extras: RenderExtras,
}

impl RenderProps {
    /// Argument labels and extents, for argument-bearing bricks.
    pub fn args(&self) -> Option<&ArgRenderProps> {
        match &self.extras {
            RenderExtras::Value => None,
            RenderExtras::Expression(args)
            | RenderExtras::Statement(args)
            | RenderExtras::Block { args, .. } => Some(args),
        }
    }

    /// Extent of the nest, for block bricks.
    pub fn bounding_box_nest(&self) -> Option<Size> {
        match self.extras {
            RenderExtras::Block {
                bounding_box_nest, ..
            } => Some(bounding_box_nest),
            _ => None,
        }
    }

    /// Fold state, for block bricks.
    pub fn folded(&self) -> Option<bool> {
        match self.extras {
            RenderExtras::Block { folded, .. } => Some(folded),
            _ => None,
        }
    }
}
