// Copyright 2025 the Masonry Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Shape parameters accepted by the generator.

use alloc::vec::Vec;

bitflags::bitflags! {
    /// Which optional features an outline carries.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct ShapeFlags: u8 {
        /// The outline encloses a nested region (block bricks).
        const NEST          = 0b0000_0001;
        /// The outline has an outgoing argument tab on its left edge.
        const NOTCH_ARG     = 0b0000_0010;
        /// The top edge accepts an instruction from above.
        const NOTCH_INS_TOP = 0b0000_0100;
        /// The bottom edge offers a connection to an instruction below.
        const NOTCH_INS_BOT = 0b0000_1000;
    }
}

/// Input to [`generate_path`](crate::generate_path).
///
/// Lengths are in unit space. `scale` is validated here but not applied: the
/// generated geometry stays in unit space and is scaled on read.
#[derive(Clone, Debug, PartialEq)]
pub struct PathParams {
    /// Optional outline features.
    pub flags: ShapeFlags,
    /// Scale the caller intends to render at. Must be positive.
    pub scale: f64,
    /// Width of the body.
    pub inner_length_x: f64,
    /// Height of the nested region; required when [`ShapeFlags::NEST`] is set.
    pub nest_length_y: Option<f64>,
    /// Height of every argument row, in declaration order.
    pub arg_heights: Vec<f64>,
}

impl Default for PathParams {
    fn default() -> Self {
        Self {
            flags: ShapeFlags::empty(),
            scale: 1.0,
            inner_length_x: 100.0,
            nest_length_y: None,
            arg_heights: Vec::new(),
        }
    }
}
