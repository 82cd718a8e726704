// Copyright 2025 the Masonry Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Fixed unit-space metrics shared by every generated outline.
//!
//! All values are in unit space; multiply by a brick's scale to obtain
//! render-space lengths.

/// Padding above the first argument row (holds the label row).
pub const PADDING_TOP: f64 = 10.0;

/// Padding below the last row or the nest.
pub const PADDING_BOTTOM: f64 = 10.0;

/// Horizontal depth of an argument notch.
pub const NOTCH_ARG_LENGTH_X: f64 = 8.0;

/// Vertical span of an argument notch.
pub const NOTCH_ARG_LENGTH_Y: f64 = 10.0;

/// Horizontal span of an insertion notch.
pub const NOTCH_INS_LENGTH_X: f64 = 12.0;

/// Vertical depth of an insertion notch.
pub const NOTCH_INS_LENGTH_Y: f64 = 4.0;

/// Width of the arm on the left of a nest.
pub const NEST_ARM_LENGTH_X: f64 = 12.0;
