// Copyright 2025 the Masonry Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Masonry Path: outline and bounding-box generation for program bricks.
//!
//! A brick is one puzzle piece of a block-based program editor. This crate turns a
//! small set of shape parameters into the brick's outline (a [`kurbo::BezPath`]) and
//! the bounding boxes of its connectable regions.
//!
//! - [`ShapeFlags`] selects the optional features: a nested region, an outgoing
//!   argument tab, and top/bottom insertion notches.
//! - [`PathParams`] carries the flags together with the body width, the nest
//!   height and one height per argument row.
//! - [`generate_path`] validates the parameters and returns a [`PathResult`].
//!
//! ## Unit space
//!
//! Geometry is produced once in unit space. [`PathParams::scale`] is validated but
//! not applied; callers multiply boxes by their current scale on read (see
//! [`BoundingBox::scale`]) so that rescaling never regenerates the outline.
//!
//! ## Regions are present only when implied
//!
//! A [`PathResult`] carries a box for a region if and only if the corresponding
//! flag was set (or, for argument slots, if argument rows were given). Absent
//! regions are reported as `None`, never as an empty box.
//!
//! ```rust
//! use masonry_path::{PathParams, Region, ShapeFlags, generate_path};
//!
//! let res = generate_path(&PathParams {
//!     flags: ShapeFlags::NOTCH_INS_TOP | ShapeFlags::NOTCH_INS_BOT,
//!     arg_heights: vec![17.0],
//!     ..PathParams::default()
//! })
//! .unwrap();
//!
//! assert!(res.region(Region::NotchInsTop).is_some());
//! assert!(res.region(Region::NotchArg).is_none());
//! assert_eq!(res.bbox_args().len(), 1);
//! assert_eq!(res.bbox_brick().scale(2.0).extent.width, 200.0);
//! ```
//!
//! This crate does not measure text; argument rows are sized by the caller.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod error;
pub mod metrics;
mod params;
mod path;
#[cfg(any(test, not(feature = "std")))]
mod svg;

pub use error::{ShapeError, ensure_non_negative, ensure_positive};
pub use params::{PathParams, ShapeFlags};
pub use path::{BoundingBox, PathResult, Region, generate_path};
