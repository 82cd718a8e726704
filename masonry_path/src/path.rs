// Copyright 2025 the Masonry Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Outline generation: parameters in, unit-space outline and regions out.

use alloc::string::String;
use kurbo::{BezPath, Point, Rect, Size};
use smallvec::SmallVec;

use crate::error::{ShapeError, ensure_positive};
use crate::metrics::{
    NEST_ARM_LENGTH_X, NOTCH_ARG_LENGTH_X, NOTCH_ARG_LENGTH_Y, NOTCH_INS_LENGTH_X,
    NOTCH_INS_LENGTH_Y, PADDING_BOTTOM, PADDING_TOP,
};
use crate::params::{PathParams, ShapeFlags};
#[cfg(not(feature = "std"))]
use crate::svg::write_svg;

/// Size and top-left corner of a region.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct BoundingBox {
    /// Width and height of the region.
    pub extent: Size,
    /// Top-left corner, relative to the body's top-left corner.
    pub coords: Point,
}

impl BoundingBox {
    /// Create a box from its corner and size.
    pub const fn new(coords: Point, extent: Size) -> Self {
        Self { extent, coords }
    }

    /// Multiply both the extent and the coordinates by `k`.
    #[must_use]
    pub fn scale(self, k: f64) -> Self {
        Self {
            extent: self.extent * k,
            coords: Point::new(self.coords.x * k, self.coords.y * k),
        }
    }

    /// The box as a [`Rect`].
    pub fn rect(&self) -> Rect {
        Rect::from_origin_size(self.coords, self.extent)
    }
}

/// Named geometric regions of an outline.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Region {
    /// The whole body.
    Brick,
    /// Argument slot at the given declaration index.
    Arg(usize),
    /// Outgoing argument tab.
    NotchArg,
    /// Top insertion notch.
    NotchInsTop,
    /// Bottom insertion notch.
    NotchInsBot,
    /// Notch at the top of the nested region.
    NotchInsNestTop,
}

/// Output of [`generate_path`].
///
/// Only regions implied by the input flags are present. Everything is in unit
/// space; use [`BoundingBox::scale`] to obtain render-space boxes.
#[derive(Clone, Debug, PartialEq)]
pub struct PathResult {
    path: BezPath,
    brick: BoundingBox,
    args: SmallVec<[BoundingBox; 4]>,
    notch_arg: Option<BoundingBox>,
    notch_ins_top: Option<BoundingBox>,
    notch_ins_bot: Option<BoundingBox>,
    notch_ins_nest_top: Option<BoundingBox>,
}

impl PathResult {
    /// The outline.
    pub fn path(&self) -> &BezPath {
        &self.path
    }

    /// The outline as SVG path data.
    ///
    /// With the `std` feature this is kurbo's own serialisation.
    pub fn svg(&self) -> String {
        #[cfg(feature = "std")]
        {
            self.path.to_svg()
        }
        #[cfg(not(feature = "std"))]
        {
            let mut out = String::new();
            write_svg(&mut out, &self.path);
            out
        }
    }

    /// Bounding box of the whole body. Always present.
    pub fn bbox_brick(&self) -> BoundingBox {
        self.brick
    }

    /// Bounding boxes of the argument slots, in declaration order.
    pub fn bbox_args(&self) -> &[BoundingBox] {
        &self.args
    }

    /// Bounding box of the outgoing argument tab.
    pub fn bbox_notch_arg(&self) -> Option<BoundingBox> {
        self.notch_arg
    }

    /// Bounding box of the top insertion notch.
    pub fn bbox_notch_ins_top(&self) -> Option<BoundingBox> {
        self.notch_ins_top
    }

    /// Bounding box of the bottom insertion notch.
    pub fn bbox_notch_ins_bot(&self) -> Option<BoundingBox> {
        self.notch_ins_bot
    }

    /// Bounding box of the nested region's top notch.
    pub fn bbox_notch_ins_nest_top(&self) -> Option<BoundingBox> {
        self.notch_ins_nest_top
    }

    /// Look up a region by name; `None` if this outline does not carry it.
    pub fn region(&self, region: Region) -> Option<BoundingBox> {
        match region {
            Region::Brick => Some(self.brick),
            Region::Arg(i) => self.args.get(i).copied(),
            Region::NotchArg => self.notch_arg,
            Region::NotchInsTop => self.notch_ins_top,
            Region::NotchInsBot => self.notch_ins_bot,
            Region::NotchInsNestTop => self.notch_ins_nest_top,
        }
    }

    /// Iterate every present region with its box.
    pub fn regions(&self) -> impl Iterator<Item = (Region, BoundingBox)> + '_ {
        let fixed = [
            (Region::NotchArg, self.notch_arg),
            (Region::NotchInsTop, self.notch_ins_top),
            (Region::NotchInsBot, self.notch_ins_bot),
            (Region::NotchInsNestTop, self.notch_ins_nest_top),
        ];
        core::iter::once((Region::Brick, self.brick))
            .chain(
                self.args
                    .iter()
                    .enumerate()
                    .map(|(i, b)| (Region::Arg(i), *b)),
            )
            .chain(fixed.into_iter().filter_map(|(r, b)| b.map(|b| (r, b))))
    }
}

/// Generate the unit-space outline and regions for a brick shape.
///
/// # Errors
///
/// Returns [`ShapeError`] if `scale`, `inner_length_x`, any argument height or
/// the nest length is not positive and finite, or if [`ShapeFlags::NEST`] is
/// set without a nest length. No other validation is performed.
pub fn generate_path(params: &PathParams) -> Result<PathResult, ShapeError> {
    ensure_positive("scale", params.scale)?;
    let w = ensure_positive("inner_length_x", params.inner_length_x)?;
    for &h in &params.arg_heights {
        ensure_positive("arg_heights", h)?;
    }
    let flags = params.flags;
    let nest_y = if flags.contains(ShapeFlags::NEST) {
        let y = params.nest_length_y.ok_or(ShapeError::MissingNestLength)?;
        Some(ensure_positive("nest_length_y", y)?)
    } else {
        None
    };

    // Row tops, then the end of the argument area.
    let mut rows: SmallVec<[(f64, f64); 4]> = SmallVec::new();
    let mut y = PADDING_TOP;
    for &h in &params.arg_heights {
        rows.push((y, h));
        y += h;
    }
    let args_end = y;
    let height = args_end + nest_y.unwrap_or(0.0) + PADDING_BOTTOM;

    let ins_x0 = (w - NOTCH_INS_LENGTH_X) / 2.0;
    let nest_notch_x0 = NEST_ARM_LENGTH_X + (w - NEST_ARM_LENGTH_X - NOTCH_INS_LENGTH_X) / 2.0;
    let arg_mid = rows
        .first()
        .map(|&(top, h)| top + h / 2.0)
        .unwrap_or(height / 2.0);

    let mut path = BezPath::new();
    path.move_to((0.0, 0.0));

    // Top edge, left to right.
    if flags.contains(ShapeFlags::NOTCH_INS_TOP) {
        path.line_to((ins_x0, 0.0));
        path.line_to((ins_x0, NOTCH_INS_LENGTH_Y));
        path.line_to((ins_x0 + NOTCH_INS_LENGTH_X, NOTCH_INS_LENGTH_Y));
        path.line_to((ins_x0 + NOTCH_INS_LENGTH_X, 0.0));
    }
    path.line_to((w, 0.0));

    // Right edge, top to bottom, with one incoming slot per argument row.
    for &(top, h) in &rows {
        let mid = top + h / 2.0;
        let (y0, y1) = (mid - NOTCH_ARG_LENGTH_Y / 2.0, mid + NOTCH_ARG_LENGTH_Y / 2.0);
        path.line_to((w, y0));
        path.line_to((w - NOTCH_ARG_LENGTH_X, y0));
        path.line_to((w - NOTCH_ARG_LENGTH_X, y1));
        path.line_to((w, y1));
    }

    // The nest mouth opens to the right; its ceiling carries the nest notch.
    if let Some(nest_y) = nest_y {
        let nest_bottom = args_end + nest_y;
        path.line_to((w, args_end));
        path.line_to((nest_notch_x0 + NOTCH_INS_LENGTH_X, args_end));
        path.line_to((nest_notch_x0 + NOTCH_INS_LENGTH_X, args_end + NOTCH_INS_LENGTH_Y));
        path.line_to((nest_notch_x0, args_end + NOTCH_INS_LENGTH_Y));
        path.line_to((nest_notch_x0, args_end));
        path.line_to((NEST_ARM_LENGTH_X, args_end));
        path.line_to((NEST_ARM_LENGTH_X, nest_bottom));
        path.line_to((w, nest_bottom));
    }
    path.line_to((w, height));

    // Bottom edge, right to left.
    if flags.contains(ShapeFlags::NOTCH_INS_BOT) {
        path.line_to((ins_x0 + NOTCH_INS_LENGTH_X, height));
        path.line_to((ins_x0 + NOTCH_INS_LENGTH_X, height + NOTCH_INS_LENGTH_Y));
        path.line_to((ins_x0, height + NOTCH_INS_LENGTH_Y));
        path.line_to((ins_x0, height));
    }
    path.line_to((0.0, height));

    // Left edge, bottom to top.
    if flags.contains(ShapeFlags::NOTCH_ARG) {
        let (y0, y1) = (
            arg_mid - NOTCH_ARG_LENGTH_Y / 2.0,
            arg_mid + NOTCH_ARG_LENGTH_Y / 2.0,
        );
        path.line_to((0.0, y1));
        path.line_to((-NOTCH_ARG_LENGTH_X, y1));
        path.line_to((-NOTCH_ARG_LENGTH_X, y0));
        path.line_to((0.0, y0));
    }
    path.close_path();

    let ins_extent = Size::new(NOTCH_INS_LENGTH_X, NOTCH_INS_LENGTH_Y);
    Ok(PathResult {
        path,
        brick: BoundingBox::new(Point::ORIGIN, Size::new(w, height)),
        args: rows
            .iter()
            .map(|&(top, h)| {
                BoundingBox::new(
                    Point::new(w - NOTCH_ARG_LENGTH_X, top),
                    Size::new(NOTCH_ARG_LENGTH_X, h),
                )
            })
            .collect(),
        notch_arg: flags.contains(ShapeFlags::NOTCH_ARG).then(|| {
            BoundingBox::new(
                Point::new(-NOTCH_ARG_LENGTH_X, arg_mid - NOTCH_ARG_LENGTH_Y / 2.0),
                Size::new(NOTCH_ARG_LENGTH_X, NOTCH_ARG_LENGTH_Y),
            )
        }),
        notch_ins_top: flags
            .contains(ShapeFlags::NOTCH_INS_TOP)
            .then(|| BoundingBox::new(Point::new(ins_x0, 0.0), ins_extent)),
        notch_ins_bot: flags
            .contains(ShapeFlags::NOTCH_INS_BOT)
            .then(|| BoundingBox::new(Point::new(ins_x0, height), ins_extent)),
        notch_ins_nest_top: nest_y
            .map(|_| BoundingBox::new(Point::new(nest_notch_x0, args_end), ins_extent)),
    })
}
