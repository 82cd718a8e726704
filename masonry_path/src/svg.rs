// Copyright 2025 the Masonry Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::string::String;
use core::fmt::Write as _;
use kurbo::{BezPath, PathEl, Point};

/// Append `path` to `out` as SVG path data (`M`, `L`, `Q`, `C`, `Z`).
pub(crate) fn write_svg(out: &mut String, path: &BezPath) {
    for (i, el) in path.elements().iter().enumerate() {
        if i > 0 {
            out.push(' ');
        }
        match *el {
            PathEl::MoveTo(p) => push_cmd(out, 'M', &[p]),
            PathEl::LineTo(p) => push_cmd(out, 'L', &[p]),
            PathEl::QuadTo(p1, p2) => push_cmd(out, 'Q', &[p1, p2]),
            PathEl::CurveTo(p1, p2, p3) => push_cmd(out, 'C', &[p1, p2, p3]),
            PathEl::ClosePath => out.push('Z'),
        }
    }
}

fn push_cmd(out: &mut String, cmd: char, points: &[Point]) {
    out.push(cmd);
    for (i, p) in points.iter().enumerate() {
        if i > 0 {
            out.push(' ');
        }
        // Writing into a `String` cannot fail.
        let _ = write!(out, "{} {}", p.x, p.y);
    }
}
