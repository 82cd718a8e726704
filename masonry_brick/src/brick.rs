// Copyright 2025 the Masonry Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Bricks: one tagged union over the four variants plus small capability records.

use alloc::string::String;
use alloc::vec::Vec;
use hashbrown::HashMap;
use kurbo::Size;
use masonry_path::metrics::NEST_ARM_LENGTH_X;
use masonry_path::{
    BoundingBox, PathParams, PathResult, ShapeFlags, ensure_non_negative, ensure_positive,
    generate_path,
};

use crate::error::ConfigurationError;
use crate::render::{ArgRenderProps, ConnectionPoints, RenderExtras, RenderProps};
use crate::types::{
    ArgId, ArgSlot, BrickId, BrickKind, BrickStyle, BrickType, DataType, InputMode, Literal,
};

/// Placeholder height of one argument row, used until the rendering layer
/// reports a measured extent.
pub const ARG_ROW_LENGTH_Y: f64 = 17.0;

/// Default body width.
pub const DEFAULT_INNER_LENGTH_X: f64 = 100.0;

/// Default height of a block's nested region.
pub const DEFAULT_NEST_LENGTH_Y: f64 = 30.0;

/// Declared argument slots plus the extents measured for them by the rendering layer.
#[derive(Clone, Debug, Default)]
pub struct ArgumentSlots {
    slots: Vec<ArgSlot>,
    measured: HashMap<ArgId, Size>,
}

impl ArgumentSlots {
    pub(crate) fn new(slots: Vec<ArgSlot>) -> Result<Self, ConfigurationError> {
        for (i, slot) in slots.iter().enumerate() {
            if slots[..i].iter().any(|s| s.id == slot.id) {
                return Err(ConfigurationError::DuplicateArgument(slot.id.clone()));
            }
        }
        Ok(Self {
            slots,
            measured: HashMap::new(),
        })
    }

    /// Slot declarations in order.
    pub fn slots(&self) -> &[ArgSlot] {
        &self.slots
    }

    /// Declaration of the slot `id`.
    pub fn get(&self, id: &ArgId) -> Option<&ArgSlot> {
        self.slots.iter().find(|s| s.id == *id)
    }

    /// Extent measured for slot `id`, if one has been reported.
    pub fn measured(&self, id: &ArgId) -> Option<Size> {
        self.measured.get(id).copied()
    }

    fn position(&self, id: &ArgId) -> Option<usize> {
        self.slots.iter().position(|s| s.id == *id)
    }

    fn placeholder_heights(&self) -> Vec<f64> {
        self.slots.iter().map(|_| ARG_ROW_LENGTH_Y).collect()
    }

    /// Replace the declarations, keeping the measurements of surviving slots.
    fn replace(&mut self, next: Self) {
        let mut measured = core::mem::take(&mut self.measured);
        measured.retain(|id, _| next.slots.iter().any(|s| s.id == *id));
        *self = Self {
            slots: next.slots,
            measured,
        };
    }
}

/// Whether an instruction may be connected above and below.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct VerticalConnections {
    /// An instruction may sit directly above.
    pub above: bool,
    /// An instruction may sit directly below.
    pub below: bool,
}

/// The nested region of a block.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NestedRegion {
    length_y: f64,
    extent: Size,
    folded: bool,
}

impl NestedRegion {
    /// Unit-space height the outline reserves for the nest.
    pub fn length_y(&self) -> f64 {
        self.length_y
    }

    /// Current extent of the nested contents.
    pub fn extent(&self) -> Size {
        self.extent
    }

    /// Whether the nested contents are hidden.
    pub fn folded(&self) -> bool {
        self.folded
    }
}

/// Variant-specific state of a brick.
#[derive(Clone, Debug)]
pub enum Variant {
    /// A value brick.
    Value {
        /// Declared output type.
        data_type: DataType,
        /// Whether the value is editable.
        dynamic: bool,
        /// Current literal, for dynamic values.
        value: Option<Literal>,
        /// Editing mode, for dynamic values.
        input: Option<InputMode>,
    },
    /// An expression brick.
    Expression {
        /// Declared output type.
        data_type: DataType,
        /// Argument slots.
        args: ArgumentSlots,
    },
    /// A statement brick.
    Statement {
        /// Argument slots.
        args: ArgumentSlots,
        /// Connection capabilities.
        connections: VerticalConnections,
    },
    /// A block brick.
    Block {
        /// Argument slots.
        args: ArgumentSlots,
        /// Connection capabilities.
        connections: VerticalConnections,
        /// The nested region.
        nest: NestedRegion,
    },
}

impl Variant {
    pub(crate) fn block(
        args: ArgumentSlots,
        connections: VerticalConnections,
        nest_length_y: f64,
        folded: bool,
    ) -> Self {
        Self::Block {
            args,
            connections,
            nest: NestedRegion {
                length_y: nest_length_y,
                extent: Size::ZERO,
                folded,
            },
        }
    }

    fn brick_type(&self) -> BrickType {
        match self {
            Self::Value { .. } => BrickType::Value,
            Self::Expression { .. } => BrickType::Expression,
            Self::Statement { .. } => BrickType::Statement,
            Self::Block { .. } => BrickType::Block,
        }
    }

    fn args(&self) -> Option<&ArgumentSlots> {
        match self {
            Self::Value { .. } => None,
            Self::Expression { args, .. }
            | Self::Statement { args, .. }
            | Self::Block { args, .. } => Some(args),
        }
    }

    fn args_mut(&mut self) -> Option<&mut ArgumentSlots> {
        match self {
            Self::Value { .. } => None,
            Self::Expression { args, .. }
            | Self::Statement { args, .. }
            | Self::Block { args, .. } => Some(args),
        }
    }

    /// Shape parameters implied by this variant.
    fn path_params(&self, scale: f64, inner_length_x: f64) -> PathParams {
        let (flags, nest_length_y) = match self {
            Self::Value { .. } | Self::Expression { .. } => (ShapeFlags::NOTCH_ARG, None),
            Self::Statement { connections, .. } => (connection_flags(*connections), None),
            Self::Block {
                connections, nest, ..
            } => (
                connection_flags(*connections) | ShapeFlags::NEST,
                Some(nest.length_y),
            ),
        };
        PathParams {
            flags,
            scale,
            inner_length_x,
            nest_length_y,
            arg_heights: self
                .args()
                .map(ArgumentSlots::placeholder_heights)
                .unwrap_or_default(),
        }
    }
}

fn checked_extent(parameter: &'static str, extent: Size) -> Result<Size, ConfigurationError> {
    ensure_non_negative(parameter, extent.width)?;
    ensure_non_negative(parameter, extent.height)?;
    Ok(extent)
}

fn connection_flags(c: VerticalConnections) -> ShapeFlags {
    let mut flags = ShapeFlags::empty();
    flags.set(ShapeFlags::NOTCH_INS_TOP, c.above);
    flags.set(ShapeFlags::NOTCH_INS_BOT, c.below);
    flags
}

/// One brick: identity, style, variant state, and its cached unit-space geometry.
///
/// Shape flags are derived from the [`Variant`], so a brick can never carry flags
/// that contradict its type. The cached [`PathResult`] is replaced only when the
/// argument declarations change; highlight, scale, fold and measured extents are
/// applied on read.
#[derive(Clone, Debug)]
pub struct Brick {
    id: BrickId,
    name: String,
    label: String,
    glyph: Option<String>,
    style: BrickStyle,
    scale: f64,
    highlighted: bool,
    inner_length_x: f64,
    variant: Variant,
    geometry: PathResult,
}

impl Brick {
    /// Build a brick and generate its geometry.
    pub(crate) fn new(
        id: BrickId,
        name: String,
        label: String,
        glyph: Option<String>,
        style: BrickStyle,
        scale: f64,
        inner_length_x: f64,
        variant: Variant,
    ) -> Result<Self, ConfigurationError> {
        if let Variant::Value {
            data_type,
            value: Some(value),
            ..
        } = &variant
            && !data_type.accepts(value.data_type())
        {
            return Err(ConfigurationError::LiteralMismatch {
                declared: *data_type,
                found: value.data_type(),
            });
        }
        let geometry = generate_path(&variant.path_params(scale, inner_length_x))?;
        Ok(Self {
            id,
            name,
            label,
            glyph,
            style,
            scale,
            highlighted: false,
            inner_length_x,
            variant,
            geometry,
        })
    }

    /// Unique identifier.
    pub fn id(&self) -> &BrickId {
        &self.id
    }

    /// Internal bookkeeping name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Display label.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Optional glyph drawn beside the label.
    pub fn glyph(&self) -> Option<&str> {
        self.glyph.as_deref()
    }

    /// Colours.
    pub fn style(&self) -> &BrickStyle {
        &self.style
    }

    /// Argument or instruction.
    pub fn kind(&self) -> BrickKind {
        self.brick_type().kind()
    }

    /// Variant discriminant.
    pub fn brick_type(&self) -> BrickType {
        self.variant.brick_type()
    }

    /// Variant state.
    pub fn variant(&self) -> &Variant {
        &self.variant
    }

    /// Current scale factor.
    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Change the scale factor. Geometry is not regenerated.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError::Shape`] if `scale` is not positive and finite.
    pub fn set_scale(&mut self, scale: f64) -> Result<(), ConfigurationError> {
        self.scale = ensure_positive("scale", scale)?;
        Ok(())
    }

    /// Whether the brick is highlighted.
    pub fn highlighted(&self) -> bool {
        self.highlighted
    }

    /// Highlight or unhighlight the brick.
    pub fn set_highlighted(&mut self, highlighted: bool) {
        self.highlighted = highlighted;
    }

    /// Declared output type of value and expression bricks.
    pub fn data_type(&self) -> Option<DataType> {
        match &self.variant {
            Variant::Value { data_type, .. } | Variant::Expression { data_type, .. } => {
                Some(*data_type)
            }
            Variant::Statement { .. } | Variant::Block { .. } => None,
        }
    }

    /// Change the declared output type of a value or expression brick.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError::VariantMismatch`] for instructions, and
    /// [`ConfigurationError::LiteralMismatch`] if a dynamic value's literal
    /// would no longer fit.
    pub fn set_data_type(&mut self, next: DataType) -> Result<(), ConfigurationError> {
        let found = self.brick_type();
        match &mut self.variant {
            Variant::Value {
                data_type, value, ..
            } => {
                if let Some(v) = value
                    && !next.accepts(v.data_type())
                {
                    return Err(ConfigurationError::LiteralMismatch {
                        declared: next,
                        found: v.data_type(),
                    });
                }
                *data_type = next;
                Ok(())
            }
            Variant::Expression { data_type, .. } => {
                *data_type = next;
                Ok(())
            }
            Variant::Statement { .. } | Variant::Block { .. } => {
                Err(ConfigurationError::VariantMismatch {
                    brick: self.id.clone(),
                    operation: "set_data_type",
                    found,
                })
            }
        }
    }

    /// Argument slot declarations; empty for value bricks.
    pub fn args(&self) -> &[ArgSlot] {
        self.variant.args().map(ArgumentSlots::slots).unwrap_or(&[])
    }

    /// Argument slots with their measurements, if this variant declares any.
    pub fn arg_slots(&self) -> Option<&ArgumentSlots> {
        self.variant.args()
    }

    /// Replace the argument declarations and regenerate the geometry.
    ///
    /// Measured extents are kept for slots whose identifiers survive.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError`] for value bricks, for duplicate slot
    /// identifiers, or if the new shape is rejected. The brick is unchanged on error.
    pub fn set_args(&mut self, slots: Vec<ArgSlot>) -> Result<(), ConfigurationError> {
        let found = self.brick_type();
        let next = ArgumentSlots::new(slots)?;
        let mut variant = self.variant.clone();
        let Some(args) = variant.args_mut() else {
            return Err(ConfigurationError::VariantMismatch {
                brick: self.id.clone(),
                operation: "set_args",
                found,
            });
        };
        args.replace(next);
        let geometry = generate_path(&variant.path_params(self.scale, self.inner_length_x))?;
        log::trace!(
            "regenerated geometry of `{}` for {} argument(s)",
            self.id,
            variant.args().map_or(0, |a| a.slots.len())
        );
        self.variant = variant;
        self.geometry = geometry;
        Ok(())
    }

    /// Record the extent the rendering layer measured for argument `arg`.
    ///
    /// The measurement supersedes the placeholder in bounding-box and render
    /// queries. It is reported as supplied and is not multiplied by the scale.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError::UnknownArgument`] if no such slot is declared,
    /// and [`ConfigurationError::Shape`] for a negative or non-finite extent.
    pub fn set_arg_extent(&mut self, arg: &ArgId, extent: Size) -> Result<(), ConfigurationError> {
        let found = self.brick_type();
        let Some(args) = self.variant.args_mut() else {
            return Err(ConfigurationError::VariantMismatch {
                brick: self.id.clone(),
                operation: "set_arg_extent",
                found,
            });
        };
        if args.get(arg).is_none() {
            return Err(ConfigurationError::UnknownArgument {
                brick: self.id.clone(),
                arg: arg.clone(),
            });
        }
        let extent = checked_extent("arg_extent", extent)?;
        args.measured.insert(arg.clone(), extent);
        Ok(())
    }

    /// Connection capabilities of statement and block bricks.
    pub fn connections(&self) -> Option<VerticalConnections> {
        match &self.variant {
            Variant::Statement { connections, .. } | Variant::Block { connections, .. } => {
                Some(*connections)
            }
            Variant::Value { .. } | Variant::Expression { .. } => None,
        }
    }

    /// Whether an instruction may connect above; `false` for argument bricks.
    pub fn connect_above(&self) -> bool {
        self.connections().is_some_and(|c| c.above)
    }

    /// Whether an instruction may connect below; `false` for argument bricks.
    pub fn connect_below(&self) -> bool {
        self.connections().is_some_and(|c| c.below)
    }

    /// The nested region of a block brick.
    pub fn nest(&self) -> Option<&NestedRegion> {
        match &self.variant {
            Variant::Block { nest, .. } => Some(nest),
            _ => None,
        }
    }

    /// Current nest extent of a block brick.
    pub fn nest_extent(&self) -> Option<Size> {
        self.nest().map(NestedRegion::extent)
    }

    /// Whether a block's nested contents are hidden; `false` for other variants.
    pub fn folded(&self) -> bool {
        self.nest().is_some_and(NestedRegion::folded)
    }

    /// Fold or unfold a block brick.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError::VariantMismatch`] for non-block bricks.
    pub fn set_folded(&mut self, folded: bool) -> Result<(), ConfigurationError> {
        self.nest_mut("set_folded")?.folded = folded;
        Ok(())
    }

    /// Record a nest extent measured by the rendering layer.
    ///
    /// The next structural change around this block recomputes the extent from
    /// its children and replaces this value.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError::VariantMismatch`] for non-block bricks, and
    /// [`ConfigurationError::Shape`] for a negative or non-finite extent.
    pub fn set_nest_extent(&mut self, extent: Size) -> Result<(), ConfigurationError> {
        let nest = self.nest_mut("set_nest_extent")?;
        nest.extent = checked_extent("nest_extent", extent)?;
        Ok(())
    }

    fn nest_mut(
        &mut self,
        operation: &'static str,
    ) -> Result<&mut NestedRegion, ConfigurationError> {
        let found = self.brick_type();
        match &mut self.variant {
            Variant::Block { nest, .. } => Ok(nest),
            _ => Err(ConfigurationError::VariantMismatch {
                brick: self.id.clone(),
                operation,
                found,
            }),
        }
    }

    /// Unit-space geometry as generated.
    pub fn geometry(&self) -> &PathResult {
        &self.geometry
    }

    /// Bounding box of the body at the current scale.
    pub fn bbox_brick(&self) -> BoundingBox {
        self.geometry.bbox_brick().scale(self.scale)
    }

    /// Bounding box of slot `arg` at the current scale, preferring a measured extent.
    pub fn bbox_arg(&self, arg: &ArgId) -> Option<BoundingBox> {
        let args = self.variant.args()?;
        let i = args.position(arg)?;
        let mut bbox = self.geometry.bbox_args().get(i)?.scale(self.scale);
        if let Some(measured) = args.measured(arg) {
            bbox.extent = measured;
        }
        Some(bbox)
    }

    /// Bounding boxes of every argument slot, in declaration order.
    pub fn bbox_args(&self) -> Vec<(ArgId, BoundingBox)> {
        self.args()
            .iter()
            .filter_map(|slot| self.bbox_arg(&slot.id).map(|b| (slot.id.clone(), b)))
            .collect()
    }

    /// Bounding box of the outgoing argument tab (value and expression bricks).
    pub fn bbox_notch_arg(&self) -> Option<BoundingBox> {
        self.scaled(self.geometry.bbox_notch_arg())
    }

    /// Bounding box of the top insertion notch, if the brick connects above.
    pub fn bbox_notch_ins_top(&self) -> Option<BoundingBox> {
        self.scaled(self.geometry.bbox_notch_ins_top())
    }

    /// Bounding box of the bottom insertion notch, if the brick connects below.
    pub fn bbox_notch_ins_bot(&self) -> Option<BoundingBox> {
        self.scaled(self.geometry.bbox_notch_ins_bot())
    }

    /// Bounding box of the nest's top notch (block bricks).
    pub fn bbox_notch_ins_nest_top(&self) -> Option<BoundingBox> {
        self.scaled(self.geometry.bbox_notch_ins_nest_top())
    }

    fn scaled(&self, bbox: Option<BoundingBox>) -> Option<BoundingBox> {
        bbox.map(|b| b.scale(self.scale))
    }

    /// Anchors where other bricks attach, at the current scale.
    pub fn connection_points(&self) -> ConnectionPoints {
        let anchor = |b: BoundingBox| b.coords;
        ConnectionPoints {
            args_incoming: self.bbox_args().into_iter().map(|(_, b)| b.coords).collect(),
            args_outgoing: self.bbox_notch_arg().map(anchor),
            top: self.bbox_notch_ins_top().map(anchor),
            bottom: self.bbox_notch_ins_bot().map(anchor),
            top_inner: self.bbox_notch_ins_nest_top().map(anchor),
        }
    }

    /// Extent this brick takes up inside an enclosing nest, at the current scale.
    ///
    /// An unfolded block grows with its nest extent: its contents sit right of
    /// the nest arm, and the nest is at least as tall as its generated placeholder.
    /// A folded block, like every other variant, takes up its body only.
    pub fn footprint(&self) -> Size {
        let body = self.bbox_brick().extent;
        match self.nest() {
            Some(nest) if !nest.folded => {
                let placeholder = nest.length_y * self.scale;
                Size::new(
                    body.width.max(NEST_ARM_LENGTH_X * self.scale + nest.extent.width),
                    body.height - placeholder + placeholder.max(nest.extent.height),
                )
            }
            _ => body,
        }
    }

    /// Everything the rendering layer needs to draw this brick.
    pub fn render_props(&self) -> RenderProps {
        let (color_bg, color_fg) = if self.highlighted {
            (&self.style.color_bg_highlight, &self.style.color_fg_highlight)
        } else {
            (&self.style.color_bg, &self.style.color_fg)
        };
        let arg_props = || ArgRenderProps {
            label_args: self.args().iter().map(|s| s.label.clone()).collect(),
            bounding_box_args: self
                .bbox_args()
                .into_iter()
                .map(|(_, b)| b.extent)
                .collect(),
        };
        let extras = match &self.variant {
            Variant::Value { .. } => RenderExtras::Value,
            Variant::Expression { .. } => RenderExtras::Expression(arg_props()),
            Variant::Statement { .. } => RenderExtras::Statement(arg_props()),
            Variant::Block { nest, .. } => RenderExtras::Block {
                args: arg_props(),
                bounding_box_nest: nest.extent,
                folded: nest.folded,
            },
        };
        RenderProps {
            path: self.geometry.svg(),
            label: self.label.clone(),
            glyph: self.glyph.clone(),
            color_bg: color_bg.clone(),
            color_fg: color_fg.clone(),
            outline: self.style.outline.clone(),
            scale: self.scale,
            extras,
        }
    }

    /// Overwrite the nest extent as recomputed by the stack; no-op for non-blocks.
    pub(crate) fn update_nest_extent(&mut self, extent: Size) {
        if let Variant::Block { nest, .. } = &mut self.variant {
            nest.extent = extent;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::factory::{BlockParams, BrickParams, ExpressionParams, StatementParams, ValueParams};
    use crate::types::Color;
    use alloc::vec;
    use kurbo::Point;

    fn sum() -> Brick {
        ExpressionParams {
            brick: BrickParams::labeled("+"),
            data_type: DataType::Number,
            args: vec![
                ArgSlot::new("x", "x", DataType::Number),
                ArgSlot::new("y", "y", DataType::Number),
            ],
        }
        .build(BrickId::from("sum"))
        .unwrap()
    }

    #[test]
    fn boxes_scale_linearly() {
        let mut brick = sum();
        let unit = brick.bbox_brick();
        assert_eq!(unit.extent, Size::new(100.0, 54.0));
        let arg = brick.bbox_arg(&ArgId::from("y")).unwrap();
        assert_eq!(arg.coords, Point::new(92.0, 27.0));

        brick.set_scale(2.0).unwrap();
        assert_eq!(brick.bbox_brick(), unit.scale(2.0));
        assert_eq!(brick.bbox_arg(&ArgId::from("y")).unwrap(), arg.scale(2.0));
        assert_eq!(brick.render_props().scale, 2.0);
        assert_eq!(brick.render_props().path, brick.geometry().svg());
        assert!(brick.set_scale(-1.0).is_err());
        assert_eq!(brick.scale(), 2.0);
    }

    #[test]
    fn regions_follow_the_variant() {
        let value = ValueParams::default().build(BrickId::from("v")).unwrap();
        assert!(value.bbox_notch_arg().is_some());
        assert!(value.bbox_notch_ins_top().is_none());
        assert!(value.bbox_args().is_empty());

        let stop = StatementParams {
            connect_below: false,
            ..StatementParams::default()
        }
        .build(BrickId::from("stop"))
        .unwrap();
        assert!(stop.bbox_notch_arg().is_none());
        assert!(stop.bbox_notch_ins_top().is_some());
        assert!(stop.bbox_notch_ins_bot().is_none());
        assert!(stop.bbox_notch_ins_nest_top().is_none());

        let block = BlockParams::default().build(BrickId::from("b")).unwrap();
        assert!(block.bbox_notch_ins_nest_top().is_some());
        assert_eq!(block.bbox_brick().extent.height, 50.0);
        assert_eq!(block.nest_extent(), Some(Size::ZERO));
    }

    #[test]
    fn measured_extent_overrides_placeholder_unscaled() {
        let mut brick = sum();
        brick.set_scale(2.0).unwrap();
        let x = ArgId::from("x");
        brick.set_arg_extent(&x, Size::new(40.0, 30.0)).unwrap();
        let bbox = brick.bbox_arg(&x).unwrap();
        assert_eq!(bbox.extent, Size::new(40.0, 30.0));
        assert_eq!(bbox.coords, Point::new(184.0, 20.0));
        assert_eq!(
            brick.render_props().args().unwrap().bounding_box_args,
            [Size::new(40.0, 30.0), Size::new(16.0, 34.0)]
        );
        assert_eq!(
            brick.set_arg_extent(&ArgId::from("z"), Size::ZERO),
            Err(ConfigurationError::UnknownArgument {
                brick: BrickId::from("sum"),
                arg: ArgId::from("z"),
            })
        );
    }

    #[test]
    fn set_args_regenerates_geometry() {
        let mut brick = sum();
        let x = ArgId::from("x");
        brick.set_arg_extent(&x, Size::new(40.0, 30.0)).unwrap();
        brick.set_arg_extent(&ArgId::from("y"), Size::new(40.0, 30.0)).unwrap();

        brick
            .set_args(vec![ArgSlot::new("x", "x", DataType::Number)])
            .unwrap();
        assert_eq!(brick.bbox_brick().extent.height, 37.0);
        assert_eq!(brick.bbox_args().len(), 1);
        let slots = brick.arg_slots().unwrap();
        assert_eq!(slots.measured(&x), Some(Size::new(40.0, 30.0)));
        assert_eq!(slots.measured(&ArgId::from("y")), None);
    }

    #[test]
    fn failed_set_args_keeps_previous_state() {
        let mut brick = sum();
        let before = brick.geometry().clone();
        let err = brick.set_args(vec![
            ArgSlot::new("x", "x", DataType::Number),
            ArgSlot::new("x", "x", DataType::Number),
        ]);
        assert_eq!(err, Err(ConfigurationError::DuplicateArgument(ArgId::from("x"))));
        assert_eq!(brick.geometry(), &before);
        assert_eq!(brick.args().len(), 2);

        let mut value = ValueParams::default().build(BrickId::from("v")).unwrap();
        assert!(matches!(
            value.set_args(Vec::new()),
            Err(ConfigurationError::VariantMismatch { .. })
        ));
    }

    #[test]
    fn highlight_swaps_colours() {
        let mut brick = StatementParams {
            brick: BrickParams {
                style: BrickStyle {
                    color_bg: Color::from("teal"),
                    color_fg: Color::from("white"),
                    color_bg_highlight: Color::from("gold"),
                    color_fg_highlight: Color::from("black"),
                    outline: Color::from("gray"),
                },
                ..BrickParams::labeled("say")
            },
            ..StatementParams::default()
        }
        .build(BrickId::from("say"))
        .unwrap();
        assert_eq!(brick.render_props().color_bg, Color::from("teal"));
        brick.set_highlighted(true);
        let props = brick.render_props();
        assert_eq!(props.color_bg, Color::from("gold"));
        assert_eq!(props.color_fg, Color::from("black"));
        assert_eq!(props.outline, Color::from("gray"));
        assert_eq!(props.label, "say");
    }

    #[test]
    fn data_type_applies_to_arguments_only() {
        let mut value = ValueParams {
            data_type: DataType::Number,
            dynamic: true,
            value: Some(Literal::Number(4.0)),
            input: Some(InputMode::Number),
            ..ValueParams::default()
        }
        .build(BrickId::from("n"))
        .unwrap();
        assert_eq!(
            value.set_data_type(DataType::String),
            Err(ConfigurationError::LiteralMismatch {
                declared: DataType::String,
                found: DataType::Number,
            })
        );
        value.set_data_type(DataType::Any).unwrap();
        assert_eq!(value.data_type(), Some(DataType::Any));

        let mut statement = StatementParams::default().build(BrickId::from("s")).unwrap();
        assert!(matches!(
            statement.set_data_type(DataType::Number),
            Err(ConfigurationError::VariantMismatch { .. })
        ));
        assert_eq!(statement.data_type(), None);
    }

    #[test]
    fn literal_must_fit_declared_type() {
        let err = ValueParams {
            data_type: DataType::Boolean,
            dynamic: true,
            value: Some(Literal::String("yes".into())),
            ..ValueParams::default()
        }
        .build(BrickId::from("b"));
        assert!(matches!(err, Err(ConfigurationError::LiteralMismatch { .. })));
    }

    #[test]
    fn block_render_props_carry_nest_and_fold() {
        let mut block = BlockParams {
            brick: BrickParams::labeled("repeat"),
            args: vec![ArgSlot::new("n", "times", DataType::Number)],
            ..BlockParams::default()
        }
        .build(BrickId::from("repeat"))
        .unwrap();
        block.set_nest_extent(Size::new(80.0, 40.0)).unwrap();
        block.set_folded(true).unwrap();
        let props = block.render_props();
        assert_eq!(props.bounding_box_nest(), Some(Size::new(80.0, 40.0)));
        assert_eq!(props.folded(), Some(true));
        assert_eq!(props.args().unwrap().label_args, ["times"]);

        let mut value = ValueParams::default().build(BrickId::from("v")).unwrap();
        assert_eq!(value.render_props().extras, RenderExtras::Value);
        assert!(value.set_folded(true).is_err());
        assert!(!value.folded());
    }

    #[test]
    fn connection_points_follow_the_variant() {
        let value = ValueParams::default().build(BrickId::from("v")).unwrap();
        let points = value.connection_points();
        assert!(points.args_incoming.is_empty());
        assert_eq!(points.args_outgoing, Some(Point::new(-8.0, 5.0)));
        assert_eq!((points.top, points.bottom, points.top_inner), (None, None, None));

        let points = sum().connection_points();
        assert_eq!(
            points.args_incoming,
            [Point::new(92.0, 10.0), Point::new(92.0, 27.0)]
        );
        assert_eq!(points.args_outgoing, Some(Point::new(-8.0, 13.5)));
        assert_eq!(points.top, None);

        let step = StatementParams::default().build(BrickId::from("s")).unwrap();
        let points = step.connection_points();
        assert_eq!(points.top, Some(Point::new(44.0, 0.0)));
        assert_eq!(points.bottom, Some(Point::new(44.0, 20.0)));
        assert_eq!((points.args_outgoing, points.top_inner), (None, None));

        let mut block = BlockParams {
            connect_below: false,
            ..BlockParams::default()
        }
        .build(BrickId::from("b"))
        .unwrap();
        block.set_scale(2.0).unwrap();
        let points = block.connection_points();
        assert_eq!(points.top, Some(Point::new(88.0, 0.0)));
        assert_eq!(points.bottom, None);
        assert_eq!(points.top_inner, Some(Point::new(100.0, 20.0)));
    }

    #[test]
    fn footprint_grows_with_the_nest() {
        let mut block = BlockParams::default().build(BrickId::from("b")).unwrap();
        assert_eq!(block.footprint(), Size::new(100.0, 50.0));

        block.set_nest_extent(Size::new(80.0, 40.0)).unwrap();
        assert_eq!(block.footprint(), Size::new(100.0, 60.0));
        block.set_nest_extent(Size::new(200.0, 10.0)).unwrap();
        assert_eq!(block.footprint(), Size::new(212.0, 50.0));

        block.set_folded(true).unwrap();
        assert_eq!(block.footprint(), block.bbox_brick().extent);

        let value = ValueParams::default().build(BrickId::from("v")).unwrap();
        assert_eq!(value.footprint(), value.bbox_brick().extent);
    }

    #[test]
    fn measured_extents_must_be_finite_and_non_negative() {
        let mut brick = sum();
        let x = ArgId::from("x");
        assert!(matches!(
            brick.set_arg_extent(&x, Size::new(-1.0, 17.0)),
            Err(ConfigurationError::Shape(_))
        ));
        assert_eq!(brick.arg_slots().unwrap().measured(&x), None);
        brick.set_arg_extent(&x, Size::ZERO).unwrap();

        let mut block = BlockParams::default().build(BrickId::from("b")).unwrap();
        assert!(matches!(
            block.set_nest_extent(Size::new(10.0, f64::NAN)),
            Err(ConfigurationError::Shape(_))
        ));
        assert_eq!(block.nest_extent(), Some(Size::ZERO));
    }
}
