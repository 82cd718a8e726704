// Copyright 2025 the Masonry Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Assemble a small program, edit it, and inspect what a renderer would receive.
//!
//! This example shows how to:
//! - create bricks of every variant through the `Registry` factories,
//! - compose them in a `Stack` and watch nest extents follow the children,
//! - collect validation findings after retyping an argument.
//!
//! Run:
//! - `RUST_LOG=debug cargo run -p masonry_demos --example assemble_program`

use kurbo::Size;
use masonry_brick::{
    ArgId, ArgSlot, BlockParams, BrickParams, DataType, InputMode, Literal, Registry, Stack,
    StackNode, StatementParams, StructuralError, ValueParams,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let mut registry = Registry::new();
    let start = registry.create_block(BlockParams {
        brick: BrickParams::labeled("start").with_id("start"),
        connect_above: false,
        ..BlockParams::default()
    })?;
    let repeat = registry.create_block(BlockParams {
        brick: BrickParams::labeled("repeat").with_id("repeat"),
        args: vec![ArgSlot::new("times", "times", DataType::Number)],
        ..BlockParams::default()
    })?;
    let times = registry.create_value(ValueParams {
        brick: BrickParams::labeled("4").with_id("times"),
        data_type: DataType::Number,
        dynamic: true,
        value: Some(Literal::Number(4.0)),
        input: Some(InputMode::Number),
    })?;
    let forward = registry.create_statement(StatementParams {
        brick: BrickParams::labeled("forward"),
        ..StatementParams::default()
    })?;
    let turn = registry.create_statement(StatementParams {
        brick: BrickParams::labeled("turn"),
        ..StatementParams::default()
    })?;

    let mut stack = Stack::new("main");
    stack.add_node(&mut registry, StackNode::new(start.clone()), None)?;
    stack.add_node(
        &mut registry,
        StackNode::new(repeat.clone())
            .with_child(StackNode::new(times.clone()))
            .with_child(StackNode::new(forward))
            .with_child(StackNode::new(turn.clone())),
        Some(&start),
    )?;
    print_block(&registry, &repeat);
    print_block(&registry, &start);

    // The renderer measured the literal; the slot box follows the measurement.
    if let Some(brick) = registry.get_mut(&repeat) {
        brick.set_arg_extent(&ArgId::from("times"), Size::new(24.0, 17.0))?;
        println!("times slot: {:?}", brick.bbox_arg(&ArgId::from("times")));
        println!("repeat connects at: {:?}", brick.connection_points());
    }

    // Moving a block under its own child is rejected and changes nothing.
    match stack.move_node(&mut registry, &start, Some(&repeat), 0) {
        Err(err @ StructuralError::Cycle { .. }) => println!("rejected: {err}"),
        other => println!("unexpected: {other:?}"),
    }

    stack.move_node(&mut registry, &turn, Some(&start), 1)?;
    print_block(&registry, &repeat);

    stack.collapse(&mut registry, &repeat)?;
    if let Some(brick) = registry.get(&repeat) {
        let props = brick.render_props();
        println!("repeat folded: {:?}, path: {}", props.folded(), props.path);
    }

    println!("valid: {}", stack.validate(&registry));
    if let Some(brick) = registry.get_mut(&times) {
        brick.set_data_type(DataType::Any)?;
    }
    for err in stack.validation_errors(&registry) {
        println!("validation: {err}");
    }

    let geometry = masonry_path::generate_path(&masonry_path::PathParams {
        flags: masonry_path::ShapeFlags::NOTCH_ARG,
        ..masonry_path::PathParams::default()
    })?;
    println!("bare value outline: {}", geometry.svg());
    Ok(())
}

fn print_block(registry: &Registry, id: &masonry_brick::BrickId) {
    if let Some(brick) = registry.get(id) {
        println!(
            "{id}: body {:?}, nest {:?}",
            brick.bbox_brick().extent,
            brick.nest_extent()
        );
    }
}
