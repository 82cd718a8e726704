// Copyright 2025 the Masonry Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Error taxonomy: construction, structural edits, and collected validation findings.

use masonry_path::ShapeError;
use thiserror::Error;

use crate::types::{ArgId, BrickId, BrickType, DataType};

/// Invalid construction or reconfiguration of a brick.
///
/// The call that returns this error has no effect: no half-built brick is
/// registered and an existing brick keeps its previous state.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum ConfigurationError {
    /// Shape parameters were rejected by the generator.
    #[error(transparent)]
    Shape(#[from] ShapeError),
    /// The requested identifier is already registered.
    #[error("brick `{0}` is already registered")]
    DuplicateBrick(BrickId),
    /// Two argument slots share an identifier.
    #[error("argument `{0}` is declared more than once")]
    DuplicateArgument(ArgId),
    /// The brick declares no such argument slot.
    #[error("brick `{brick}` has no argument `{arg}`")]
    UnknownArgument {
        /// The brick that was addressed.
        brick: BrickId,
        /// The missing slot.
        arg: ArgId,
    },
    /// The operation does not apply to this brick variant.
    #[error("`{operation}` is not supported by {found:?} brick `{brick}`")]
    VariantMismatch {
        /// The brick that was addressed.
        brick: BrickId,
        /// Name of the attempted operation.
        operation: &'static str,
        /// The brick's actual type.
        found: BrickType,
    },
    /// A dynamic value's literal contradicts the declared data type.
    #[error("literal of type {found:?} cannot be held by a {declared:?} value")]
    LiteralMismatch {
        /// The brick's declared type.
        declared: DataType,
        /// The literal's type.
        found: DataType,
    },
}

/// Illegal edit of a [`Stack`](crate::Stack). The stack is unchanged afterwards.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum StructuralError {
    /// No node holds this brick.
    #[error("node `{0}` not found")]
    NotFound(BrickId),
    /// The brick is not present in the registry.
    #[error("brick `{0}` is not registered")]
    UnregisteredBrick(BrickId),
    /// The brick is already attached to this stack.
    #[error("brick `{0}` is already in the stack")]
    DuplicateBrick(BrickId),
    /// The parent's variant never holds children.
    #[error("parent `{0}` cannot have children")]
    CannotHaveChildren(BrickId),
    /// The parent holds children, but not of this kind.
    #[error("parent `{parent}` cannot hold `{child}`")]
    InvalidChild {
        /// The rejecting parent.
        parent: BrickId,
        /// The rejected child.
        child: BrickId,
    },
    /// The destination lies inside the subtree being moved.
    #[error("cannot move `{node}` under its own descendant `{parent}`")]
    Cycle {
        /// The node being moved.
        node: BrickId,
        /// The rejected destination.
        parent: BrickId,
    },
    /// The insertion index is past the end of the destination.
    #[error("index {index} is out of bounds for {len} children")]
    IndexOutOfBounds {
        /// Requested index.
        index: usize,
        /// Number of children at the destination.
        len: usize,
    },
    /// Collapse and expand apply to block nodes only.
    #[error("node `{0}` is not a block")]
    NotABlock(BrickId),
}

/// Which vertical edge a connection finding refers to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Edge {
    /// The top edge.
    Above,
    /// The bottom edge.
    Below,
}

impl core::fmt::Display for Edge {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(match self {
            Self::Above => "above",
            Self::Below => "below",
        })
    }
}

/// A problem found by [`Stack::validation_errors`](crate::Stack::validation_errors).
///
/// These are collected and returned as a list; they never abort an edit.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// An instruction is connected on an edge its brick does not allow.
    #[error("invalid connection {edge} for node {node}")]
    InvalidConnection {
        /// The offending node.
        node: BrickId,
        /// The edge in question.
        edge: Edge,
    },
    /// A child fills an argument slot of an incompatible type.
    #[error("data type mismatch for argument {arg} in node {node}")]
    TypeMismatch {
        /// The slot.
        arg: ArgId,
        /// The node declaring the slot.
        node: BrickId,
        /// Type the slot accepts.
        expected: DataType,
        /// Type the child declares.
        found: DataType,
    },
    /// A node holds a child its brick no longer accepts.
    #[error("node {node} cannot hold child {child}")]
    InvalidChild {
        /// The parent node.
        node: BrickId,
        /// The rejected child.
        child: BrickId,
    },
    /// The node's brick has been deleted from the registry.
    #[error("node {node} refers to an unregistered brick")]
    MissingBrick {
        /// The dangling node.
        node: BrickId,
    },
}
