// Copyright 2025 the Masonry Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The composition tree: structure, atomic edits, and nest extent upkeep.

use alloc::string::String;
use alloc::vec::Vec;
use hashbrown::{HashMap, HashSet};
use kurbo::Size;
use smallvec::SmallVec;

use crate::brick::Brick;
use crate::error::StructuralError;
use crate::registry::Registry;
use crate::types::{BrickId, BrickKind, BrickType};

/// A detached subtree: the unit of insertion, and the snapshot format.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StackNode {
    /// The brick held by this node.
    pub brick: BrickId,
    /// Ordered children.
    pub children: Vec<StackNode>,
}

impl StackNode {
    /// A leaf node holding `brick`.
    pub fn new(brick: impl Into<BrickId>) -> Self {
        Self {
            brick: brick.into(),
            children: Vec::new(),
        }
    }

    /// Append a child.
    #[must_use]
    pub fn with_child(mut self, child: Self) -> Self {
        self.children.push(child);
        self
    }
}

#[derive(Clone, Debug, Default)]
struct Node {
    parent: Option<BrickId>,
    children: SmallVec<[BrickId; 4]>,
}

/// A tree of bricks representing an in-progress program.
///
/// Nodes are addressed by the identifier of the brick they hold; each brick
/// appears at most once. Bricks themselves live in a [`Registry`], which every
/// edit takes by reference so that block nest extents can be kept current.
///
/// Every edit either succeeds completely or returns a [`StructuralError`] and
/// leaves the stack untouched.
///
/// ## Example
///
/// ```rust
/// use masonry_brick::{BlockParams, Registry, Stack, StackNode, ValueParams};
///
/// let mut registry = Registry::new();
/// let block = registry.create_block(BlockParams::default()).unwrap();
/// let value = registry.create_value(ValueParams::default()).unwrap();
///
/// let mut stack = Stack::new("main");
/// stack.add_node(&mut registry, StackNode::new(block.clone()), None).unwrap();
/// stack.add_node(&mut registry, StackNode::new(value.clone()), Some(&block)).unwrap();
///
/// assert_eq!(stack.children_of(&block), [value]);
/// let nest = registry.get(&block).unwrap().nest_extent().unwrap();
/// assert_eq!(nest.height, 20.0);
/// ```
#[derive(Clone, Debug)]
pub struct Stack {
    id: String,
    roots: Vec<BrickId>,
    nodes: HashMap<BrickId, Node>,
    validation_enabled: bool,
}

impl Stack {
    /// Create an empty stack with validation enabled.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            roots: Vec::new(),
            nodes: HashMap::new(),
            validation_enabled: true,
        }
    }

    /// Identifier of this stack.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Root bricks, in order.
    pub fn roots(&self) -> &[BrickId] {
        &self.roots
    }

    /// Children of a node, or an empty slice if it is not in the stack.
    pub fn children_of(&self, id: &BrickId) -> &[BrickId] {
        match self.nodes.get(id) {
            Some(n) => &n.children,
            None => &[],
        }
    }

    /// Parent of a node; `None` for roots and absent nodes.
    pub fn parent_of(&self, id: &BrickId) -> Option<&BrickId> {
        self.nodes.get(id).and_then(|n| n.parent.as_ref())
    }

    /// Whether a node holds this brick.
    pub fn contains(&self, id: &BrickId) -> bool {
        self.nodes.contains_key(id)
    }

    /// Number of nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the stack has no nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Snapshot of the whole tree.
    pub fn root_nodes(&self) -> Vec<StackNode> {
        self.roots.iter().map(|r| self.snapshot(r)).collect()
    }

    /// Snapshot of the subtree rooted at `id`.
    pub fn node(&self, id: &BrickId) -> Option<StackNode> {
        self.contains(id).then(|| self.snapshot(id))
    }

    /// Whether validation is currently enabled.
    pub fn is_validation_enabled(&self) -> bool {
        self.validation_enabled
    }

    /// Re-enable validation.
    pub fn enable_validation(&mut self) {
        self.validation_enabled = true;
    }

    /// Disable validation; [`Stack::validate`] then reports `true` until re-enabled.
    pub fn disable_validation(&mut self) {
        self.validation_enabled = false;
    }

    /// Attach `node` (with its subtree) under `parent`, or as the last root if `None`.
    ///
    /// Nest extents of blocks inside the subtree and along the path from
    /// `parent` to the root are recomputed.
    ///
    /// # Errors
    ///
    /// - [`StructuralError::NotFound`] if `parent` is not in the stack.
    /// - [`StructuralError::UnregisteredBrick`] if any brick involved is not registered.
    /// - [`StructuralError::DuplicateBrick`] if a brick of the subtree is already
    ///   attached, or appears twice in the subtree.
    /// - [`StructuralError::CannotHaveChildren`] / [`StructuralError::InvalidChild`]
    ///   if a parent does not accept a child.
    pub fn add_node(
        &mut self,
        registry: &mut Registry,
        node: StackNode,
        parent: Option<&BrickId>,
    ) -> Result<(), StructuralError> {
        if let Some(p) = parent {
            if !self.contains(p) {
                return Err(StructuralError::NotFound(p.clone()));
            }
            check_child(lookup(registry, p)?, lookup(registry, &node.brick)?)?;
        }
        self.check_subtree(registry, &node)?;

        let id = node.brick.clone();
        self.insert_subtree(&node, parent.cloned());
        match parent.and_then(|p| self.nodes.get_mut(p)) {
            Some(p) => p.children.push(id.clone()),
            None => self.roots.push(id.clone()),
        }
        self.recompute_subtree(registry, &id);
        if let Some(p) = parent {
            self.recompute_upward(registry, p);
        }
        log::debug!(
            "stack `{}`: added `{id}` under {}",
            self.id,
            parent.map_or("<root>", BrickId::as_str)
        );
        Ok(())
    }

    /// Detach the node holding `id` (with its subtree) and return it.
    ///
    /// Bricks stay in the registry.
    ///
    /// # Errors
    ///
    /// Returns [`StructuralError::NotFound`] if no node holds `id`.
    pub fn remove_node(
        &mut self,
        registry: &mut Registry,
        id: &BrickId,
    ) -> Result<StackNode, StructuralError> {
        if !self.contains(id) {
            return Err(StructuralError::NotFound(id.clone()));
        }
        let detached = self.snapshot(id);
        let parent = self.parent_of(id).cloned();
        self.unlink(id);
        self.drop_subtree(id);
        if let Some(p) = &parent {
            self.recompute_upward(registry, p);
        }
        log::debug!("stack `{}`: removed `{id}`", self.id);
        Ok(detached)
    }

    /// Move the node holding `id` to position `index` under `new_parent`, or in
    /// the root sequence if `None`.
    ///
    /// `index` is interpreted after the node has been detached. The destination
    /// is fully validated before anything is detached.
    ///
    /// # Errors
    ///
    /// - [`StructuralError::NotFound`] if `id` or `new_parent` is not in the stack.
    /// - [`StructuralError::Cycle`] if `new_parent` is `id` or one of its descendants.
    /// - [`StructuralError::CannotHaveChildren`] / [`StructuralError::InvalidChild`]
    ///   if the destination does not accept the node.
    /// - [`StructuralError::IndexOutOfBounds`] if `index` is past the end.
    pub fn move_node(
        &mut self,
        registry: &mut Registry,
        id: &BrickId,
        new_parent: Option<&BrickId>,
        index: usize,
    ) -> Result<(), StructuralError> {
        if !self.contains(id) {
            return Err(StructuralError::NotFound(id.clone()));
        }
        let old_parent = self.parent_of(id).cloned();
        let len = match new_parent {
            Some(p) => {
                if !self.contains(p) {
                    return Err(StructuralError::NotFound(p.clone()));
                }
                if p == id || self.is_ancestor(id, p) {
                    return Err(StructuralError::Cycle {
                        node: id.clone(),
                        parent: p.clone(),
                    });
                }
                check_child(lookup(registry, p)?, lookup(registry, id)?)?;
                let n = self.children_of(p).len();
                if old_parent.as_ref() == Some(p) { n - 1 } else { n }
            }
            None => {
                let n = self.roots.len();
                if old_parent.is_none() { n - 1 } else { n }
            }
        };
        if index > len {
            return Err(StructuralError::IndexOutOfBounds { index, len });
        }

        self.unlink(id);
        match new_parent.and_then(|p| self.nodes.get_mut(p)) {
            Some(p) => p.children.insert(index, id.clone()),
            None => self.roots.insert(index, id.clone()),
        }
        if let Some(n) = self.nodes.get_mut(id) {
            n.parent = new_parent.cloned();
        }
        if let Some(p) = &old_parent {
            self.recompute_upward(registry, p);
        }
        if let Some(p) = new_parent {
            self.recompute_upward(registry, p);
        }
        log::debug!(
            "stack `{}`: moved `{id}` to {}[{index}]",
            self.id,
            new_parent.map_or("<root>", BrickId::as_str)
        );
        Ok(())
    }

    /// Fold a block node.
    ///
    /// # Errors
    ///
    /// [`StructuralError::NotFound`], [`StructuralError::UnregisteredBrick`], or
    /// [`StructuralError::NotABlock`].
    pub fn collapse(
        &mut self,
        registry: &mut Registry,
        id: &BrickId,
    ) -> Result<(), StructuralError> {
        self.set_folded(registry, id, true)
    }

    /// Unfold a block node.
    ///
    /// # Errors
    ///
    /// [`StructuralError::NotFound`], [`StructuralError::UnregisteredBrick`], or
    /// [`StructuralError::NotABlock`].
    pub fn expand(
        &mut self,
        registry: &mut Registry,
        id: &BrickId,
    ) -> Result<(), StructuralError> {
        self.set_folded(registry, id, false)
    }

    fn set_folded(
        &mut self,
        registry: &mut Registry,
        id: &BrickId,
        folded: bool,
    ) -> Result<(), StructuralError> {
        if !self.contains(id) {
            return Err(StructuralError::NotFound(id.clone()));
        }
        let brick = registry
            .get_mut(id)
            .ok_or_else(|| StructuralError::UnregisteredBrick(id.clone()))?;
        brick
            .set_folded(folded)
            .map_err(|_| StructuralError::NotABlock(id.clone()))?;
        self.recompute_upward(registry, id);
        log::debug!("stack `{}`: folded `{id}` = {folded}", self.id);
        Ok(())
    }

    // --- internals ---

    fn snapshot(&self, id: &BrickId) -> StackNode {
        // Each frame is a node under construction and the index of its next child.
        let mut frames = alloc::vec![(StackNode::new(id.clone()), 0_usize)];
        let mut done = None;
        while let Some((node, next)) = frames.last_mut() {
            if let Some(child) = self.children_of(&node.brick).get(*next) {
                *next += 1;
                frames.push((StackNode::new(child.clone()), 0));
            } else if let Some((finished, _)) = frames.pop() {
                match frames.last_mut() {
                    Some((parent, _)) => parent.children.push(finished),
                    None => done = Some(finished),
                }
            }
        }
        done.unwrap_or_else(|| StackNode::new(id.clone()))
    }

    /// `id` and its descendants, parents before children.
    fn subtree_preorder(&self, id: &BrickId) -> Vec<BrickId> {
        let mut order = Vec::new();
        let mut pending = alloc::vec![id];
        while let Some(current) = pending.pop() {
            order.push(current.clone());
            pending.extend(self.children_of(current).iter().rev());
        }
        order
    }

    /// Whether `ancestor` lies on the path from `node` to its root.
    fn is_ancestor(&self, ancestor: &BrickId, node: &BrickId) -> bool {
        let mut current = self.parent_of(node);
        while let Some(p) = current {
            if p == ancestor {
                return true;
            }
            current = self.parent_of(p);
        }
        false
    }

    /// Check every brick of a detached subtree before anything is attached.
    fn check_subtree(&self, registry: &Registry, root: &StackNode) -> Result<(), StructuralError> {
        let mut seen: HashSet<&BrickId> = HashSet::new();
        let mut pending = alloc::vec![root];
        while let Some(node) = pending.pop() {
            let brick = lookup(registry, &node.brick)?;
            if self.contains(&node.brick) || !seen.insert(&node.brick) {
                return Err(StructuralError::DuplicateBrick(node.brick.clone()));
            }
            for child in &node.children {
                check_child(brick, lookup(registry, &child.brick)?)?;
                pending.push(child);
            }
        }
        Ok(())
    }

    fn insert_subtree(&mut self, root: &StackNode, parent: Option<BrickId>) {
        let mut pending = alloc::vec![(root, parent)];
        while let Some((node, parent)) = pending.pop() {
            self.nodes.insert(
                node.brick.clone(),
                Node {
                    parent,
                    children: node.children.iter().map(|c| c.brick.clone()).collect(),
                },
            );
            pending.extend(node.children.iter().map(|c| (c, Some(node.brick.clone()))));
        }
    }

    /// Remove `id` from its parent's children or from the roots.
    fn unlink(&mut self, id: &BrickId) {
        match self.parent_of(id).cloned() {
            Some(p) => {
                if let Some(parent) = self.nodes.get_mut(&p) {
                    parent.children.retain(|c| c != id);
                }
            }
            None => self.roots.retain(|r| r != id),
        }
        if let Some(n) = self.nodes.get_mut(id) {
            n.parent = None;
        }
    }

    fn drop_subtree(&mut self, id: &BrickId) {
        let mut pending = alloc::vec![id.clone()];
        while let Some(current) = pending.pop() {
            if let Some(node) = self.nodes.remove(&current) {
                pending.extend(node.children);
            }
        }
    }

    /// Recompute nest extents inside a subtree, children first.
    fn recompute_subtree(&self, registry: &mut Registry, id: &BrickId) {
        for block in self.subtree_preorder(id).iter().rev() {
            self.recompute_nest(registry, block);
        }
    }

    /// Recompute nest extents from `start` up to its root.
    fn recompute_upward(&self, registry: &mut Registry, start: &BrickId) {
        let mut current = Some(start);
        while let Some(id) = current {
            self.recompute_nest(registry, id);
            current = self.parent_of(id);
        }
    }

    /// Widest child footprint by summed child footprint heights; blocks only.
    ///
    /// A child block contributes its own nest extent through
    /// [`Brick::footprint`], whether computed here or measured by the caller.
    fn recompute_nest(&self, registry: &mut Registry, id: &BrickId) {
        if registry.get(id).map(Brick::brick_type) != Some(BrickType::Block) {
            return;
        }
        let extent = self
            .children_of(id)
            .iter()
            .filter_map(|c| registry.get(c))
            .map(Brick::footprint)
            .fold(Size::ZERO, |acc, e| {
                Size::new(acc.width.max(e.width), acc.height + e.height)
            });
        if let Some(block) = registry.get_mut(id) {
            log::trace!("nest extent of `{id}` = {extent:?}");
            block.update_nest_extent(extent);
        }
    }
}

fn lookup<'r>(registry: &'r Registry, id: &BrickId) -> Result<&'r Brick, StructuralError> {
    registry
        .get(id)
        .ok_or_else(|| StructuralError::UnregisteredBrick(id.clone()))
}

/// Blocks hold anything; expressions and argument-bearing statements hold
/// argument bricks; values hold nothing.
pub(crate) fn check_child(parent: &Brick, child: &Brick) -> Result<(), StructuralError> {
    let accepts = match parent.brick_type() {
        BrickType::Block => true,
        BrickType::Expression => child.kind() == BrickKind::Argument,
        BrickType::Statement if !parent.args().is_empty() => child.kind() == BrickKind::Argument,
        BrickType::Statement | BrickType::Value => {
            return Err(StructuralError::CannotHaveChildren(parent.id().clone()));
        }
    };
    if accepts {
        Ok(())
    } else {
        Err(StructuralError::InvalidChild {
            parent: parent.id().clone(),
            child: child.id().clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::factory::{BlockParams, BrickParams, ExpressionParams, StatementParams, ValueParams};
    use crate::types::{ArgSlot, DataType};
    use alloc::format;
    use alloc::vec;

    fn value(registry: &mut Registry, id: &str, width: f64, scale: f64) -> BrickId {
        registry
            .create_value(ValueParams {
                brick: BrickParams {
                    id: Some(BrickId::from(id)),
                    scale,
                    inner_length_x: width,
                    ..BrickParams::default()
                },
                data_type: DataType::Number,
                ..ValueParams::default()
            })
            .unwrap()
    }

    fn block(registry: &mut Registry, id: &str) -> BrickId {
        registry
            .create_block(BlockParams {
                brick: BrickParams::default().with_id(id),
                ..BlockParams::default()
            })
            .unwrap()
    }

    fn statement(registry: &mut Registry, id: &str) -> BrickId {
        registry
            .create_statement(StatementParams {
                brick: BrickParams::default().with_id(id),
                ..StatementParams::default()
            })
            .unwrap()
    }

    fn nest(registry: &Registry, id: &BrickId) -> Size {
        registry.get(id).unwrap().nest_extent().unwrap()
    }

    #[test]
    fn nest_extent_tracks_children() {
        let mut registry = Registry::new();
        let b = block(&mut registry, "b");
        // Value bodies are 20 high at scale 1: {40, 20} and {30, 15}.
        let v1 = value(&mut registry, "v1", 40.0, 1.0);
        let v2 = value(&mut registry, "v2", 40.0, 0.75);
        let mut stack = Stack::new("s");
        stack.add_node(&mut registry, StackNode::new(b.clone()), None).unwrap();
        stack.add_node(&mut registry, StackNode::new(v1.clone()), Some(&b)).unwrap();
        stack.add_node(&mut registry, StackNode::new(v2), Some(&b)).unwrap();
        assert_eq!(nest(&registry, &b), Size::new(40.0, 35.0));

        stack.remove_node(&mut registry, &v1).unwrap();
        assert_eq!(nest(&registry, &b), Size::new(30.0, 15.0));
    }

    #[test]
    fn add_then_remove_restores_shape() {
        let mut registry = Registry::new();
        let outer = block(&mut registry, "outer");
        let inner = block(&mut registry, "inner");
        let s1 = statement(&mut registry, "s1");
        let s2 = statement(&mut registry, "s2");
        let mut stack = Stack::new("s");
        stack
            .add_node(
                &mut registry,
                StackNode::new(outer.clone()).with_child(StackNode::new(s1)),
                None,
            )
            .unwrap();
        let before = stack.root_nodes();
        let nest_before = nest(&registry, &outer);

        let subtree = StackNode::new(inner.clone()).with_child(StackNode::new(s2));
        stack.add_node(&mut registry, subtree.clone(), Some(&outer)).unwrap();
        assert_ne!(nest(&registry, &outer), nest_before);
        assert!(nest(&registry, &inner).height > 0.0, "subtree blocks are measured");

        let removed = stack.remove_node(&mut registry, &inner).unwrap();
        assert_eq!(removed, subtree);
        assert_eq!(stack.root_nodes(), before);
        assert_eq!(nest(&registry, &outer), nest_before);
        assert_eq!(stack.len(), 2);
    }

    #[test]
    fn remove_missing_is_an_error() {
        let mut registry = Registry::new();
        let mut stack = Stack::new("s");
        assert_eq!(
            stack.remove_node(&mut registry, &BrickId::from("ghost")),
            Err(StructuralError::NotFound(BrickId::from("ghost")))
        );
    }

    #[test]
    fn parent_must_accept_children() {
        let mut registry = Registry::new();
        let v = value(&mut registry, "v", 40.0, 1.0);
        let s = statement(&mut registry, "s");
        let w = value(&mut registry, "w", 40.0, 1.0);
        let mut stack = Stack::new("s");
        stack.add_node(&mut registry, StackNode::new(v.clone()), None).unwrap();
        stack.add_node(&mut registry, StackNode::new(s.clone()), None).unwrap();
        let before = stack.root_nodes();

        assert_eq!(
            stack.add_node(&mut registry, StackNode::new(w.clone()), Some(&v)),
            Err(StructuralError::CannotHaveChildren(v.clone()))
        );
        // A statement without argument slots holds nothing either.
        assert_eq!(
            stack.add_node(&mut registry, StackNode::new(w.clone()), Some(&s)),
            Err(StructuralError::CannotHaveChildren(s))
        );
        assert_eq!(stack.root_nodes(), before);
        assert!(!stack.contains(&w));
    }

    #[test]
    fn expressions_hold_arguments_only() {
        let mut registry = Registry::new();
        let e = registry
            .create_expression(ExpressionParams {
                brick: BrickParams::default().with_id("e"),
                args: vec![ArgSlot::new("x", "x", DataType::Number)],
                ..ExpressionParams::default()
            })
            .unwrap();
        let s = statement(&mut registry, "s");
        let mut stack = Stack::new("s");
        stack.add_node(&mut registry, StackNode::new(e.clone()), None).unwrap();
        assert_eq!(
            stack.add_node(&mut registry, StackNode::new(s.clone()), Some(&e)),
            Err(StructuralError::InvalidChild { parent: e, child: s })
        );
    }

    #[test]
    fn add_rejects_duplicates_and_unknown_bricks() {
        let mut registry = Registry::new();
        let b = block(&mut registry, "b");
        let s = statement(&mut registry, "s");
        let mut stack = Stack::new("s");
        stack.add_node(&mut registry, StackNode::new(b.clone()), None).unwrap();

        assert_eq!(
            stack.add_node(&mut registry, StackNode::new(b.clone()), None),
            Err(StructuralError::DuplicateBrick(b.clone()))
        );
        let twice = StackNode::new(block(&mut registry, "c"))
            .with_child(StackNode::new(s.clone()))
            .with_child(StackNode::new(s.clone()));
        assert_eq!(
            stack.add_node(&mut registry, twice, None),
            Err(StructuralError::DuplicateBrick(s.clone()))
        );
        let ghost = StackNode::new(s.clone()).with_child(StackNode::new("ghost"));
        assert!(stack.add_node(&mut registry, ghost, Some(&b)).is_err());
        assert_eq!(
            stack.add_node(&mut registry, StackNode::new(s.clone()), Some(&BrickId::from("nope"))),
            Err(StructuralError::NotFound(BrickId::from("nope")))
        );
        assert_eq!(stack.len(), 1);
        assert!(stack.children_of(&b).is_empty());
    }

    #[test]
    fn move_to_invalid_parent_changes_nothing() {
        let mut registry = Registry::new();
        let b = block(&mut registry, "b");
        let s = statement(&mut registry, "s");
        let v = value(&mut registry, "v", 40.0, 1.0);
        let mut stack = Stack::new("s");
        stack.add_node(&mut registry, StackNode::new(b.clone()), None).unwrap();
        stack.add_node(&mut registry, StackNode::new(s.clone()), Some(&b)).unwrap();
        stack.add_node(&mut registry, StackNode::new(v.clone()), None).unwrap();
        let before = stack.root_nodes();
        let nest_before = nest(&registry, &b);

        assert_eq!(
            stack.move_node(&mut registry, &s, Some(&v), 0),
            Err(StructuralError::CannotHaveChildren(v))
        );
        assert_eq!(stack.root_nodes(), before);
        assert_eq!(stack.parent_of(&s), Some(&b));
        assert_eq!(nest(&registry, &b), nest_before);
    }

    #[test]
    fn move_rejects_cycles_and_bad_indices() {
        let mut registry = Registry::new();
        let outer = block(&mut registry, "outer");
        let inner = block(&mut registry, "inner");
        let mut stack = Stack::new("s");
        stack
            .add_node(
                &mut registry,
                StackNode::new(outer.clone()).with_child(StackNode::new(inner.clone())),
                None,
            )
            .unwrap();
        let before = stack.root_nodes();
        assert!(matches!(
            stack.move_node(&mut registry, &outer, Some(&inner), 0),
            Err(StructuralError::Cycle { .. })
        ));
        assert!(matches!(
            stack.move_node(&mut registry, &outer, Some(&outer), 0),
            Err(StructuralError::Cycle { .. })
        ));
        assert_eq!(
            stack.move_node(&mut registry, &inner, None, 2),
            Err(StructuralError::IndexOutOfBounds { index: 2, len: 1 })
        );
        assert_eq!(stack.root_nodes(), before);
    }

    #[test]
    fn move_reorders_and_reparents() {
        let mut registry = Registry::new();
        let a = block(&mut registry, "a");
        let b = block(&mut registry, "b");
        let s1 = statement(&mut registry, "s1");
        let s2 = statement(&mut registry, "s2");
        let mut stack = Stack::new("s");
        stack
            .add_node(
                &mut registry,
                StackNode::new(a.clone())
                    .with_child(StackNode::new(s1.clone()))
                    .with_child(StackNode::new(s2.clone())),
                None,
            )
            .unwrap();
        stack.add_node(&mut registry, StackNode::new(b.clone()), None).unwrap();

        stack.move_node(&mut registry, &s2, Some(&a), 0).unwrap();
        assert_eq!(stack.children_of(&a), [s2.clone(), s1.clone()]);

        let before_a = nest(&registry, &a);
        stack.move_node(&mut registry, &s1, Some(&b), 0).unwrap();
        assert_eq!(stack.children_of(&a), [s2.clone()]);
        assert_eq!(stack.children_of(&b), [s1.clone()]);
        assert_eq!(stack.parent_of(&s1), Some(&b));
        assert!(nest(&registry, &a).height < before_a.height);
        assert_eq!(nest(&registry, &b), nest(&registry, &a));

        stack.move_node(&mut registry, &s1, None, 0).unwrap();
        assert_eq!(stack.roots(), [s1.clone(), a, b.clone()]);
        assert_eq!(stack.parent_of(&s1), None);
        assert_eq!(nest(&registry, &b), Size::ZERO);
    }

    #[test]
    fn collapse_and_expand_blocks_only() {
        let mut registry = Registry::new();
        let b = block(&mut registry, "b");
        let s = statement(&mut registry, "s");
        let mut stack = Stack::new("s");
        stack
            .add_node(
                &mut registry,
                StackNode::new(b.clone()).with_child(StackNode::new(s.clone())),
                None,
            )
            .unwrap();
        let expanded = nest(&registry, &b);
        let child_box = registry.get(&s).unwrap().bbox_brick();

        stack.collapse(&mut registry, &b).unwrap();
        assert_eq!(registry.get(&b).unwrap().render_props().folded(), Some(true));
        assert_eq!(nest(&registry, &b), expanded, "folding keeps the nest extent");
        assert_eq!(registry.get(&s).unwrap().bbox_brick(), child_box);

        stack.expand(&mut registry, &b).unwrap();
        assert_eq!(registry.get(&b).unwrap().render_props().folded(), Some(false));

        assert_eq!(
            stack.collapse(&mut registry, &s),
            Err(StructuralError::NotABlock(s))
        );
        assert_eq!(
            stack.expand(&mut registry, &BrickId::from("ghost")),
            Err(StructuralError::NotFound(BrickId::from("ghost")))
        );
    }

    #[test]
    fn nested_blocks_reach_every_ancestor() {
        let mut registry = Registry::new();
        let outer = block(&mut registry, "outer");
        let inner = block(&mut registry, "inner");
        let mut stack = Stack::new("s");
        stack
            .add_node(
                &mut registry,
                StackNode::new(outer.clone()).with_child(StackNode::new(inner.clone())),
                None,
            )
            .unwrap();
        assert_eq!(nest(&registry, &outer), Size::new(100.0, 50.0));

        for name in ["s1", "s2", "s3"] {
            let s = statement(&mut registry, name);
            stack.add_node(&mut registry, StackNode::new(s), Some(&inner)).unwrap();
        }
        // Inner nest {100, 60}; the inner block then takes up {12 + 100, 50 - 30 + 60}.
        assert_eq!(nest(&registry, &inner), Size::new(100.0, 60.0));
        assert_eq!(nest(&registry, &outer), Size::new(112.0, 80.0));

        // A measured nest extent is picked up by the next edit around the outer block.
        registry
            .get_mut(&inner)
            .unwrap()
            .set_nest_extent(Size::new(500.0, 500.0))
            .unwrap();
        let tail = statement(&mut registry, "tail");
        stack.add_node(&mut registry, StackNode::new(tail.clone()), Some(&outer)).unwrap();
        assert_eq!(nest(&registry, &outer), Size::new(512.0, 540.0));
        stack.remove_node(&mut registry, &tail).unwrap();
        assert_eq!(nest(&registry, &outer), Size::new(512.0, 520.0));

        // A folded block takes up its body only.
        stack.collapse(&mut registry, &inner).unwrap();
        assert_eq!(nest(&registry, &outer), Size::new(100.0, 50.0));
        stack.expand(&mut registry, &inner).unwrap();
        assert_eq!(nest(&registry, &outer), Size::new(112.0, 80.0));
    }

    #[test]
    fn deep_programs_round_trip() {
        let mut registry = Registry::new();
        let mut stack = Stack::new("s");
        let mut parent: Option<BrickId> = None;
        for i in 0..2_000 {
            let id = block(&mut registry, &format!("b{i}"));
            stack
                .add_node(&mut registry, StackNode::new(id.clone()), parent.as_ref())
                .unwrap();
            parent = Some(id);
        }
        let root = BrickId::from("b0");
        let snapshot = stack.node(&root).unwrap();
        let mut depth = 0;
        let mut current = &snapshot;
        while let Some(child) = current.children.first() {
            depth += 1;
            current = child;
        }
        assert_eq!(depth, 1_999);

        stack.remove_node(&mut registry, &root).unwrap();
        assert!(stack.is_empty());
        stack.add_node(&mut registry, snapshot, None).unwrap();
        assert_eq!(stack.len(), 2_000);
        assert_eq!(stack.parent_of(&BrickId::from("b1999")), Some(&BrickId::from("b1998")));
    }
}
