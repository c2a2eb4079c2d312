/// Splitting rule shared by insertion and search.
pub mod partition;

use crate::{scalar::Float, vector::VectorN};

pub use partition::*;

/// Index of a node in a [`Tree`].
pub type NodeID = u32;

/// Generic tree data structure stored as an arena.
#[derive(Debug)]
pub struct Tree<Node, Data> {
    /// Vector of `Node` objects that define the structure of the tree.
    pub nodes: Vec<Node>,

    /// Vector of generic `Data` objects that contain information about the associated `Node`.
    ///
    /// The `data` vector is parallel to the `nodes` vector, so the `i`-th element of the `data`
    /// vector corresponds to the `i`-th element of the `nodes` vector.
    pub data: Vec<Data>,
}

impl<Node, Data> Tree<Node, Data> {
    /// Creates a new empty [`Tree`].
    #[inline]
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            data: Vec::new(),
        }
    }

    /// Creates a new empty [`Tree`] with at least the specified capacity in the `nodes` and
    /// `data` vectors.
    #[inline]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(capacity),
            data: Vec::with_capacity(capacity),
        }
    }

    /// Returns the number of nodes in the [`Tree`].
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns `true` if the [`Tree`] has no nodes.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

impl<Node, Data> Default for Tree<Node, Data> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

/// Node of a K-D tree. The point it splits on is stored at the same index in [`Tree::data`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct KdNode {
    /// Coordinate this node splits its subtree on.
    pub axis: usize,
    /// Subtree of the points lower than or equal to this node's point on `axis`.
    pub left: Option<NodeID>,
    /// Subtree of the points strictly greater than this node's point on `axis`.
    pub right: Option<NodeID>,
}

impl KdNode {
    /// Creates a new [`KdNode`] without children.
    #[inline]
    pub const fn leaf(axis: usize) -> Self {
        Self {
            axis,
            left: None,
            right: None,
        }
    }

    /// Returns the child on the given side.
    #[inline]
    pub const fn child(&self, side: Side) -> Option<NodeID> {
        match side {
            Side::Left => self.left,
            Side::Right => self.right,
        }
    }

    #[inline]
    fn child_mut(&mut self, side: Side) -> &mut Option<NodeID> {
        match side {
            Side::Left => &mut self.left,
            Side::Right => &mut self.right,
        }
    }
}

/// Last node reached when descending a K-D tree with the splitting rule.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Descent {
    /// Node whose child slot on `side` is empty.
    pub parent: NodeID,
    /// Side of `parent` the descended point falls on.
    pub side: Side,
    /// Depth of `parent`, the root being at depth 1.
    pub depth: usize,
}

/// K-D tree over points of type [`VectorN`].
pub type KdArena<const D: usize, S> = Tree<KdNode, VectorN<D, S>>;

impl<const D: usize, S: Float> KdArena<D, S> {
    /// Descends from `root`, going left when `point` is lower than or equal to a node's point on
    /// that node's axis and right otherwise, until the chosen child slot is empty.
    ///
    /// Returns `None` if there is no root.
    pub fn descend(&self, root: Option<NodeID>, point: &VectorN<D, S>) -> Option<Descent> {
        let mut current = root?;
        let mut depth = 1;

        loop {
            let node = &self.nodes[current as usize];
            let side = Side::of_point(point, &self.data[current as usize], node.axis);

            match node.child(side) {
                Some(child) => {
                    current = child;
                    depth += 1;
                }
                None => {
                    return Some(Descent {
                        parent: current,
                        side,
                        depth,
                    })
                }
            }
        }
    }

    /// Stores `point` and attaches a new leaf referencing it in the first empty child slot found
    /// by [`KdArena::descend`], or as a root on axis 0 if `root` is `None`.
    ///
    /// Returns the id of the new node and its depth.
    ///
    /// # Panics
    ///
    /// Panics if the tree already holds `NodeID::MAX` nodes.
    pub fn attach(&mut self, root: Option<NodeID>, point: VectorN<D, S>) -> (NodeID, usize) {
        let len = self.nodes.len();
        assert!(
            len < NodeID::MAX as usize,
            "point store exhausted after {len} points"
        );
        let id = len as NodeID;

        let (node, depth) = match self.descend(root, &point) {
            None => (KdNode::leaf(0), 1),
            Some(Descent {
                parent,
                side,
                depth,
            }) => {
                let parent = &mut self.nodes[parent as usize];
                *parent.child_mut(side) = Some(id);
                (KdNode::leaf(next_axis::<D>(parent.axis)), depth + 1)
            }
        };

        self.nodes.push(node);
        self.data.push(point);

        (id, depth)
    }
}
