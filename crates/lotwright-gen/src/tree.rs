//! Binary partition trees over room-program indexes.
//!
//! A tree over `n` indexes has exactly `n` leaves. Each internal node
//! carries the index set it is responsible for and splits it between two
//! children; instantiation reads the tree top-down and carves the lot
//! accordingly, writing scores back into the nodes it settles.

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use lotwright_core::edge::Orientation;

/// Which child takes the lower-coordinate room when a node splits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SplitOrder {
    Forward,
    Reversed,
}

impl SplitOrder {
    pub fn flip(self) -> SplitOrder {
        match self {
            SplitOrder::Forward => SplitOrder::Reversed,
            SplitOrder::Reversed => SplitOrder::Forward,
        }
    }

    /// Child positions in read order: (first, second).
    pub fn indexes(&self) -> (usize, usize) {
        match self {
            SplitOrder::Forward => (0, 1),
            SplitOrder::Reversed => (1, 0),
        }
    }
}

/// A structural violation found by [`Node::validate`].
#[derive(Debug, Clone, PartialEq)]
pub struct TreeViolation {
    pub category: &'static str,
    pub message: String,
}

/// One node of a partition tree.
///
/// Leaves hold exactly one program index. Internal nodes hold the union
/// of their children's indexes and the knobs that shape the split: the
/// dividing wall's axis, whether a hallway may be padded in, which child
/// takes the lower-coordinate side, and the ratio bias `t`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub orientation: Orientation,
    pub children: Vec<Node>,
    pub padding: bool,
    pub order: SplitOrder,
    pub t: f32,
    pub room_indexes: Vec<usize>,
    pub score: Option<f32>,
}

impl Node {
    pub fn is_leaf(&self) -> bool {
        self.children.len() < 2
    }

    /// Total node count, this node included.
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(Node::node_count).sum::<usize>()
    }

    pub fn leaf_count(&self) -> usize {
        if self.is_leaf() {
            1
        } else {
            self.children.iter().map(Node::leaf_count).sum()
        }
    }

    /// The `n`th node in preorder, zero being this node.
    pub fn nth_node(&self, n: usize) -> Option<&Node> {
        if n == 0 {
            return Some(self);
        }
        let mut rest = n - 1;
        for child in &self.children {
            let count = child.node_count();
            if rest < count {
                return child.nth_node(rest);
            }
            rest -= count;
        }
        None
    }

    pub fn nth_node_mut(&mut self, n: usize) -> Option<&mut Node> {
        if n == 0 {
            return Some(self);
        }
        let mut rest = n - 1;
        for child in &mut self.children {
            let count = child.node_count();
            if rest < count {
                return child.nth_node_mut(rest);
            }
            rest -= count;
        }
        None
    }

    /// Collects every node whose index set has the given size, in
    /// preorder. Subtree grafting uses this to find size-compatible
    /// donors.
    pub fn nodes_with_index_count<'a>(&'a self, size: usize, out: &mut Vec<&'a Node>) {
        if self.room_indexes.len() == size {
            out.push(self);
        }
        for child in &self.children {
            child.nodes_with_index_count(size, out);
        }
    }

    /// Checks the partition structure: leaves hold one in-range index,
    /// internal nodes have two children whose index sets partition the
    /// parent's, and no index repeats at the root.
    pub fn validate(&self, program_count: usize) -> Vec<TreeViolation> {
        let mut out = Vec::new();
        let mut sorted = self.room_indexes.clone();
        sorted.sort_unstable();
        sorted.dedup();
        if sorted.len() != self.room_indexes.len() {
            out.push(TreeViolation {
                category: "coverage",
                message: "root index set contains duplicates".to_string(),
            });
        }
        self.validate_into(program_count, &mut out);
        out
    }

    fn validate_into(&self, program_count: usize, out: &mut Vec<TreeViolation>) {
        match self.children.len() {
            0 => {
                if self.room_indexes.len() != 1 {
                    out.push(TreeViolation {
                        category: "leaf",
                        message: format!(
                            "leaf holds {} indexes, expected exactly one",
                            self.room_indexes.len()
                        ),
                    });
                } else if self.room_indexes[0] >= program_count {
                    out.push(TreeViolation {
                        category: "leaf",
                        message: format!(
                            "leaf index {} outside program list of {}",
                            self.room_indexes[0], program_count
                        ),
                    });
                }
            }
            2 => {
                let mut combined: Vec<usize> = self
                    .children
                    .iter()
                    .flat_map(|c| c.room_indexes.iter().copied())
                    .collect();
                combined.sort_unstable();
                let mut own = self.room_indexes.clone();
                own.sort_unstable();
                if combined != own {
                    out.push(TreeViolation {
                        category: "partition",
                        message: format!(
                            "children cover {:?} but the parent holds {:?}",
                            combined, own
                        ),
                    });
                }
                for child in &self.children {
                    child.validate_into(program_count, out);
                }
            }
            n => {
                out.push(TreeViolation {
                    category: "shape",
                    message: format!("node has {n} children, expected none or two"),
                });
                for child in &self.children {
                    child.validate_into(program_count, out);
                }
            }
        }
    }
}

/// Builds a random partition tree over `indexes`. Every node draws a
/// random orientation, padding flag, and order; `t` starts at the
/// midpoint so splits begin area-proportional.
pub fn generate_tree(indexes: &[usize], rng: &mut impl Rng) -> Node {
    let mut root = random_node(indexes.to_vec(), rng);
    expand(&mut root, rng);
    root
}

fn random_node(room_indexes: Vec<usize>, rng: &mut impl Rng) -> Node {
    Node {
        orientation: if rng.gen_bool(0.5) {
            Orientation::Horizontal
        } else {
            Orientation::Vertical
        },
        children: Vec::new(),
        padding: rng.gen_bool(0.5),
        order: if rng.gen_bool(0.5) {
            SplitOrder::Forward
        } else {
            SplitOrder::Reversed
        },
        t: 0.5,
        room_indexes,
        score: None,
    }
}

fn expand(node: &mut Node, rng: &mut impl Rng) {
    if node.room_indexes.len() <= 1 {
        return;
    }
    let (left, right) = partition_indexes(&node.room_indexes, rng);
    let mut left_child = random_node(left, rng);
    let mut right_child = random_node(right, rng);
    expand(&mut left_child, rng);
    expand(&mut right_child, rng);
    node.children = vec![left_child, right_child];
}

/// Shuffles and bisects: the floor half goes left, the rest right.
fn partition_indexes(indexes: &[usize], rng: &mut impl Rng) -> (Vec<usize>, Vec<usize>) {
    let mut shuffled = indexes.to_vec();
    shuffled.shuffle(rng);
    let mid = shuffled.len() / 2;
    let right = shuffled.split_off(mid);
    (shuffled, right)
}
