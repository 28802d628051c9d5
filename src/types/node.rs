use std::fmt;

use super::checker::Checker;

/// A logical connector joining two atoms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Connector {
    And,
    Or,
}

impl Connector {
    /// The character that, doubled, spells this connector.
    #[must_use]
    pub fn symbol(self) -> char {
        match self {
            Connector::And => '&',
            Connector::Or => '|',
        }
    }

    #[must_use]
    pub fn from_symbol(ch: char) -> Option<Self> {
        match ch {
            '&' => Some(Connector::And),
            '|' => Some(Connector::Or),
            _ => None,
        }
    }
}

impl fmt::Display for Connector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Connector::And => write!(f, "&&"),
            Connector::Or => write!(f, "||"),
        }
    }
}

/// Index of a node inside its [`RuleTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

/// A node of a compiled rule tree. Logical nodes refer to their children by
/// [`NodeId`] within the same tree.
#[derive(Debug, Clone, PartialEq)]
pub enum RuleNode {
    Compare { field: String, checker: Checker },
    And(NodeId, NodeId),
    Or(NodeId, NodeId),
}

/// A full binary rule tree stored as a flat arena.
///
/// Every logical node owns exactly two children and every comparison node is
/// a leaf. Children are always stored before their parent, so the root is the
/// last node. No operation on the tree recurses, which keeps rules of any
/// length safe to walk, compare, clone and drop.
#[derive(Debug, Clone, PartialEq)]
pub struct RuleTree {
    nodes: Vec<RuleNode>,
}

impl RuleTree {
    pub(crate) fn new() -> Self {
        Self { nodes: Vec::new() }
    }

    pub(crate) fn push(&mut self, node: RuleNode) -> NodeId {
        debug_assert!(match &node {
            RuleNode::Compare { .. } => true,
            RuleNode::And(l, r) | RuleNode::Or(l, r) => {
                l.0 < self.nodes.len() && r.0 < self.nodes.len()
            }
        });
        self.nodes.push(node);
        NodeId(self.nodes.len() - 1)
    }

    pub(crate) fn at(&self, id: NodeId) -> &RuleNode {
        &self.nodes[id.0]
    }

    #[must_use]
    pub fn root_id(&self) -> NodeId {
        NodeId(self.nodes.len().saturating_sub(1))
    }

    #[must_use]
    pub fn root(&self) -> &RuleNode {
        self.at(self.root_id())
    }

    /// Look up a node by id. `None` for an id from a larger tree.
    #[must_use]
    pub fn node(&self, id: NodeId) -> Option<&RuleNode> {
        self.nodes.get(id.0)
    }

    /// Number of comparison leaves.
    #[must_use]
    pub fn atom_count(&self) -> usize {
        self.nodes
            .iter()
            .filter(|n| matches!(n, RuleNode::Compare { .. }))
            .count()
    }

    /// Longest root-to-leaf path, counting the root.
    #[must_use]
    pub fn depth(&self) -> usize {
        let mut depths: Vec<usize> = Vec::with_capacity(self.nodes.len());
        for node in &self.nodes {
            let d = match node {
                RuleNode::Compare { .. } => 1,
                RuleNode::And(l, r) | RuleNode::Or(l, r) => 1 + depths[l.0].max(depths[r.0]),
            };
            depths.push(d);
        }
        depths.last().copied().unwrap_or(0)
    }
}

enum Piece {
    Node(NodeId),
    Text(&'static str),
}

/// Renders the tree fully parenthesized, e.g. `((V={1} AND P={2}) AND A={3})`.
impl fmt::Display for RuleTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.nodes.is_empty() {
            return Ok(());
        }
        let mut stack = vec![Piece::Node(self.root_id())];
        while let Some(piece) = stack.pop() {
            let (left, op, right) = match piece {
                Piece::Text(text) => {
                    f.write_str(text)?;
                    continue;
                }
                Piece::Node(id) => match self.at(id) {
                    RuleNode::Compare { field, checker } => {
                        write!(f, "{field}={checker}")?;
                        continue;
                    }
                    RuleNode::And(l, r) => (*l, " AND ", *r),
                    RuleNode::Or(l, r) => (*l, " OR ", *r),
                },
            };
            f.write_str("(")?;
            stack.extend([
                Piece::Text(")"),
                Piece::Node(right),
                Piece::Text(op),
                Piece::Node(left),
            ]);
        }
        Ok(())
    }
}
