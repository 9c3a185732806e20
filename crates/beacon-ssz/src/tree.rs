//! Merkle Tree with Retained Nodes
//!
//! [`Tree`] keeps every interior node of a value's Merkle tree so proofs for
//! any generalized index can be read off without re-hashing. All-zero
//! subtrees are kept as a single [`MerkleNode::Zero`] marker, which keeps a
//! tree over `List[Validator, 2^40]` proportional to the populated elements.

use crate::codec::{self, SszError};
use crate::gindex::{gindex_depth, GeneralizedIndex};
use crate::merkle::{content_chunks, hash_pair, length_chunk, list_length, zero_hash};
use crate::proof::{Proof, ProofBundle};
use crate::schema::SszType;
use crate::value::{Container, Value};
use thiserror::Error;
use tracing::trace;

/// Errors from tree navigation and proof generation
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TreeError {
    #[error("Tree is empty")]
    NilTree,

    #[error("Generalized index {0} is out of range for this tree")]
    IndexOutOfRange(u64),

    #[error("Field {field} not found in {container}")]
    FieldNotFound { container: String, field: String },

    #[error("Element {index} out of range for length {limit}")]
    ElementOutOfRange { index: usize, limit: usize },

    #[error("Path element {element} does not apply to {ty}")]
    InvalidPath { element: String, ty: String },

    #[error("Generalized index does not fit in 64 bits")]
    GindexOverflow,

    #[error(transparent)]
    Ssz(#[from] SszError),
}

/// A node of a Merkle tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MerkleNode {
    /// A 32-byte chunk
    Leaf([u8; 32]),
    /// Root of an all-zero subtree of the given depth
    Zero(u32),
    /// Interior node with its cached root
    Branch {
        root: [u8; 32],
        left: Box<MerkleNode>,
        right: Box<MerkleNode>,
    },
}

impl MerkleNode {
    #[must_use]
    pub fn root(&self) -> [u8; 32] {
        match self {
            Self::Leaf(chunk) => *chunk,
            Self::Zero(depth) => zero_hash(*depth as usize),
            Self::Branch { root, .. } => *root,
        }
    }

    fn branch(left: Self, right: Self) -> Self {
        if let (Self::Zero(l), Self::Zero(r)) = (&left, &right) {
            if l == r {
                return Self::Zero(l + 1);
            }
        }
        let root = hash_pair(&left.root(), &right.root());
        Self::Branch {
            root,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    /// Build a subtree of `depth` whose first leaves are `nodes`
    fn from_nodes(nodes: Vec<Self>, depth: u32) -> Result<Self, SszError> {
        let capacity = 1_usize.checked_shl(depth).unwrap_or(usize::MAX);
        if nodes.len() > capacity {
            return Err(SszError::ListTooBig {
                len: nodes.len(),
                max: capacity,
            });
        }

        let mut layer = nodes;
        if layer.is_empty() {
            return Ok(Self::Zero(depth));
        }
        for level in 0..depth {
            if layer.len() % 2 == 1 {
                layer.push(Self::Zero(level));
            }
            let mut next = Vec::with_capacity(layer.len() / 2);
            let mut iter = layer.into_iter();
            while let (Some(left), Some(right)) = (iter.next(), iter.next()) {
                next.push(Self::branch(left, right));
            }
            layer = next;
        }
        Ok(layer.pop().unwrap_or(Self::Zero(depth)))
    }

    fn build_container(container: &Container) -> Result<Self, SszError> {
        let nodes = container
            .fields()
            .map(|(field, value)| Self::build(value, &field.ty))
            .collect::<Result<Vec<_>, _>>()?;
        Self::from_nodes(nodes, container.schema().depth())
    }

    /// Build the full tree of a value, length mix-in included
    fn build(value: &Value, ty: &SszType) -> Result<Self, SszError> {
        codec::validate_shallow(value, ty)?;
        let depth = ty.tree_depth();
        let contents = match (ty, value) {
            (SszType::Vector(elem, _) | SszType::List(elem, _), Value::List(items)) if !elem.is_basic() => {
                let nodes = items
                    .iter()
                    .map(|item| Self::build(item, elem))
                    .collect::<Result<Vec<_>, _>>()?;
                Self::from_nodes(nodes, depth)?
            }
            (SszType::Container(_), Value::Container(container)) => Self::build_container(container)?,
            _ => {
                let leaves = content_chunks(value, ty)?.into_iter().map(Self::Leaf).collect();
                Self::from_nodes(leaves, depth)?
            }
        };

        if ty.is_list() {
            Ok(Self::branch(contents, Self::Leaf(length_chunk(list_length(value)))))
        } else {
            Ok(contents)
        }
    }
}

/// A node reached while walking the tree; virtual zero nodes have no storage
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Subtree<'a> {
    Node(&'a MerkleNode),
    Zero(u32),
}

impl<'a> Subtree<'a> {
    #[must_use]
    pub fn root(&self) -> [u8; 32] {
        match self {
            Self::Node(node) => node.root(),
            Self::Zero(depth) => zero_hash(*depth as usize),
        }
    }

    fn children(self) -> Option<(Self, Self)> {
        match self {
            Self::Node(MerkleNode::Branch { left, right, .. }) => {
                Some((Self::Node(left.as_ref()), Self::Node(right.as_ref())))
            }
            Self::Node(&MerkleNode::Zero(depth)) | Self::Zero(depth) if depth > 0 => {
                Some((Self::Zero(depth - 1), Self::Zero(depth - 1)))
            }
            _ => None,
        }
    }
}

/// A fully built Merkle tree, or the empty tree
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tree {
    root: Option<MerkleNode>,
}

impl Tree {
    /// Build the tree of `value` interpreted as `ty`
    ///
    /// # Errors
    /// Returns an error if the value does not match the type.
    pub fn build(value: &Value, ty: &SszType) -> Result<Self, SszError> {
        trace!(ty = %ty, "building merkle tree");
        Ok(Self {
            root: Some(MerkleNode::build(value, ty)?),
        })
    }

    /// Build the tree of a container
    ///
    /// # Errors
    /// Returns an error if a field value does not match its declared type.
    pub fn from_container(container: &Container) -> Result<Self, SszError> {
        trace!(container = container.name(), "building merkle tree");
        Ok(Self {
            root: Some(MerkleNode::build_container(container)?),
        })
    }

    /// The tree with no nodes; every query on it fails with `NilTree`
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Root node of the tree
    ///
    /// # Errors
    /// Returns `NilTree` for the empty tree.
    pub fn root_node(&self) -> Result<&MerkleNode, TreeError> {
        self.root.as_ref().ok_or(TreeError::NilTree)
    }

    /// Hash tree root
    ///
    /// # Errors
    /// Returns `NilTree` for the empty tree.
    pub fn root(&self) -> Result<[u8; 32], TreeError> {
        Ok(self.root_node()?.root())
    }

    /// Walk from the root to `gindex`, collecting siblings top-down
    fn walk(&self, gindex: GeneralizedIndex, mut siblings: Option<&mut Proof>) -> Result<Subtree<'_>, TreeError> {
        if gindex == 0 {
            return Err(TreeError::IndexOutOfRange(gindex));
        }
        let mut current = Subtree::Node(self.root_node()?);
        for bit in (0..gindex_depth(gindex)).rev() {
            let (left, right) = current.children().ok_or(TreeError::IndexOutOfRange(gindex))?;
            let (next, sibling) = if (gindex >> bit) & 1 == 1 {
                (right, left)
            } else {
                (left, right)
            };
            if let Some(siblings) = siblings.as_deref_mut() {
                siblings.push(sibling.root());
            }
            current = next;
        }
        Ok(current)
    }

    /// Node at a generalized index
    ///
    /// # Errors
    /// Returns `IndexOutOfRange` if the index lies below a leaf.
    pub fn subtree(&self, gindex: GeneralizedIndex) -> Result<Subtree<'_>, TreeError> {
        self.walk(gindex, None)
    }

    /// Root of the node at a generalized index
    ///
    /// # Errors
    /// Returns `IndexOutOfRange` if the index lies below a leaf.
    pub fn node_root(&self, gindex: GeneralizedIndex) -> Result<[u8; 32], TreeError> {
        Ok(self.subtree(gindex)?.root())
    }

    /// Sibling hashes from the node at `gindex` up to the root
    ///
    /// # Errors
    /// Returns `NilTree` or `IndexOutOfRange`.
    pub fn prove(&self, gindex: GeneralizedIndex) -> Result<Proof, TreeError> {
        let mut branch = Vec::with_capacity(gindex_depth(gindex.max(1)) as usize);
        self.walk(gindex, Some(&mut branch))?;
        branch.reverse();
        Ok(branch)
    }

    /// Leaf, branch and root for `gindex`, ready to be verified
    ///
    /// # Errors
    /// Returns `NilTree` or `IndexOutOfRange`.
    pub fn proof_bundle(&self, gindex: GeneralizedIndex) -> Result<ProofBundle, TreeError> {
        let mut branch = Vec::with_capacity(gindex_depth(gindex.max(1)) as usize);
        let leaf = self.walk(gindex, Some(&mut branch))?.root();
        branch.reverse();
        Ok(ProofBundle {
            gindex,
            leaf,
            branch,
            root: self.root()?,
        })
    }
}

impl Container {
    /// Full Merkle tree of this container
    ///
    /// # Errors
    /// Returns an error if a field value does not match its declared type.
    pub fn get_tree(&self) -> Result<Tree, SszError> {
        Tree::from_container(self)
    }
}
