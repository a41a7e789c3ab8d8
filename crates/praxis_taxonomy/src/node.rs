//! Category declarations and node definitions.

use std::fmt;
use std::sync::{Arc, OnceLock};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::taxonomy::Taxonomy;

/// Identifier of a category in a [`Taxonomy`].
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    /// Returns the raw index of this node.
    #[must_use]
    pub const fn index(self) -> u32 {
        self.0
    }
}

impl fmt::Debug for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NodeId({})", self.0)
    }
}

/// Static declaration of a category.
///
/// A category has a primary name, optional alternative names and any number
/// of personal parents, referenced by name.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct NodeDecl {
    /// Primary name.
    pub name: String,
    /// Alternative names the node answers to.
    pub aliases: Vec<String>,
    /// Names of the personal (directly declared) parents.
    pub parents: Vec<String>,
}

impl NodeDecl {
    /// Creates a root declaration with no parents.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Adds a personal parent.
    #[must_use]
    pub fn with_parent(mut self, parent: impl Into<String>) -> Self {
        self.parents.push(parent.into());
        self
    }

    /// Adds an alternative name.
    #[must_use]
    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.aliases.push(alias.into());
        self
    }
}

/// Definition of a category, built once from its declaration.
///
/// Personal parents and children are resolved when the definition is built.
/// The inherited sets (transitive closures) are computed on first access and
/// cached for the definition's lifetime.
#[derive(Debug)]
pub struct NodeBase {
    id: NodeId,
    names: Vec<Arc<str>>,
    personal_parents: Vec<NodeId>,
    personal_children: Vec<NodeId>,
    parents: OnceLock<Vec<NodeId>>,
    children: OnceLock<Vec<NodeId>>,
}

impl NodeBase {
    pub(crate) fn new(
        id: NodeId,
        names: Vec<Arc<str>>,
        personal_parents: Vec<NodeId>,
        personal_children: Vec<NodeId>,
    ) -> Self {
        Self {
            id,
            names,
            personal_parents,
            personal_children,
            parents: OnceLock::new(),
            children: OnceLock::new(),
        }
    }

    /// The node's identifier.
    #[must_use]
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// The primary name.
    #[must_use]
    pub fn name(&self) -> &str {
        self.names.first().map_or("", |n| n)
    }

    /// All declared names, primary first.
    #[must_use]
    pub fn names(&self) -> &[Arc<str>] {
        &self.names
    }

    /// Returns true if `name` is one of the declared names.
    #[must_use]
    pub fn has_name(&self, name: &str) -> bool {
        self.names.iter().any(|n| &**n == name)
    }

    /// Directly declared parents, in declaration order.
    #[must_use]
    pub fn personal_parents(&self) -> &[NodeId] {
        &self.personal_parents
    }

    /// Nodes that declare this node as a personal parent.
    #[must_use]
    pub fn personal_children(&self) -> &[NodeId] {
        &self.personal_children
    }

    /// All ancestors (personal and inherited), nearest first.
    pub fn parents(&self, taxonomy: &Taxonomy) -> &[NodeId] {
        self.parents
            .get_or_init(|| taxonomy.closure(self.id, |t, n| t.personal_parents_of(n)))
    }

    /// All descendants (personal and inherited), nearest first.
    pub fn children(&self, taxonomy: &Taxonomy) -> &[NodeId] {
        self.children
            .get_or_init(|| taxonomy.closure(self.id, |t, n| t.personal_children_of(n)))
    }
}
