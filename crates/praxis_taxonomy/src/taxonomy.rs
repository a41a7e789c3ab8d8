//! The category graph and its queries.
//!
//! Every query tolerates unknown nodes: an identifier without a declaration
//! has no parents or children, is only a node of itself, and has depth −1 to
//! everything else.

use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::Arc;

use praxis_foundation::{DefinitionCache, Error, Result};

use crate::node::{NodeBase, NodeDecl, NodeId};

/// Resolved declaration: names and personal parents by identifier.
#[derive(Clone, Debug)]
struct Entry {
    names: Vec<Arc<str>>,
    parents: Vec<NodeId>,
}

/// Collects declarations and resolves them into a [`Taxonomy`].
#[derive(Clone, Debug, Default)]
pub struct TaxonomyBuilder {
    decls: Vec<NodeDecl>,
    by_name: HashMap<Arc<str>, NodeId>,
}

impl TaxonomyBuilder {
    /// Creates an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares a category and returns its identifier.
    ///
    /// Parents may be declared later; they are resolved in [`Self::build`].
    ///
    /// # Errors
    ///
    /// Returns an error if the name or one of the aliases is already taken.
    pub fn declare(&mut self, decl: NodeDecl) -> Result<NodeId> {
        let id = NodeId(u32::try_from(self.decls.len()).map_err(|_| {
            Error::new(praxis_foundation::ErrorKind::Internal(
                "taxonomy exceeds u32::MAX nodes".to_string(),
            ))
        })?);

        let mut names: Vec<&str> = Vec::with_capacity(1 + decl.aliases.len());
        names.push(&decl.name);
        names.extend(decl.aliases.iter().map(String::as_str));
        for name in &names {
            if self.by_name.contains_key(*name) {
                return Err(Error::duplicate_definition("node", *name));
            }
        }
        for name in names {
            self.by_name.insert(Arc::from(name), id);
        }

        self.decls.push(decl);
        Ok(id)
    }

    /// Chainable form of [`Self::declare`].
    ///
    /// # Errors
    ///
    /// Returns an error if the name or one of the aliases is already taken.
    pub fn with(mut self, decl: NodeDecl) -> Result<Self> {
        self.declare(decl)?;
        Ok(self)
    }

    /// Resolves parent names and produces the taxonomy.
    ///
    /// Parents that were never declared, and nodes naming themselves as a
    /// parent, are skipped with a warning.
    #[must_use]
    pub fn build(self) -> Taxonomy {
        let entries = self
            .decls
            .iter()
            .map(|decl| {
                let mut names: Vec<Arc<str>> = vec![Arc::from(decl.name.as_str())];
                names.extend(decl.aliases.iter().map(|a| Arc::from(a.as_str())));

                let own = self.by_name.get(decl.name.as_str()).copied();
                let mut parents = Vec::with_capacity(decl.parents.len());
                for parent in &decl.parents {
                    match self.by_name.get(parent.as_str()).copied() {
                        Some(id) if Some(id) == own => {
                            tracing::warn!(node = %decl.name, "node declares itself as parent");
                        }
                        Some(id) if !parents.contains(&id) => parents.push(id),
                        Some(_) => {}
                        None => {
                            tracing::warn!(node = %decl.name, %parent, "unknown parent ignored");
                        }
                    }
                }
                Entry { names, parents }
            })
            .collect();

        Taxonomy {
            entries,
            by_name: self.by_name,
            nodes: DefinitionCache::new(),
        }
    }
}

/// Immutable multi-parent category graph.
///
/// Node definitions are built lazily through a [`DefinitionCache`], so each
/// node is constructed at most once even under concurrent first access.
#[derive(Debug)]
pub struct Taxonomy {
    entries: Vec<Entry>,
    by_name: HashMap<Arc<str>, NodeId>,
    nodes: DefinitionCache<NodeId, NodeBase>,
}

impl Default for Taxonomy {
    fn default() -> Self {
        TaxonomyBuilder::new().build()
    }
}

impl Taxonomy {
    /// Number of declared nodes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if nothing is declared.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over all declared node identifiers.
    pub fn ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        (0..self.entries.len()).filter_map(|i| u32::try_from(i).ok().map(NodeId))
    }

    /// Looks up a node by any of its names.
    #[must_use]
    pub fn find(&self, name: &str) -> Option<NodeId> {
        self.by_name.get(name).copied()
    }

    /// Returns the definition of `id`, building it on first access.
    #[must_use]
    pub fn node(&self, id: NodeId) -> Option<Arc<NodeBase>> {
        let entry = self.entry(id)?;
        Some(self.nodes.get_or_init(&id, || {
            NodeBase::new(
                id,
                entry.names.clone(),
                entry.parents.clone(),
                self.personal_children_of(id),
            )
        }))
    }

    /// Primary name of `id`, if declared.
    #[must_use]
    pub fn name(&self, id: NodeId) -> Option<Arc<str>> {
        self.entry(id).and_then(|e| e.names.first().cloned())
    }

    /// Returns true if `name` is one of the declared names of `id`.
    #[must_use]
    pub fn has_name(&self, id: NodeId, name: &str) -> bool {
        self.entry(id)
            .is_some_and(|e| e.names.iter().any(|n| &**n == name))
    }

    /// Returns true if `node` is `other` or descends from it.
    #[must_use]
    pub fn is_node_of(&self, node: NodeId, other: NodeId) -> bool {
        if node == other {
            return true;
        }
        self.node(node)
            .is_some_and(|n| n.parents(self).contains(&other))
    }

    /// Returns true if `node` is a node of any of `others`.
    #[must_use]
    pub fn is_node_of_any(&self, node: NodeId, others: &[NodeId]) -> bool {
        others.iter().any(|other| self.is_node_of(node, *other))
    }

    /// Number of parent hops from `node` to `other`, or −1 if unreachable.
    ///
    /// Personal parents are walked depth-first in declaration order and the
    /// first branch that reaches `other` decides the result. Under diamond
    /// inheritance this is not necessarily the shortest path; see
    /// [`Self::shortest_depth_of`].
    #[must_use]
    pub fn depth_of(&self, node: NodeId, other: NodeId) -> i32 {
        let mut path = HashSet::new();
        self.depth_first(node, other, &mut path)
    }

    /// Minimum number of parent hops from `node` to `other`, or −1.
    #[must_use]
    pub fn shortest_depth_of(&self, node: NodeId, other: NodeId) -> i32 {
        let mut seen = HashSet::from([node]);
        let mut queue = VecDeque::from([(node, 0)]);
        while let Some((current, depth)) = queue.pop_front() {
            if current == other {
                return depth;
            }
            for parent in self.personal_parents_of(current) {
                if seen.insert(parent) {
                    queue.push_back((parent, depth + 1));
                }
            }
        }
        -1
    }

    /// Personal parents of `id` (empty if undeclared).
    #[must_use]
    pub fn personal_parents(&self, id: NodeId) -> Vec<NodeId> {
        self.personal_parents_of(id)
    }

    /// Personal children of `id` (empty if undeclared).
    #[must_use]
    pub fn personal_children(&self, id: NodeId) -> Vec<NodeId> {
        self.node(id)
            .map(|n| n.personal_children().to_vec())
            .unwrap_or_default()
    }

    /// All ancestors of `id`, nearest first (empty if undeclared).
    #[must_use]
    pub fn parents(&self, id: NodeId) -> Vec<NodeId> {
        self.node(id)
            .map(|n| n.parents(self).to_vec())
            .unwrap_or_default()
    }

    /// All descendants of `id`, nearest first (empty if undeclared).
    #[must_use]
    pub fn children(&self, id: NodeId) -> Vec<NodeId> {
        self.node(id)
            .map(|n| n.children(self).to_vec())
            .unwrap_or_default()
    }

    fn entry(&self, id: NodeId) -> Option<&Entry> {
        self.entries.get(id.0 as usize)
    }

    fn depth_first(&self, node: NodeId, other: NodeId, path: &mut HashSet<NodeId>) -> i32 {
        if node == other {
            return 0;
        }
        if !path.insert(node) {
            return -1;
        }
        for parent in self.personal_parents_of(node) {
            let depth = self.depth_first(parent, other, path);
            if depth >= 0 {
                return depth + 1;
            }
        }
        path.remove(&node);
        -1
    }

    pub(crate) fn personal_parents_of(&self, id: NodeId) -> Vec<NodeId> {
        self.entry(id).map(|e| e.parents.clone()).unwrap_or_default()
    }

    pub(crate) fn personal_children_of(&self, id: NodeId) -> Vec<NodeId> {
        self.ids()
            .filter(|candidate| {
                self.entry(*candidate)
                    .is_some_and(|e| e.parents.contains(&id))
            })
            .collect()
    }

    /// Breadth-first transitive closure from `start`, excluding `start`.
    pub(crate) fn closure(
        &self,
        start: NodeId,
        next: impl Fn(&Self, NodeId) -> Vec<NodeId>,
    ) -> Vec<NodeId> {
        let mut seen = HashSet::from([start]);
        let mut queue = VecDeque::from([start]);
        let mut out = Vec::new();
        while let Some(current) = queue.pop_front() {
            for neighbour in next(self, current) {
                if seen.insert(neighbour) {
                    out.push(neighbour);
                    queue.push_back(neighbour);
                }
            }
        }
        out
    }
}
