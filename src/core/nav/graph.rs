//! # Navigation Graph
//!
//! A closed, immutable tree of destinations. Leaves are screens; groups
//! ("nested graphs") own an ordered list of children and declare which one
//! is entered by default. The root is itself a group.
//!
//! ```text
//! nav_host (root, start = first)
//! ├── first
//! └── second_graph (start = first/second)
//!     ├── first/second
//!     └── second
//! ```
//!
//! Graphs are built once with [`GraphBuilder`] and never mutated. Route
//! lookups are exact string matches.

use std::collections::HashMap;

use super::error::NavError;

/// Index of a destination inside its [`NavGraph`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DestinationId(usize);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DestinationKind {
    Leaf,
    Group {
        start: DestinationId,
        children: Vec<DestinationId>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Destination {
    pub id: DestinationId,
    pub route: String,
    pub parent: Option<DestinationId>,
    pub kind: DestinationKind,
}

impl Destination {
    pub fn is_group(&self) -> bool {
        matches!(self.kind, DestinationKind::Group { .. })
    }
}

#[derive(Debug, Clone)]
pub struct NavGraph {
    destinations: Vec<Destination>,
    by_route: HashMap<String, DestinationId>,
    root: DestinationId,
}

impl NavGraph {
    /// Start building a graph whose root has the given route and start child.
    pub fn builder(route: impl Into<String>, start: impl Into<String>) -> GraphBuilder {
        GraphBuilder::new(route, start)
    }

    pub fn root(&self) -> DestinationId {
        self.root
    }

    pub fn destination(&self, id: DestinationId) -> &Destination {
        &self.destinations[id.0]
    }

    pub fn route(&self, id: DestinationId) -> &str {
        &self.destinations[id.0].route
    }

    pub fn find(&self, route: &str) -> Option<DestinationId> {
        self.by_route.get(route).copied()
    }

    /// The destination followed by its enclosing groups, leaf to root.
    pub fn hierarchy(&self, id: DestinationId) -> Hierarchy<'_> {
        Hierarchy {
            graph: self,
            next: Some(id),
        }
    }

    /// Direct children of the root, in declaration order.
    pub fn top_level(&self) -> &[DestinationId] {
        match &self.destination(self.root).kind {
            DestinationKind::Group { children, .. } => children,
            DestinationKind::Leaf => &[],
        }
    }

    /// Resolves a group to the leaf reached by following start children.
    /// A leaf resolves to itself.
    pub fn start_leaf(&self, id: DestinationId) -> DestinationId {
        let mut current = id;
        while let DestinationKind::Group { start, .. } = self.destination(current).kind {
            current = start;
        }
        current
    }

    /// The leaf the app opens on.
    pub fn find_start_destination(&self) -> DestinationId {
        self.start_leaf(self.root)
    }

    fn insert(
        &mut self,
        route: String,
        parent: Option<DestinationId>,
    ) -> Result<DestinationId, NavError> {
        if self.by_route.contains_key(&route) {
            return Err(NavError::DuplicateRoute(route));
        }
        let id = DestinationId(self.destinations.len());
        self.by_route.insert(route.clone(), id);
        self.destinations.push(Destination {
            id,
            route,
            parent,
            kind: DestinationKind::Leaf,
        });
        Ok(id)
    }

    fn insert_group(
        &mut self,
        builder: GraphBuilder,
        parent: Option<DestinationId>,
    ) -> Result<DestinationId, NavError> {
        let GraphBuilder { route, start, nodes } = builder;
        let id = self.insert(route.clone(), parent)?;

        let mut children = Vec::with_capacity(nodes.len());
        for node in nodes {
            let child = match node {
                Node::Leaf(child_route) => self.insert(child_route, Some(id))?,
                Node::Group(group) => self.insert_group(group, Some(id))?,
            };
            children.push(child);
        }

        let start_id = children
            .iter()
            .copied()
            .find(|child| self.route(*child) == start)
            .ok_or_else(|| NavError::InvalidStartDestination {
                graph: route.clone(),
                start: start.clone(),
            })?;

        self.destinations[id.0].kind = DestinationKind::Group {
            start: start_id,
            children,
        };
        Ok(id)
    }
}

/// Iterator over a destination's ancestor chain, leaf first.
pub struct Hierarchy<'a> {
    graph: &'a NavGraph,
    next: Option<DestinationId>,
}

impl<'a> Iterator for Hierarchy<'a> {
    type Item = &'a Destination;

    fn next(&mut self) -> Option<Self::Item> {
        let destination = self.graph.destination(self.next?);
        self.next = destination.parent;
        Some(destination)
    }
}

enum Node {
    Leaf(String),
    Group(GraphBuilder),
}

/// Declarative builder for a [`NavGraph`] group.
pub struct GraphBuilder {
    route: String,
    start: String,
    nodes: Vec<Node>,
}

impl GraphBuilder {
    fn new(route: impl Into<String>, start: impl Into<String>) -> Self {
        Self {
            route: route.into(),
            start: start.into(),
            nodes: Vec::new(),
        }
    }

    /// Add a leaf destination.
    pub fn composable(mut self, route: impl Into<String>) -> Self {
        self.nodes.push(Node::Leaf(route.into()));
        self
    }

    /// Add a nested group populated by `build`.
    pub fn navigation(
        mut self,
        route: impl Into<String>,
        start: impl Into<String>,
        build: impl FnOnce(GraphBuilder) -> GraphBuilder,
    ) -> Self {
        let group = build(GraphBuilder::new(route, start));
        self.nodes.push(Node::Group(group));
        self
    }

    pub fn build(self) -> Result<NavGraph, NavError> {
        let mut graph = NavGraph {
            destinations: Vec::new(),
            by_route: HashMap::new(),
            root: DestinationId(0),
        };
        graph.root = graph.insert_group(self, None)?;
        Ok(graph)
    }
}
