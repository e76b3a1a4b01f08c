//! Package dependency graph for querying resolved results.
//!
//! The graph is built from a [`DependencyReport`] and answers the questions the
//! `tree` command asks: what does a package load, what loads it, and what does it
//! pull in transitively. Cycles are common in TeX Live (`latex` and `l3kernel`
//! reference each other) and are represented as-is.

use petgraph::Direction;
use petgraph::graph::{DiGraph, NodeIndex};
use serde::Serialize;
use std::collections::{BTreeSet, HashMap, HashSet, VecDeque};

use crate::report::DependencyReport;

/// Which edges a tree follows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TreeDirection {
    /// From a package to the packages it depends on
    #[default]
    Dependencies,
    /// From a package to the packages depending on it
    Dependents,
}

/// One node of a rendered dependency tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TreeNode {
    /// Package name
    pub name: String,
    /// Children, sorted by name
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<TreeNode>,
    /// Whether this package was already expanded earlier in the tree
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub repeated: bool,
}

impl TreeNode {
    /// Render as an indented tree, marking repeated subtrees with `(*)`.
    ///
    /// ```text
    /// beta
    /// ├── alpha
    /// │   └── gamma
    /// └── gamma (*)
    /// ```
    #[must_use]
    pub fn render(&self) -> String {
        let mut out = format!("{}\n", self.label());
        self.render_children(&mut out, "");
        out
    }

    /// Whether any node in this tree is a repeated subtree.
    #[must_use]
    pub fn has_repeated(&self) -> bool {
        self.repeated || self.children.iter().any(TreeNode::has_repeated)
    }

    fn label(&self) -> String {
        if self.repeated {
            format!("{} (*)", self.name)
        } else {
            self.name.clone()
        }
    }

    fn render_children(&self, out: &mut String, prefix: &str) {
        for (i, child) in self.children.iter().enumerate() {
            let is_last = i == self.children.len() - 1;
            let connector = if is_last {
                "└── "
            } else {
                "├── "
            };
            out.push_str(&format!("{prefix}{connector}{}\n", child.label()));

            let child_prefix = if is_last {
                format!("{prefix}    ")
            } else {
                format!("{prefix}│   ")
            };
            child.render_children(out, &child_prefix);
        }
    }
}

/// Directed graph of packages; an edge `a → b` means `a` depends on `b`.
pub struct DependencyGraph {
    graph: DiGraph<String, ()>,
    node_map: HashMap<String, NodeIndex>,
}

impl DependencyGraph {
    /// Create an empty graph.
    pub fn new() -> Self {
        Self {
            graph: DiGraph::new(),
            node_map: HashMap::new(),
        }
    }

    /// Build the graph from a report.
    ///
    /// Every reported package becomes a node, as does every dependency name even
    /// when the report has no entry for it.
    pub fn from_report(report: &DependencyReport) -> Self {
        let mut graph = Self::new();
        for package in report.packages() {
            graph.ensure_node(&package.name);
            for dependency in &package.depend {
                graph.add_dependency(&package.name, dependency);
            }
        }
        graph
    }

    fn ensure_node(&mut self, name: &str) -> NodeIndex {
        if let Some(&index) = self.node_map.get(name) {
            index
        } else {
            let index = self.graph.add_node(name.to_string());
            self.node_map.insert(name.to_string(), index);
            index
        }
    }

    /// Record that `from` depends on `to`.
    pub fn add_dependency(&mut self, from: &str, to: &str) {
        let from_idx = self.ensure_node(from);
        let to_idx = self.ensure_node(to);

        if !self.graph.contains_edge(from_idx, to_idx) {
            self.graph.add_edge(from_idx, to_idx, ());
        }
    }

    /// Whether the graph has a node for `name`.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.node_map.contains_key(name)
    }

    fn neighbors(&self, name: &str, direction: Direction) -> Vec<String> {
        let Some(&idx) = self.node_map.get(name) else {
            return Vec::new();
        };
        let names: BTreeSet<&String> =
            self.graph.neighbors_directed(idx, direction).map(|n| &self.graph[n]).collect();
        names.into_iter().cloned().collect()
    }

    /// Packages `name` depends on directly, sorted.
    #[must_use]
    pub fn direct_dependencies(&self, name: &str) -> Vec<String> {
        self.neighbors(name, Direction::Outgoing)
    }

    /// Packages depending directly on `name`, sorted.
    #[must_use]
    pub fn dependents(&self, name: &str) -> Vec<String> {
        self.neighbors(name, Direction::Incoming)
    }

    /// Everything reachable from `name`, sorted.
    ///
    /// The start package is only included when it sits on a cycle.
    #[must_use]
    pub fn transitive_dependencies(&self, name: &str) -> Vec<String> {
        let mut deps = BTreeSet::new();
        let mut queue = VecDeque::new();

        if let Some(&start) = self.node_map.get(name) {
            queue.push_back(start);
            while let Some(current) = queue.pop_front() {
                for neighbor in self.graph.neighbors(current) {
                    if deps.insert(self.graph[neighbor].clone()) {
                        queue.push_back(neighbor);
                    }
                }
            }
        }

        deps.into_iter().collect()
    }

    /// Tree rooted at `name`, or `None` if the package is unknown.
    ///
    /// A package already expanded elsewhere in the tree appears again as a
    /// leaf marked `repeated`, which also cuts cycles. `max_depth` limits how
    /// many levels below the root are shown.
    #[must_use]
    pub fn tree(&self, name: &str, direction: TreeDirection, max_depth: Option<usize>) -> Option<TreeNode> {
        if !self.contains(name) {
            return None;
        }
        let mut expanded = HashSet::new();
        Some(self.build_tree(name, direction, 0, max_depth, &mut expanded))
    }

    fn build_tree(
        &self,
        name: &str,
        direction: TreeDirection,
        depth: usize,
        max_depth: Option<usize>,
        expanded: &mut HashSet<String>,
    ) -> TreeNode {
        let mut node = TreeNode {
            name: name.to_string(),
            children: Vec::new(),
            repeated: false,
        };

        let next = match direction {
            TreeDirection::Dependencies => self.direct_dependencies(name),
            TreeDirection::Dependents => self.dependents(name),
        };
        if next.is_empty() || max_depth.is_some_and(|max| depth >= max) {
            return node;
        }
        if !expanded.insert(name.to_string()) {
            node.repeated = true;
            return node;
        }

        node.children = next
            .iter()
            .map(|child| self.build_tree(child, direction, depth + 1, max_depth, expanded))
            .collect();
        node
    }

    /// Whether the graph has no nodes.
    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }

    /// Number of packages.
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Number of dependency edges.
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }
}

impl Default for DependencyGraph {
    fn default() -> Self {
        Self::new()
    }
}
