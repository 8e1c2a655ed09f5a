use std::collections::HashMap;
use std::fmt::{self, Display};

#[cfg(feature = "serde")]
use serde::Serialize;

use crate::error::{require_non_empty, Error, Result};

/// The two kinds of node in a resource-allocation graph.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub enum NodeKind {
    /// Named `P` followed by an identifier, e.g. `P0`.
    Process,
    /// Named `R` followed by an identifier, e.g. `R2`.
    Resource,
}

impl NodeKind {
    /// Classifies a node by its name.
    pub fn of(name: &str) -> Result<NodeKind> {
        let kind = match name.chars().next() {
            Some('P') => NodeKind::Process,
            Some('R') => NodeKind::Resource,
            _ => return Err(Error::MalformedNode(name.to_string())),
        };

        let identifier = &name[1..];
        let well_formed = !identifier.is_empty()
            && identifier
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_');
        if !well_formed {
            return Err(Error::MalformedNode(name.to_string()));
        }

        Ok(kind)
    }
}

/// A directed edge of the graph.
///
/// `P -> R` means the process requests the resource, `R -> P` means the
/// resource is held by the process.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Edge {
    pub from: String,
    pub to: String,
}

impl Edge {
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Edge {
        Edge {
            from: from.into(),
            to: to.into(),
        }
    }

    /// `true` for a request edge, `false` for an assignment edge.
    pub fn is_request(&self) -> bool {
        self.from.starts_with('P')
    }
}

impl Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.from, self.to)
    }
}

#[derive(Copy, Clone, PartialEq)]
enum Mark {
    Unvisited,
    OnStack,
    Done,
}

/// A validated resource-allocation graph.
///
/// Nodes are numbered in order of first appearance in the edge list and
/// successors keep the order of the edges.
#[derive(Debug, Clone)]
pub struct ResourceGraph {
    names: Vec<String>,
    kinds: Vec<NodeKind>,
    index: HashMap<String, usize>,
    successors: Vec<Vec<usize>>,
    edges: Vec<Edge>,
}

impl ResourceGraph {
    pub fn new(edges: Vec<Edge>) -> Result<ResourceGraph> {
        require_non_empty(&edges, "graph edges")?;

        let mut graph = ResourceGraph {
            names: Vec::new(),
            kinds: Vec::new(),
            index: HashMap::new(),
            successors: Vec::new(),
            edges: Vec::new(),
        };

        for edge in &edges {
            let from = graph.node(&edge.from)?;
            let to = graph.node(&edge.to)?;
            if graph.kinds[from] == graph.kinds[to] {
                return Err(Error::MalformedEdge {
                    from: edge.from.clone(),
                    to: edge.to.clone(),
                });
            }
            graph.successors[from].push(to);
        }

        graph.edges = edges;
        Ok(graph)
    }

    fn node(&mut self, name: &str) -> Result<usize> {
        if let Some(&id) = self.index.get(name) {
            return Ok(id);
        }

        let kind = NodeKind::of(name)?;
        let id = self.names.len();
        self.names.push(name.to_string());
        self.kinds.push(kind);
        self.successors.push(Vec::new());
        self.index.insert(name.to_string(), id);
        Ok(id)
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Every node with its kind, in order of first appearance.
    pub fn nodes(&self) -> impl Iterator<Item = (&str, NodeKind)> {
        self.names
            .iter()
            .map(String::as_str)
            .zip(self.kinds.iter().copied())
    }

    /// The nodes `name` points to, or [`None`] for an unknown node.
    pub fn successors(&self, name: &str) -> Option<Vec<&str>> {
        let &id = self.index.get(name)?;
        Some(
            self.successors[id]
                .iter()
                .map(|&next| self.names[next].as_str())
                .collect(),
        )
    }

    /// Looks for a cycle with a depth-first search from every unvisited node.
    ///
    /// The search keeps an explicit stack of (node, next successor) frames.
    /// Reaching a node that is still on the stack closes a cycle, which is
    /// returned as the stack segment starting at that node.
    pub fn find_cycle(&self) -> Option<Vec<String>> {
        let mut marks = vec![Mark::Unvisited; self.names.len()];

        for start in 0..self.names.len() {
            if marks[start] != Mark::Unvisited {
                continue;
            }

            let mut stack: Vec<(usize, usize)> = vec![(start, 0)];
            marks[start] = Mark::OnStack;

            while let Some(&(node, next)) = stack.last() {
                let Some(&successor) = self.successors[node].get(next) else {
                    marks[node] = Mark::Done;
                    stack.pop();
                    continue;
                };

                if let Some(top) = stack.last_mut() {
                    top.1 = next + 1;
                }

                match marks[successor] {
                    Mark::OnStack => {
                        let begin = stack
                            .iter()
                            .position(|&(id, _)| id == successor)
                            .unwrap_or(0);
                        return Some(
                            stack[begin..]
                                .iter()
                                .map(|&(id, _)| self.names[id].clone())
                                .collect(),
                        );
                    }
                    Mark::Unvisited => {
                        marks[successor] = Mark::OnStack;
                        stack.push((successor, 0));
                    }
                    Mark::Done => {}
                }
            }
        }

        None
    }
}

/// The outcome of cycle detection.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct DetectionReport {
    pub edges: Vec<Edge>,

    /// `true` if the graph has a cycle.
    pub deadlock: bool,

    /// The nodes of the first cycle found, empty without deadlock.
    pub cycle: Vec<String>,
}

/// Checks the resource-allocation graph made of `edges` for a cycle.
pub fn detect(edges: Vec<Edge>) -> Result<DetectionReport> {
    let graph = ResourceGraph::new(edges)?;
    let cycle = graph.find_cycle().unwrap_or_default();

    Ok(DetectionReport {
        deadlock: !cycle.is_empty(),
        cycle,
        edges: graph.edges,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn edges(pairs: &[(&str, &str)]) -> Vec<Edge> {
        pairs.iter().map(|&(from, to)| Edge::new(from, to)).collect()
    }

    #[test]
    fn four_node_cycle_is_a_deadlock() {
        let report = detect(edges(&[
            ("P0", "R0"),
            ("R0", "P1"),
            ("P1", "R1"),
            ("R1", "P0"),
        ]))
        .unwrap();

        assert!(report.deadlock);
        assert_eq!(report.cycle, vec!["P0", "R0", "P1", "R1"]);
        assert_eq!(report.edges.len(), 4);
    }

    #[test]
    fn chain_is_not_a_deadlock() {
        let report = detect(edges(&[("P0", "R0"), ("R0", "P1")])).unwrap();

        assert!(!report.deadlock);
        assert!(report.cycle.is_empty());
    }

    #[test]
    fn shared_successor_is_not_a_cycle() {
        // R0 is reached twice, but never while it is on the stack.
        let report = detect(edges(&[
            ("P0", "R0"),
            ("P1", "R0"),
            ("R0", "P2"),
            ("P2", "R1"),
        ]))
        .unwrap();

        assert!(!report.deadlock);
    }

    #[test]
    fn cycle_away_from_first_node() {
        let report = detect(edges(&[
            ("P0", "R0"),
            ("P1", "R1"),
            ("R1", "P2"),
            ("P2", "R2"),
            ("R2", "P1"),
        ]))
        .unwrap();

        assert!(report.deadlock);
        assert_eq!(report.cycle, vec!["P1", "R1", "P2", "R2"]);
    }

    #[test]
    fn long_chain_does_not_recurse() {
        let mut pairs = Vec::new();
        for i in 0..50_000 {
            pairs.push(Edge::new(format!("P{i}"), format!("R{i}")));
            pairs.push(Edge::new(format!("R{i}"), format!("P{}", i + 1)));
        }

        let report = detect(pairs).unwrap();
        assert!(!report.deadlock);
    }

    #[test]
    fn adjacency_keeps_edge_order() {
        let graph =
            ResourceGraph::new(edges(&[("R0", "P1"), ("R0", "P0"), ("P0", "R1")])).unwrap();

        assert_eq!(graph.successors("R0"), Some(vec!["P1", "P0"]));
        assert_eq!(graph.successors("R9"), None);
        let kinds: Vec<NodeKind> = graph.nodes().map(|(_, kind)| kind).collect();
        assert_eq!(
            kinds,
            vec![
                NodeKind::Resource,
                NodeKind::Process,
                NodeKind::Process,
                NodeKind::Resource
            ]
        );
        assert!(graph.edges()[2].is_request());
    }

    #[test]
    fn malformed_graphs_are_rejected() {
        assert_eq!(
            detect(edges(&[("P0", "X1")])),
            Err(Error::MalformedNode("X1".to_string()))
        );
        assert_eq!(
            detect(edges(&[("P", "R0")])),
            Err(Error::MalformedNode("P".to_string()))
        );
        assert_eq!(
            detect(edges(&[("P0", "P1")])),
            Err(Error::MalformedEdge {
                from: "P0".to_string(),
                to: "P1".to_string()
            })
        );
        assert!(detect(Vec::new()).is_err());
    }
}
