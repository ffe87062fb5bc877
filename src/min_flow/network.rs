//! Flow network definitions
//! - FlowNode, FlowArc
//! - FlowNetwork
//! - network_from_parts
use super::Cost;
use petgraph::graph::{DiGraph, NodeIndex};
use std::collections::HashMap;

/// Node attributes used in FlowNetwork
///
/// It has
/// - name, the caller-facing integer identity, unique within a network
/// - supply b(v): positive = producer, negative = consumer, zero =
///   transshipment
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct FlowNode {
    pub name: i32,
    pub supply: i32,
}

impl FlowNode {
    pub fn new(name: i32, supply: i32) -> FlowNode {
        FlowNode { name, supply }
    }
}

impl std::fmt::Display for FlowNode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}({:+})", self.name, self.supply)
    }
}

/// Arc attributes used in FlowNetwork
///
/// It has
/// - label, a caller-facing identity used in diagnostics
/// - capacity (upper limit of flow) u(e); the lower limit is always 0
/// - cost per unit flow c(e)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlowArc {
    pub label: String,
    pub capacity: u32,
    pub cost: Cost,
}

impl FlowArc {
    pub fn new<S: Into<String>>(label: S, capacity: u32, cost: Cost) -> FlowArc {
        FlowArc {
            label: label.into(),
            capacity,
            cost,
        }
    }
}

impl std::fmt::Display for FlowArc {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} [0,{}] {}", self.label, self.capacity, self.cost)
    }
}

/// FlowNetwork definition
pub type FlowNetwork = DiGraph<FlowNode, FlowArc>;

///
/// Build a FlowNetwork from `(name, supply)` node pairs and
/// `(label, from, to, capacity, cost)` arc tuples.
///
/// Arc endpoints reference node names; an endpoint name that was never
/// declared becomes a zero-supply transshipment node. Duplicate node names
/// are a caller bug and panic.
///
pub fn network_from_parts(
    nodes: &[(i32, i32)],
    arcs: &[(&str, i32, i32, u32, Cost)],
) -> FlowNetwork {
    let mut graph = FlowNetwork::new();
    let mut index: HashMap<i32, NodeIndex> = HashMap::new();

    for &(name, supply) in nodes {
        assert!(!index.contains_key(&name), "duplicate node name {}", name);
        index.insert(name, graph.add_node(FlowNode::new(name, supply)));
    }

    for &(label, from, to, capacity, cost) in arcs {
        let v = *index
            .entry(from)
            .or_insert_with(|| graph.add_node(FlowNode::new(from, 0)));
        let w = *index
            .entry(to)
            .or_insert_with(|| graph.add_node(FlowNode::new(to, 0)));
        graph.add_edge(v, w, FlowArc::new(label, capacity, cost));
    }

    graph
}

///
/// Positive-supply nodes, the seeds of the negative cycle search.
///
pub fn supply_nodes(graph: &FlowNetwork) -> Vec<NodeIndex> {
    graph
        .node_indices()
        .filter(|&v| graph[v].supply > 0)
        .collect()
}

//
// tests
//
