//! Residue graph related definitions
//! - ResidueEdge
//! - ResidueGraph
//! - ResidueDirection
//! - cancel_cycle
//!
use super::flow::Flow;
use super::network::FlowNetwork;
use super::{Cost, FlowError};
use itertools::Itertools; // for join
use log::{debug, error};
use petgraph::graph::{DiGraph, EdgeIndex};

// basic definitions

/// Edge attributes used in ResidueGraph
#[derive(Debug, Copy, Clone)]
pub struct ResidueEdge {
    /// The movable amount of the flow
    pub count: u32,
    /// Cost of the unit change of this flow
    pub weight: Cost,
    /// Original edge index of the source graph
    pub target: EdgeIndex,
    /// Up or Down
    pub direction: ResidueDirection,
}

impl ResidueEdge {
    pub fn new(
        count: u32,
        weight: Cost,
        target: EdgeIndex,
        direction: ResidueDirection,
    ) -> ResidueEdge {
        ResidueEdge {
            count,
            weight,
            target,
            direction,
        }
    }
}

/// Residue direction enum
/// residue edge has two types
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ResidueDirection {
    /// Up edge: it can increase(+1) flow
    Up,
    /// Down edge: it can decrease(-1) flow
    Down,
}

impl std::fmt::Display for ResidueDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            ResidueDirection::Up => write!(f, "+"),
            ResidueDirection::Down => write!(f, "-"),
        }
    }
}

/// ResidueGraph definition
pub type ResidueGraph = DiGraph<(), ResidueEdge>;

//
// conversion functions
//

/// Convert FlowNetwork with Flow into ResidueGraph.
///
/// FlowNetwork and Flow
/// v -> w
///  e = ([0,u],c), f
///
/// into
///
/// ResidueGraph
/// v -> w
///  e1 = (u-f, +c) if u-f>0
/// w -> v
///  e2 = (f, -c) if f>0
///
/// Node indices are shared with the original network. Only movable edges are
/// materialized, so every residue edge carries positive capacity.
pub fn flow_to_residue(graph: &FlowNetwork, flow: &Flow) -> ResidueGraph {
    let mut rg: ResidueGraph = ResidueGraph::new();
    for _ in graph.node_indices() {
        rg.add_node(());
    }

    // create up to two edges (Up and Down) for each edge
    for e in graph.edge_indices() {
        let f = flow.get(e).unwrap();
        let ew = graph.edge_weight(e).unwrap();
        let (v, w) = graph.edge_endpoints(e).unwrap();

        let mut edges = Vec::new();
        if f < ew.capacity {
            // up movable
            edges.push((
                v,
                w,
                ResidueEdge::new(ew.capacity - f, ew.cost, e, ResidueDirection::Up),
            ));
        }
        if f > 0 {
            // down movable
            edges.push((w, v, ResidueEdge::new(f, -ew.cost, e, ResidueDirection::Down)));
        }
        rg.extend_with_edges(&edges);
    }
    rg
}

//
// cycle helpers
//

///
/// Total weight of an edge sequence
///
pub fn cycle_weight(rg: &ResidueGraph, edges: &[EdgeIndex]) -> Cost {
    edges
        .iter()
        .map(|&e| rg.edge_weight(e).unwrap().weight)
        .sum()
}

///
/// Check that consecutive edges chain head-to-tail and the last edge returns
/// to the first
///
pub fn is_cycle(rg: &ResidueGraph, edges: &[EdgeIndex]) -> bool {
    if edges.is_empty() {
        return false;
    }
    (0..edges.len()).all(|i| {
        let (_, head) = rg.edge_endpoints(edges[i]).unwrap();
        let (tail, _) = rg.edge_endpoints(edges[(i + 1) % edges.len()]).unwrap();
        head == tail
    })
}

pub fn format_cycle(rg: &ResidueGraph, cycle: &[EdgeIndex]) -> String {
    cycle
        .iter()
        .map(|&edge| {
            let weight = rg.edge_weight(edge).unwrap();
            format!(
                "e{}({}{})w{}",
                edge.index(),
                weight.target.index(),
                weight.direction,
                weight.weight
            )
        })
        .join(",")
}

//
// cycle canceling
//

///
/// Change the flow by `amount` along the edges of a cycle in the residue graph
///
pub fn change_flow_along_edges(
    flow: &Flow,
    rg: &ResidueGraph,
    edges: &[EdgeIndex],
    amount: u32,
) -> Flow {
    let mut new_flow = flow.clone();
    for &edge in edges {
        let ew = rg.edge_weight(edge).unwrap();
        // convert back to the original edgeindex
        let original_edge = ew.target;

        // use `wrapping_{add,sub}` because
        // in the some ordering of residue edges, applying -1 on a zero-flow edge can happen.
        // As long as the residue edges is valid (i.e. it makes cycle in the residue graph)
        // the final flow should satisfy the flow condition.
        let f = new_flow.get(original_edge).unwrap();
        let f = match ew.direction {
            ResidueDirection::Up => f.wrapping_add(amount),
            ResidueDirection::Down => f.wrapping_sub(amount),
        };
        new_flow.set(original_edge, f);
    }
    new_flow
}

///
/// Push the bottleneck amount around a detected negative cycle and return the
/// updated flow.
///
/// A cycle that does not close, has non-negative total weight, or has no
/// spare capacity is not cancelable; the detector must never produce one, so
/// it is reported as `FlowError::InconsistentCycle` rather than mistaken for
/// optimality.
///
pub fn cancel_cycle(
    flow: &Flow,
    rg: &ResidueGraph,
    cycle: &[EdgeIndex],
) -> Result<Flow, FlowError> {
    if !is_cycle(rg, cycle) {
        error!("detected cycle does not close: {}", format_cycle(rg, cycle));
        return Err(FlowError::InconsistentCycle);
    }
    let weight = cycle_weight(rg, cycle);
    if weight >= 0 {
        error!(
            "detected cycle has weight {}: {}",
            weight,
            format_cycle(rg, cycle)
        );
        return Err(FlowError::InconsistentCycle);
    }

    // the bottleneck is the minimum movable amount among the cycle edges
    let bottleneck = cycle
        .iter()
        .map(|&e| rg.edge_weight(e).unwrap().count)
        .min()
        .unwrap();
    if bottleneck == 0 {
        error!("detected cycle has no capacity: {}", format_cycle(rg, cycle));
        return Err(FlowError::InconsistentCycle);
    }

    debug!(
        "canceling w={} by {}: {}",
        weight,
        bottleneck,
        format_cycle(rg, cycle)
    );
    Ok(change_flow_along_edges(flow, rg, cycle, bottleneck))
}

//
// tests
//
