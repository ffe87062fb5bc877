//! Initial feasible flow
//!
//! Max flow on an augmented network: a super source saturating every supply
//! and a super sink draining every demand. The network is feasible exactly
//! when the max flow saturates all synthetic arcs.
//!
use super::flow::Flow;
use super::network::FlowNetwork;
use super::FlowError;
use log::{debug, info};
use petgraph::graph::{DiGraph, EdgeIndex, NodeIndex};
use petgraph::visit::EdgeRef;
use petgraph::Direction;
use std::collections::VecDeque;

/// Edge attributes used in the augmented max-flow graph
#[derive(Debug, Copy, Clone)]
pub struct AugmentEdge {
    /// remaining residual capacity
    pub residual: u32,
}

/// Augmented graph for the feasibility max flow.
///
/// Nodes 0..n mirror the original network, followed by the synthetic source
/// and sink. Edges come strictly in forward/reverse pairs, so the partner of
/// edge e is e^1, and the forward residual of original arc e sits at 2e.
pub type AugmentGraph = DiGraph<(), AugmentEdge>;

fn partner(e: EdgeIndex) -> EdgeIndex {
    EdgeIndex::new(e.index() ^ 1)
}

//
// public functions
//

///
/// Find a flow satisfying every supply and demand, ignoring cost.
///
/// Returns `FlowError::Infeasible` if the supplies cannot reach the demands
/// within the arc capacities.
///
pub fn find_feasible_flow(graph: &FlowNetwork) -> Result<Flow, FlowError> {
    let (mut ag, s, t) = build_augmented(graph);
    run_max_flow(&mut ag, s, t);

    // feasible iff max flow saturated every synthetic arc
    let saturated = ag.edges(s).all(|e| e.weight().residual == 0)
        && ag
            .edges_directed(t, Direction::Incoming)
            .all(|e| e.weight().residual == 0);
    if !saturated {
        info!("infeasible: some supply or demand is left unsatisfied");
        return Err(FlowError::Infeasible);
    }

    let mut flow = Flow::empty();
    for e in graph.edge_indices() {
        let capacity = graph.edge_weight(e).unwrap().capacity;
        let forward = ag.edge_weight(EdgeIndex::new(2 * e.index())).unwrap();
        flow.set(e, capacity - forward.residual);
    }
    Ok(flow)
}

//
// internal functions
//

///
/// Build the augmented graph: a zero-flow residual copy of the network plus
/// super source/sink arcs sized by the node supplies.
///
fn build_augmented(graph: &FlowNetwork) -> (AugmentGraph, NodeIndex, NodeIndex) {
    let mut ag: AugmentGraph = AugmentGraph::new();
    for _ in graph.node_indices() {
        ag.add_node(());
    }

    for e in graph.edge_indices() {
        let (v, w) = graph.edge_endpoints(e).unwrap();
        let capacity = graph.edge_weight(e).unwrap().capacity;
        ag.add_edge(v, w, AugmentEdge { residual: capacity });
        ag.add_edge(w, v, AugmentEdge { residual: 0 });
    }

    let s = ag.add_node(());
    let t = ag.add_node(());
    for v in graph.node_indices() {
        let supply = graph[v].supply;
        if supply > 0 {
            ag.add_edge(s, v, AugmentEdge { residual: supply as u32 });
            ag.add_edge(v, s, AugmentEdge { residual: 0 });
        } else if supply < 0 {
            ag.add_edge(
                v,
                t,
                AugmentEdge {
                    residual: supply.unsigned_abs(),
                },
            );
            ag.add_edge(t, v, AugmentEdge { residual: 0 });
        }
    }
    (ag, s, t)
}

///
/// Push flow along shortest augmenting paths until s and t disconnect.
///
fn run_max_flow(ag: &mut AugmentGraph, s: NodeIndex, t: NodeIndex) {
    while let Some(path) = shortest_augmenting_path(ag, s, t) {
        // the bottleneck is the minimum residual strictly along the path
        let bottleneck = path
            .iter()
            .map(|&e| ag.edge_weight(e).unwrap().residual)
            .min()
            .unwrap();
        for &e in &path {
            ag.edge_weight_mut(e).unwrap().residual -= bottleneck;
            ag.edge_weight_mut(partner(e)).unwrap().residual += bottleneck;
        }
        debug!("augmented {} over {} arcs", bottleneck, path.len());
    }
}

///
/// Breadth-first search over positive-residual edges; returns the s->t path
/// as an edge list.
///
fn shortest_augmenting_path(
    ag: &AugmentGraph,
    s: NodeIndex,
    t: NodeIndex,
) -> Option<Vec<EdgeIndex>> {
    // per-search scratch, never stored on the nodes
    let mut visited = vec![false; ag.node_count()];
    let mut pred: Vec<Option<EdgeIndex>> = vec![None; ag.node_count()];

    let mut queue = VecDeque::new();
    visited[s.index()] = true;
    queue.push_back(s);

    'search: while let Some(v) = queue.pop_front() {
        for e in ag.edges(v) {
            let w = e.target();
            if visited[w.index()] || e.weight().residual == 0 {
                continue;
            }
            visited[w.index()] = true;
            pred[w.index()] = Some(e.id());
            if w == t {
                break 'search;
            }
            queue.push_back(w);
        }
    }
    if !visited[t.index()] {
        return None;
    }

    let mut path = Vec::new();
    let mut v = t;
    while v != s {
        let e = pred[v.index()].unwrap();
        path.push(e);
        v = ag.edge_endpoints(e).unwrap().0;
    }
    path.reverse();
    Some(path)
}

//
// tests
//
