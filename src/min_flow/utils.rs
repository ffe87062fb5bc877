//!
//! trace log helpers
//!
use super::flow::Flow;
use super::network::FlowNetwork;
use log::debug;
use petgraph::dot::Dot;
use petgraph::graph::Graph;
use petgraph::EdgeType;

/// Render any graph as graphviz dot into the debug log.
pub fn draw<'a, N: 'a, E: 'a, Ty, Ix>(graph: &'a Graph<N, E, Ty, Ix>)
where
    E: std::fmt::Debug,
    N: std::fmt::Debug,
    Ty: EdgeType,
    Ix: petgraph::graph::IndexType,
{
    debug!("{:?}", Dot::with_config(&graph, &[]));
}

/// Log each arc as `label: flow/capacity @ cost`.
pub fn draw_with_flow(graph: &FlowNetwork, flow: &Flow) {
    for e in graph.edge_indices() {
        let ew = graph.edge_weight(e).unwrap();
        let f = flow.get(e).unwrap_or(0);
        debug!("{}: {}/{} @ {}", ew.label, f, ew.capacity, ew.cost);
    }
}
