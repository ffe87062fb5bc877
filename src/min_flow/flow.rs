//! Flow assignment definitions
//! - Flow
//! - is_valid_flow
use super::network::FlowNetwork;
use super::Cost;
use petgraph::graph::{DiGraph, EdgeIndex};
use petgraph::visit::EdgeRef; // for EdgeReference.id()
use petgraph::Direction;
use std::collections::HashMap;

/// Flow definitions
///
/// Flow f is a mapping of u32 f(e) to each edge e
#[derive(PartialEq, Eq, Debug, Clone)]
pub struct Flow(HashMap<EdgeIndex, u32>);

impl Flow {
    pub fn empty() -> Flow {
        let hm = HashMap::new();
        Flow(hm)
    }
    pub fn zero<N, E>(graph: &DiGraph<N, E>) -> Flow {
        let mut hm = HashMap::new();
        for e in graph.edge_indices() {
            hm.insert(e, 0);
        }
        Flow(hm)
    }
    pub fn from_vec(vec: &[(EdgeIndex, u32)]) -> Flow {
        let mut hm = HashMap::new();
        for (e, f) in vec.iter() {
            hm.insert(*e, *f);
        }
        Flow(hm)
    }
    pub fn get(&self, e: EdgeIndex) -> Option<u32> {
        self.0.get(&e).cloned()
    }
    pub fn set(&mut self, e: EdgeIndex, v: u32) {
        self.0.insert(e, v);
    }
    pub fn has(&self, e: EdgeIndex) -> bool {
        self.0.contains_key(&e)
    }
    /// cost × flow of a single arc
    pub fn arc_cost(&self, graph: &FlowNetwork, e: EdgeIndex) -> Cost {
        let ew = graph.edge_weight(e).unwrap();
        ew.cost * self.get(e).unwrap() as Cost
    }
    /// Σ cost × flow over all arcs
    pub fn total_cost(&self, graph: &FlowNetwork) -> Cost {
        graph.edge_indices().map(|e| self.arc_cost(graph, e)).sum()
    }
}

///
/// Check if the flow is valid, i.e. it satisfies
/// - flows of all edges are defined
/// - capacity constraint
/// - supply conservation constraint
///
pub fn is_valid_flow(flow: &Flow, graph: &FlowNetwork) -> bool {
    is_defined_for_all_edges(flow, graph)
        && is_within_capacity(flow, graph)
        && is_conserving_supply(flow, graph)
}

///
/// Check if the flow contains all edges
///
pub fn is_defined_for_all_edges(flow: &Flow, graph: &FlowNetwork) -> bool {
    graph.edge_indices().all(|e| flow.get(e).is_some())
}

///
/// For each edge, the flow must satisfy `0 <= flow <= capacity`.
/// This function checks it
///
pub fn is_within_capacity(flow: &Flow, graph: &FlowNetwork) -> bool {
    graph.edge_indices().all(|e| {
        let ew = graph.edge_weight(e).unwrap();
        match flow.get(e) {
            Some(f) => f <= ew.capacity,
            None => false,
        }
    })
}

///
/// For each node,
/// (the sum of out-going flows) - (the sum of in-coming flows)
/// should be equal to the supply of the node.
///
pub fn is_conserving_supply(flow: &Flow, graph: &FlowNetwork) -> bool {
    graph.node_indices().all(|v| {
        let in_flow: i64 = graph
            .edges_directed(v, Direction::Incoming)
            .map(|er| flow.get(er.id()).unwrap() as i64)
            .sum();
        let out_flow: i64 = graph
            .edges_directed(v, Direction::Outgoing)
            .map(|er| flow.get(er.id()).unwrap() as i64)
            .sum();
        out_flow - in_flow == graph[v].supply as i64
    })
}

//
// tests
//

#[cfg(test)]
mod tests {
    use super::super::mocks::mock_network_transship;
    use super::super::utils::draw;
    use super::*;

    #[test]
    fn flow_valid_tests() {
        let g = mock_network_transship();
        draw(&g);

        // the optimum flow is valid
        let f1 = Flow::from_vec(&[
            (EdgeIndex::new(0), 1),
            (EdgeIndex::new(1), 4),
            (EdgeIndex::new(2), 1),
            (EdgeIndex::new(3), 0),
            (EdgeIndex::new(4), 5),
        ]);
        assert!(is_defined_for_all_edges(&f1, &g));
        assert!(is_within_capacity(&f1, &g));
        assert!(is_conserving_supply(&f1, &g));
        assert!(is_valid_flow(&f1, &g));

        // this flow overs the capacity
        let f2 = Flow::from_vec(&[
            (EdgeIndex::new(0), 100),
            (EdgeIndex::new(1), 100),
            (EdgeIndex::new(2), 100),
            (EdgeIndex::new(3), 100),
            (EdgeIndex::new(4), 100),
        ]);
        assert!(is_defined_for_all_edges(&f2, &g));
        assert!(!is_within_capacity(&f2, &g));
        assert!(!is_valid_flow(&f2, &g));

        // this flow leaves supply unrouted
        let f3 = Flow::from_vec(&[
            (EdgeIndex::new(0), 0),
            (EdgeIndex::new(1), 3),
            (EdgeIndex::new(2), 0),
            (EdgeIndex::new(3), 0),
            (EdgeIndex::new(4), 3),
        ]);
        assert!(is_defined_for_all_edges(&f3, &g));
        assert!(is_within_capacity(&f3, &g));
        assert!(!is_conserving_supply(&f3, &g));
        assert!(!is_valid_flow(&f3, &g));

        // this is a partial flow
        let f4 = Flow::from_vec(&[(EdgeIndex::new(0), 1)]);
        assert!(!is_defined_for_all_edges(&f4, &g));
        assert!(!is_valid_flow(&f4, &g));
    }

    #[test]
    fn total_cost_sums_per_arc_costs() {
        let g = mock_network_transship();
        let f = Flow::from_vec(&[
            (EdgeIndex::new(0), 1),
            (EdgeIndex::new(1), 4),
            (EdgeIndex::new(2), 1),
            (EdgeIndex::new(3), 0),
            (EdgeIndex::new(4), 5),
        ]);
        assert_eq!(f.arc_cost(&g, EdgeIndex::new(1)), 8);
        assert_eq!(f.total_cost(&g), 16);
    }
}
