//!
//! Minimum cost flow by negative cycle canceling.
//!
//! A feasible flow is generated first by running max flow on an augmented
//! source/sink network; the flow is then optimal exactly when its residue
//! graph has no negative-weight cycle, so cycles are canceled until none
//! remain.
//!
pub mod cycle;
pub mod feasible;
pub mod flow;
pub mod mocks;
pub mod network;
pub mod residue;
pub mod utils;

use cycle::find_negative_cycle;
use feasible::find_feasible_flow;
use flow::{is_valid_flow, Flow};
use log::{debug, error, info};
use network::{supply_nodes, FlowNetwork};
use residue::{cancel_cycle, flow_to_residue};
use utils::draw_with_flow;

/// Cost per unit flow, and the unit of total cost.
pub type Cost = i64;

/// Terminal outcome of a solve that produced no optimal flow.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum FlowError {
    /// No flow satisfies every supply and demand within the capacities.
    Infeasible,
    /// The detector handed the canceler something that is not a cancelable
    /// negative cycle. Internal invariant violation.
    InconsistentCycle,
    /// The cancel loop outran its cost-range bound. Internal invariant
    /// violation.
    IterationLimit,
}

impl std::fmt::Display for FlowError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            FlowError::Infeasible => write!(f, "no feasible flow exists"),
            FlowError::InconsistentCycle => write!(f, "detected cycle is not cancelable"),
            FlowError::IterationLimit => write!(f, "cancel loop exceeded its iteration bound"),
        }
    }
}

impl std::error::Error for FlowError {}

//
// public functions
//

///
/// Find a minimum cost flow on the FlowNetwork
///
pub fn min_cost_flow(graph: &FlowNetwork) -> Result<Flow, FlowError> {
    let init_flow = find_feasible_flow(graph)?;

    info!("feasible flow found, cost={}", init_flow.total_cost(graph));
    draw_with_flow(graph, &init_flow);
    min_cost_flow_from(graph, &init_flow)
}

///
/// Find a minimum cost flow by starting from the specified feasible flow.
///
pub fn min_cost_flow_from(graph: &FlowNetwork, init_flow: &Flow) -> Result<Flow, FlowError> {
    let sources = supply_nodes(graph);
    let limit = cancel_round_limit(graph);
    let mut flow = init_flow.clone();

    for round in 0..limit {
        assert!(is_valid_flow(&flow, graph));
        let rg = flow_to_residue(graph, &flow);
        match find_negative_cycle(&rg, &sources) {
            Some(cycle) => {
                flow = cancel_cycle(&flow, &rg, &cycle)?;
                debug!("round {}: cost={}", round, flow.total_cost(graph));
            }
            None => {
                info!("optimal, cost={}", flow.total_cost(graph));
                return Ok(flow);
            }
        }
    }

    error!("no optimum after {} cancel rounds", limit);
    Err(FlowError::IterationLimit)
}

//
// internal functions
//

///
/// Upper bound on cancel rounds. Every accepted cancellation improves the
/// integer total cost by at least one, so the round count is bounded by the
/// total cost range of the network.
///
fn cancel_round_limit(graph: &FlowNetwork) -> u64 {
    let range: u64 = graph
        .edge_references()
        .map(|e| e.weight().capacity as u64 * e.weight().cost.unsigned_abs())
        .sum();
    2 * range + graph.edge_count() as u64 + 16
}

//
// tests
//

#[cfg(test)]
mod tests {
    use super::mocks::*;
    use super::*;
    use petgraph::graph::EdgeIndex;

    fn init_logger() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    #[test]
    fn trivial_balanced_network() {
        init_logger();
        let g = mock_network_trivial();
        let f = min_cost_flow(&g).unwrap();
        assert_eq!(f.get(EdgeIndex::new(0)), Some(5));
        assert_eq!(f.total_cost(&g), 10);
        assert!(is_valid_flow(&f, &g));
    }

    #[test]
    fn detour_requires_cancellation() {
        init_logger();
        let g = mock_network_detour();

        // the hop-count-shortest feasible flow saturates the expensive arc
        let f0 = find_feasible_flow(&g).unwrap();
        assert_eq!(f0.get(EdgeIndex::new(0)), Some(4));
        assert_eq!(f0.total_cost(&g), 40);

        // canceling reroutes everything through the detour
        let f = min_cost_flow(&g).unwrap();
        assert_eq!(f.get(EdgeIndex::new(0)), Some(0));
        assert_eq!(f.get(EdgeIndex::new(1)), Some(4));
        assert_eq!(f.get(EdgeIndex::new(2)), Some(4));
        assert_eq!(f.total_cost(&g), 8);
        assert!(f.total_cost(&g) < f0.total_cost(&g));
    }

    #[test]
    fn transshipment_reaches_enumerated_optimum() {
        init_logger();
        let g = mock_network_transship();
        let f = min_cost_flow(&g).unwrap();
        // unique optimum, enumerated by hand in mocks.rs
        assert_eq!(f.get(EdgeIndex::new(0)), Some(1)); // a12
        assert_eq!(f.get(EdgeIndex::new(1)), Some(4)); // a13
        assert_eq!(f.get(EdgeIndex::new(2)), Some(1)); // a23
        assert_eq!(f.get(EdgeIndex::new(3)), Some(0)); // a24
        assert_eq!(f.get(EdgeIndex::new(4)), Some(5)); // a34
        assert_eq!(f.total_cost(&g), 16);
        assert!(is_valid_flow(&f, &g));
    }

    #[test]
    fn optimum_is_a_fixed_point() {
        init_logger();
        let g = mock_network_transship();
        let f = min_cost_flow(&g).unwrap();

        // no negative cycle is left in the residue graph of the optimum
        let rg = flow_to_residue(&g, &f);
        assert_eq!(find_negative_cycle(&rg, &supply_nodes(&g)), None);

        // and restarting the cancel loop from it changes nothing
        let f2 = min_cost_flow_from(&g, &f).unwrap();
        assert_eq!(f, f2);
    }

    #[test]
    fn undersized_arc_is_infeasible() {
        init_logger();
        let g = mock_network_undersized();
        assert_eq!(min_cost_flow(&g), Err(FlowError::Infeasible));
    }

    #[test]
    fn disconnected_demand_is_infeasible() {
        init_logger();
        let g = mock_network_disconnected();
        assert_eq!(min_cost_flow(&g), Err(FlowError::Infeasible));
    }

    #[test]
    fn empty_network_is_trivially_optimal() {
        init_logger();
        let g = FlowNetwork::new();
        let f = min_cost_flow(&g).unwrap();
        assert_eq!(f.total_cost(&g), 0);
    }
}
