//! Negative cycle detection on the residue graph
//!
//! Label-correcting (Bellman-Ford style) relaxation seeded from the supply
//! nodes. Shortest distances stabilize within |V|-1 rounds unless a negative
//! cycle is reachable, so an edge that still relaxes afterwards witnesses
//! one; since residue edges exist only with positive capacity, any cycle
//! found this way can carry flow.
//!
use super::residue::{format_cycle, ResidueGraph};
use super::Cost;
use log::debug;
use petgraph::graph::{EdgeIndex, NodeIndex};
use petgraph::visit::EdgeRef;

///
/// Find a negative-weight cycle reachable from the source nodes, as an
/// ordered edge list. `None` means the current flow admits no improvement.
///
pub fn find_negative_cycle(rg: &ResidueGraph, sources: &[NodeIndex]) -> Option<Vec<EdgeIndex>> {
    let n = rg.node_count();
    if n == 0 || sources.is_empty() {
        return None;
    }

    // per-search scratch: distance (None = unreachable) and the edge that
    // last improved each node
    let mut dist: Vec<Option<Cost>> = vec![None; n];
    let mut pred: Vec<Option<EdgeIndex>> = vec![None; n];
    for &s in sources {
        dist[s.index()] = Some(0);
    }

    // |V| full relaxation rounds, stopping early once a round changes nothing
    for _round in 0..n {
        let mut changed = false;
        for e in rg.edge_references() {
            if let Some(dv) = dist[e.source().index()] {
                let candidate = dv + e.weight().weight;
                if dist[e.target().index()].map_or(true, |dw| candidate < dw) {
                    dist[e.target().index()] = Some(candidate);
                    pred[e.target().index()] = Some(e.id());
                    changed = true;
                }
            }
        }
        if !changed {
            return None;
        }
    }

    // distances kept moving for |V| rounds: some edge must still relax, and
    // its target is on or downstream of a negative cycle
    let witness = rg.edge_references().find(|e| match dist[e.source().index()] {
        Some(dv) => dist[e.target().index()].map_or(true, |dw| dv + e.weight().weight < dw),
        None => false,
    })?;
    pred[witness.target().index()] = Some(witness.id());

    // walk |V| predecessor steps to land inside the cycle
    let mut v = witness.target();
    for _ in 0..n {
        let e = pred[v.index()].expect("relaxed node without predecessor");
        v = rg.edge_endpoints(e).unwrap().0;
    }

    // collect the cycle edges by walking once more until the landing node
    // comes back around
    let start = v;
    let mut cycle = Vec::new();
    loop {
        let e = pred[v.index()].unwrap();
        cycle.push(e);
        v = rg.edge_endpoints(e).unwrap().0;
        if v == start {
            break;
        }
    }
    cycle.reverse();

    debug!("negative cycle: {}", format_cycle(rg, &cycle));
    Some(cycle)
}

//
// tests
//

#[cfg(test)]
mod tests {
    use super::super::residue::{cycle_weight, is_cycle, ResidueDirection, ResidueEdge};
    use super::*;

    fn re(count: u32, weight: Cost, target: usize) -> ResidueEdge {
        ResidueEdge::new(count, weight, EdgeIndex::new(target), ResidueDirection::Up)
    }

    #[test]
    fn detects_reachable_negative_cycle() {
        let mut rg = ResidueGraph::new();
        let a = rg.add_node(());
        let b = rg.add_node(());
        let c = rg.add_node(());
        rg.add_edge(a, b, re(1, 1, 0));
        let e1 = rg.add_edge(b, c, re(1, -3, 1));
        let e2 = rg.add_edge(c, b, re(1, 1, 2));

        let cycle = find_negative_cycle(&rg, &[a]).unwrap();
        assert!(is_cycle(&rg, &cycle));
        assert!(cycle_weight(&rg, &cycle) < 0);
        assert_eq!(cycle.len(), 2);
        assert!(cycle.contains(&e1));
        assert!(cycle.contains(&e2));
    }

    #[test]
    fn detects_self_loop() {
        let mut rg = ResidueGraph::new();
        let a = rg.add_node(());
        let e = rg.add_edge(a, a, re(1, -10, 0));
        assert_eq!(find_negative_cycle(&rg, &[a]), Some(vec![e]));
    }

    #[test]
    fn ignores_non_negative_cycles() {
        let mut rg = ResidueGraph::new();
        let a = rg.add_node(());
        let b = rg.add_node(());
        rg.add_edge(a, b, re(1, -1, 0));
        rg.add_edge(b, a, re(1, 1, 1));
        assert_eq!(find_negative_cycle(&rg, &[a]), None);
    }

    #[test]
    fn ignores_unreachable_negative_cycle() {
        // the b<->c cycle is negative but nothing links a to it
        let mut rg = ResidueGraph::new();
        let a = rg.add_node(());
        let b = rg.add_node(());
        let c = rg.add_node(());
        rg.add_edge(b, c, re(1, -3, 0));
        rg.add_edge(c, b, re(1, 1, 1));
        assert_eq!(find_negative_cycle(&rg, &[a]), None);
        assert!(find_negative_cycle(&rg, &[b]).is_some());
    }

    #[test]
    fn no_sources_means_no_cycle() {
        let mut rg = ResidueGraph::new();
        let a = rg.add_node(());
        rg.add_edge(a, a, re(1, -1, 0));
        assert_eq!(find_negative_cycle(&rg, &[]), None);
    }

    #[test]
    fn picks_negative_cycle_among_positive_ones() {
        // two 2-cycles through d; only the left one is negative
        let mut rg = ResidueGraph::new();
        let a = rg.add_node(());
        let d = rg.add_node(());
        let b = rg.add_node(());
        let e0 = rg.add_edge(a, d, re(1, 2, 0));
        let e1 = rg.add_edge(d, a, re(1, -4, 1));
        rg.add_edge(b, d, re(1, 5, 2));
        rg.add_edge(d, b, re(1, -1, 3));

        let cycle = find_negative_cycle(&rg, &[a, b]).unwrap();
        assert!(is_cycle(&rg, &cycle));
        assert!(cycle_weight(&rg, &cycle) < 0);
        assert_eq!(cycle.len(), 2);
        assert!(cycle.contains(&e0));
        assert!(cycle.contains(&e1));
    }
}
