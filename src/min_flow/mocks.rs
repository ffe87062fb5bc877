use super::network::{network_from_parts, FlowNetwork};

// mock network generation functions

/// One supply node, one demand node, one arc with slack capacity.
/// Optimal: flow(a) = 5, total cost 10.
pub fn mock_network_trivial() -> FlowNetwork {
    network_from_parts(&[(1, 5), (2, -5)], &[("a", 1, 2, 10, 2)])
}

/// The hop-count-shortest feasibility search routes everything over the
/// expensive direct arc, leaving a negative cycle (cheap1, cheap2, reverse of
/// direct) worth -8 per unit in the residue graph.
/// Optimal: direct 0, cheap1 4, cheap2 4, total cost 8.
pub fn mock_network_detour() -> FlowNetwork {
    network_from_parts(
        &[(1, 4), (3, -4)],
        &[
            ("direct", 1, 3, 4, 10),
            ("cheap1", 1, 2, 4, 1),
            ("cheap2", 2, 3, 4, 1),
        ],
    )
}

/// Four-node transshipment network with a unique optimum, enumerated by
/// hand: four units 1->3->4 plus one unit 1->2->3->4, total cost 16.
pub fn mock_network_transship() -> FlowNetwork {
    network_from_parts(
        &[(1, 5), (4, -5)],
        &[
            ("a12", 1, 2, 4, 2),
            ("a13", 1, 3, 4, 2),
            ("a23", 2, 3, 2, 1),
            ("a24", 2, 4, 3, 3),
            ("a34", 3, 4, 5, 1),
        ],
    )
}

/// Supply 10 behind a capacity-5 arc. Infeasible.
pub fn mock_network_undersized() -> FlowNetwork {
    network_from_parts(&[(1, 10), (2, -10)], &[("a", 1, 2, 5, 1)])
}

/// Nodes 3 and 4 carry supply and demand but no arcs reach them. Infeasible.
pub fn mock_network_disconnected() -> FlowNetwork {
    network_from_parts(&[(1, 5), (2, -5), (3, 3), (4, -3)], &[("a", 1, 2, 10, 1)])
}
