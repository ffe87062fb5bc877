//!
//! mcflow solves the [minimum cost flow problem](https://en.wikipedia.org/wiki/Minimum-cost_flow_problem)
//! with integer supplies, capacities and costs by negative cycle canceling.
//!
pub mod min_flow;
