mod dijkstra;
mod distance_vector;

pub use dijkstra::{LinkStateResult, LinkStateSnapshot, solve_link_state};
pub use distance_vector::{DistanceVectorResult, TableSnapshot, solve_distance_vector};
