mod routing_table;

pub use routing_table::{RouteEntry, RoutingTable};
