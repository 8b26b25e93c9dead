//! Routing module
//!
//! Maps request paths to the rotating asset registered for them.

mod table;

pub use table::RouteTable;
