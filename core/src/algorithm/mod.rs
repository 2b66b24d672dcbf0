//! Algorithm engine
//! Network-flow algorithms and the reductions built on top of them.

pub mod flow;

pub use self::flow::*;
