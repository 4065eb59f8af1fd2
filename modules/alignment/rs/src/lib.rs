pub use nwgraph_core_rs::num::Score;
pub use nwgraph_core_rs::seq::GAP;
pub use nwgraph_core_rs::{Alignable, Sequence};

pub mod pairwise;
