pub use op::Op;
pub use scoring::Scoring;
pub use stats::Summary;

pub mod nw;
mod op;
pub mod scoring;
pub mod stats;
