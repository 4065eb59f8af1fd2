pub use algo::{fill, Branches, Silent, Tracer};
pub use engine::{Engine, EngineBuilder, Outcome};
pub use extract::{extract, Hit, Mode};
pub use graph::{Coordinate, FragmentPair, NodeId, PathGraph, PathNode, Retention, Stats};
pub use matrix::ScoreMatrix;

pub mod algo;
mod engine;
mod extract;
pub mod graph;
mod matrix;
