pub use alignable::Alignable;
pub use seq::Sequence;

pub mod alignable;
pub mod num;
pub mod seq;
