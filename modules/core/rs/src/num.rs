use std::fmt::{Debug, Display};
use std::hash::Hash;

/// T values are primitive integers
pub trait PrimInt: ::num::PrimInt + Debug + Default {}
impl<T: ::num::PrimInt + Debug + Default> PrimInt for T {}

/// T values are signed primitive integers
pub trait PrimSInt: PrimInt + ::num::Signed {}

impl<T: PrimInt + ::num::Signed> PrimSInt for T {}

/// Alignment score: a signed primitive integer. Ties between recurrence branches are resolved
/// by exact equality, so floating point types are deliberately excluded.
pub trait Score: PrimSInt + Display + Hash {}

impl<T: PrimSInt + Display + Hash> Score for T {}
