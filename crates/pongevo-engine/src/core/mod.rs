pub use self::{ball::*, field::*, paddle::*};

pub(crate) mod ball;
pub(crate) mod field;
pub(crate) mod paddle;
