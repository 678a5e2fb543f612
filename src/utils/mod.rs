#[macro_use]
pub(in crate)
mod macros;

pub(in crate)
mod prelude;
