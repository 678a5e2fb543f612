#![doc = include_str!("../README.md")]

#![warn(
    future_incompatible,
    rust_2018_compatibility,
    missing_docs,
    clippy::cargo,
    clippy::pedantic,
)]
#![deny(
    unused_must_use,
)]
#![doc(test(attr(deny(warnings))))]

#[macro_use]
mod utils;

mod coroutine;

pub use self::generator::*;
mod generator;

mod iter;

mod public_macros;

pub
mod prelude;

mod registry;

pub use self::yield_::*;
mod yield_;

#[cfg(test)]
mod tests;
