//! The crate prelude: reexport the most essential utilities so that blob
//! `use`-ing them should enable the most straight-forward usage.

pub use crate::{
    generator::{
        Generator,
        GeneratorState,
    },
    mk_gen,
    yield_::{
        yield_,
        NoCurrentGenerator,
    },
};
