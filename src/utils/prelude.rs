#![allow(unused_imports)]

pub(in crate)
use ::{
    core::any::Any,
    std::sync::Arc,
};

pub(in crate)
use crate::{
    coroutine::{
        BodyCoroutine,
        Handoff,
        Outcome,
    },
    generator::{
        Generator,
        GeneratorState,
    },
    registry,
};
