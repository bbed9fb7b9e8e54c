//! Core queue logic: the shared contract, its in-memory adapter and the
//! blocking / synchronizing / buffering decorators that compose over it.

pub mod error;
pub mod queue;
