//! HTTP adapters.

pub mod lending;
