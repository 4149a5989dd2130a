//! Shared fixtures and end-to-end pipeline tests.

pub(crate) mod fixtures;
mod pipeline;
