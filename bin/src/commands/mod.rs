//! CLI command implementations.

pub(crate) mod download;
