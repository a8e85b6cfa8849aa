//! Command implementations for the schelm CLI

pub mod split;
