//! Command handlers for the Autoblob CLI.

pub mod generate;
