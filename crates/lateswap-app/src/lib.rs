// Command-line front end for the late-swap engine.

pub mod cli;
pub mod pipeline;
