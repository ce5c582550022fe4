//! Score competition runs and find the vehicle setup that wins each track.
//!
//! [`scoring`] turns raw measurements into a lower-is-better score,
//! [`stats`] groups saved runs by track and setup, and [`meet`] ranks teams
//! on their best of two runs. The remaining modules are the CLI's plumbing.

pub mod config;
pub mod identity;
pub mod logging;
pub mod meet;
pub mod output;
pub mod runs;
pub mod scoring;
pub mod stats;
