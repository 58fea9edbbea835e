//! drone-gcf — Drone CI plugin for Google Cloud Functions.
//!
//! Reads the step environment, compiles it into an ordered plan of gcloud
//! invocations (deploy, delete, call, list), and executes them
//! sequentially, stopping at the first failure.

pub mod cli;
pub mod core;
pub mod transport;
