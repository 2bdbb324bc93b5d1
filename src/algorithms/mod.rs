//! Learning algorithms for the track scheduling problem.

pub mod rl;
