//! Fixtures shared by the integration tests of the rms crates

pub mod server;

pub use server::{Recorded, serve};
