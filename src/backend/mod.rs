//! Remote generation backend client.

pub mod client;

pub use client::GenerationClient;
