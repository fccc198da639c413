// src/source/mod.rs
pub mod client;
pub mod types;

pub use client::{HttpSourceClient, SourceClient};
pub use types::RawPost;
