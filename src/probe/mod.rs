// src/probe/mod.rs
// =============================================================================
// Sensitive path probing against the crawl's base origin.
// =============================================================================

mod sensitive;

pub use sensitive::{probe, SensitiveDirectoryHit};

#[cfg(test)]
pub use sensitive::SENSITIVE_PATHS;
