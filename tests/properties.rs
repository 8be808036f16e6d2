//! Property tests for Quire.
//!
//! Properties use randomized input generation to explore edge cases and
//! protect invariants like "never panics" and "mirror equals source".
//!
//! Run with: `cargo test --test properties`

#[path = "properties/frontmatter.rs"]
mod frontmatter;

#[path = "properties/mirror.rs"]
mod mirror;

#[path = "properties/paths.rs"]
mod paths;
