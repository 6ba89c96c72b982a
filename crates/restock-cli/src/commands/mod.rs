//! CLI command implementations
//!
//! Commands are organized by domain:
//! - `predict` - Run replenishment predictions against a history file
//! - `household` - Show the inferred household context
//! - `rates` - Inspect the standard consumption-rate table
//! - `serve` - Web server command

pub mod household;
pub mod predict;
pub mod rates;
pub mod serve;

// Re-export command functions for main.rs
pub use household::*;
pub use predict::*;
pub use rates::*;
pub use serve::*;

/// Truncate a string to a maximum byte length, adding "..." if
/// truncated. The cut point backs up to a char boundary so multibyte
/// names never split mid-character.
pub fn truncate(s: &str, max: usize) -> String {
    if s.len() <= max {
        return s.to_string();
    }
    let mut end = max.saturating_sub(3);
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...", &s[..end])
}
