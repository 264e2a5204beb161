//! This module is separated into its own crate to keep the public facade of `dmi-rs` thin, and should not be used directly.

/// `use dmi_rs::prelude::*;` to import commonly used items.
pub mod prelude;

// Re-export dmi_types for convenience
pub use dmi_types;

// Re-export commonly used types at crate root
pub use dmi_types::file::{AnimationState, DirCount, Direction, DmiError, DmiFile, Frame, ParseConfig};
