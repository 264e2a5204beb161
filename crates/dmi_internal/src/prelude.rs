//! Prelude module for `dmi_internal`.
//!
//! This module provides a convenient way to import commonly used types and traits.
//!
//! # Examples
//!
//! ```rust
//! use dmi_internal::prelude::*;
//!
//! // Now you can use all common types directly
//! let mut state = AnimationState::new("idle");
//! state.add_frame(Frame::blank(32, 32)).unwrap();
//!
//! let mut dmi = DmiFile::new(32, 32);
//! dmi.add_state(state);
//! assert_eq!(dmi.state_count(), 1);
//! ```

// Re-export everything from dmi_types::prelude
#[doc(inline)]
pub use dmi_types::prelude::*;

// Re-export the entire dmi_types module for advanced usage
#[doc(inline)]
pub use dmi_types;
