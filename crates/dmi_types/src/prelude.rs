//! Prelude module for `dmi_types`.
//!
//! This module provides a convenient way to import commonly used types, traits, and constants.
//!
//! # Examples
//!
//! ```no_run
//! use dmi_types::prelude::*;
//!
//! // Now you can use all common types directly
//! let state = AnimationState::with_dirs("walk", DirCount::Four);
//! assert_eq!(state.dirs().count(), 4);
//! let dmi = DmiFile::new(32, 32);
//! ```

// File module types
#[doc(inline)]
pub use crate::file::{
	AnimationState,
	DirCount,
	Direction,

	// DMI types
	DmiError,
	DmiFile,
	ExtractionPolicy,
	FormatError,
	Frame,
	Hotspot,
	ParseConfig,
};

#[doc(inline)]
pub use crate::file::dmi::constants::{DEFAULT_ICON_SIZE, METADATA_KEYWORD};

// Re-export the file module for advanced usage
#[doc(inline)]
pub use crate::file;
