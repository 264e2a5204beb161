//! File type support for `dmi-rs` project.

mod error;

pub mod dmi;

// Re-export unified error types
pub use error::{DmiError, FormatError};

// Re-export main file types
pub use dmi::{
	AnimationState, DirCount, Direction, ExtractionPolicy, File as DmiFile, Frame, Hotspot,
	ParseConfig,
};
