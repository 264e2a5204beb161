//! Parse configuration for DMI documents.
//!
//! Controls what happens when frames cannot be cut out of the sprite grid and
//! which icon size is assumed when the metadata leaves it out.

use super::constants;

/// What to do when the frame extraction phase fails
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExtractionPolicy {
	/// Return the failure as [`crate::file::DmiError::Extraction`]
	#[default]
	Strict,
	/// Log the failure and keep the frames extracted so far
	Lenient,
}

/// Configuration for parsing DMI documents.
///
/// # Presets
///
/// - `default()` / `strict()`: extraction failures abort the parse
/// - `lenient()`: extraction failures are logged and a partial document is returned
///
/// # Examples
///
/// ```
/// use dmi_types::file::dmi::{ExtractionPolicy, ParseConfig};
///
/// let config = ParseConfig::default();
/// assert_eq!(config.extraction, ExtractionPolicy::Strict);
///
/// let config = ParseConfig::lenient();
/// assert_eq!(config.extraction, ExtractionPolicy::Lenient);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseConfig {
	/// Handling of frame extraction failures
	pub extraction: ExtractionPolicy,
	/// Icon (width, height) used when the metadata omits them
	pub default_icon_size: (u32, u32),
}

impl Default for ParseConfig {
	fn default() -> Self {
		Self {
			extraction: ExtractionPolicy::Strict,
			default_icon_size: (constants::DEFAULT_ICON_SIZE, constants::DEFAULT_ICON_SIZE),
		}
	}
}

impl ParseConfig {
	/// Create a new parse configuration.
	pub fn new(extraction: ExtractionPolicy, default_icon_size: (u32, u32)) -> Self {
		Self {
			extraction,
			default_icon_size,
		}
	}

	/// Extraction failures abort the parse.
	pub fn strict() -> Self {
		Self::default()
	}

	/// Extraction failures are logged; the document keeps whatever frames
	/// were extracted before the failure.
	pub fn lenient() -> Self {
		Self {
			extraction: ExtractionPolicy::Lenient,
			..Self::default()
		}
	}
}
