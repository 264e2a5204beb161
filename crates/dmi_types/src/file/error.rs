//! Error types for DMI parsing and manipulation.

use thiserror::Error;

/// Errors raised while reading the textual metadata block of a DMI file.
///
/// Every variant is fatal: the parser stops at the first offending line and
/// no partial document is produced.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
	/// The first line is not `# BEGIN DMI`
	#[error("Missing metadata header, found {found:?}")]
	MissingHeader {
		/// Line found in place of the header
		found: String,
	},

	/// The second line does not declare the supported version
	#[error("Invalid dmi metadata version, found {found:?}")]
	UnsupportedVersion {
		/// Line found in place of the version declaration
		found: String,
	},

	/// A line that is not of the form `key = value`
	#[error("Malformed metadata line {line:?}")]
	MalformedLine {
		/// The offending line
		line: String,
	},

	/// A key outside the recognized set
	#[error("Unknown metadata key {key:?}")]
	UnknownKey {
		/// The unrecognized key
		key: String,
	},

	/// A state attribute appeared before any `state` line
	#[error("No active state for metadata key {key:?}")]
	NoActiveState {
		/// The attribute key
		key: String,
	},

	/// A `hotspot` line appeared before the state's `frames` line
	#[error("Out-of-order metadata: {key:?} in state {state:?} precedes its frame count")]
	OutOfOrder {
		/// The attribute key
		key: String,
		/// Name of the state being described
		state: String,
	},

	/// `width` or `height` appeared after the first state
	#[error("Global key {key:?} is only allowed before the first state")]
	GlobalAfterState {
		/// The global key
		key: String,
	},

	/// A value that could not be parsed for its key
	#[error("Invalid value {value:?} for metadata key {key:?}")]
	InvalidValue {
		/// The attribute key
		key: String,
		/// The raw value
		value: String,
	},

	/// A state never declared its frame count
	#[error("State {state:?} is missing its frame count")]
	MissingFrameCount {
		/// Name of the state
		state: String,
	},
}

impl FormatError {
	/// Helper to build an [`FormatError::InvalidValue`]
	pub fn invalid_value(key: impl Into<String>, value: impl Into<String>) -> Self {
		Self::InvalidValue {
			key: key.into(),
			value: value.into(),
		}
	}
}

/// Unified error type for DMI documents.
#[derive(Debug, Error)]
pub enum DmiError {
	/// Malformed metadata grammar
	#[error(transparent)]
	Format(#[from] FormatError),

	/// A frame does not have the document icon size
	#[error(
		"Mismatched size for frame {index} of state {state:?}: expected {}x{}, got {}x{}",
		.expected.0, .expected.1, .actual.0, .actual.1
	)]
	SizeMismatch {
		/// Name of the state
		state: String,
		/// Running grid index when extracting, stored frame index when writing
		index: usize,
		/// Declared (width, height)
		expected: (u32, u32),
		/// Size of the region actually available
		actual: (u32, u32),
	},

	/// Frame extraction failed for a state
	#[error("Failed to extract frames of state {state:?}: {source}")]
	Extraction {
		/// Name of the state whose frames could not be extracted
		state: String,
		/// Underlying failure
		#[source]
		source: Box<DmiError>,
	},

	/// Direction count other than 1, 4 or 8
	#[error("Invalid direction count {0}, expected 1, 4 or 8")]
	InvalidDirCount(u32),

	/// Operation needs at least one frame to learn the frame size
	#[error("State {name:?} has no frames")]
	EmptyState {
		/// Name of the state
		name: String,
	},

	/// Frame index past the end of a state's frame list
	#[error("Frame index {index} out of range in state {state:?} (total frames: {total})")]
	FrameOutOfRange {
		/// Name of the state
		state: String,
		/// Requested stored-frame index
		index: usize,
		/// Number of stored frames
		total: usize,
	},

	/// Delay or hotspot table whose length is not the frame count
	#[error("State {state:?} has {actual} {table} entries, expected {expected}")]
	TableLength {
		/// Name of the state
		state: String,
		/// `delay` or `hotspot`
		table: &'static str,
		/// Frame count of the state
		expected: usize,
		/// Length of the rejected table
		actual: usize,
	},

	/// Delay that is not a finite positive number
	#[error("State {state:?} has invalid delay {value}")]
	InvalidDelay {
		/// Name of the state
		state: String,
		/// The rejected delay
		value: f64,
	},

	/// State name that the Latin-1 `zTXt` chunk cannot carry
	#[error("State name {name:?} is not representable in ISO 8859-1")]
	UnencodableName {
		/// The rejected name
		name: String,
	},

	/// Lookup of a state that does not exist
	#[error("State {name:?} not found")]
	StateNotFound {
		/// Name that was looked up
		name: String,
	},

	/// Raster decoding or processing error
	#[error(transparent)]
	Image(#[from] image::ImageError),

	/// PNG encoding error
	#[error(transparent)]
	PngEncoding(#[from] png::EncodingError),

	/// PNG decoding error
	#[error(transparent)]
	PngDecoding(#[from] png::DecodingError),

	/// JSON snapshot error
	#[error(transparent)]
	Json(#[from] serde_json::Error),

	/// Hex payload in a JSON snapshot is corrupt
	#[error(transparent)]
	Hex(#[from] hex::FromHexError),

	/// IO error
	#[error(transparent)]
	IOError(#[from] std::io::Error),
}

impl DmiError {
	/// Wraps an extraction failure with the state it happened in
	pub fn extraction(state: impl Into<String>, source: DmiError) -> Self {
		Self::Extraction {
			state: state.into(),
			source: Box::new(source),
		}
	}
}
