//! DMI document structure and I/O operations.
//!
//! This module defines the main `File` struct which represents a complete DMI
//! document: the global icon size and an ordered list of animation states.

use std::fmt;

use image::RgbaImage;
use log::{debug, warn};

use super::{
	constants, container,
	container::TextChunk,
	frame::Frame,
	metadata, packer,
	parse_config::{ExtractionPolicy, ParseConfig},
	snapshot::{Snapshot, StateSnapshot},
	state::AnimationState,
};
use crate::file::DmiError;

/// DMI document: a sprite grid PNG with its state metadata.
///
/// # Examples
///
/// ## Building and writing a document
///
/// ```
/// use dmi_types::file::dmi::{AnimationState, File, Frame};
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let mut dmi = File::new(32, 32);
///
/// let mut idle = AnimationState::new("idle");
/// idle.add_frame(Frame::blank(32, 32))?;
/// dmi.add_state(idle);
///
/// let bytes = dmi.to_bytes()?;
/// let loaded = File::from_bytes(&bytes)?;
/// assert!(loaded.is_same(&dmi));
/// # Ok(())
/// # }
/// ```
///
/// ## Opening a file
///
/// ```no_run
/// use dmi_types::file::dmi::File;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let dmi = File::open("mob.dmi")?;
/// for state in dmi.states() {
///     println!("{state}");
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct File {
	/// Icon width shared by every frame
	width: u32,

	/// Icon height shared by every frame
	height: u32,

	/// States in document order
	states: Vec<AnimationState>,
}

impl File {
	/// Creates an empty document with the given icon size.
	pub fn new(width: u32, height: u32) -> Self {
		Self {
			width,
			height,
			states: Vec::new(),
		}
	}

	/// Opens a DMI (or plain PNG) file from the specified path.
	///
	/// # Errors
	///
	/// Returns an error if the file cannot be read or parsed.
	pub fn open(path: impl AsRef<std::path::Path>) -> Result<Self, DmiError> {
		let data = std::fs::read(path)?;
		Self::from_bytes(&data)
	}

	/// Writes the document to the specified path.
	pub fn save(&self, path: impl AsRef<std::path::Path>) -> Result<(), DmiError> {
		std::fs::write(path, self.to_bytes()?)?;
		Ok(())
	}

	/// Parses a document with the default (strict) configuration.
	pub fn from_bytes(data: &[u8]) -> Result<Self, DmiError> {
		Self::from_bytes_with_config(data, &ParseConfig::default())
	}

	/// Parses a document.
	///
	/// A PNG without a `Description` zTXt chunk becomes a document with a
	/// single state named `png` wrapping the whole image.
	///
	/// # Errors
	///
	/// - [`DmiError::Format`] when the metadata grammar is malformed
	/// - [`DmiError::Extraction`] when the sprite grid does not match the
	///   metadata, unless `config` is lenient
	/// - PNG/image errors when the container cannot be decoded
	pub fn from_bytes_with_config(data: &[u8], config: &ParseConfig) -> Result<Self, DmiError> {
		let decoded = container::decode(data)?;

		let Some(text) = decoded.compressed_text(constants::METADATA_KEYWORD) else {
			warn!("no DMI metadata found, wrapping plain {}x{} image", decoded.image.width(), decoded.image.height());
			return Self::from_plain_image(decoded.image);
		};

		let metadata = metadata::deserialize(text, config.default_icon_size)?;
		let mut file = Self::new(metadata.width, metadata.height);
		file.states = metadata.states;

		let extracted = packer::unpack(
			&decoded.image,
			file.width,
			file.height,
			&mut file.states,
			&metadata.frame_counts,
		);
		metadata::attach_hotspots(&mut file.states, &metadata.hotspot_runs);
		if let Err(err) = extracted {
			match config.extraction {
				ExtractionPolicy::Strict => return Err(err),
				ExtractionPolicy::Lenient => {
					warn!("keeping partially extracted document: {err}");
					for state in &mut file.states {
						state.fit_tables();
					}
				}
			}
		}

		debug!("parsed {}x{} DMI with {} states", file.width, file.height, file.states.len());
		Ok(file)
	}

	/// Wraps a plain image as a single-state document.
	pub fn from_plain_image(image: RgbaImage) -> Result<Self, DmiError> {
		let mut file = Self::new(image.width(), image.height());
		let mut state = AnimationState::new(constants::PLAIN_PNG_STATE);
		state.add_frame(Frame::new(image))?;
		file.states.push(state);
		Ok(file)
	}

	/// Builds the complete PNG file: packed sprite grid plus metadata chunk.
	///
	/// # Errors
	///
	/// - [`DmiError::SizeMismatch`] when a frame is not `width × height`
	/// - [`DmiError::UnencodableName`] when a state name has characters
	///   above U+00FF
	pub fn to_bytes(&self) -> Result<Vec<u8>, DmiError> {
		if let Some(state) = self.states.iter().find(|state| !state.has_latin1_name()) {
			return Err(DmiError::UnencodableName {
				name: state.name().to_string(),
			});
		}
		packer::check_frame_sizes(self.width, self.height, &self.states)?;

		let metadata = self.build_metadata();
		let data = self.build_data();
		debug!("writing {}x{} sprite grid for {} states", data.width(), data.height(), self.states.len());
		container::encode(&data, &[TextChunk::compressed(constants::METADATA_KEYWORD, metadata)])
	}

	/// Returns the metadata block text.
	pub fn build_metadata(&self) -> String {
		metadata::serialize(self.width, self.height, &self.states)
	}

	/// Returns the packed sprite grid.
	pub fn build_data(&self) -> RgbaImage {
		packer::pack(self.width, self.height, &self.states)
	}

	/// Returns the icon width.
	pub fn width(&self) -> u32 {
		self.width
	}

	/// Returns the icon height.
	pub fn height(&self) -> u32 {
		self.height
	}

	/// Returns the states in document order.
	pub fn states(&self) -> &[AnimationState] {
		&self.states
	}

	/// Returns a mutable reference to the states.
	pub fn states_mut(&mut self) -> &mut Vec<AnimationState> {
		&mut self.states
	}

	/// Number of states.
	pub fn state_count(&self) -> usize {
		self.states.len()
	}

	/// Appends a state.
	pub fn add_state(&mut self, state: AnimationState) {
		self.states.push(state);
	}

	/// Removes and returns the state at `index`.
	pub fn remove_state(&mut self, index: usize) -> Option<AnimationState> {
		(index < self.states.len()).then(|| self.states.remove(index))
	}

	/// Finds the first state with the given name.
	pub fn state(&self, name: &str) -> Option<&AnimationState> {
		self.states.iter().find(|state| state.name() == name)
	}

	/// Finds the first state with the given name, mutably.
	pub fn state_mut(&mut self, name: &str) -> Result<&mut AnimationState, DmiError> {
		self.states.iter_mut().find(|state| state.name() == name).ok_or_else(|| {
			DmiError::StateNotFound {
				name: name.to_string(),
			}
		})
	}

	/// Scales every frame of every state to a new icon size.
	pub fn resize(&mut self, width: u32, height: u32) -> Result<(), DmiError> {
		for state in &mut self.states {
			state.resize_frames_to(width, height)?;
		}
		self.width = width;
		self.height = height;
		Ok(())
	}

	/// Canonical snapshot used for comparison and JSON export.
	pub fn snapshot(&self) -> Snapshot {
		Snapshot {
			width: self.width,
			height: self.height,
			states: self.states.iter().map(StateSnapshot::capture).collect(),
		}
	}

	/// Structural equality: same icon size and identical states, frames included.
	pub fn is_same(&self, other: &File) -> bool {
		self.snapshot() == other.snapshot()
	}

	/// Serializes the snapshot as JSON.
	pub fn to_json(&self) -> Result<String, DmiError> {
		Ok(serde_json::to_string(&self.snapshot())?)
	}

	/// Restores a document from [`File::to_json`] output.
	pub fn from_json(json: &str) -> Result<Self, DmiError> {
		let snapshot: Snapshot = serde_json::from_str(json)?;
		let states = snapshot.states.iter().map(StateSnapshot::restore).collect::<Result<_, _>>()?;
		Ok(Self {
			width: snapshot.width,
			height: snapshot.height,
			states,
		})
	}
}

impl fmt::Display for File {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		writeln!(f, "DMI {}x{}, {} states:", self.width, self.height, self.states.len())?;
		for state in &self.states {
			writeln!(f, "  {state}")?;
		}
		Ok(())
	}
}

impl TryFrom<&[u8]> for File {
	type Error = DmiError;

	fn try_from(value: &[u8]) -> Result<Self, Self::Error> {
		Self::from_bytes(value)
	}
}

impl TryFrom<Vec<u8>> for File {
	type Error = DmiError;

	fn try_from(value: Vec<u8>) -> Result<Self, Self::Error> {
		Self::from_bytes(&value)
	}
}
