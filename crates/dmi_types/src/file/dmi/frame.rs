//! DMI frame buffers.
//!
//! A [`Frame`] is one RGBA cell of the sprite grid. The pixel buffer is shared
//! between clones and copied on the first write, so a cloned state never sees
//! edits made through the original.

use std::{fmt, sync::Arc};

use image::{Rgba, RgbaImage, imageops::FilterType};

use super::{constants, container};
use crate::file::DmiError;

/// Single RGBA frame of a state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
	pixels: Arc<RgbaImage>,
}

impl Frame {
	/// Wraps an RGBA image.
	pub fn new(image: RgbaImage) -> Self {
		Self {
			pixels: Arc::new(image),
		}
	}

	/// Creates a frame filled with the blank colour RGBA(192, 192, 192, 0).
	pub fn blank(width: u32, height: u32) -> Self {
		Self::new(blank_image(width, height))
	}

	/// Returns the frame's width.
	#[inline]
	pub fn width(&self) -> u32 {
		self.pixels.width()
	}

	/// Returns the frame's height.
	#[inline]
	pub fn height(&self) -> u32 {
		self.pixels.height()
	}

	/// Returns the (width, height) pair.
	#[inline]
	pub fn dimensions(&self) -> (u32, u32) {
		self.pixels.dimensions()
	}

	/// Returns the pixel buffer.
	pub fn image(&self) -> &RgbaImage {
		&self.pixels
	}

	/// Returns a writable pixel buffer, detaching it from any clone first.
	pub fn image_mut(&mut self) -> &mut RgbaImage {
		Arc::make_mut(&mut self.pixels)
	}

	/// Returns the raw RGBA bytes, row-major.
	pub fn raw_pixels(&self) -> &[u8] {
		self.pixels.as_raw()
	}

	/// Returns `true` when both frames point at the same buffer.
	pub fn shares_buffer(&self, other: &Frame) -> bool {
		Arc::ptr_eq(&self.pixels, &other.pixels)
	}

	/// Scales the frame with nearest-neighbour sampling.
	pub fn resized(&self, width: u32, height: u32) -> Self {
		Self::new(image::imageops::resize(self.image(), width, height, FilterType::Nearest))
	}

	/// Encodes the frame as a standalone PNG.
	pub fn to_png(&self) -> Result<Vec<u8>, DmiError> {
		container::encode(&self.pixels, &[])
	}

	/// Decodes a standalone PNG into a frame.
	pub fn from_png(bytes: &[u8]) -> Result<Self, DmiError> {
		Ok(Self::new(container::decode(bytes)?.image))
	}
}

impl From<RgbaImage> for Frame {
	fn from(image: RgbaImage) -> Self {
		Self::new(image)
	}
}

impl fmt::Display for Frame {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}×{}", self.width(), self.height())
	}
}

/// Creates an RGBA image filled with the blank colour.
pub fn blank_image(width: u32, height: u32) -> RgbaImage {
	RgbaImage::from_pixel(width, height, Rgba(constants::BLANK_PIXEL))
}
