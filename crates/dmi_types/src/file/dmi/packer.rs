//! Sprite grid packing and unpacking.
//!
//! All stored frames of all states are laid out left-to-right, top-to-bottom
//! in one grid of `width × height` cells. The grid is as close to square as
//! possible: `columns = ceil(sqrt(total))`, `rows = ceil(total / columns)`.

use image::{RgbaImage, imageops};
use log::debug;

use super::{
	frame::{Frame, blank_image},
	state::AnimationState,
};
use crate::file::{DmiError, FormatError};

/// Cell geometry of a sprite grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridLayout {
	/// Number of cells per row
	pub columns: u32,
	/// Number of rows
	pub rows: u32,
	/// Cell width in pixels
	pub cell_width: u32,
	/// Cell height in pixels
	pub cell_height: u32,
}

impl GridLayout {
	/// Layout used when writing `total` frames.
	///
	/// With no frames the grid is a single blank cell.
	pub fn for_frames(total: usize, cell_width: u32, cell_height: u32) -> Self {
		if total == 0 {
			return Self {
				columns: 1,
				rows: 1,
				cell_width,
				cell_height,
			};
		}

		let columns = (total as f64).sqrt().ceil() as usize;
		let rows = total.div_ceil(columns);
		Self {
			columns: columns as u32,
			rows: rows as u32,
			cell_width,
			cell_height,
		}
	}

	/// Layout of an existing image: as many whole cells per row as fit.
	pub fn for_image(image_width: u32, image_height: u32, cell_width: u32, cell_height: u32) -> Self {
		let columns = image_width.checked_div(cell_width).unwrap_or(0).max(1);
		let rows = image_height.checked_div(cell_height).unwrap_or(0);
		Self {
			columns,
			rows,
			cell_width,
			cell_height,
		}
	}

	/// Canvas width in pixels
	pub fn pixel_width(&self) -> u32 {
		self.columns * self.cell_width
	}

	/// Canvas height in pixels
	pub fn pixel_height(&self) -> u32 {
		self.rows * self.cell_height
	}

	/// Top-left pixel of cell `index`
	pub fn cell_origin(&self, index: usize) -> (u32, u32) {
		let columns = self.columns as usize;
		let column = (index % columns) as u32;
		let row = (index / columns) as u32;
		(column * self.cell_width, row * self.cell_height)
	}
}

/// Packs every stored frame of every state into one sprite grid.
///
/// Frames are placed in document order: states in list order, frames within
/// a state in stored (frame, direction) order. Unused cells stay blank.
pub fn pack(width: u32, height: u32, states: &[AnimationState]) -> RgbaImage {
	let total: usize = states.iter().map(|state| state.frames().len()).sum();
	let layout = GridLayout::for_frames(total, width, height);
	debug!(
		"packing {total} frames into {}x{} grid ({}x{} px)",
		layout.columns,
		layout.rows,
		layout.pixel_width(),
		layout.pixel_height()
	);

	let mut canvas = blank_image(layout.pixel_width(), layout.pixel_height());
	for (index, frame) in states.iter().flat_map(|state| state.frames()).enumerate() {
		let (x, y) = layout.cell_origin(index);
		imageops::replace(&mut canvas, frame.image(), i64::from(x), i64::from(y));
	}
	canvas
}

/// Cuts a sprite grid back into per-state frame lists.
///
/// `frame_counts[i]` is the declared frame count of `states[i]`. A single
/// running cell index spans the whole document. Frames are appended to the
/// states as they are extracted, so on failure earlier states (and the
/// leading frames of the failing one) are already populated.
///
/// # Errors
///
/// Returns [`DmiError::Extraction`] wrapping a [`DmiError::SizeMismatch`] when
/// a cell falls outside the image, or a [`FormatError::MissingFrameCount`]
/// when a state never declared its frame count.
pub fn unpack(
	image: &RgbaImage,
	width: u32,
	height: u32,
	states: &mut [AnimationState],
	frame_counts: &[Option<usize>],
) -> Result<(), DmiError> {
	let layout = GridLayout::for_image(image.width(), image.height(), width, height);
	debug!("unpacking {}x{} image with {} columns", image.width(), image.height(), layout.columns);

	let mut index = 0usize;
	for (slot, state) in states.iter_mut().enumerate() {
		let Some(framecount) = frame_counts.get(slot).copied().flatten() else {
			let missing = FormatError::MissingFrameCount {
				state: state.name().to_string(),
			};
			return Err(DmiError::extraction(state.name(), missing.into()));
		};

		let Some(cells) = framecount.checked_mul(state.dirs().count()) else {
			let overflow = FormatError::invalid_value("frames", framecount.to_string());
			return Err(DmiError::extraction(state.name(), overflow.into()));
		};

		for _ in 0..cells {
			let (x, y) = layout.cell_origin(index);
			let cell = imageops::crop_imm(image, x, y, width, height).to_image();
			if cell.dimensions() != (width, height) {
				let mismatch = DmiError::SizeMismatch {
					state: state.name().to_string(),
					index,
					expected: (width, height),
					actual: cell.dimensions(),
				};
				return Err(DmiError::extraction(state.name(), mismatch));
			}
			state.add_frame(Frame::new(cell)).map_err(|err| DmiError::extraction(state.name(), err))?;
			index += 1;
		}
	}

	Ok(())
}

/// Checks that every stored frame has the document icon size.
///
/// # Errors
///
/// Returns [`DmiError::SizeMismatch`] for the first frame of another size;
/// `index` is its position in the state's stored frame list.
pub fn check_frame_sizes(width: u32, height: u32, states: &[AnimationState]) -> Result<(), DmiError> {
	for state in states {
		for (index, frame) in state.frames().iter().enumerate() {
			if frame.dimensions() != (width, height) {
				return Err(DmiError::SizeMismatch {
					state: state.name().to_string(),
					index,
					expected: (width, height),
					actual: frame.dimensions(),
				});
			}
		}
	}
	Ok(())
}

/// Lays out one state with a row per direction and a column per frame.
///
/// Rows are spaced by the frame *width*, matching the layout existing
/// consumers expect; for non-square frames rows overlap or leave gaps.
pub fn build_composite(state: &AnimationState) -> RgbaImage {
	let (Some(width), Some(height)) = (state.width(), state.height()) else {
		return blank_image(0, 0);
	};
	let framecount = state.framecount() as u32;
	let dirs = state.dirs();

	let mut canvas = blank_image(width * framecount, height * dirs.to_u32());
	for (row, &dir) in dirs.directions().iter().enumerate() {
		for column in 0..framecount {
			if let Some(frame) = state.get_frame(column as usize, dir) {
				let x = i64::from(column * width);
				let y = row as i64 * i64::from(width);
				imageops::replace(&mut canvas, frame.image(), x, y);
			}
		}
	}
	canvas
}
