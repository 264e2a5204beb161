//! Benchmark helper utilities for dmi-rs
//!
//! This module provides utilities for generating synthetic DMI documents and
//! common benchmark sizes for the dmi-rs project.

use dmi_types::file::{
	DmiError,
	dmi::{AnimationState, DirCount, File, Frame},
};
use image::{Rgba, RgbaImage};

/// Generates a synthetic document.
///
/// Every state has `dirs` directions and `frames` animation frames of
/// `size × size` pixels. Pixels vary per frame so PNG encoding does real work.
pub fn generate_document(
	states: usize,
	dirs: DirCount,
	frames: usize,
	size: u32,
) -> Result<File, DmiError> {
	let mut dmi = File::new(size, size);

	for index in 0..states {
		let mut state = AnimationState::with_dirs(format!("state_{index}"), dirs);
		for cell in 0..frames * dirs.count() {
			let seed = (index * 31 + cell * 7) as u32;
			let image = RgbaImage::from_fn(size, size, |x, y| {
				let value = (x * 3 + y * 5 + seed) % 256;
				Rgba([value as u8, (value / 2) as u8, (255 - value) as u8, 255])
			});
			state.add_frame(Frame::new(image))?;
		}
		if frames > 1 {
			state.set_delays((0..frames).map(|frame| 1.0 + (frame % 3) as f64).collect())?;
		}
		dmi.add_state(state);
	}

	Ok(dmi)
}

/// Common benchmark shapes: `(states, dirs, frames, icon size)`
pub mod sizes {
	use dmi_types::file::dmi::DirCount;

	/// A handful of static icons
	pub const TINY: (usize, DirCount, usize, u32) = (4, DirCount::One, 1, 32);
	/// Typical object sheet
	pub const SMALL: (usize, DirCount, usize, u32) = (16, DirCount::Four, 2, 32);
	/// Typical mob sheet with walking animations
	pub const MEDIUM: (usize, DirCount, usize, u32) = (32, DirCount::Four, 4, 32);
	/// Large high-resolution sheet
	pub const LARGE: (usize, DirCount, usize, u32) = (24, DirCount::Eight, 4, 64);
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_generate_document() {
		let dmi = generate_document(3, DirCount::Four, 2, 8).unwrap();

		assert_eq!(dmi.state_count(), 3);
		assert_eq!(dmi.states()[0].frames().len(), 8);
		assert_eq!(dmi.states()[0].delays(), &[1.0, 2.0]);
	}

	#[test]
	fn test_sizes_constants() {
		assert_eq!(sizes::TINY.0, 4);
		assert_eq!(sizes::MEDIUM.1, DirCount::Four);
		assert_eq!(sizes::LARGE.3, 64);
	}
}
