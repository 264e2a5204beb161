//! Preview and composite rendering tests

use anyhow::Result;
use dmi_rs::prelude::*;
use image::{ImageFormat, Rgba, RgbaImage};

fn solid(value: u8) -> Frame {
	Frame::new(RgbaImage::from_pixel(4, 4, Rgba([value, 0, 0, 255])))
}

#[test_log::test]
fn test_static_preview_is_frame_png() -> Result<()> {
	let mut state = AnimationState::new("still");
	state.add_frame(solid(7))?;

	let preview = state.generate_preview(Direction::South)?;
	assert_eq!(Some(&preview[..]), state.get_frame_encoded(0, Direction::South));
	Ok(())
}

#[test_log::test]
fn test_animated_preview_is_cached() -> Result<()> {
	let mut state = AnimationState::with_dirs("spin", DirCount::Four);
	for value in 0..8 {
		state.add_frame(solid(value))?;
	}
	state.set_delays(vec![1.0, 3.0])?;

	let first = state.generate_preview(Direction::East)?;
	let again = state.generate_preview(Direction::East)?;
	assert!(std::sync::Arc::ptr_eq(&first, &again));
	assert_eq!(state.previews().len(), 1);

	// first frame of the animation is the East frame of frame 0
	let decoded = image::load_from_memory_with_format(&first, ImageFormat::Png)?.to_rgba8();
	assert_eq!(decoded.get_pixel(0, 0).0, [2, 0, 0, 255]);

	state.set_frame(1, Direction::East, solid(99))?;
	assert!(state.previews().is_empty());
	Ok(())
}

#[test_log::test]
fn test_composite_png() -> Result<()> {
	let mut state = AnimationState::with_dirs("walk", DirCount::Four);
	for value in 0..12 {
		state.add_frame(solid(value))?;
	}

	let png = state.composite_png()?;
	let composite = image::load_from_memory_with_format(&png, ImageFormat::Png)?.to_rgba8();
	assert_eq!(composite.dimensions(), (12, 16));
	// West row, third frame
	assert_eq!(composite.get_pixel(8, 12).0, [11, 0, 0, 255]);
	Ok(())
}
