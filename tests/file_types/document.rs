//! DMI document save/open tests

use anyhow::Result;
use dmi_rs::prelude::*;
use image::{Rgba, RgbaImage};
use log::info;

fn checker(width: u32, height: u32, seed: u8) -> Frame {
	Frame::new(RgbaImage::from_fn(width, height, |x, y| {
		let on = (x + y) % 2 == 0;
		Rgba([seed, if on { 255 } else { 0 }, 0, 255])
	}))
}

fn mob() -> Result<DmiFile> {
	let mut dmi = DmiFile::new(16, 16);

	let mut walk = AnimationState::with_dirs("walk", DirCount::Eight);
	for frame in 0..3u8 {
		for dir in Direction::ORDER {
			walk.add_frame(checker(16, 16, frame * 16 + dir.bits()))?;
		}
	}
	walk.set_delays(vec![1.0, 0.5, 2.0])?;
	walk.set_hotspots(Some(vec![Some(Hotspot::new(8, 8)), Some(Hotspot::new(8, 8)), Some(Hotspot::new(4, 4))]))?;
	dmi.add_state(walk);

	let mut dead = AnimationState::new("dead\nforever");
	dead.add_frame(checker(16, 16, 200))?;
	dead.set_loop_count(1);
	dmi.add_state(dead);

	Ok(dmi)
}

#[test_log::test]
fn test_save_and_open() -> Result<()> {
	let path = crate::scratch_path("mob.dmi");
	let dmi = mob()?;
	dmi.save(&path)?;

	let loaded = DmiFile::open(&path)?;
	std::fs::remove_file(&path)?;
	info!("loaded {loaded}");

	assert!(loaded.is_same(&dmi));

	let walk = loaded.state("walk").expect("walk state");
	assert_eq!(walk.dirs(), DirCount::Eight);
	assert_eq!(walk.framecount(), 3);
	assert_eq!(walk.get_frame(2, Direction::Northwest), Some(&checker(16, 16, 32 + 9)));
	assert_eq!(walk.hotspot(1), Some(Hotspot::new(8, 8)));
	assert_eq!(walk.hotspot(2), Some(Hotspot::new(4, 4)));

	let dead = loaded.state("dead\nforever").expect("dead state");
	assert_eq!(dead.loop_count(), 1);
	Ok(())
}

#[test_log::test]
fn test_sprite_grid_layout() -> Result<()> {
	let dmi = mob()?;

	// 25 frames: 5 columns, 5 rows
	let data = dmi.build_data();
	assert_eq!(data.dimensions(), (80, 80));

	let metadata = dmi.build_metadata();
	assert!(metadata.starts_with("# BEGIN DMI\nversion = 4.0\n"));
	assert!(metadata.contains("state = dead\\nforever\n"));
	assert!(metadata.ends_with("# END DMI\n"));
	Ok(())
}

#[test_log::test]
fn test_missing_direction_falls_back_to_south() -> Result<()> {
	let dmi = mob()?;
	let dead = dmi.state("dead\nforever").expect("dead state");
	assert_eq!(dead.get_frame(0, Direction::East), dead.get_frame(0, Direction::South));
	Ok(())
}

#[test_log::test]
fn test_resize_and_json() -> Result<()> {
	let mut dmi = mob()?;
	dmi.resize(32, 32)?;

	let json = dmi.to_json()?;
	let restored = DmiFile::from_json(&json)?;
	assert!(restored.is_same(&dmi));

	let reloaded = DmiFile::try_from(dmi.to_bytes()?)?;
	assert_eq!((reloaded.width(), reloaded.height()), (32, 32));
	assert!(reloaded.is_same(&dmi));
	Ok(())
}

#[test_log::test]
fn test_framecount_and_dirs_edits() -> Result<()> {
	let mut dmi = mob()?;
	let walk = dmi.state_mut("walk")?;

	walk.set_framecount(5)?;
	assert_eq!(walk.framecount(), 5);
	assert_eq!(walk.delays(), &[1.0, 0.5, 2.0, 1.0, 1.0]);
	assert_eq!(walk.hotspot(4), Some(Hotspot::new(4, 4)));

	walk.set_dirs(DirCount::Four)?;
	assert_eq!(walk.frames().len(), 20);

	let mut empty = AnimationState::new("empty");
	assert!(matches!(empty.set_framecount(2), Err(DmiError::EmptyState { .. })));
	Ok(())
}
