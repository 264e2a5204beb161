//! Animation states.
//!
//! An [`AnimationState`] is one named animation of a DMI document. Its frames
//! are stored frame-major: all directions of frame 0 in canonical direction
//! order, then all directions of frame 1, and so on.

use std::{collections::HashMap, fmt, sync::Arc};

use image::RgbaImage;

use super::{
	constants, container,
	direction::{DirCount, Direction},
	frame::Frame,
	hotspot::Hotspot,
	packer,
};
use crate::file::DmiError;

/// Encoded previews keyed by direction.
///
/// Entries are only dropped by [`PreviewCache::invalidate_all`]; nothing is
/// recomputed behind the caller's back.
#[derive(Debug, Clone, Default)]
pub struct PreviewCache {
	entries: HashMap<Direction, Arc<[u8]>>,
}

impl PreviewCache {
	/// Returns the cached preview for a direction
	pub fn get(&self, dir: Direction) -> Option<Arc<[u8]>> {
		self.entries.get(&dir).cloned()
	}

	/// Stores a preview
	pub fn insert(&mut self, dir: Direction, data: Arc<[u8]>) {
		self.entries.insert(dir, data);
	}

	/// Drops every cached preview
	pub fn invalidate_all(&mut self) {
		self.entries.clear();
	}

	/// Number of cached previews
	pub fn len(&self) -> usize {
		self.entries.len()
	}

	/// Returns `true` when nothing is cached
	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}
}

/// A named animation unit of a DMI document.
///
/// # Examples
///
/// ```
/// use dmi_types::file::dmi::{AnimationState, DirCount, Direction, Frame};
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let mut state = AnimationState::with_dirs("walk", DirCount::Four);
/// for _ in 0..8 {
///     state.add_frame(Frame::blank(32, 32))?;
/// }
///
/// assert_eq!(state.framecount(), 2);
/// assert_eq!(state.frame_index(1, Direction::East), 6);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct AnimationState {
	name: String,

	/// Number of times the animation plays, 0 = forever
	loop_count: u32,

	rewind: bool,
	movement: bool,
	dirs: DirCount,

	/// Frame-major pixel buffers, `framecount * dirs` long
	frames: Vec<Frame>,

	/// PNG encoding of each entry of `frames`
	frames_encoded: Vec<Arc<[u8]>>,

	/// Per-frame durations in ticks; empty means every frame lasts 1 tick
	delays: Vec<f64>,

	/// Per-frame hotspots, `framecount` long when present
	hotspots: Option<Vec<Option<Hotspot>>>,

	previews: PreviewCache,
}

impl AnimationState {
	/// Creates an empty single-direction state.
	pub fn new(name: impl Into<String>) -> Self {
		Self::with_dirs(name, DirCount::One)
	}

	/// Creates an empty state with the given direction count.
	pub fn with_dirs(name: impl Into<String>, dirs: DirCount) -> Self {
		Self {
			name: name.into(),
			loop_count: 0,
			rewind: false,
			movement: false,
			dirs,
			frames: Vec::new(),
			frames_encoded: Vec::new(),
			delays: Vec::new(),
			hotspots: None,
			previews: PreviewCache::default(),
		}
	}

	/// Returns the state name.
	pub fn name(&self) -> &str {
		&self.name
	}

	/// Whether the name fits in ISO 8859-1.
	pub fn has_latin1_name(&self) -> bool {
		self.name.chars().all(|c| u32::from(c) <= 0xFF)
	}

	/// Renames the state.
	///
	/// Names are stored in a Latin-1 `zTXt` chunk; characters above U+00FF
	/// make [`crate::file::dmi::File::to_bytes`] fail.
	pub fn set_name(&mut self, name: impl Into<String>) {
		self.name = name.into();
	}

	/// Returns the loop count (0 = infinite).
	pub fn loop_count(&self) -> u32 {
		self.loop_count
	}

	/// Sets the loop count (0 = infinite).
	pub fn set_loop_count(&mut self, loop_count: u32) {
		self.loop_count = loop_count;
	}

	/// Returns whether the animation plays back and forth.
	pub fn rewind(&self) -> bool {
		self.rewind
	}

	/// Sets the rewind flag.
	pub fn set_rewind(&mut self, rewind: bool) {
		self.rewind = rewind;
	}

	/// Returns whether this is a movement state.
	pub fn movement(&self) -> bool {
		self.movement
	}

	/// Sets the movement flag.
	pub fn set_movement(&mut self, movement: bool) {
		self.movement = movement;
	}

	/// Returns the direction count.
	pub fn dirs(&self) -> DirCount {
		self.dirs
	}

	/// Overwrites the direction count without touching frames.
	///
	/// Used while the frame list is still empty, e.g. by the metadata reader.
	pub(crate) fn declare_dirs(&mut self, dirs: DirCount) {
		self.dirs = dirs;
	}

	/// Number of animation frames (stored frames divided by directions).
	pub fn framecount(&self) -> usize {
		self.frames.len() / self.dirs.count()
	}

	/// Returns every stored frame in frame-major order.
	pub fn frames(&self) -> &[Frame] {
		&self.frames
	}

	/// Width of the first frame.
	pub fn width(&self) -> Option<u32> {
		self.frames.first().map(Frame::width)
	}

	/// Height of the first frame.
	pub fn height(&self) -> Option<u32> {
		self.frames.first().map(Frame::height)
	}

	/// Index into the stored frames for a frame and direction.
	///
	/// Directions the state does not carry fall back to South.
	pub fn frame_index(&self, frame: usize, dir: Direction) -> usize {
		let mut ordinal = dir.ordinal();
		if ordinal >= self.dirs.count() {
			ordinal = 0;
		}
		frame * self.dirs.count() + ordinal
	}

	/// Returns the frame for an animation frame and direction.
	pub fn get_frame(&self, frame: usize, dir: Direction) -> Option<&Frame> {
		self.frames.get(self.frame_index(frame, dir))
	}

	/// Returns the PNG encoding of the frame for an animation frame and direction.
	pub fn get_frame_encoded(&self, frame: usize, dir: Direction) -> Option<&[u8]> {
		self.frames_encoded.get(self.frame_index(frame, dir)).map(|data| &data[..])
	}

	/// PNG encodings of every stored frame, in storage order.
	pub fn frames_encoded(&self) -> impl Iterator<Item = &[u8]> {
		self.frames_encoded.iter().map(|data| &data[..])
	}

	/// Appends a frame at the end of the stored frame list.
	///
	/// Callers push all directions of a frame before the next frame.
	pub fn add_frame(&mut self, frame: Frame) -> Result<(), DmiError> {
		let encoded = frame.to_png()?;
		self.push_encoded(frame, encoded.into());
		Ok(())
	}

	pub(crate) fn push_encoded(&mut self, frame: Frame, encoded: Arc<[u8]>) {
		self.frames.push(frame);
		self.frames_encoded.push(encoded);
	}

	/// Replaces the frame for an animation frame and direction.
	pub fn set_frame(&mut self, frame: usize, dir: Direction, value: Frame) -> Result<(), DmiError> {
		let index = self.frame_index(frame, dir);
		if index >= self.frames.len() {
			return Err(DmiError::FrameOutOfRange {
				state: self.name.clone(),
				index,
				total: self.frames.len(),
			});
		}
		self.frames_encoded[index] = value.to_png()?.into();
		self.frames[index] = value;
		self.mark_dirty();
		Ok(())
	}

	/// Returns the per-frame delays in ticks.
	pub fn delays(&self) -> &[f64] {
		&self.delays
	}

	/// Sets the per-frame delays; pass an empty vector for uniform timing.
	///
	/// # Errors
	///
	/// A non-empty table must hold exactly [`AnimationState::framecount`]
	/// finite, positive entries.
	pub fn set_delays(&mut self, delays: Vec<f64>) -> Result<(), DmiError> {
		if !delays.is_empty() {
			self.check_table_length("delay", delays.len())?;
		}
		if let Some(&value) = delays.iter().find(|delay| !is_valid_delay(**delay)) {
			return Err(DmiError::InvalidDelay {
				state: self.name.clone(),
				value,
			});
		}
		self.delays = delays;
		Ok(())
	}

	pub(crate) fn declare_delays(&mut self, delays: Vec<f64>) {
		self.delays = delays;
	}

	/// Duration of an animation frame in ticks.
	pub fn duration_of(&self, frame: usize) -> f64 {
		self.delays.get(frame).copied().unwrap_or(1.0)
	}

	/// Returns the per-frame hotspot table, if any.
	pub fn hotspots(&self) -> Option<&[Option<Hotspot>]> {
		self.hotspots.as_deref()
	}

	/// Replaces the per-frame hotspot table.
	///
	/// # Errors
	///
	/// A table must hold exactly [`AnimationState::framecount`] entries.
	pub fn set_hotspots(&mut self, hotspots: Option<Vec<Option<Hotspot>>>) -> Result<(), DmiError> {
		if let Some(table) = &hotspots {
			self.check_table_length("hotspot", table.len())?;
		}
		self.hotspots = hotspots;
		Ok(())
	}

	fn check_table_length(&self, table: &'static str, actual: usize) -> Result<(), DmiError> {
		let expected = self.framecount();
		if actual != expected {
			return Err(DmiError::TableLength {
				state: self.name.clone(),
				table,
				expected,
				actual,
			});
		}
		Ok(())
	}

	/// Trims or pads delays and hotspots to the stored frame count.
	pub(crate) fn fit_tables(&mut self) {
		let framecount = self.framecount();
		if !self.delays.is_empty() {
			self.delays.resize(framecount, 1.0);
		}
		if let Some(hotspots) = self.hotspots.as_mut() {
			let last = hotspots.last().copied().flatten();
			hotspots.resize(framecount, last);
		}
	}

	pub(crate) fn hotspots_mut(&mut self) -> &mut Option<Vec<Option<Hotspot>>> {
		&mut self.hotspots
	}

	/// Returns the hotspot of an animation frame.
	pub fn hotspot(&self, frame: usize) -> Option<Hotspot> {
		self.hotspots.as_ref().and_then(|table| table.get(frame).copied().flatten())
	}

	/// Changes the direction count.
	///
	/// The stored frame list is grown with blank frames or truncated from the
	/// end to `framecount * new_dirs` entries; delays and hotspots follow the
	/// resulting frame count.
	pub fn set_dirs(&mut self, dirs: DirCount) -> Result<(), DmiError> {
		let target = self.framecount() * dirs.count();
		self.dirs = dirs;
		self.resize_frames(target)
	}

	/// Changes the number of animation frames.
	///
	/// New frames are blank, new delays are 1 and new hotspots repeat the
	/// last existing one.
	pub fn set_framecount(&mut self, framecount: usize) -> Result<(), DmiError> {
		let target = framecount * self.dirs.count();
		if target > 0 && self.frames.is_empty() {
			return Err(DmiError::EmptyState {
				name: self.name.clone(),
			});
		}
		self.resize_frames(target)
	}

	fn resize_frames(&mut self, target: usize) -> Result<(), DmiError> {
		if target < self.frames.len() {
			self.frames.truncate(target);
			self.frames_encoded.truncate(target);
		} else if target > self.frames.len() {
			let (width, height) = self.frames.first().map(Frame::dimensions).unwrap_or((0, 0));
			let blank = Frame::blank(width, height);
			let encoded: Arc<[u8]> = blank.to_png()?.into();
			while self.frames.len() < target {
				self.push_encoded(blank.clone(), encoded.clone());
			}
		}

		self.fit_tables();
		self.mark_dirty();
		Ok(())
	}

	/// Scales every frame and refreshes the encoded copies.
	pub fn resize_frames_to(&mut self, width: u32, height: u32) -> Result<(), DmiError> {
		let frames: Vec<Frame> = self.frames.iter().map(|frame| frame.resized(width, height)).collect();
		let encoded = frames
			.iter()
			.map(|frame| frame.to_png().map(Arc::<[u8]>::from))
			.collect::<Result<Vec<_>, _>>()?;
		self.frames = frames;
		self.frames_encoded = encoded;
		self.mark_dirty();
		Ok(())
	}

	/// Drops all cached previews.
	pub fn mark_dirty(&mut self) {
		self.previews.invalidate_all();
	}

	/// Returns the preview cache.
	pub fn previews(&self) -> &PreviewCache {
		&self.previews
	}

	/// Returns the preview of a direction as PNG bytes.
	///
	/// Single-frame states preview as the encoded frame itself; animated
	/// states as an endlessly looping APNG with one tick = 100 ms. The result
	/// is cached until [`AnimationState::mark_dirty`].
	pub fn generate_preview(&mut self, dir: Direction) -> Result<Arc<[u8]>, DmiError> {
		if let Some(preview) = self.previews.get(dir) {
			return Ok(preview);
		}

		let preview = self.render_preview(dir)?;
		self.previews.insert(dir, preview.clone());
		Ok(preview)
	}

	fn render_preview(&self, dir: Direction) -> Result<Arc<[u8]>, DmiError> {
		let framecount = self.framecount();
		if framecount == 0 {
			return Err(DmiError::EmptyState {
				name: self.name.clone(),
			});
		}
		if framecount == 1 {
			let index = self.frame_index(0, dir);
			return Ok(self.frames_encoded[index].clone());
		}

		let images: Vec<&RgbaImage> =
			(0..framecount).map(|frame| self.frames[self.frame_index(frame, dir)].image()).collect();
		let delays: Vec<u16> = (0..framecount)
			.map(|frame| {
				let ms = self.duration_of(frame) * f64::from(constants::TICK_MS);
				ms.round().clamp(0.0, f64::from(u16::MAX)) as u16
			})
			.collect();

		Ok(container::encode_animation(&images, &delays)?.into())
	}

	/// Lays the frames out with one row per direction and one column per frame.
	pub fn build_composite(&self) -> RgbaImage {
		packer::build_composite(self)
	}

	/// PNG encoding of [`AnimationState::build_composite`].
	pub fn composite_png(&self) -> Result<Vec<u8>, DmiError> {
		container::encode(&self.build_composite(), &[])
	}
}

/// Delays are finite and strictly positive.
pub(crate) fn is_valid_delay(delay: f64) -> bool {
	delay.is_finite() && delay > 0.0
}

impl fmt::Display for AnimationState {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{:?}: {} dirs, {} frames", self.name, self.dirs, self.framecount())?;
		if self.loop_count != 0 {
			write!(f, ", loop {}", self.loop_count)?;
		}
		if self.rewind {
			write!(f, ", rewind")?;
		}
		if self.movement {
			write!(f, ", movement")?;
		}
		Ok(())
	}
}
