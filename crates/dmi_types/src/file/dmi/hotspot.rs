//! Run-length coding of per-frame hotspots.
//!
//! The metadata grammar stores hotspots as `hotspot = x,y,first` lines. A line
//! sets the hotspot of frame `first` (1-based) and of every frame after it,
//! until a later line takes over. Writing emits a new line only where the
//! value changes.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::file::FormatError;

/// Anchor pixel of a frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Hotspot {
	/// X coordinate
	pub x: i32,
	/// Y coordinate
	pub y: i32,
}

impl Hotspot {
	/// Creates a hotspot
	pub const fn new(x: i32, y: i32) -> Self {
		Self {
			x,
			y,
		}
	}
}

impl From<(i32, i32)> for Hotspot {
	fn from((x, y): (i32, i32)) -> Self {
		Self::new(x, y)
	}
}

/// One `hotspot` line: a value taking over from `first_frame` onwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HotspotRun {
	/// Hotspot value
	pub hotspot: Hotspot,
	/// First frame (1-based) the value applies to
	pub first_frame: usize,
}

impl HotspotRun {
	/// Parses the value part of a `hotspot = x,y,first` line.
	pub fn parse(value: &str) -> Result<Self, FormatError> {
		let invalid = || FormatError::invalid_value("hotspot", value);

		let mut parts = value.split(',').map(str::trim);
		let (Some(x), Some(y), Some(first), None) =
			(parts.next(), parts.next(), parts.next(), parts.next())
		else {
			return Err(invalid());
		};

		let x = x.parse::<i32>().map_err(|_| invalid())?;
		let y = y.parse::<i32>().map_err(|_| invalid())?;
		let first_frame = first.parse::<usize>().map_err(|_| invalid())?;
		if first_frame == 0 {
			return Err(invalid());
		}

		Ok(Self {
			hotspot: Hotspot::new(x, y),
			first_frame,
		})
	}

	/// Writes the run into a per-frame table, overwriting the tail from
	/// `first_frame` to the end.
	pub fn apply(&self, hotspots: &mut [Option<Hotspot>]) {
		let start = self.first_frame - 1;
		if let Some(tail) = hotspots.get_mut(start..) {
			tail.fill(Some(self.hotspot));
		}
	}
}

impl fmt::Display for HotspotRun {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{},{},{}", self.hotspot.x, self.hotspot.y, self.first_frame)
	}
}

/// Compresses a per-frame hotspot table into runs.
///
/// Frames without a hotspot are skipped and do not reset the comparison
/// against the last emitted value.
pub fn encode_runs(hotspots: &[Option<Hotspot>]) -> Vec<HotspotRun> {
	let mut runs = Vec::new();
	let mut previous: Option<Hotspot> = None;

	for (index, value) in hotspots.iter().enumerate() {
		let Some(hotspot) = *value else {
			continue;
		};
		if previous != Some(hotspot) {
			runs.push(HotspotRun {
				hotspot,
				first_frame: index + 1,
			});
			previous = Some(hotspot);
		}
	}

	runs
}

/// Expands runs back into a table of `frame_count` entries.
pub fn decode_runs(runs: &[HotspotRun], frame_count: usize) -> Vec<Option<Hotspot>> {
	let mut hotspots = vec![None; frame_count];
	for run in runs {
		run.apply(&mut hotspots);
	}
	hotspots
}
