//! Canonical snapshots of DMI documents.
//!
//! A snapshot captures width, height and every attribute of every state,
//! with frames as hex-encoded PNG. Two documents are the same exactly when
//! their snapshots are equal; snapshots also round-trip through JSON.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::{
	direction::DirCount,
	frame::Frame,
	hotspot::{self, Hotspot},
	state::AnimationState,
};
use crate::file::DmiError;

/// Snapshot of one state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StateSnapshot {
	/// State name
	pub name: String,
	/// Loop count
	#[serde(rename = "loop")]
	pub loop_count: u32,
	/// Rewind flag
	pub rewind: bool,
	/// Movement flag
	pub movement: bool,
	/// Direction count
	pub dirs: u32,
	/// Hex-encoded PNG of every stored frame
	pub frames_encoded: Vec<String>,
	/// Per-frame delays
	pub delays: Vec<f64>,
	/// Per-frame hotspots
	pub hotspots: Option<Vec<Option<Hotspot>>>,
}

impl StateSnapshot {
	/// Captures a state
	pub fn capture(state: &AnimationState) -> Self {
		let frames_encoded = state.frames_encoded().map(hex::encode).collect();
		// the grammar carries no delay for a single frame
		let delays = if state.framecount() > 1 {
			state.delays().to_vec()
		} else {
			Vec::new()
		};
		// canonical form: what the hotspot runs expand back to
		let hotspots = state.hotspots().and_then(|table| {
			let runs = hotspot::encode_runs(table);
			(!runs.is_empty()).then(|| hotspot::decode_runs(&runs, table.len()))
		});

		Self {
			name: state.name().to_string(),
			loop_count: state.loop_count(),
			rewind: state.rewind(),
			movement: state.movement(),
			dirs: state.dirs().to_u32(),
			frames_encoded,
			delays,
			hotspots,
		}
	}

	/// Rebuilds the state
	pub fn restore(&self) -> Result<AnimationState, DmiError> {
		let mut state = AnimationState::with_dirs(self.name.clone(), DirCount::from_u32(self.dirs)?);
		state.set_loop_count(self.loop_count);
		state.set_rewind(self.rewind);
		state.set_movement(self.movement);

		for encoded in &self.frames_encoded {
			let bytes = hex::decode(encoded)?;
			let frame = Frame::from_png(&bytes)?;
			state.push_encoded(frame, Arc::from(bytes));
		}

		state.set_delays(self.delays.clone())?;
		state.set_hotspots(self.hotspots.clone())?;
		Ok(state)
	}
}

/// Snapshot of a whole document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
	/// Icon width
	pub width: u32,
	/// Icon height
	pub height: u32,
	/// States in document order
	pub states: Vec<StateSnapshot>,
}
