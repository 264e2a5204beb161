//! Reader and writer for the DMI metadata grammar.
//!
//! The metadata block lives in the `Description` zTXt chunk:
//!
//! ```text
//! # BEGIN DMI
//! version = 4.0
//! 	width = 32
//! 	height = 32
//! state = idle
//! 	dirs = 4
//! 	frames = 2
//! 	delay = 1,2
//! 	hotspot = 16,16,1
//! # END DMI
//! ```
//!
//! Lines are `key = value` pairs; indentation is cosmetic. `width` and
//! `height` are global and may only appear before the first `state`. Every
//! other key describes the most recent `state`.

use std::fmt::Write as _;

use log::trace;

use super::{
	constants,
	direction::DirCount,
	hotspot::{self, HotspotRun},
	state::{self, AnimationState},
};
use crate::file::FormatError;

/// Keys recognized by the grammar
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetadataKey {
	/// Global icon width
	Width,
	/// Global icon height
	Height,
	/// Starts a new state
	State,
	/// Direction count of the current state
	Dirs,
	/// Frame count of the current state
	Frames,
	/// Per-frame delays
	Delay,
	/// Loop count
	Loop,
	/// Rewind flag
	Rewind,
	/// Movement flag
	Movement,
	/// Hotspot run
	Hotspot,
}

impl MetadataKey {
	/// Looks a key up by its grammar spelling
	pub fn from_key(key: &str) -> Result<Self, FormatError> {
		match key {
			"width" => Ok(Self::Width),
			"height" => Ok(Self::Height),
			"state" => Ok(Self::State),
			"dirs" => Ok(Self::Dirs),
			"frames" => Ok(Self::Frames),
			"delay" => Ok(Self::Delay),
			"loop" => Ok(Self::Loop),
			"rewind" => Ok(Self::Rewind),
			"movement" => Ok(Self::Movement),
			"hotspot" => Ok(Self::Hotspot),
			_ => Err(FormatError::UnknownKey {
				key: key.to_string(),
			}),
		}
	}

	/// Grammar spelling of the key
	pub fn as_str(self) -> &'static str {
		match self {
			Self::Width => "width",
			Self::Height => "height",
			Self::State => "state",
			Self::Dirs => "dirs",
			Self::Frames => "frames",
			Self::Delay => "delay",
			Self::Loop => "loop",
			Self::Rewind => "rewind",
			Self::Movement => "movement",
			Self::Hotspot => "hotspot",
		}
	}

	/// Whether the key describes the current state rather than the document
	pub fn is_state_attribute(self) -> bool {
		!matches!(self, Self::Width | Self::Height | Self::State)
	}
}

/// Everything the metadata block describes.
///
/// States come back without frames or hotspots; `frame_counts[i]` is the
/// frame count declared for `states[i]`, used to cut frames out of the sprite
/// grid, and `hotspot_runs[i]` its hotspot runs, expanded by
/// [`attach_hotspots`] once the frames exist.
#[derive(Debug, Clone)]
pub struct Metadata {
	/// Global icon width
	pub width: u32,
	/// Global icon height
	pub height: u32,
	/// States in declaration order
	pub states: Vec<AnimationState>,
	/// Declared frame count per state
	pub frame_counts: Vec<Option<usize>>,
	/// Hotspot runs per state, in declaration order
	pub hotspot_runs: Vec<Vec<HotspotRun>>,
}

/// Expands parsed hotspot runs onto states whose frames have been extracted.
///
/// Tables are sized by the frames actually present, so a partially
/// extracted state gets a table as long as its frame list.
pub fn attach_hotspots(states: &mut [AnimationState], hotspot_runs: &[Vec<HotspotRun>]) {
	for (state, runs) in states.iter_mut().zip(hotspot_runs) {
		if !runs.is_empty() {
			let table = hotspot::decode_runs(runs, state.framecount());
			*state.hotspots_mut() = Some(table);
		}
	}
}

/// Escapes a state name: `\` becomes `\\`, newline becomes `\n`.
pub fn escape_state_name(name: &str) -> String {
	name.replace('\\', "\\\\").replace('\n', "\\n")
}

/// Reverses [`escape_state_name`].
///
/// A doubled backslash is consumed before a `\n` token is considered, so
/// `\\n` reads back as a backslash followed by `n`.
pub fn unescape_state_name(name: &str) -> String {
	let mut result = String::with_capacity(name.len());
	let mut chars = name.chars();
	while let Some(c) = chars.next() {
		if c != '\\' {
			result.push(c);
			continue;
		}
		match chars.next() {
			Some('\\') => result.push('\\'),
			Some('n') => result.push('\n'),
			Some(other) => {
				result.push('\\');
				result.push(other);
			}
			None => result.push('\\'),
		}
	}
	result
}

/// Writes the metadata block for a document.
pub fn serialize(width: u32, height: u32, states: &[AnimationState]) -> String {
	let mut out = String::new();
	// writing into a String cannot fail
	let _ = write_metadata(&mut out, width, height, states);
	out
}

fn write_metadata(
	out: &mut String,
	width: u32,
	height: u32,
	states: &[AnimationState],
) -> std::fmt::Result {
	writeln!(out, "{}", constants::HEADER)?;
	writeln!(out, "{}", constants::VERSION_LINE)?;
	writeln!(out, "\twidth = {width}")?;
	writeln!(out, "\theight = {height}")?;

	for state in states {
		writeln!(out, "state = {}", escape_state_name(state.name()))?;
		writeln!(out, "\tdirs = {}", state.dirs())?;
		writeln!(out, "\tframes = {}", state.framecount())?;
		if state.framecount() > 1 && !state.delays().is_empty() {
			let delays: Vec<String> = state.delays().iter().map(f64::to_string).collect();
			writeln!(out, "\tdelay = {}", delays.join(","))?;
		}
		if state.loop_count() != 0 {
			writeln!(out, "\tloop = {}", state.loop_count())?;
		}
		if state.rewind() {
			writeln!(out, "\trewind = 1")?;
		}
		if state.movement() {
			writeln!(out, "\tmovement = 1")?;
		}
		if let Some(hotspots) = state.hotspots() {
			for run in hotspot::encode_runs(hotspots) {
				writeln!(out, "\thotspot = {run}")?;
			}
		}
	}

	writeln!(out, "{}", constants::FOOTER)
}

/// Reads a metadata block.
///
/// `default_size` is the icon size used when `width`/`height` are absent.
///
/// # Errors
///
/// Returns a [`FormatError`] at the first line that breaks the grammar.
pub fn deserialize(text: &str, default_size: (u32, u32)) -> Result<Metadata, FormatError> {
	let mut lines = text.lines();

	let header = lines.next().unwrap_or_default();
	if header.trim_end() != constants::HEADER {
		return Err(FormatError::MissingHeader {
			found: header.to_string(),
		});
	}
	let version = lines.next().unwrap_or_default();
	if version.trim_end() != constants::VERSION_LINE {
		return Err(FormatError::UnsupportedVersion {
			found: version.to_string(),
		});
	}

	let mut reader = MetadataReader::new(default_size);
	for line in lines {
		let line = line.trim();
		if line == constants::FOOTER {
			break;
		}
		if line.is_empty() {
			continue;
		}
		let Some((key, value)) = line.split_once('=') else {
			return Err(FormatError::MalformedLine {
				line: line.to_string(),
			});
		};
		let key = MetadataKey::from_key(key.trim())?;
		trace!("metadata {} = {}", key.as_str(), value.trim());
		reader.apply(key, value.trim())?;
	}

	Ok(reader.finish())
}

/// Line-by-line state of [`deserialize`]
struct MetadataReader {
	metadata: Metadata,
}

impl MetadataReader {
	fn new((width, height): (u32, u32)) -> Self {
		Self {
			metadata: Metadata {
				width,
				height,
				states: Vec::new(),
				frame_counts: Vec::new(),
				hotspot_runs: Vec::new(),
			},
		}
	}

	fn finish(self) -> Metadata {
		self.metadata
	}

	fn apply(&mut self, key: MetadataKey, value: &str) -> Result<(), FormatError> {
		if key.is_state_attribute() && self.metadata.states.is_empty() {
			return Err(FormatError::NoActiveState {
				key: key.as_str().to_string(),
			});
		}

		match key {
			MetadataKey::Width => self.metadata.width = self.global(key, value)?,
			MetadataKey::Height => self.metadata.height = self.global(key, value)?,
			MetadataKey::State => self.begin_state(value),
			MetadataKey::Dirs => self.dirs(value)?,
			MetadataKey::Frames => self.frames(value)?,
			MetadataKey::Delay => self.delay(value)?,
			MetadataKey::Loop => {
				let loop_count = parse_number(key, value)?;
				self.current().set_loop_count(loop_count);
			}
			MetadataKey::Rewind => {
				let flag = parse_flag(key, value)?;
				self.current().set_rewind(flag);
			}
			MetadataKey::Movement => {
				let flag = parse_flag(key, value)?;
				self.current().set_movement(flag);
			}
			MetadataKey::Hotspot => self.hotspot(value)?,
		}

		Ok(())
	}

	fn current(&mut self) -> &mut AnimationState {
		// apply() rejects state attributes while no state exists
		let index = self.metadata.states.len() - 1;
		&mut self.metadata.states[index]
	}

	fn global(&self, key: MetadataKey, value: &str) -> Result<u32, FormatError> {
		if !self.metadata.states.is_empty() {
			return Err(FormatError::GlobalAfterState {
				key: key.as_str().to_string(),
			});
		}
		parse_number(key, value)
	}

	fn begin_state(&mut self, value: &str) {
		self.metadata.states.push(AnimationState::new(unescape_state_name(value)));
		self.metadata.frame_counts.push(None);
		self.metadata.hotspot_runs.push(Vec::new());
	}

	fn declared_framecount(&mut self, key: MetadataKey) -> Result<usize, FormatError> {
		match self.metadata.frame_counts.last().copied().flatten() {
			Some(framecount) => Ok(framecount),
			None => Err(FormatError::OutOfOrder {
				key: key.as_str().to_string(),
				state: self.current().name().to_string(),
			}),
		}
	}

	fn dirs(&mut self, value: &str) -> Result<(), FormatError> {
		let count: u32 = parse_number(MetadataKey::Dirs, value)?;
		let dirs = DirCount::from_u32(count)
			.map_err(|_| FormatError::invalid_value(MetadataKey::Dirs.as_str(), value))?;
		self.current().declare_dirs(dirs);
		Ok(())
	}

	fn frames(&mut self, value: &str) -> Result<(), FormatError> {
		let count = parse_number(MetadataKey::Frames, value)?;
		let delays = self.current().delays().len();
		if delays != 0 && delays != count {
			return Err(FormatError::invalid_value(MetadataKey::Frames.as_str(), value));
		}
		if let Some(slot) = self.metadata.frame_counts.last_mut() {
			*slot = Some(count);
		}
		Ok(())
	}

	fn delay(&mut self, value: &str) -> Result<(), FormatError> {
		let delays = value
			.split(',')
			.map(|part| {
				part.trim()
					.parse::<f64>()
					.ok()
					.filter(|delay| state::is_valid_delay(*delay))
					.ok_or_else(|| FormatError::invalid_value(MetadataKey::Delay.as_str(), value))
			})
			.collect::<Result<Vec<_>, _>>()?;
		if delays.len() != self.declared_framecount(MetadataKey::Delay)? {
			return Err(FormatError::invalid_value(MetadataKey::Delay.as_str(), value));
		}
		self.current().declare_delays(delays);
		Ok(())
	}

	fn hotspot(&mut self, value: &str) -> Result<(), FormatError> {
		let run = HotspotRun::parse(value)?;
		if run.first_frame > self.declared_framecount(MetadataKey::Hotspot)? {
			return Err(FormatError::invalid_value(MetadataKey::Hotspot.as_str(), value));
		}
		if let Some(runs) = self.metadata.hotspot_runs.last_mut() {
			runs.push(run);
		}
		Ok(())
	}
}

fn parse_number<T: std::str::FromStr>(key: MetadataKey, value: &str) -> Result<T, FormatError> {
	value.parse::<T>().map_err(|_| FormatError::invalid_value(key.as_str(), value))
}

fn parse_flag(key: MetadataKey, value: &str) -> Result<bool, FormatError> {
	Ok(parse_number::<u32>(key, value)? == 1)
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::file::dmi::{Frame, Hotspot};

	const DEFAULT: (u32, u32) = (32, 32);

	fn metadata(body: &str) -> String {
		format!("# BEGIN DMI\nversion = 4.0\n{body}# END DMI\n")
	}

	#[test]
	fn test_serialize_exact_grammar() {
		let mut idle = AnimationState::with_dirs("idle", DirCount::Four);
		for _ in 0..8 {
			idle.add_frame(Frame::blank(1, 1)).unwrap();
		}
		idle.set_delays(vec![1.0, 2.5]).unwrap();
		idle.set_loop_count(3);
		idle.set_rewind(true);
		idle.set_movement(true);
		idle.set_hotspots(Some(vec![Some(Hotspot::new(1, 1)), Some(Hotspot::new(2, 2))])).unwrap();

		let mut still = AnimationState::new("still");
		still.add_frame(Frame::blank(1, 1)).unwrap();
		still.set_delays(vec![4.0]).unwrap();

		let text = serialize(16, 24, &[idle, still]);
		assert_eq!(
			text,
			"# BEGIN DMI\n\
			 version = 4.0\n\
			 \twidth = 16\n\
			 \theight = 24\n\
			 state = idle\n\
			 \tdirs = 4\n\
			 \tframes = 2\n\
			 \tdelay = 1,2.5\n\
			 \tloop = 3\n\
			 \trewind = 1\n\
			 \tmovement = 1\n\
			 \thotspot = 1,1,1\n\
			 \thotspot = 2,2,2\n\
			 state = still\n\
			 \tdirs = 1\n\
			 \tframes = 1\n\
			 # END DMI\n"
		);
	}

	#[test]
	fn test_deserialize_states_and_frame_counts() {
		let text = metadata(
			"\twidth = 16\n\theight = 8\nstate = walk\n\tdirs = 4\n\tframes = 3\n\tdelay = 1,2,1.5\n\tloop = 2\n\trewind = 1\nstate = idle\n\tdirs = 1\n\tframes = 1\n\tmovement = 1\n",
		);
		let meta = deserialize(&text, DEFAULT).unwrap();

		assert_eq!((meta.width, meta.height), (16, 8));
		assert_eq!(meta.states.len(), 2);
		assert_eq!(meta.frame_counts, vec![Some(3), Some(1)]);

		let walk = &meta.states[0];
		assert_eq!(walk.name(), "walk");
		assert_eq!(walk.dirs(), DirCount::Four);
		assert_eq!(walk.delays(), &[1.0, 2.0, 1.5]);
		assert_eq!(walk.loop_count(), 2);
		assert!(walk.rewind());
		assert!(!walk.movement());
		assert!(meta.states[1].movement());
	}

	#[test]
	fn test_deserialize_defaults_icon_size() {
		let meta = deserialize(&metadata("state = a\n\tdirs = 1\n\tframes = 1\n"), (48, 64)).unwrap();
		assert_eq!((meta.width, meta.height), (48, 64));
	}

	#[test]
	fn test_deserialize_rejects_bad_header() {
		let err = deserialize("# BEGIN PNG\nversion = 4.0\n", DEFAULT).unwrap_err();
		assert!(matches!(err, FormatError::MissingHeader { .. }));

		let err = deserialize("# BEGIN DMI\nversion = 3.0\n", DEFAULT).unwrap_err();
		assert!(matches!(err, FormatError::UnsupportedVersion { .. }));
	}

	#[test]
	fn test_deserialize_rejects_unknown_key() {
		let err = deserialize(&metadata("state = a\n\tcolour = red\n"), DEFAULT).unwrap_err();
		assert_eq!(
			err,
			FormatError::UnknownKey {
				key: "colour".to_string()
			}
		);
	}

	#[test]
	fn test_deserialize_rejects_attribute_without_state() {
		let err = deserialize(&metadata("\tdirs = 4\n"), DEFAULT).unwrap_err();
		assert!(matches!(err, FormatError::NoActiveState { key } if key == "dirs"));
	}

	#[test]
	fn test_deserialize_rejects_global_after_state() {
		let err = deserialize(&metadata("state = a\n\twidth = 4\n"), DEFAULT).unwrap_err();
		assert!(matches!(err, FormatError::GlobalAfterState { .. }));
	}

	#[test]
	fn test_deserialize_rejects_hotspot_before_frames() {
		let err = deserialize(&metadata("state = a\n\thotspot = 1,1,1\n\tframes = 2\n"), DEFAULT)
			.unwrap_err();
		assert!(matches!(err, FormatError::OutOfOrder { state, .. } if state == "a"));
	}

	#[test]
	fn test_deserialize_rejects_invalid_values() {
		for body in [
			"state = a\n\tdirs = 3\n",
			"state = a\n\tframes = many\n",
			"state = a\n\tdelay = 1,x\n",
			"state = a\n\tloop = -1\n",
		] {
			let err = deserialize(&metadata(body), DEFAULT).unwrap_err();
			assert!(matches!(err, FormatError::InvalidValue { .. }), "{body:?} gave {err:?}");
		}
		let err = deserialize(&metadata("state = a\n\tno equals sign\n"), DEFAULT).unwrap_err();
		assert!(matches!(err, FormatError::MalformedLine { .. }));
	}

	#[test]
	fn test_hotspot_runs_fill_the_tail() {
		let text = metadata(
			"state = a\n\tdirs = 1\n\tframes = 4\n\thotspot = 1,1,1\n\thotspot = 2,2,3\n",
		);
		let meta = deserialize(&text, DEFAULT).unwrap();
		assert!(meta.states[0].hotspots().is_none());

		let mut states = meta.states;
		for _ in 0..4 {
			states[0].add_frame(Frame::blank(1, 1)).unwrap();
		}
		attach_hotspots(&mut states, &meta.hotspot_runs);
		assert_eq!(
			states[0].hotspots().unwrap(),
			&[
				Some(Hotspot::new(1, 1)),
				Some(Hotspot::new(1, 1)),
				Some(Hotspot::new(2, 2)),
				Some(Hotspot::new(2, 2)),
			]
		);
	}

	#[test]
	fn test_delay_count_must_match_frames() {
		let err = deserialize(&metadata("state = a\n\tframes = 1\n\tdelay = 1,2,3\n"), DEFAULT)
			.unwrap_err();
		assert_eq!(err, FormatError::invalid_value("delay", "1,2,3"));

		// a later frames line cannot disagree with the delays
		let err = deserialize(
			&metadata("state = a\n\tframes = 2\n\tdelay = 1,2\n\tframes = 3\n"),
			DEFAULT,
		)
		.unwrap_err();
		assert!(matches!(err, FormatError::InvalidValue { key, .. } if key == "frames"));

		let err = deserialize(&metadata("state = a\n\tdelay = 1,2\n\tframes = 2\n"), DEFAULT)
			.unwrap_err();
		assert!(matches!(err, FormatError::OutOfOrder { key, .. } if key == "delay"));
	}

	#[test]
	fn test_delays_must_be_positive() {
		for delay in ["0", "-1", "inf", "NaN"] {
			let body = format!("state = a\n\tframes = 2\n\tdelay = 1,{delay}\n");
			let err = deserialize(&metadata(&body), DEFAULT).unwrap_err();
			assert!(matches!(err, FormatError::InvalidValue { .. }), "{delay} gave {err:?}");
		}
	}

	#[test]
	fn test_hotspot_run_past_frame_count() {
		let err = deserialize(&metadata("state = a\n\tframes = 2\n\thotspot = 1,1,3\n"), DEFAULT)
			.unwrap_err();
		assert_eq!(err, FormatError::invalid_value("hotspot", "1,1,3"));
	}

	#[test]
	fn test_huge_frame_count_allocates_nothing() {
		let text = metadata("state = a\n\tframes = 100000000000000\n\thotspot = 1,1,1\n");
		let meta = deserialize(&text, DEFAULT).unwrap();
		assert_eq!(meta.frame_counts, vec![Some(100_000_000_000_000)]);
		assert_eq!(meta.hotspot_runs[0].len(), 1);
		assert!(meta.states[0].hotspots().is_none());
	}

	#[test]
	fn test_lines_after_footer_are_ignored() {
		let text = "# BEGIN DMI\nversion = 4.0\nstate = a\n\tframes = 1\n# END DMI\ngarbage\n";
		assert_eq!(deserialize(text, DEFAULT).unwrap().states.len(), 1);
	}

	#[test]
	fn test_name_escaping() {
		assert_eq!(escape_state_name("a\nb"), "a\\nb");
		assert_eq!(unescape_state_name("a\\nb"), "a\nb");

		for name in ["back\\slash", "trailing\\", "\\n literal", "mixed\\\nline", "plain"] {
			assert_eq!(unescape_state_name(&escape_state_name(name)), name);
		}
	}

	#[test]
	fn test_escaped_name_survives_grammar() {
		let mut state = AnimationState::new("two\nlines \\ here");
		state.add_frame(Frame::blank(1, 1)).unwrap();
		let text = serialize(1, 1, &[state]);
		assert!(text.contains("state = two\\nlines \\\\ here\n"));

		let meta = deserialize(&text, DEFAULT).unwrap();
		assert_eq!(meta.states[0].name(), "two\nlines \\ here");
	}
}
