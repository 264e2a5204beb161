//! Facing directions and direction counts.

use std::fmt::{self, Formatter};

use crate::file::DmiError;

/// One of the eight facing directions a state can be split across.
///
/// Cardinal directions are single bit flags; diagonals are the OR of two
/// adjacent flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum Direction {
	/// North (1)
	North = 1,
	/// South (2)
	South = 2,
	/// East (4)
	East = 4,
	/// West (8)
	West = 8,
	/// South | East
	Southeast = 2 | 4,
	/// South | West
	Southwest = 2 | 8,
	/// North | East
	Northeast = 1 | 4,
	/// North | West
	Northwest = 1 | 8,
}

impl Direction {
	/// Canonical storage order of directions within a frame
	pub const ORDER: [Direction; 8] = [
		Direction::South,
		Direction::North,
		Direction::East,
		Direction::West,
		Direction::Southeast,
		Direction::Southwest,
		Direction::Northeast,
		Direction::Northwest,
	];

	/// Returns the bit-flag value of the direction
	pub fn bits(self) -> u8 {
		self as u8
	}

	/// Converts a bit-flag value back into a direction
	pub fn from_bits(bits: u8) -> Option<Self> {
		Self::ORDER.into_iter().find(|dir| dir.bits() == bits)
	}

	/// Position of the direction in [`Direction::ORDER`]
	pub fn ordinal(self) -> usize {
		// ORDER contains every variant
		Self::ORDER.iter().position(|&dir| dir == self).unwrap_or(0)
	}

	/// Human-readable name
	pub fn name(self) -> &'static str {
		match self {
			Self::South => "South",
			Self::North => "North",
			Self::East => "East",
			Self::West => "West",
			Self::Southeast => "Southeast",
			Self::Southwest => "Southwest",
			Self::Northeast => "Northeast",
			Self::Northwest => "Northwest",
		}
	}
}

impl Default for Direction {
	fn default() -> Self {
		Self::South
	}
}

impl fmt::Display for Direction {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		write!(f, "{}", self.name())
	}
}

/// Number of directions a state carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum DirCount {
	/// Single facing
	One = 1,
	/// Cardinal directions
	Four = 4,
	/// Cardinal and diagonal directions
	Eight = 8,
}

impl DirCount {
	/// Converts a u32 value to `DirCount`
	pub fn from_u32(value: u32) -> Result<Self, DmiError> {
		match value {
			1 => Ok(Self::One),
			4 => Ok(Self::Four),
			8 => Ok(Self::Eight),
			_ => Err(DmiError::InvalidDirCount(value)),
		}
	}

	/// Converts `DirCount` to u32
	pub fn to_u32(self) -> u32 {
		self as u32
	}

	/// Number of directions as an index bound
	pub fn count(self) -> usize {
		self as usize
	}

	/// The directions covered, in canonical order
	pub fn directions(self) -> &'static [Direction] {
		&Direction::ORDER[..self.count()]
	}
}

impl Default for DirCount {
	fn default() -> Self {
		Self::One
	}
}

impl fmt::Display for DirCount {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		write!(f, "{}", self.to_u32())
	}
}

impl TryFrom<u32> for DirCount {
	type Error = DmiError;

	fn try_from(value: u32) -> Result<Self, Self::Error> {
		Self::from_u32(value)
	}
}
