//! `.DMI` file format support for `dmi-rs` project.
//!
//! A DMI file is a PNG whose pixel plane is a grid of equally sized frames and
//! which carries a `Description` zTXt chunk describing how those frames form
//! named animation states.
//!
//! # File Structure Overview
//!
//! - **Metadata** (zTXt chunk `Description`): text block with the global icon
//!   size and one block per state (see [`metadata`])
//! - **Sprite grid** (PNG pixels): every stored frame of every state, in
//!   document order, laid out row by row in a near-square grid (see [`packer`])
//!
//! ## Frame storage
//!
//! Within a state, frames are stored frame-major with directions in canonical
//! order:
//!
//! ```text
//! Ordinal  Direction  Bits
//! -------  ---------  ----
//! 0        South      2
//! 1        North      1
//! 2        East       4
//! 3        West       8
//! 4        Southeast  6
//! 5        Southwest  10
//! 6        Northeast  5
//! 7        Northwest  9
//! ```
//!
//! A state with `dirs = 4` stores `S N E W` for frame 0, then `S N E W` for
//! frame 1, and so on. Asking a state for a direction it does not carry
//! returns the South frame.
//!
//! # Usage Examples
//!
//! ## Loading a DMI file
//!
//! ```no_run
//! use dmi_types::file::dmi::{Direction, File};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let dmi = File::open("mob.dmi")?;
//! println!("Icon size: {}x{}", dmi.width(), dmi.height());
//!
//! if let Some(walk) = dmi.state("walk") {
//!     let frame = walk.get_frame(0, Direction::North);
//!     println!("walk: {} frames, first north frame {:?}", walk.framecount(), frame);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Tolerating damaged sprite grids
//!
//! ```no_run
//! use dmi_types::file::dmi::{File, ParseConfig};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let data = std::fs::read("damaged.dmi")?;
//! let dmi = File::from_bytes_with_config(&data, &ParseConfig::lenient())?;
//! println!("{dmi}");
//! # Ok(())
//! # }
//! ```

pub mod constants;
pub mod container;
pub mod direction;
pub mod file;
pub mod frame;
pub mod hotspot;
pub mod metadata;
pub mod packer;
pub mod parse_config;
pub mod snapshot;
pub mod state;


pub use self::direction::{DirCount, Direction};
pub use self::file::File;
pub use self::frame::Frame;
pub use self::hotspot::Hotspot;
pub use self::parse_config::{ExtractionPolicy, ParseConfig};
pub use self::state::AnimationState;
