//! This crate provides core data types and file format support for the `dmi-rs` project.
//!
//! # File Formats
//!
//! - **DMI**: PNG sprite grids carrying a `Description` zTXt chunk that groups
//!   the frames into named, directional, animated states
//!
//! # Examples
//!
//! Using the prelude (recommended):
//!
//! ```no_run
//! use dmi_types::prelude::*;
//!
//! # fn main() -> Result<(), DmiError> {
//! let mut dmi = DmiFile::open("mob.dmi")?;
//! dmi.resize(64, 64)?;
//! dmi.save("mob_64.dmi")?;
//! # Ok(())
//! # }
//! ```
//!
//! Or use explicit paths:
//!
//! ```no_run
//! use dmi_types::file::dmi::{File, ParseConfig};
//!
//! let data = std::fs::read("mob.dmi").unwrap();
//! let dmi = File::from_bytes_with_config(&data, &ParseConfig::lenient());
//! // ...
//! ```

pub mod file;

/// `use dmi_types::prelude::*;` to import commonly used items.
pub mod prelude;
