//! DMI file format constants.
//!
//! This module contains the fixed strings and values of the metadata grammar
//! and the pixel defaults used when frames are created or padded.

/// First line of every metadata block
pub const HEADER: &str = "# BEGIN DMI";

/// Last line of every metadata block
pub const FOOTER: &str = "# END DMI";

/// The only supported metadata version
pub const VERSION: &str = "4.0";

/// Version line as it appears on line 2 of the metadata block
pub const VERSION_LINE: &str = "version = 4.0";

/// Keyword of the zTXt chunk carrying the metadata block
pub const METADATA_KEYWORD: &str = "Description";

/// Fill colour for blank frames and unused grid cells (RGBA)
pub const BLANK_PIXEL: [u8; 4] = [192, 192, 192, 0];

/// Icon width and height assumed when the metadata omits them
pub const DEFAULT_ICON_SIZE: u32 = 32;

/// Name given to the implicit state wrapping a plain PNG
pub const PLAIN_PNG_STATE: &str = "png";

/// Length of one delay tick in milliseconds, used for previews
pub const TICK_MS: u32 = 100;
