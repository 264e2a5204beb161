#![cfg_attr(docsrs, feature(doc_auto_cfg))]

//! `dmi-rs` reads and writes DMI sprite containers: PNG images whose pixels
//! hold a grid of icon frames and whose `Description` text chunk names the
//! animation states those frames belong to.
//!
pub use dmi_internal::*;
