//! PNG container access.
//!
//! Thin layer over the `png` crate for the keyworded text chunks and over the
//! `image` crate for pixel decoding. Everything the DMI layer needs from the
//! container goes through [`encode`], [`encode_animation`] and [`decode`].

use std::io::Cursor;

use image::{ImageFormat, RgbaImage};

use crate::file::DmiError;

/// Storage flavour of a PNG text chunk
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChunkKind {
	/// `tEXt`, uncompressed Latin-1
	Text,
	/// `zTXt`, deflate-compressed Latin-1
	CompressedText,
}

/// A keyworded text chunk read from or written to a PNG
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextChunk {
	/// Chunk type
	pub kind: ChunkKind,
	/// Chunk keyword, e.g. `Description`
	pub keyword: String,
	/// Decoded text payload
	pub text: String,
}

impl TextChunk {
	/// Creates a compressed (`zTXt`) chunk
	pub fn compressed(keyword: impl Into<String>, text: impl Into<String>) -> Self {
		Self {
			kind: ChunkKind::CompressedText,
			keyword: keyword.into(),
			text: text.into(),
		}
	}
}

/// Result of [`decode`]
#[derive(Debug, Clone)]
pub struct DecodedPng {
	/// Pixel plane converted to RGBA8
	pub image: RgbaImage,
	/// Text chunks found ahead of the image data
	pub chunks: Vec<TextChunk>,
}

impl DecodedPng {
	/// Finds the compressed text chunk with the given keyword
	pub fn compressed_text(&self, keyword: &str) -> Option<&str> {
		self.chunks
			.iter()
			.find(|chunk| chunk.kind == ChunkKind::CompressedText && chunk.keyword == keyword)
			.map(|chunk| chunk.text.as_str())
	}
}

fn rgba_encoder<W: std::io::Write>(writer: W, width: u32, height: u32) -> png::Encoder<'static, W> {
	let mut encoder = png::Encoder::new(writer, width, height);
	encoder.set_color(png::ColorType::Rgba);
	encoder.set_depth(png::BitDepth::Eight);
	encoder
}

/// Encodes an RGBA image as PNG, embedding the given text chunks.
pub fn encode(image: &RgbaImage, chunks: &[TextChunk]) -> Result<Vec<u8>, DmiError> {
	let mut buffer = Vec::new();
	{
		let mut encoder = rgba_encoder(&mut buffer, image.width(), image.height());
		for chunk in chunks {
			match chunk.kind {
				ChunkKind::CompressedText => {
					encoder.add_ztxt_chunk(chunk.keyword.clone(), chunk.text.clone())?;
				}
				ChunkKind::Text => {
					encoder.add_text_chunk(chunk.keyword.clone(), chunk.text.clone())?;
				}
			}
		}
		let mut writer = encoder.write_header()?;
		writer.write_image_data(image.as_raw())?;
		writer.finish()?;
	}
	Ok(buffer)
}

/// Encodes an endlessly looping APNG.
///
/// `delays_ms` holds one display duration per frame in milliseconds.
pub fn encode_animation(frames: &[&RgbaImage], delays_ms: &[u16]) -> Result<Vec<u8>, DmiError> {
	let Some(first) = frames.first() else {
		return Ok(Vec::new());
	};

	let mut buffer = Vec::new();
	{
		let mut encoder = rgba_encoder(&mut buffer, first.width(), first.height());
		encoder.set_animated(frames.len() as u32, 0)?;
		let mut writer = encoder.write_header()?;
		for (frame, &delay) in frames.iter().zip(delays_ms) {
			writer.set_frame_delay(delay, 1000)?;
			writer.write_image_data(frame.as_raw())?;
		}
		writer.finish()?;
	}
	Ok(buffer)
}

/// Decodes a PNG into RGBA pixels and its text chunks.
pub fn decode(bytes: &[u8]) -> Result<DecodedPng, DmiError> {
	let decoder = png::Decoder::new(Cursor::new(bytes));
	let reader = decoder.read_info()?;
	let info = reader.info();

	let mut chunks = Vec::with_capacity(
		info.compressed_latin1_text.len() + info.uncompressed_latin1_text.len(),
	);
	for chunk in &info.compressed_latin1_text {
		chunks.push(TextChunk {
			kind: ChunkKind::CompressedText,
			keyword: chunk.keyword.clone(),
			text: chunk.get_text()?,
		});
	}
	for chunk in &info.uncompressed_latin1_text {
		chunks.push(TextChunk {
			kind: ChunkKind::Text,
			keyword: chunk.keyword.clone(),
			text: chunk.text.clone(),
		});
	}

	let image = image::load_from_memory_with_format(bytes, ImageFormat::Png)?.to_rgba8();
	Ok(DecodedPng {
		image,
		chunks,
	})
}
