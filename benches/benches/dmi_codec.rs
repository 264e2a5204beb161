//! Benchmark suite for DMI encoding and decoding
//!
//! Measures sprite grid packing, full file writes and full file reads on
//! synthetic documents of increasing size.
//!
//! Run with: cargo bench --manifest-path benches/Cargo.toml

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use dmi_benches::{generate_document, sizes};
use dmi_types::file::dmi::{DirCount, File, metadata, packer};
use std::hint::black_box;

const SHAPES: [(&str, (usize, DirCount, usize, u32)); 4] = [
	("tiny", sizes::TINY),
	("small", sizes::SMALL),
	("medium", sizes::MEDIUM),
	("large", sizes::LARGE),
];

fn document(name: &str, states: usize, dirs: DirCount, frames: usize, size: u32) -> Option<File> {
	match generate_document(states, dirs, frames, size) {
		Ok(dmi) => Some(dmi),
		Err(err) => {
			eprintln!("Warning: Could not generate {name} document: {err}");
			None
		}
	}
}

fn frame_total(dmi: &File) -> u64 {
	dmi.states().iter().map(|state| state.frames().len() as u64).sum()
}

/// Benchmark packing frames into the sprite grid
fn bench_pack(c: &mut Criterion) {
	let mut group = c.benchmark_group("dmi_pack");

	for (name, (states, dirs, frames, size)) in SHAPES {
		let Some(dmi) = document(name, states, dirs, frames, size) else {
			continue;
		};
		group.throughput(Throughput::Elements(frame_total(&dmi)));
		group.bench_with_input(BenchmarkId::new("pack", name), &dmi, |b, dmi| {
			b.iter(|| black_box(packer::pack(dmi.width(), dmi.height(), black_box(dmi.states()))));
		});
	}

	group.finish();
}

/// Benchmark metadata text generation and parsing
fn bench_metadata(c: &mut Criterion) {
	let mut group = c.benchmark_group("dmi_metadata");

	let (states, dirs, frames, size) = sizes::MEDIUM;
	let Some(dmi) = document("medium", states, dirs, frames, size) else {
		return;
	};
	let text = dmi.build_metadata();

	group.bench_function("serialize", |b| b.iter(|| black_box(dmi.build_metadata())));
	group.bench_function("deserialize", |b| {
		b.iter(|| black_box(metadata::deserialize(black_box(&text), (size, size))));
	});

	group.finish();
}

/// Benchmark complete file writes and reads
fn bench_file(c: &mut Criterion) {
	let mut group = c.benchmark_group("dmi_file");

	for (name, (states, dirs, frames, size)) in SHAPES {
		let Some(dmi) = document(name, states, dirs, frames, size) else {
			continue;
		};
		let bytes = match dmi.to_bytes() {
			Ok(bytes) => bytes,
			Err(err) => {
				eprintln!("Warning: Could not encode {name} document: {err}");
				continue;
			}
		};

		group.throughput(Throughput::Bytes(bytes.len() as u64));
		group.bench_with_input(BenchmarkId::new("write", name), &dmi, |b, dmi| {
			b.iter(|| black_box(dmi.to_bytes()));
		});
		group.bench_with_input(BenchmarkId::new("read", name), &bytes, |b, bytes| {
			b.iter(|| black_box(File::from_bytes(black_box(bytes))));
		});
	}

	group.finish();
}

criterion_group!(benches, bench_pack, bench_metadata, bench_file);
criterion_main!(benches);
