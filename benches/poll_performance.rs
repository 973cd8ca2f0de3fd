//! Benchmarks for polling cost.
//!
//! A UI polls on a timer, so a quiet poll over the whole watch set is the hot path.

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use devshell_watch::watch::{FileChangeWatcher, ModifiedTimeProbe};
use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

struct StaticProbe {
    stamps: HashMap<PathBuf, u64>,
}

impl ModifiedTimeProbe for StaticProbe {
    type Stamp = u64;

    fn modified(&self, path: &Path) -> io::Result<Option<u64>> {
        Ok(self.stamps.get(path).copied())
    }
}

/// Quiet polls against an in-memory probe: the watcher's own overhead.
fn benchmark_quiet_poll_in_memory(c: &mut Criterion) {
    let mut group = c.benchmark_group("quiet_poll_in_memory");

    for size in [1usize, 16, 256] {
        let stamps: HashMap<PathBuf, u64> = (0..size)
            .map(|i| (PathBuf::from(format!("src/file{}.tsx", i)), 1))
            .collect();
        let paths: Vec<PathBuf> = stamps.keys().cloned().collect();

        let mut watcher = FileChangeWatcher::with_probe(StaticProbe { stamps });
        for path in &paths {
            watcher.register(path);
        }

        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, _| {
            b.iter(|| black_box(watcher.poll_for_changes()));
        });
    }

    group.finish();
}

/// Quiet polls against real files: dominated by metadata syscalls.
fn benchmark_quiet_poll_filesystem(c: &mut Criterion) {
    let temp_dir = TempDir::new().unwrap();
    let mut group = c.benchmark_group("quiet_poll_filesystem");

    for size in [1usize, 16, 128] {
        let mut watcher = FileChangeWatcher::new();
        for i in 0..size {
            let path = temp_dir.path().join(format!("{}-{}.tsx", size, i));
            fs::write(&path, "export {}").unwrap();
            watcher.register(&path);
        }

        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, _| {
            b.iter(|| black_box(watcher.poll_for_changes()));
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    benchmark_quiet_poll_in_memory,
    benchmark_quiet_poll_filesystem
);
criterion_main!(benches);
