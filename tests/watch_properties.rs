//! Property tests for the watcher against an in-memory model.

use devshell_watch::watch::{FileChangeWatcher, ModifiedTimeProbe};
use proptest::prelude::*;
use std::cell::RefCell;
use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};

const PATHS: [&str; 4] = ["a", "b", "c", "d"];

#[derive(Default)]
struct MemFs {
    files: RefCell<HashMap<PathBuf, u32>>,
}

impl ModifiedTimeProbe for MemFs {
    type Stamp = u32;

    fn modified(&self, path: &Path) -> io::Result<Option<u32>> {
        Ok(self.files.borrow().get(path).copied())
    }
}

#[derive(Debug, Clone)]
enum Op {
    Write(usize, u32),
    Delete(usize),
    Register(usize),
    Poll,
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        (0..PATHS.len(), 0u32..4).prop_map(|(i, t)| Op::Write(i, t)),
        (0..PATHS.len()).prop_map(Op::Delete),
        (0..PATHS.len()).prop_map(Op::Register),
        Just(Op::Poll),
    ]
}

/// Paths whose current stamp differs from the watcher's baseline.
fn dirty(fs: &MemFs, watcher: &FileChangeWatcher<&MemFs>) -> usize {
    PATHS
        .iter()
        .filter(|p| {
            let current = fs.files.borrow().get(Path::new(p)).copied();
            match (watcher.baseline(p), current) {
                (Some(base), Some(now)) => base != now,
                _ => false,
            }
        })
        .count()
}

proptest! {
    #[test]
    fn poll_reports_iff_something_is_dirty(ops in prop::collection::vec(op(), 1..64)) {
        let fs = MemFs::default();
        let mut watcher = FileChangeWatcher::with_probe(&fs);

        for op in ops {
            match op {
                Op::Write(i, t) => {
                    fs.files.borrow_mut().insert(PathBuf::from(PATHS[i]), t);
                }
                Op::Delete(i) => {
                    fs.files.borrow_mut().remove(Path::new(PATHS[i]));
                }
                Op::Register(i) => {
                    let exists = fs.files.borrow().contains_key(Path::new(PATHS[i]));
                    let watched_before = watcher.is_watching(PATHS[i]);
                    watcher.register(PATHS[i]);
                    prop_assert_eq!(watcher.is_watching(PATHS[i]), exists || watched_before);
                    if exists {
                        let current = fs.files.borrow()[Path::new(PATHS[i])];
                        prop_assert_eq!(watcher.baseline(PATHS[i]), Some(current));
                    }
                }
                Op::Poll => {
                    let before = dirty(&fs, &watcher);
                    let changed = watcher.poll_for_changes();
                    prop_assert_eq!(changed, before > 0);
                    let after = dirty(&fs, &watcher);
                    if changed {
                        prop_assert_eq!(after, before - 1);
                    } else {
                        prop_assert_eq!(after, 0);
                    }
                }
            }
        }
    }

    #[test]
    fn repeated_polls_drain_to_quiet(stamps in prop::collection::vec(0u32..3, PATHS.len())) {
        let fs = MemFs::default();
        for p in PATHS {
            fs.files.borrow_mut().insert(PathBuf::from(p), 100);
        }

        let mut watcher = FileChangeWatcher::with_probe(&fs);
        for p in PATHS {
            watcher.register(p);
        }

        for (p, t) in PATHS.iter().zip(&stamps) {
            fs.files.borrow_mut().insert(PathBuf::from(p), *t);
        }

        let mut reported = 0;
        while watcher.poll_for_changes() {
            reported += 1;
            prop_assert!(reported <= PATHS.len());
        }
        prop_assert_eq!(reported, PATHS.len());
        prop_assert!(!watcher.poll_for_changes());
    }
}
