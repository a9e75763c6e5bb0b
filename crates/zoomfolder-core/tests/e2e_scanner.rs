//! End-to-end scanner integration tests.
//!
//! These run the real background scan thread, both against a temporary
//! directory on disk and against in-memory directory tables, and check the
//! tree it leaves behind under the shared lock.
use std::fs;
use std::io::{self, Write};
use std::path::Path;
use std::thread;
use std::time::{Duration, Instant};

use compact_str::CompactString;
use tempfile::TempDir;
use zoomfolder_core::model::{DirTree, NodeIndex};
use zoomfolder_core::scanner::enumerate::{
    DirEntryInfo, DirEnumerator, Entries, EntryKind, MemoryEnumerator,
};
use zoomfolder_core::scanner::progress::ScanEvent;
use zoomfolder_core::scanner::{start_scan, start_scan_with, ScanHandle};

// ── Helpers ──────────────────────────────────────────────────────────────────

fn write_bytes(path: &Path, n: usize) {
    let mut f = fs::File::create(path).unwrap();
    f.write_all(&vec![0u8; n]).unwrap();
}

/// Wait for the terminal event, panicking after 30 seconds.
fn wait_for_event(handle: &ScanHandle) -> ScanEvent {
    let deadline = Instant::now() + Duration::from_secs(30);
    loop {
        assert!(
            Instant::now() < deadline,
            "scanner did not finish within 30 seconds"
        );
        match handle.events().try_recv() {
            Ok(event) => return event,
            Err(crossbeam_channel::TryRecvError::Empty) => {
                thread::sleep(Duration::from_millis(10));
            }
            Err(crossbeam_channel::TryRecvError::Disconnected) => {
                panic!("scanner channel disconnected before a terminal event");
            }
        }
    }
}

fn wait_until_done(handle: &ScanHandle) {
    match wait_for_event(handle) {
        ScanEvent::Finished { .. } => assert!(handle.poll().done),
        ScanEvent::Cancelled => panic!("scan was unexpectedly cancelled"),
    }
}

fn names(tree: &DirTree, node: NodeIndex) -> Vec<String> {
    tree.children(node)
        .iter()
        .map(|&c| tree.node(c).name.to_string())
        .collect()
}

/// Every complete directory's size is its own file bytes plus its children.
fn assert_sizes_consistent(tree: &DirTree, own_bytes: impl Fn(NodeIndex) -> u64) {
    for i in 0..tree.len() {
        let node = NodeIndex::new(i);
        let n = tree.node(node);
        if !n.complete {
            continue;
        }
        let children: u64 = tree.children(node).iter().map(|&c| tree.node(c).size).sum();
        assert_eq!(n.size, children + own_bytes(node), "size mismatch at {}", n.name);
    }
}

/// A huge, slow directory tree: ten subdirectories and one file per level,
/// four levels deep. Takes far longer to walk than any test waits.
struct EndlessEnumerator;

impl DirEnumerator for EndlessEnumerator {
    fn read_dir<'a>(&'a self, path: &Path) -> io::Result<Entries<'a>> {
        thread::sleep(Duration::from_millis(1));
        let fanout = if path.components().count() > 5 { 0 } else { 10 };
        let dirs = (0..fanout).map(|i| {
            Ok(DirEntryInfo {
                name: CompactString::new(format!("d{i}")),
                kind: EntryKind::Directory,
            })
        });
        let file = std::iter::once(Ok(DirEntryInfo {
            name: CompactString::new("f.bin"),
            kind: EntryKind::File { size: 10 },
        }));
        Ok(Box::new(file.chain(dirs)))
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

/// Two subfolders with one file each.
#[test]
fn scan_two_subfolders() {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path();
    fs::create_dir(root.join("a")).unwrap();
    fs::create_dir(root.join("b")).unwrap();
    write_bytes(&root.join("a").join("one.bin"), 1000);
    write_bytes(&root.join("b").join("two.bin"), 2000);

    let handle = start_scan(root).unwrap();
    wait_until_done(&handle);

    let scan = handle.lock();
    let tree = &scan.tree;
    let r = tree.root();
    assert!(scan.done);
    assert_eq!(tree.node(r).child_count(), 2);
    assert!(tree.node(r).size >= 3000);
    assert!(tree.node(r).file_count >= 2);
    assert_eq!(scan.total_size, tree.node(r).size);
    assert_eq!(scan.total_files, tree.node(r).file_count);

    // Sorted by size at completion.
    assert_eq!(names(tree, r), ["b", "a"]);
    assert!(tree.nodes.iter().all(|n| n.complete));
}

#[test]
fn scan_empty_directory() {
    let tmp = TempDir::new().unwrap();
    let handle = start_scan(tmp.path()).unwrap();

    match wait_for_event(&handle) {
        ScanEvent::Finished {
            total_size,
            total_files,
            skipped,
            ..
        } => {
            assert_eq!(total_size, 0);
            assert_eq!(total_files, 0);
            assert_eq!(skipped, 0);
        }
        ScanEvent::Cancelled => panic!("empty scan cancelled"),
    }

    let scan = handle.lock();
    assert!(scan.done);
    assert_eq!(scan.tree.node(scan.tree.root()).child_count(), 0);
    assert_eq!(scan.tree.node(scan.tree.root()).size, 0);
}

#[test]
fn root_node_is_named_after_the_scanned_path() {
    let tmp = TempDir::new().unwrap();
    let handle = start_scan(tmp.path()).unwrap();
    wait_until_done(&handle);

    assert_eq!(handle.root_path(), tmp.path());
    let scan = handle.lock();
    assert_eq!(
        scan.tree.node(scan.tree.root()).name.as_str(),
        tmp.path().to_string_lossy()
    );
}

#[cfg(unix)]
#[test]
fn symlinks_are_not_followed() {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path();
    fs::create_dir(root.join("real")).unwrap();
    write_bytes(&root.join("real").join("data.bin"), 500);
    std::os::unix::fs::symlink(root.join("real"), root.join("loop")).unwrap();
    std::os::unix::fs::symlink(root.join("real").join("data.bin"), root.join("alias")).unwrap();

    let handle = start_scan(root).unwrap();
    wait_until_done(&handle);

    let scan = handle.lock();
    assert_eq!(names(&scan.tree, scan.tree.root()), ["real"]);
    assert_eq!(scan.total_size, 500);
    assert_eq!(scan.total_files, 1);
}

#[test]
fn in_memory_tree_sizes_roll_up() {
    let fs = MemoryEnumerator::new()
        .file("/scan/top.bin", 7)
        .file("/scan/a/x.bin", 100)
        .file("/scan/a/deep/y.bin", 50)
        .file("/scan/a/deep/z.bin", 25)
        .file("/scan/b/w.bin", 300)
        .dir("/scan/empty");

    let handle = start_scan_with("/scan", fs).unwrap();
    wait_until_done(&handle);

    let scan = handle.lock();
    let tree = &scan.tree;
    let r = tree.root();
    assert_eq!(tree.node(r).size, 482);
    assert_eq!(tree.node(r).file_count, 5);
    assert_eq!(names(tree, r), ["b", "a", "empty"]);

    let a = tree.child(r, 1).unwrap();
    assert_eq!(tree.node(a).size, 175);
    assert_eq!(tree.full_path(a), Path::new("/scan/a"));

    let own = |node: NodeIndex| match tree.node(node).name.as_str() {
        "/scan" => 7,
        "a" => 100,
        "deep" => 75,
        "b" => 300,
        _ => 0,
    };
    assert_sizes_consistent(tree, own);
}

#[test]
fn unreadable_entries_are_skipped_and_counted() {
    let fs = MemoryEnumerator::new()
        .file("/scan/ok/a.bin", 10)
        .unreadable("/scan/locked")
        .broken("/scan/ok/ghost");

    let handle = start_scan_with("/scan", fs).unwrap();
    match wait_for_event(&handle) {
        ScanEvent::Finished { skipped, total_size, .. } => {
            assert_eq!(skipped, 2);
            assert_eq!(total_size, 10);
        }
        ScanEvent::Cancelled => panic!("scan cancelled"),
    }

    let scan = handle.lock();
    assert_eq!(scan.skipped, 2);
    // The locked directory stays in the tree with nothing under it.
    let r = scan.tree.root();
    assert_eq!(names(&scan.tree, r), ["ok", "locked"]);
    let locked = scan.tree.child(r, 1).unwrap();
    assert_eq!(scan.tree.node(locked).size, 0);
}

#[test]
fn unreadable_root_finishes_empty() {
    let fs = MemoryEnumerator::new().unreadable("/scan");
    let handle = start_scan_with("/scan", fs).unwrap();
    wait_until_done(&handle);

    let snapshot = handle.poll();
    assert!(snapshot.done);
    assert_eq!(snapshot.skipped, 1);
    assert_eq!(snapshot.total_size, 0);
}

#[test]
fn in_memory_links_are_ignored() {
    let fs = MemoryEnumerator::new()
        .file("/scan/a/x.bin", 10)
        .link("/scan/a/to-elsewhere");
    let handle = start_scan_with("/scan", fs).unwrap();
    wait_until_done(&handle);

    let snapshot = handle.poll();
    assert_eq!(snapshot.total_files, 1);
    assert_eq!(snapshot.skipped, 0);
}

#[test]
fn poll_reports_totals_mirroring_root() {
    let fs = MemoryEnumerator::new()
        .file("/scan/a/x.bin", 1)
        .file("/scan/b/y.bin", 2)
        .file("/scan/c/z.bin", 3);
    let handle = start_scan_with("/scan", fs).unwrap();
    wait_until_done(&handle);

    let snapshot = handle.poll();
    let scan = handle.lock();
    let root = scan.tree.node(scan.tree.root());
    assert_eq!(snapshot.total_size, root.size);
    assert_eq!(snapshot.total_files, root.file_count);
    assert!(!snapshot.cancelled);
}

#[test]
fn tree_is_readable_while_scan_runs() {
    let mut handle = start_scan_with("/endless", EndlessEnumerator).unwrap();

    let deadline = Instant::now() + Duration::from_secs(30);
    loop {
        let grown = handle.lock().tree.len() > 50;
        if grown {
            break;
        }
        assert!(Instant::now() < deadline, "tree never grew");
        thread::sleep(Duration::from_millis(5));
    }

    {
        let scan = handle.lock();
        assert!(!scan.done);
        // Handles handed out earlier still resolve while the tree grows.
        let first = scan.tree.child(scan.tree.root(), 0).unwrap();
        assert_eq!(scan.tree.node(first).name.as_str(), "d0");
    }

    assert!(handle.is_running());
    handle.cancel();
    assert!(!handle.is_running());
}

#[test]
fn cancel_stops_worker_and_keeps_partial_tree() {
    let mut handle = start_scan_with("/endless", EndlessEnumerator).unwrap();
    thread::sleep(Duration::from_millis(50));

    let started = Instant::now();
    handle.cancel();
    assert!(started.elapsed() < Duration::from_secs(5));

    assert_eq!(wait_for_event(&handle), ScanEvent::Cancelled);
    let snapshot = handle.poll();
    assert!(snapshot.cancelled);
    assert!(!snapshot.done);

    let scan = handle.lock();
    let tree = &scan.tree;
    assert!(tree.len() > 1);
    assert!(!tree.node(tree.root()).complete);

    // Every directory holds one 10-byte file, listed before its subfolders.
    assert_sizes_consistent(tree, |_| 10);
    for i in 0..tree.len() {
        let node = NodeIndex::new(i);
        let n = tree.node(node);
        let finished: u64 = tree
            .children(node)
            .iter()
            .map(|&c| tree.node(c))
            .filter(|c| c.complete)
            .map(|c| c.size)
            .sum();
        // Interrupted subtrees are never folded into their parent.
        let own = n.size - finished;
        assert!(own == 0 || own == 10, "{} holds {own} own bytes", n.name);
        if n.complete {
            assert!(
                tree.children(node).iter().all(|&c| tree.node(c).complete),
                "complete {} has an unfinished child",
                n.name
            );
        }
    }
}

#[test]
fn free_while_running_does_not_hang() {
    let handle = start_scan_with("/endless", EndlessEnumerator).unwrap();
    thread::sleep(Duration::from_millis(20));
    let started = Instant::now();
    handle.free();
    assert!(started.elapsed() < Duration::from_secs(5));
}

#[test]
fn free_after_completion() {
    let handle = start_scan_with("/scan", MemoryEnumerator::new().file("/scan/a", 1)).unwrap();
    wait_until_done(&handle);
    handle.free();
}
