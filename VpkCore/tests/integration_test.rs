use std::collections::BTreeSet;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use pretty_assertions::assert_eq;
use tempfile::tempdir;
use vpkcore::prelude::*;
use walkdir::WalkDir;

fn game_archive() -> MemoryArchive {
    MemoryArchive::new("pak01_dir.vpk")
        .with_directory("materials/models/props", [
            ("crate.vmt", b"vmt".to_vec()),
            ("crate.vtf", b"vtf".to_vec()),
        ])
        .with_directory("", [("readme.txt", b"hello".to_vec())])
        .with_directory("models/props", [("crate.mdl", b"mdl".to_vec())])
        .with_directory("textures", [("sky.vtf", b"sky".to_vec())])
        .with_directory("models2/x", [("other.mdl", b"other".to_vec())])
        .with_directory("models", [("base.mdl", b"base".to_vec())])
        .with_directory("materials", [("Z.vmt", b"Z".to_vec()), ("a.vmt", b"a".to_vec())])
}

/// All directory path prefixes, root included.
fn distinct_prefixes(archive: &MemoryArchive) -> BTreeSet<String> {
    let mut prefixes = BTreeSet::from([String::new()]);
    for directory in archive.directories() {
        let mut current = String::new();
        for part in vpkcore::tree::segment::segment(&directory.path).unwrap() {
            if !current.is_empty() {
                current.push('/');
            }
            current.push_str(part);
            prefixes.insert(current.clone());
        }
    }
    prefixes
}

/// Files below `root`, as `/`-separated relative paths.
fn files_under(root: &Path) -> BTreeSet<String> {
    WalkDir::new(root)
        .into_iter()
        .filter_map(std::result::Result::ok)
        .filter(|e| e.file_type().is_file())
        .map(|e| {
            e.path()
                .strip_prefix(root)
                .unwrap()
                .to_string_lossy()
                .replace('\\', "/")
        })
        .collect()
}

#[test]
fn test_tree_counts_match_archive() {
    let archive = game_archive();
    let tree = build_display_tree(&archive).unwrap();

    assert_eq!(tree.leaf_count(), archive.entry_count());
    assert_eq!(tree.directory_count(), distinct_prefixes(&archive).len());
}

#[test]
fn test_sorted_tree_layout() {
    let tree = build_display_tree(&game_archive()).unwrap();
    assert_eq!(
        tree.render(),
        "\
pak01_dir.vpk/
  materials/
    models/
      props/
        crate.vmt
        crate.vtf
    Z.vmt
    a.vmt
  models/
    props/
      crate.mdl
    base.mdl
  models2/
    x/
      other.mdl
  textures/
    sky.vtf
  readme.txt
"
    );
}

#[test]
fn test_sort_idempotent_on_built_tree() {
    let mut tree = build_display_tree(&game_archive()).unwrap();
    let first = tree.render();
    sort_tree(&mut tree);
    assert_eq!(tree.render(), first);
}

#[test]
fn test_every_leaf_resolves_to_its_entry() {
    let archive = game_archive();
    let tree = build_display_tree(&archive).unwrap();

    let mut seen = BTreeSet::new();
    for leaf in tree.leaves() {
        let resolved = resolve_node(&archive, &tree, leaf).unwrap();
        assert_eq!(resolved.path(), tree.path_of(leaf).unwrap());
        assert_eq!(resolved.entry.full_name(), tree.node(leaf).unwrap().label());
        seen.insert(resolved.path());
    }
    assert_eq!(seen.len(), archive.entry_count());
}

#[test]
fn test_extract_all_writes_every_entry_once() {
    let archive = game_archive();
    let dest = tempdir().unwrap();
    let report = extract(&archive, &ExtractionOptions::new(dest.path()));

    assert!(report.is_complete());
    assert_eq!(report.files_written, archive.entry_count());

    let expected: BTreeSet<String> = archive
        .directories()
        .iter()
        .flat_map(|d| d.entries.iter().map(|e| d.entry_path(e.full_name())))
        .collect();
    assert_eq!(files_under(&dest.path().join("pak01_dir")), expected);
    assert_eq!(
        std::fs::read(dest.path().join("pak01_dir/models/props/crate.mdl")).unwrap(),
        b"mdl"
    );
}

#[test]
fn test_extract_subset_by_prefix() {
    let archive = game_archive();
    let dest = tempdir().unwrap();
    let options = ExtractionOptions::new(dest.path()).with_selection(Selection::prefixes(["models"]));
    let report = extract(&archive, &options);

    // "models2/x" matches too: prefixes compare raw strings
    assert_eq!(report.directories_selected, 3);
    assert_eq!(
        files_under(&dest.path().join("pak01_dir")),
        BTreeSet::from([
            "models/base.mdl".to_string(),
            "models/props/crate.mdl".to_string(),
            "models2/x/other.mdl".to_string(),
        ])
    );
    assert!(!dest.path().join("pak01_dir/textures").exists());
}

#[test]
fn test_subset_and_full_extraction_write_identical_files() {
    let archive = game_archive();
    let full = tempdir().unwrap();
    let partial = tempdir().unwrap();

    extract(&archive, &ExtractionOptions::new(full.path()));
    extract(
        &archive,
        &ExtractionOptions::new(partial.path()).with_selection(Selection::prefixes(["materials"])),
    );

    let partial_root = partial.path().join("pak01_dir");
    for file in files_under(&partial_root) {
        assert_eq!(
            std::fs::read(partial_root.join(&file)).unwrap(),
            std::fs::read(full.path().join("pak01_dir").join(&file)).unwrap(),
            "{file} differs"
        );
    }
}

#[test]
fn test_last_progress_is_idle() {
    let archive = game_archive();
    for selection in [Selection::All, Selection::none(), Selection::prefixes(["textures"])] {
        let dest = tempdir().unwrap();
        let last = Mutex::new(None);
        extract_with_progress(
            &archive,
            &ExtractionOptions::new(dest.path()).with_selection(selection),
            &|p| *last.lock().unwrap() = Some(p.clone()),
        );
        let last = last.into_inner().unwrap().unwrap();
        assert_eq!(last.phase, ExtractionPhase::Idle);
        assert!(last.fraction().abs() < f32::EPSILON);
    }
}

#[test]
fn test_small_archive_end_to_end() {
    let archive = MemoryArchive::new("pak01_dir.vpk")
        .with_directory("", [("a.txt", b"a".to_vec())])
        .with_directory("sound/ambient", [("wind.wav", b"w".to_vec())]);

    let tree = build_tree(archive.file_name(), archive.directories()).unwrap();
    assert_eq!(
        tree.render(),
        "pak01_dir.vpk/\n  a.txt\n  sound/\n    ambient/\n      wind.wav\n"
    );

    let tree = build_display_tree(&archive).unwrap();
    assert_eq!(
        tree.render(),
        "pak01_dir.vpk/\n  sound/\n    ambient/\n      wind.wav\n  a.txt\n"
    );

    let dest = tempdir().unwrap();
    extract(&archive, &ExtractionOptions::new(dest.path()));
    assert!(dest.path().join("pak01_dir/a.txt").is_file());
    assert!(dest.path().join("pak01_dir/sound/ambient/wind.wav").is_file());
}

/// Entry whose bytes cannot be read.
#[derive(Debug)]
struct BrokenEntry(String);

impl ArchiveEntry for BrokenEntry {
    fn full_name(&self) -> &str {
        &self.0
    }

    fn len(&self) -> u64 {
        0
    }

    fn read_bytes(&self) -> io::Result<Vec<u8>> {
        if self.0.starts_with("bad") {
            Err(io::Error::new(io::ErrorKind::UnexpectedEof, "truncated archive part"))
        } else {
            Ok(self.0.as_bytes().to_vec())
        }
    }
}

struct BrokenArchive {
    directories: Vec<ArchiveDirectory<BrokenEntry>>,
}

impl Archive for BrokenArchive {
    type Entry = BrokenEntry;

    fn file_name(&self) -> &str {
        "broken.vpk"
    }

    fn header(&self) -> ArchiveHeader {
        ArchiveHeader::default()
    }

    fn directories(&self) -> &[ArchiveDirectory<BrokenEntry>] {
        &self.directories
    }
}

fn entries(names: &[&str]) -> Vec<BrokenEntry> {
    names.iter().map(|n| BrokenEntry((*n).to_string())).collect()
}

#[test]
fn test_entry_failures_do_not_stop_the_batch() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
    let archive = BrokenArchive {
        directories: vec![
            ArchiveDirectory::new("a", entries(&["one.txt", "bad.txt", "two.txt"])),
            ArchiveDirectory::new("b", entries(&["three.txt"])),
        ],
    };
    let dest = tempdir().unwrap();
    let report = extract(&archive, &ExtractionOptions::new(dest.path()));

    assert_eq!(report.directories_processed, 2);
    assert_eq!(report.files_written, 3);
    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].entry.as_deref(), Some("bad.txt"));
    assert!(matches!(
        &report.failures[0].error,
        Error::EntryIo { entry, .. } if entry == "a/bad.txt"
    ));

    let root: PathBuf = dest.path().join("broken");
    assert_eq!(
        files_under(&root),
        BTreeSet::from([
            "a/one.txt".to_string(),
            "a/two.txt".to_string(),
            "b/three.txt".to_string(),
        ])
    );
    assert!(matches!(
        report.into_result(),
        Err(Error::PartialExtraction { failed: 1, total: 4, .. })
    ));
}

#[test]
fn test_direct_read_surfaces_io_error() {
    let archive = BrokenArchive {
        directories: vec![ArchiveDirectory::new("", entries(&["bad.bin", "good.bin"]))],
    };
    assert!(matches!(read_path(&archive, "bad.bin"), Err(Error::EntryIo { .. })));
    assert_eq!(read_path(&archive, "good.bin").unwrap(), b"good.bin");
}
