//! Batch extraction of archive directories to disk

use std::io;
use std::path::{Component, Path, PathBuf};

use crate::archive::{Archive, ArchiveDirectory, ArchiveEntry};
use crate::error::Error;
use crate::tree::segment;

use super::options::ExtractionOptions;
use super::types::{ExtractionFailure, ExtractionProgress, ExtractionReport, ProgressCallback};

/// Extract the selected directories of an archive.
///
/// See [`extract_with_progress`].
pub fn extract<A: Archive>(archive: &A, options: &ExtractionOptions) -> ExtractionReport {
    extract_with_progress(archive, options, &|_| {})
}

/// Extract the selected directories of an archive with a progress callback.
///
/// Directories are visited in archive order. Each entry is written to
/// `<destination>/<archive base name>/<directory path>/<entry name>`, replacing
/// whatever is there. The callback fires once per finished directory and a
/// final time with [`ExtractionProgress::idle`], even when nothing was
/// selected.
///
/// Failures never stop the run: a directory whose folder cannot be created is
/// skipped, an entry that cannot be written is recorded and its siblings are
/// still written. Everything that went wrong is listed in
/// [`ExtractionReport::failures`].
pub fn extract_with_progress<A: Archive>(
    archive: &A,
    options: &ExtractionOptions,
    progress: ProgressCallback,
) -> ExtractionReport {
    let output_root = options.output_root(archive.base_name());
    let selected: Vec<_> = archive
        .directories()
        .iter()
        .filter(|d| options.selection.matches(&d.path))
        .collect();
    let total = selected.len();

    tracing::info!(
        "Extracting {} of {} directories from {} to {}",
        total,
        archive.directories().len(),
        archive.file_name(),
        output_root.display()
    );

    let mut report = ExtractionReport {
        output_root,
        directories_selected: total,
        ..ExtractionReport::default()
    };

    for (idx, directory) in selected.into_iter().enumerate() {
        extract_directory(directory, options, &mut report);
        report.directories_processed += 1;
        progress(&ExtractionProgress::directory_done(idx + 1, total, &directory.path));
    }

    progress(&ExtractionProgress::idle());

    if report.is_complete() {
        tracing::info!("Extracted {} files", report.files_written);
    } else {
        tracing::warn!(
            "Extracted {} files, {} failures",
            report.files_written,
            report.failures.len()
        );
    }

    report
}

fn extract_directory<E: ArchiveEntry>(
    directory: &ArchiveDirectory<E>,
    options: &ExtractionOptions,
    report: &mut ExtractionReport,
) {
    let folder = match destination_folder(&report.output_root, &directory.path) {
        Ok(folder) => folder,
        Err(error) => {
            tracing::warn!("Skipping directory {:?}: {}", directory.path, error);
            report.failures.push(ExtractionFailure {
                directory: directory.path.clone(),
                entry: None,
                error,
            });
            return;
        }
    };

    if let Err(source) = std::fs::create_dir_all(&folder) {
        tracing::warn!("Cannot create {}: {}", folder.display(), source);
        report.failures.push(ExtractionFailure {
            directory: directory.path.clone(),
            entry: None,
            error: Error::DestinationUnavailable { path: folder, source },
        });
        return;
    }

    for entry in &directory.entries {
        let name = entry.full_name();
        let Some(dest) = join_relative(&folder, name) else {
            report.failures.push(ExtractionFailure {
                directory: directory.path.clone(),
                entry: Some(name.to_string()),
                error: escapes_destination(folder.join(name)),
            });
            continue;
        };

        if options.skip_existing && dest.exists() {
            report.files_skipped += 1;
            continue;
        }

        match entry.write_to(&dest) {
            Ok(()) => report.files_written += 1,
            Err(source) => {
                tracing::warn!("Failed to write {}: {}", dest.display(), source);
                report.failures.push(ExtractionFailure {
                    directory: directory.path.clone(),
                    entry: Some(name.to_string()),
                    error: Error::EntryIo {
                        entry: directory.entry_path(name),
                        source,
                    },
                });
            }
        }
    }
}

/// Folder that mirrors archive directory `path` under `output_root`.
fn destination_folder(output_root: &Path, path: &str) -> Result<PathBuf, Error> {
    let mut folder = output_root.to_path_buf();
    for part in segment::segment(path)? {
        folder = join_relative(&folder, part)
            .ok_or_else(|| escapes_destination(output_root.join(path)))?;
    }
    Ok(folder)
}

/// Join a name from the archive onto `base`, refusing anything that could
/// leave `base` (absolute paths, drive prefixes, `..`) or that names `base`
/// itself (`""`, `.`).
fn join_relative(base: &Path, name: &str) -> Option<PathBuf> {
    let mut out = base.to_path_buf();
    let mut named = false;
    for component in Path::new(name).components() {
        match component {
            Component::Normal(part) => {
                out.push(part);
                named = true;
            }
            Component::CurDir => {}
            Component::ParentDir | Component::RootDir | Component::Prefix(_) => return None,
        }
    }
    named.then_some(out)
}

fn escapes_destination(path: PathBuf) -> Error {
    Error::DestinationUnavailable {
        path,
        source: io::Error::new(
            io::ErrorKind::InvalidInput,
            "path does not name a location inside the destination",
        ),
    }
}
