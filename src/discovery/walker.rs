use log::warn;

use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};

use crate::core::error::{HrefsUpError, Result};
use crate::core::types::Document;

/// Expand files and directories into the documents to check.
///
/// Directories are walked with `ignore`, skipping hidden entries and
/// anything git ignores. Only files whose extension is in `extensions` are
/// kept. Entries the walk cannot visit and files that cannot be read are
/// logged and skipped. The result is sorted by path and free of duplicates.
///
/// Only a path that does not exist at all is an error.
pub fn collect_documents<P: AsRef<Path>>(paths: &[P], extensions: &[String]) -> Result<Vec<Document>> {
    let mut files = Vec::new();

    for path in paths {
        let path = path.as_ref();
        if path.is_file() {
            if has_extension(path, extensions) {
                files.push(path.to_path_buf());
            }
        } else if path.is_dir() {
            let mut builder = ignore::WalkBuilder::new(path);
            builder.hidden(true);

            let walked = builder.build().map(|entry| entry.map(ignore::DirEntry::into_path));
            files.extend(keep_walked_files(walked, extensions));
        } else {
            return Err(HrefsUpError::FileNotFound(path.display().to_string()));
        }
    }

    files.sort();
    files.dedup();

    let mut documents = Vec::with_capacity(files.len());
    for file in files {
        match read_document_text(&file) {
            Ok(content) => documents.push(Document::new(file, content)),
            Err(err) => warn!("Skipping unreadable file {}: {err}", file.display()),
        }
    }

    Ok(documents)
}

/// Files among `walked` with a wanted extension; walk errors are logged and skipped.
fn keep_walked_files<I>(walked: I, extensions: &[String]) -> Vec<PathBuf>
where
    I: IntoIterator<Item = std::result::Result<PathBuf, ignore::Error>>,
{
    walked
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(path) => Some(path),
            Err(err) => {
                warn!("Skipping unreadable entry: {err}");
                None
            }
        })
        .filter(|path| path.is_file() && has_extension(path, extensions))
        .collect()
}

/// Read a file as UTF-8, falling back to Latin-1 for undecodable bytes.
pub fn read_document_text(path: &Path) -> io::Result<String> {
    let bytes = fs::read(path)?;
    match String::from_utf8(bytes) {
        Ok(text) => Ok(text),
        Err(err) => Ok(decode_latin1(err.as_bytes())),
    }
}

fn decode_latin1(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| char::from(b)).collect()
}

fn has_extension(path: &Path, extensions: &[String]) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| extensions.iter().any(|wanted| wanted.eq_ignore_ascii_case(ext)))
}

/// The paths to scan: the given ones, or the whole root when none are given.
pub fn scan_paths(paths: &[PathBuf], root: &Path) -> Vec<PathBuf> {
    if paths.is_empty() {
        vec![root.to_path_buf()]
    } else {
        paths.to_vec()
    }
}

/// `path` as shown in reports: relative to `root` when it lies inside it,
/// otherwise as given. Leading `./` components are dropped either way.
pub fn relative_to(path: &Path, root: &Path) -> PathBuf {
    let path = without_current_dir(path);
    let root = without_current_dir(root);
    if root.as_os_str().is_empty() {
        return path;
    }
    match path.strip_prefix(&root) {
        Ok(relative) if !relative.as_os_str().is_empty() => relative.to_path_buf(),
        _ => path,
    }
}

fn without_current_dir(path: &Path) -> PathBuf {
    path.components()
        .filter(|component| !matches!(component, Component::CurDir))
        .collect()
}
