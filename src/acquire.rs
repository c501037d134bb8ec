use std::{
    fs,
    path::{Path, PathBuf},
    sync::Arc,
};

use anyhow::{anyhow, Result};
use eframe::egui;
use walkdir::WalkDir;

use crate::store::{ImageSource, NewImage};

pub const SUPPORTED_EXTENSIONS: &[&str] = &[
    "png", "jpg", "jpeg", "bmp", "gif", "webp", "tiff", "tif", "ico",
];

/// Display label for items whose source carries no usable name.
pub const DEFAULT_NAME: &str = "Unnamed image";

/// A single item from a pick or drop, before acceptance. Native drops and
/// the file dialog yield paths; some window systems deliver the payload
/// as in-memory bytes with a MIME hint instead.
#[derive(Debug, Clone)]
pub enum DroppedItem {
    Path(PathBuf),
    Bytes {
        name: String,
        mime: String,
        bytes: Arc<[u8]>,
    },
}

impl DroppedItem {
    /// Adapts an egui drop event. Returns `None` when the event carries
    /// neither a path nor a byte payload, which leaves nothing to stage.
    pub fn from_egui(file: egui::DroppedFile) -> Option<Self> {
        if let Some(path) = file.path {
            return Some(Self::Path(path));
        }
        let bytes = file.bytes?;
        Some(Self::Bytes {
            name: file.name,
            mime: file.mime,
            bytes,
        })
    }
}

pub fn is_supported_image(path: &Path) -> bool {
    matches!(
        path.extension()
            .and_then(|ext| ext.to_str())
            .map(|s| s.to_ascii_lowercase()),
        Some(ref ext) if SUPPORTED_EXTENSIONS.contains(&ext.as_str())
    )
}

pub fn is_image_mime(mime: &str) -> bool {
    mime.starts_with("image/")
}

/// Expands a mixed list of files and directories into candidate files.
/// Plain files keep their input order; directory contents are walked in
/// file-name order so staging is deterministic. No type filtering happens
/// here, that is `accept_items`' job.
pub fn collect_paths(inputs: &[PathBuf], recursive: bool) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for input in inputs {
        if !input.exists() {
            return Err(anyhow!("{} does not exist", input.display()));
        }
        if input.is_dir() {
            let max_depth = if recursive { usize::MAX } else { 1 };
            for entry in WalkDir::new(input)
                .follow_links(false)
                .max_depth(max_depth)
                .sort_by_file_name()
                .into_iter()
                .filter_map(|e| e.ok())
            {
                if entry.file_type().is_file() {
                    files.push(entry.path().to_path_buf());
                }
            }
        } else {
            files.push(input.clone());
        }
    }
    Ok(files)
}

/// Turns picked/dropped items into store entries, one per accepted item
/// and in the given order. Items whose declared type is not an image are
/// silently skipped; that is policy, not an error.
pub fn accept_items(items: Vec<DroppedItem>) -> Vec<NewImage> {
    items.into_iter().filter_map(new_image).collect()
}

fn new_image(item: DroppedItem) -> Option<NewImage> {
    match item {
        DroppedItem::Path(path) => {
            if !is_supported_image(&path) {
                return None;
            }
            let name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| DEFAULT_NAME.to_string());
            let size = fs::metadata(&path).ok().map(|m| m.len());
            let kind = path
                .extension()
                .and_then(|ext| ext.to_str())
                .map(|ext| ext.to_ascii_lowercase());
            Some(NewImage {
                name,
                source: ImageSource::Path(path),
                size,
                kind,
            })
        }
        DroppedItem::Bytes { name, mime, bytes } => {
            if !is_image_mime(&mime) {
                return None;
            }
            let name = if name.is_empty() {
                DEFAULT_NAME.to_string()
            } else {
                name
            };
            Some(NewImage {
                name,
                size: Some(bytes.len() as u64),
                kind: Some(mime),
                source: ImageSource::Memory(bytes),
            })
        }
    }
}
