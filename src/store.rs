use std::{fmt, path::PathBuf, sync::Arc};

use eframe::egui;

/// Opaque identifier for a staged image. Issued by the store from a
/// monotonically increasing counter, so an id is never reused within a
/// session even when file names collide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RecordId(u64);

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Where the image bytes come from. Dropped files arrive as paths on
/// native platforms and as in-memory buffers when the window system
/// delivers the payload directly.
#[derive(Debug, Clone)]
pub enum ImageSource {
    Path(PathBuf),
    Memory(Arc<[u8]>),
}

/// Decode state of a record. Records are appended in `Loading` state and
/// flip to `Ready` or `Failed` when the background decoder reports back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadPhase {
    Loading,
    Ready,
    Failed(String),
}

/// Metadata for an image about to enter the store, produced by acquisition.
#[derive(Debug, Clone)]
pub struct NewImage {
    pub name: String,
    pub source: ImageSource,
    pub size: Option<u64>,
    pub kind: Option<String>,
}

/// One staged image. The texture handles are the record's owned display
/// resources: dropping the record drops them, which releases the GPU
/// textures. Removal from the store is therefore the release point and no
/// caller has to remember a separate revoke step.
pub struct ImageRecord {
    pub id: RecordId,
    pub name: String,
    pub source: ImageSource,
    pub size: Option<u64>,
    pub kind: Option<String>,
    pub phase: LoadPhase,
    pub texture: Option<egui::TextureHandle>,
    pub thumbnail: Option<egui::TextureHandle>,
    pub dimensions: Option<(u32, u32)>,
}

/// In-memory session store: the ordered list of staged images plus the
/// lightbox selection. All mutation goes through `add`, `remove`, `open`
/// and `close`; nothing is ever persisted.
#[derive(Default)]
pub struct ImageStore {
    records: Vec<ImageRecord>,
    selected: Option<RecordId>,
    next_id: u64,
}

impl ImageStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a record and issues its id. Insertion order is the only
    /// order the store ever presents.
    pub fn add(&mut self, new: NewImage) -> RecordId {
        let id = RecordId(self.next_id);
        self.next_id += 1;
        self.records.push(ImageRecord {
            id,
            name: new.name,
            source: new.source,
            size: new.size,
            kind: new.kind,
            phase: LoadPhase::Loading,
            texture: None,
            thumbnail: None,
            dimensions: None,
        });
        id
    }

    /// Removes exactly the record with `id`. Unknown ids are a no-op, so
    /// the operation is idempotent. Removing the record that the lightbox
    /// currently shows also closes the lightbox, and dropping the record
    /// drops its texture handles.
    pub fn remove(&mut self, id: RecordId) -> bool {
        let Some(index) = self.records.iter().position(|record| record.id == id) else {
            return false;
        };
        self.records.remove(index);
        if self.selected == Some(id) {
            self.selected = None;
        }
        true
    }

    /// Opens the lightbox on `id`, replacing any current selection.
    /// Ignored when the id does not name a live record.
    pub fn open(&mut self, id: RecordId) -> bool {
        if self.records.iter().any(|record| record.id == id) {
            self.selected = Some(id);
            true
        } else {
            false
        }
    }

    pub fn close(&mut self) {
        self.selected = None;
    }

    pub fn selected(&self) -> Option<RecordId> {
        self.selected
    }

    pub fn selected_record(&self) -> Option<&ImageRecord> {
        self.selected.and_then(|id| self.get(id))
    }

    pub fn get(&self, id: RecordId) -> Option<&ImageRecord> {
        self.records.iter().find(|record| record.id == id)
    }

    pub fn get_mut(&mut self, id: RecordId) -> Option<&mut ImageRecord> {
        self.records.iter_mut().find(|record| record.id == id)
    }

    pub fn records(&self) -> &[ImageRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
