use crate::shared::frame::Frame;

/// A labeled reference face crop.
#[derive(Clone, Debug)]
pub struct GalleryEntry {
    pub crop: Frame,
    pub label: String,
}

/// Reference faces in load order. Matching is order-dependent, so the
/// order entries were added in is preserved.
#[derive(Clone, Debug, Default)]
pub struct Gallery {
    entries: Vec<GalleryEntry>,
}

impl Gallery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, label: impl Into<String>, crop: Frame) {
        self.entries.push(GalleryEntry {
            crop,
            label: label.into(),
        });
    }

    pub fn entries(&self) -> &[GalleryEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.label.as_str())
    }
}
