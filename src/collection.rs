//! Ordered collection of labeled image entries
//!
//! Collection order is load-bearing: it is the order files and class names are
//! sent in, and the two are paired purely by position.

use url::Url;

use crate::capabilities::FileHandle;
use crate::error::{Error, Result};
use crate::types::EntrySnapshot;

/// One ingested image plus its editable class label
#[derive(Clone, Debug)]
pub struct FileEntry {
    payload: FileHandle,
    class_name: String,
    preview: Option<Url>,
}

impl FileEntry {
    /// Wrap an ingested file with an empty class name
    pub fn new(payload: FileHandle) -> Self {
        Self {
            payload,
            class_name: String::new(),
            preview: None,
        }
    }

    /// The underlying file
    pub fn payload(&self) -> &FileHandle {
        &self.payload
    }

    /// File name as ingested
    pub fn display_name(&self) -> &str {
        self.payload.name()
    }

    /// File size in bytes as ingested
    pub fn size_bytes(&self) -> u64 {
        self.payload.size_bytes()
    }

    /// Class label, verbatim as typed
    pub fn class_name(&self) -> &str {
        &self.class_name
    }

    /// Temporary preview URL, if one was published
    pub fn preview(&self) -> Option<&Url> {
        self.preview.as_ref()
    }

    pub(crate) fn set_preview(&mut self, preview: Option<Url>) {
        self.preview = preview;
    }

    pub(crate) fn take_preview(&mut self) -> Option<Url> {
        self.preview.take()
    }
}

/// Ordered sequence of [`FileEntry`]
///
/// No operation leaves a gap or duplicates an entry.
#[derive(Clone, Debug, Default)]
pub struct EntryCollection {
    entries: Vec<FileEntry>,
}

impl EntryCollection {
    /// Create an empty collection
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the collection has no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entry at `index`
    pub fn get(&self, index: usize) -> Option<&FileEntry> {
        self.entries.get(index)
    }

    /// Entries in collection order
    pub fn iter(&self) -> std::slice::Iter<'_, FileEntry> {
        self.entries.iter()
    }

    pub(crate) fn iter_mut(&mut self) -> std::slice::IterMut<'_, FileEntry> {
        self.entries.iter_mut()
    }

    /// Append each file as a new entry with an empty class name, in order
    ///
    /// Returns the index of the first appended entry.
    pub fn append(&mut self, files: impl IntoIterator<Item = FileHandle>) -> usize {
        let first = self.entries.len();
        self.entries.extend(files.into_iter().map(FileEntry::new));
        first
    }

    /// Remove the entry at `index`, shifting later entries one position earlier
    pub fn remove(&mut self, index: usize) -> Result<FileEntry> {
        self.check_index(index)?;
        Ok(self.entries.remove(index))
    }

    /// Overwrite the class name of the entry at `index`
    ///
    /// The value is stored verbatim; trimming only happens at validation.
    pub fn set_class_name(&mut self, index: usize, value: impl Into<String>) -> Result<()> {
        self.check_index(index)?;
        self.entries[index].class_name = value.into();
        Ok(())
    }

    /// Splice-move: remove the entry at `source`, then insert it at `target`
    /// of the already-shortened sequence
    ///
    /// Moving 0 to 2 in `[A, B, C, D]` yields `[B, C, A, D]`; moving 3 to 0
    /// yields `[D, A, B, C]`. `source == target` is a no-op.
    pub fn move_entry(&mut self, source: usize, target: usize) -> Result<()> {
        self.check_index(source)?;
        self.check_index(target)?;
        if source == target {
            return Ok(());
        }

        let entry = self.entries.remove(source);
        // target < original len, so target <= shortened len
        self.entries.insert(target, entry);
        Ok(())
    }

    /// Read-only views of every entry, for rendering
    pub fn snapshots(&self) -> Vec<EntrySnapshot> {
        self.entries
            .iter()
            .enumerate()
            .map(|(index, entry)| EntrySnapshot {
                index,
                display_name: entry.display_name().to_string(),
                size_bytes: entry.size_bytes(),
                class_name: entry.class_name.clone(),
                preview: entry.preview.clone(),
            })
            .collect()
    }

    fn check_index(&self, index: usize) -> Result<()> {
        if index < self.entries.len() {
            Ok(())
        } else {
            Err(Error::IndexOutOfRange {
                index,
                len: self.entries.len(),
            })
        }
    }
}

impl<'a> IntoIterator for &'a EntryCollection {
    type Item = &'a FileEntry;
    type IntoIter = std::slice::Iter<'a, FileEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

// unwrap/expect are acceptable in tests for concise failure-on-error assertions
#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;

    fn file(name: &str) -> FileHandle {
        FileHandle::from_bytes(name, "image/jpeg", name.as_bytes().to_vec())
    }

    fn collection(names: &[&str]) -> EntryCollection {
        let mut c = EntryCollection::new();
        c.append(names.iter().map(|n| file(n)));
        c
    }

    fn names(c: &EntryCollection) -> Vec<&str> {
        c.iter().map(|e| e.display_name()).collect()
    }

    #[test]
    fn append_keeps_order_and_starts_unlabeled() {
        let mut c = collection(&["a.jpg", "b.jpg"]);
        let first = c.append([file("c.jpg"), file("d.jpg")]);

        assert_eq!(first, 2);
        assert_eq!(names(&c), vec!["a.jpg", "b.jpg", "c.jpg", "d.jpg"]);
        assert!(c.iter().all(|e| e.class_name().is_empty()));
        assert_eq!(c.get(0).unwrap().size_bytes(), 5);
    }

    #[test]
    fn append_nothing_is_harmless() {
        let mut c = collection(&["a.jpg"]);
        c.append(Vec::new());
        assert_eq!(c.len(), 1);
    }

    #[test]
    fn remove_shifts_later_entries() {
        let mut c = collection(&["a", "b", "c", "d"]);
        let removed = c.remove(1).unwrap();

        assert_eq!(removed.display_name(), "b");
        assert_eq!(names(&c), vec!["a", "c", "d"]);
    }

    #[test]
    fn remove_out_of_range() {
        let mut c = collection(&["a"]);
        assert!(matches!(
            c.remove(1),
            Err(Error::IndexOutOfRange { index: 1, len: 1 })
        ));
        assert_eq!(c.len(), 1);

        let mut empty = EntryCollection::new();
        assert!(empty.remove(0).is_err());
    }

    #[test]
    fn append_remove_sequence_preserves_net_length_and_order() {
        let mut c = EntryCollection::new();
        c.append([file("a"), file("b"), file("c")]);
        c.remove(0).unwrap();
        c.append([file("d")]);
        c.remove(1).unwrap();
        c.append([file("e"), file("f")]);
        c.remove(3).unwrap();

        // 6 added, 3 removed
        assert_eq!(c.len(), 3);
        assert_eq!(names(&c), vec!["b", "d", "e"]);
    }

    #[test]
    fn set_class_name_touches_only_target() {
        let mut c = collection(&["a", "b", "c"]);
        c.set_class_name(0, "cat").unwrap();
        c.set_class_name(1, "  dog ").unwrap();

        let labels: Vec<_> = c.iter().map(|e| e.class_name()).collect();
        assert_eq!(labels, vec!["cat", "  dog ", ""]);

        c.set_class_name(0, "").unwrap();
        let labels: Vec<_> = c.iter().map(|e| e.class_name()).collect();
        assert_eq!(labels, vec!["", "  dog ", ""]);
    }

    #[test]
    fn set_class_name_out_of_range() {
        let mut c = collection(&["a"]);
        assert!(matches!(
            c.set_class_name(3, "x"),
            Err(Error::IndexOutOfRange { index: 3, len: 1 })
        ));
        assert_eq!(c.get(0).unwrap().class_name(), "");
    }

    #[test]
    fn move_toward_larger_index_lands_in_shortened_slot() {
        let mut c = collection(&["A", "B", "C", "D"]);
        c.move_entry(0, 2).unwrap();
        assert_eq!(names(&c), vec!["B", "C", "A", "D"]);
    }

    #[test]
    fn move_toward_smaller_index() {
        let mut c = collection(&["A", "B", "C", "D"]);
        c.move_entry(3, 0).unwrap();
        assert_eq!(names(&c), vec!["D", "A", "B", "C"]);

        let mut c = collection(&["A", "B", "C", "D"]);
        c.move_entry(2, 1).unwrap();
        assert_eq!(names(&c), vec!["A", "C", "B", "D"]);
    }

    #[test]
    fn move_first_to_last() {
        let mut c = collection(&["A", "B", "C", "D"]);
        c.move_entry(0, 3).unwrap();
        assert_eq!(names(&c), vec!["B", "C", "D", "A"]);
    }

    #[test]
    fn move_same_index_is_noop() {
        let mut c = collection(&["A", "B", "C"]);
        for i in 0..3 {
            c.move_entry(i, i).unwrap();
        }
        assert_eq!(names(&c), vec!["A", "B", "C"]);
    }

    #[test]
    fn move_carries_class_name_with_entry() {
        let mut c = collection(&["A", "B", "C"]);
        c.set_class_name(0, "first").unwrap();
        c.move_entry(0, 2).unwrap();

        let last = c.get(2).unwrap();
        assert_eq!(last.display_name(), "A");
        assert_eq!(last.class_name(), "first");
    }

    #[test]
    fn move_is_a_permutation_for_every_valid_pair() {
        let original = ["A", "B", "C", "D", "E"];
        for source in 0..original.len() {
            for target in 0..original.len() {
                let mut c = collection(&original);
                c.move_entry(source, target).unwrap();

                assert_eq!(c.len(), original.len());
                assert_eq!(c.get(target).unwrap().display_name(), original[source]);

                let mut sorted = names(&c);
                sorted.sort_unstable();
                assert_eq!(sorted, original.to_vec());
            }
        }
    }

    #[test]
    fn move_out_of_range_leaves_collection_alone() {
        let mut c = collection(&["A", "B"]);
        assert!(c.move_entry(2, 0).is_err());
        assert!(c.move_entry(0, 2).is_err());
        assert_eq!(names(&c), vec!["A", "B"]);
    }

    #[test]
    fn snapshots_reflect_positions() {
        let mut c = collection(&["a.jpg", "b.jpg"]);
        c.set_class_name(1, "bird").unwrap();

        let snaps = c.snapshots();
        assert_eq!(snaps.len(), 2);
        assert_eq!(snaps[1].index, 1);
        assert_eq!(snaps[1].display_name, "b.jpg");
        assert_eq!(snaps[1].class_name, "bird");
        assert!(snaps[0].preview.is_none());
    }
}
