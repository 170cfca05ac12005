use super::version::VersionRecord;

/// All versions found in one repository, highest first once sorted
///
/// Duplicates are kept; their relative order comes from the commit-time
/// tie-break in [`VersionRecord::precedence`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VersionCollection {
    versions: Vec<VersionRecord>,
}

impl VersionCollection {
    pub fn new() -> Self {
        VersionCollection::default()
    }

    /// Append a record; call [`sort_descending`](Self::sort_descending) afterwards
    pub fn add(&mut self, record: VersionRecord) {
        self.versions.push(record);
    }

    /// Stable sort, highest version first
    pub fn sort_descending(&mut self) {
        self.versions.sort_by(|a, b| b.precedence(a));
    }

    /// The highest version, or the `v0.0.0` sentinel when there is none
    pub fn highest(&self) -> VersionRecord {
        self.versions
            .first()
            .cloned()
            .unwrap_or_else(VersionRecord::sentinel)
    }

    /// Keep only the first `len` records
    pub fn truncate(&mut self, len: usize) {
        self.versions.truncate(len);
    }

    pub fn len(&self) -> usize {
        self.versions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.versions.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, VersionRecord> {
        self.versions.iter()
    }

    pub fn as_slice(&self) -> &[VersionRecord] {
        &self.versions
    }
}

impl FromIterator<VersionRecord> for VersionCollection {
    /// Collects and sorts
    fn from_iter<I: IntoIterator<Item = VersionRecord>>(iter: I) -> Self {
        let mut collection = VersionCollection {
            versions: iter.into_iter().collect(),
        };
        collection.sort_descending();
        collection
    }
}

impl<'a> IntoIterator for &'a VersionCollection {
    type Item = &'a VersionRecord;
    type IntoIter = std::slice::Iter<'a, VersionRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.versions.iter()
    }
}
