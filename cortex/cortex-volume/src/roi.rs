//! Named ROI vertex sets.

use hashbrown::HashMap;

use crate::error::{VolumeError, VolumeResult};

/// Name of the implicit whole-cortex ROI, matched case-insensitively.
pub const CORTEX_ROI: &str = "cortex";

/// Whether `name` refers to the whole-cortex ROI.
#[inline]
#[must_use]
pub fn is_cortex(name: &str) -> bool {
    name.eq_ignore_ascii_case(CORTEX_ROI)
}

/// A provider of ROI definitions in valid-vertex index space.
///
/// Implemented by [`RoiSet`]; implement it directly to rasterize ROIs held
/// in another store without copying them.
pub trait RoiSource {
    /// Names of every stored ROI.
    fn roi_names(&self) -> Vec<String>;

    /// Valid-vertex indices of an ROI, or `None` if it is not stored.
    fn roi_vertices(&self, name: &str) -> Option<&[usize]>;
}

/// In-memory collection of named ROIs.
///
/// # Example
///
/// ```
/// use cortex_volume::{RoiSet, RoiSource};
///
/// let mut rois = RoiSet::new();
/// rois.insert("V1", vec![0, 1, 2]);
/// rois.insert("MT", vec![7, 8]);
///
/// assert_eq!(rois.roi_names(), vec!["MT", "V1"]);
/// assert_eq!(rois.roi_vertices("MT"), Some(&[7, 8][..]));
/// ```
#[derive(Debug, Clone, Default)]
pub struct RoiSet {
    rois: HashMap<String, Vec<usize>>,
}

impl RoiSet {
    /// Create an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace an ROI, returning the vertices it replaced.
    pub fn insert(&mut self, name: impl Into<String>, vertices: Vec<usize>) -> Option<Vec<usize>> {
        self.rois.insert(name.into(), vertices)
    }

    /// Add an ROI, returning an error if the name is taken.
    ///
    /// # Errors
    ///
    /// Returns [`VolumeError::DuplicateRoi`] if an ROI with the same name exists.
    pub fn insert_unique(&mut self, name: impl Into<String>, vertices: Vec<usize>) -> VolumeResult<()> {
        let name = name.into();
        if self.rois.contains_key(&name) {
            return Err(VolumeError::DuplicateRoi { name });
        }
        self.rois.insert(name, vertices);
        Ok(())
    }

    /// Vertices of an ROI.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&[usize]> {
        self.rois.get(name).map(Vec::as_slice)
    }

    /// Remove an ROI.
    pub fn remove(&mut self, name: &str) -> Option<Vec<usize>> {
        self.rois.remove(name)
    }

    /// Whether an ROI is stored under `name`.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.rois.contains_key(name)
    }

    /// Number of ROIs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rois.len()
    }

    /// Whether the set is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rois.is_empty()
    }

    /// Iterate over `(name, vertices)` in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[usize])> {
        self.rois.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    /// Look up several ROIs at once, in the order given.
    ///
    /// # Errors
    ///
    /// Returns [`VolumeError::RoiNotFound`] for the first missing name.
    pub fn select<'a>(&'a self, names: &[&'a str]) -> VolumeResult<Vec<(&'a str, &'a [usize])>> {
        names
            .iter()
            .map(|&name| {
                self.get(name)
                    .map(|v| (name, v))
                    .ok_or_else(|| VolumeError::roi_not_found(name))
            })
            .collect()
    }
}

impl RoiSource for RoiSet {
    fn roi_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.rois.keys().cloned().collect();
        names.sort_unstable();
        names
    }

    fn roi_vertices(&self, name: &str) -> Option<&[usize]> {
        self.get(name)
    }
}

impl<S: Into<String>> FromIterator<(S, Vec<usize>)> for RoiSet {
    fn from_iter<I: IntoIterator<Item = (S, Vec<usize>)>>(iter: I) -> Self {
        Self {
            rois: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn cortex_name_is_case_insensitive() {
        assert!(is_cortex("cortex"));
        assert!(is_cortex("Cortex"));
        assert!(is_cortex("CORTEX"));
        assert!(!is_cortex("cortex2"));
    }

    #[test]
    fn insert_unique_rejects_duplicates() {
        let mut rois = RoiSet::new();
        rois.insert_unique("V1", vec![1]).unwrap();
        assert!(matches!(
            rois.insert_unique("V1", vec![2]),
            Err(VolumeError::DuplicateRoi { .. })
        ));
        assert_eq!(rois.get("V1"), Some(&[1][..]));
    }

    #[test]
    fn select_preserves_order_and_reports_missing() {
        let rois: RoiSet = [("a", vec![0]), ("b", vec![1, 2])].into_iter().collect();

        let picked = rois.select(&["b", "a"]).unwrap();
        assert_eq!(picked[0].0, "b");
        assert_eq!(picked[1].1, &[0]);

        let err = rois.select(&["a", "nope"]).unwrap_err();
        assert!(matches!(err, VolumeError::RoiNotFound { ref name } if name == "nope"));
    }

    #[test]
    fn names_are_sorted() {
        let rois: RoiSet = [("z", Vec::<usize>::new()), ("m", vec![3]), ("a", vec![1])]
            .into_iter()
            .collect();
        assert_eq!(rois.roi_names(), vec!["a", "m", "z"]);
        assert_eq!(rois.len(), 3);
    }
}
