//! Labelled voxel masks from vertex ROIs.

use std::fmt;
use std::str::FromStr;

use cortex_types::{Hemisphere, VoxelVolume};
use hashbrown::{HashMap, HashSet};
use rayon::prelude::*;
use tracing::{debug, info, warn};

use crate::error::{VolumeError, VolumeResult};
use crate::field::VoxelDistanceField;
use crate::index_map::VertexIndexMap;
use crate::roi::{is_cortex, RoiSource, CORTEX_ROI};

/// How voxels claimed by more than one ROI are resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OverlapPolicy {
    /// Contested voxels are cleared from every ROI.
    #[default]
    Cut,
    /// Contested voxels go to the earliest requested ROI.
    Split,
}

impl OverlapPolicy {
    /// Lower-case policy name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Cut => "cut",
            Self::Split => "split",
        }
    }
}

impl fmt::Display for OverlapPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OverlapPolicy {
    type Err = VolumeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "cut" => Ok(Self::Cut),
            "split" => Ok(Self::Split),
            _ => Err(VolumeError::UnsupportedOverlapPolicy {
                policy: s.to_string(),
            }),
        }
    }
}

/// Parameters for [`rasterize_rois`].
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RoiMaskParams {
    /// Voxels at or beyond this distance from the surface are never labelled.
    pub max_distance: f64,
    /// Resolution of voxels claimed by several ROIs.
    pub overlap: OverlapPolicy,
}

impl Default for RoiMaskParams {
    fn default() -> Self {
        Self {
            max_distance: 2.0,
            overlap: OverlapPolicy::Cut,
        }
    }
}

impl RoiMaskParams {
    /// Set the cortical distance threshold.
    #[must_use]
    pub const fn with_max_distance(mut self, max_distance: f64) -> Self {
        self.max_distance = max_distance;
        self
    }

    /// Set the overlap policy.
    #[must_use]
    pub const fn with_overlap(mut self, overlap: OverlapPolicy) -> Self {
        self.overlap = overlap;
        self
    }
}

/// Signed label volume produced by [`rasterize_rois`].
///
/// Voxel label `0` means unlabelled. ROI `k` (1-based, in request order)
/// is written as `-k` on the left hemisphere and `+k` on the right.
#[derive(Debug, Clone, PartialEq)]
pub struct RoiMasks {
    mask: VoxelVolume<i32>,
    labels: Vec<(String, i32)>,
    cut_count: usize,
    contested_count: usize,
}

impl RoiMasks {
    /// The label volume.
    #[inline]
    #[must_use]
    pub const fn mask(&self) -> &VoxelVolume<i32> {
        &self.mask
    }

    /// Take the label volume.
    #[must_use]
    pub fn into_mask(self) -> VoxelVolume<i32> {
        self.mask
    }

    /// `(name, k)` for every requested ROI, in request order.
    #[must_use]
    pub fn labels(&self) -> &[(String, i32)] {
        &self.labels
    }

    /// Positive label of an ROI.
    #[must_use]
    pub fn label_of(&self, name: &str) -> Option<i32> {
        self.labels
            .iter()
            .find(|(n, _)| n == name)
            .map(|&(_, k)| k)
    }

    /// ROI name to positive label.
    #[must_use]
    pub fn roi_index(&self) -> HashMap<String, i32> {
        self.labels.iter().cloned().collect()
    }

    /// Voxels cleared because several ROIs claimed them.
    #[inline]
    #[must_use]
    pub const fn cut_count(&self) -> usize {
        self.cut_count
    }

    /// Voxels claimed by several ROIs, whatever the policy.
    #[inline]
    #[must_use]
    pub const fn contested_count(&self) -> usize {
        self.contested_count
    }

    /// Number of voxels carrying ROI `name` on `hemisphere`.
    #[must_use]
    pub fn voxel_count(&self, name: &str, hemisphere: Hemisphere) -> usize {
        self.label_of(name).map_or(0, |k| {
            let signed = hemisphere.sign() * k;
            self.mask.count_where(|&v| v == signed)
        })
    }
}

/// One requested ROI after lookup.
enum Candidate {
    Cortex,
    Vertices(Vec<bool>),
}

impl Candidate {
    #[inline]
    fn contains(&self, vertex: usize) -> bool {
        match self {
            Self::Cortex => true,
            Self::Vertices(mask) => mask[vertex],
        }
    }
}

#[derive(Default, Clone, Copy)]
struct Tally {
    cut: usize,
    contested: usize,
}

/// Rasterize ROIs into a signed label volume.
///
/// A voxel is a candidate for an ROI when it lies strictly closer than
/// `params.max_distance` to the surface and its nearest vertex belongs to
/// the ROI. The ROI named `cortex` (any case) claims every such voxel,
/// then yields any voxel another requested ROI also claims. Voxels still
/// claimed by several ROIs are resolved by `params.overlap`.
///
/// When `names` is `None`, every ROI in `rois` is requested in sorted
/// order. ROI vertices are valid-space indices translated by `index_map`.
///
/// # Errors
///
/// - [`VolumeError::RoiNotFound`] if a requested ROI is missing.
/// - [`VolumeError::DuplicateRoi`] if a name is requested twice.
/// - [`VolumeError::InvalidVertexIndex`] if an ROI vertex is outside the
///   valid space.
/// - [`VolumeError::VertexSpaceMismatch`] if `index_map` and `field` index
///   different vertex counts.
pub fn rasterize_rois<S: RoiSource + ?Sized>(
    field: &VoxelDistanceField,
    rois: &S,
    index_map: &VertexIndexMap,
    names: Option<&[&str]>,
    params: &RoiMaskParams,
) -> VolumeResult<RoiMasks> {
    if index_map.full_count() != field.vertex_count() {
        return Err(VolumeError::VertexSpaceMismatch {
            index_map: index_map.full_count(),
            field: field.vertex_count(),
        });
    }

    let requested: Vec<String> = match names {
        Some(list) => list.iter().map(|&s| s.to_string()).collect(),
        None => rois.roi_names(),
    };

    let mut seen = HashSet::new();
    let mut candidates = Vec::with_capacity(requested.len());
    let mut cortex = None;
    for (i, name) in requested.iter().enumerate() {
        let key = if is_cortex(name) {
            CORTEX_ROI.to_string()
        } else {
            name.clone()
        };
        if !seen.insert(key) {
            return Err(VolumeError::DuplicateRoi { name: name.clone() });
        }
        if is_cortex(name) {
            cortex = Some(i);
            candidates.push(Candidate::Cortex);
        } else {
            let vertices = rois
                .roi_vertices(name)
                .ok_or_else(|| VolumeError::roi_not_found(name.as_str()))?;
            candidates.push(Candidate::Vertices(index_map.full_mask(vertices)?));
        }
    }

    info!(
        rois = requested.len(),
        voxels = field.voxel_count(),
        max_distance = params.max_distance,
        overlap = %params.overlap,
        "Rasterizing ROIs"
    );

    let left = field.left_vertex_count();
    let distance = field.distance().as_slice();
    let nearest = field.nearest_vertex().as_slice();

    let (labels, tallies): (Vec<i32>, Vec<Tally>) = distance
        .par_iter()
        .zip(nearest.par_iter())
        .map(|(&d, &vertex)| {
            if d >= params.max_distance {
                return (0, Tally::default());
            }
            let sign = if vertex < left {
                Hemisphere::Left.sign()
            } else {
                Hemisphere::Right.sign()
            };
            label_voxel(&candidates, cortex, vertex, params.overlap, sign)
        })
        .unzip();

    let mut roi_voxels = vec![0_usize; requested.len()];
    let (cut_count, contested_count) =
        labels
            .iter()
            .zip(&tallies)
            .fold((0, 0), |(cut, contested), (&label, tally)| {
                if label != 0 {
                    roi_voxels[roi_slot(label)] += 1;
                }
                (cut + tally.cut, contested + tally.contested)
            });

    if cut_count > 0 {
        info!(cut = cut_count, "{cut_count} voxels cut");
    }
    if params.overlap == OverlapPolicy::Split && contested_count > 0 {
        debug!(contested = contested_count, "Split contested voxels to first ROI");
    }

    for (name, &count) in requested.iter().zip(&roi_voxels) {
        if count == 0 {
            warn!(roi = %name, "ROI has no voxels in the mask");
        }
    }

    let labels_by_name = requested
        .into_iter()
        .zip(1_i32..)
        .collect::<Vec<(String, i32)>>();

    Ok(RoiMasks {
        mask: VoxelVolume::from_vec(field.shape(), labels)?,
        labels: labels_by_name,
        cut_count,
        contested_count,
    })
}

/// Label a single cortical voxel whose nearest vertex is `vertex`.
fn label_voxel(
    candidates: &[Candidate],
    cortex: Option<usize>,
    vertex: usize,
    overlap: OverlapPolicy,
    sign: i32,
) -> (i32, Tally) {
    let mut first = None;
    let mut claims = 0;
    for (i, candidate) in candidates.iter().enumerate() {
        if Some(i) != cortex && candidate.contains(vertex) {
            claims += 1;
            first.get_or_insert(i);
        }
    }

    // Cortex keeps only voxels no other ROI claims.
    if claims == 0 {
        if let Some(c) = cortex {
            first = Some(c);
            claims = 1;
        }
    }

    let Some(first) = first else {
        return (0, Tally::default());
    };
    if claims == 1 {
        return (sign * label_of(first), Tally::default());
    }

    match overlap {
        OverlapPolicy::Cut => (
            0,
            Tally {
                cut: 1,
                contested: 1,
            },
        ),
        OverlapPolicy::Split => (
            sign * label_of(first),
            Tally {
                cut: 0,
                contested: 1,
            },
        ),
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
const fn label_of(index: usize) -> i32 {
    index as i32 + 1
}

/// Request-order slot of a nonzero voxel label.
#[inline]
const fn roi_slot(label: i32) -> usize {
    label.unsigned_abs() as usize - 1
}
