//! Areal distortion.

use cortex_types::SurfacePair;
use tracing::{debug, warn};

/// Per-vertex log ratio of flat to fiducial area.
///
/// Triangles come from the flat surface, so vertices cut from the flatmap
/// touch no triangle. For each vertex the flat and fiducial areas of its
/// triangles are summed separately and `ln(flat / fiducial)` is returned.
/// Ratios that are zero or not finite (no triangles, zero-area triangles)
/// are replaced by 1, giving a distortion of 0.
///
/// # Example
///
/// ```
/// use cortex_distortion::areal_distortion;
/// use cortex_types::{Point3, Surface, SurfacePair};
///
/// let fiducial = Surface::from_parts(
///     vec![Point3::new(0.0, 0.0, 0.0), Point3::new(1.0, 0.0, 0.0), Point3::new(0.0, 1.0, 0.0)],
///     vec![[0, 1, 2]],
/// );
/// // Flat copy scaled by 2 in each direction: four times the area.
/// let flat = Surface::from_parts(
///     vec![Point3::new(0.0, 0.0, 0.0), Point3::new(2.0, 0.0, 0.0), Point3::new(0.0, 2.0, 0.0)],
///     vec![[0, 1, 2]],
/// );
/// let pair = SurfacePair::new(fiducial, flat).unwrap();
///
/// let d = areal_distortion(&pair);
/// assert!((d[0] - 4.0_f64.ln()).abs() < 1e-12);
/// ```
#[must_use]
pub fn areal_distortion(pair: &SurfacePair) -> Vec<f64> {
    let fiducial = pair.fiducial();
    let flat = pair.flat();
    let n = pair.vertex_count();

    let mut flat_area = vec![0.0; n];
    let mut fiducial_area = vec![0.0; n];
    let mut degenerate = 0_usize;

    for &tri in &flat.triangles {
        let a_flat = flat.triangle_area(tri);
        let a_fid = fiducial.triangle_area(tri);
        if a_flat <= 0.0 || a_fid <= 0.0 {
            degenerate += 1;
        }
        for i in tri {
            flat_area[i as usize] += a_flat;
            fiducial_area[i as usize] += a_fid;
        }
    }

    if degenerate > 0 {
        warn!(degenerate, "Zero-area triangles in areal distortion");
    }
    debug!(
        vertices = n,
        triangles = flat.triangle_count(),
        "Computed areal distortion"
    );

    flat_area
        .iter()
        .zip(&fiducial_area)
        .map(|(&f, &g)| {
            let ratio = f / g;
            if ratio.is_finite() && ratio > 0.0 {
                ratio.ln()
            } else {
                0.0
            }
        })
        .collect()
}
