//! Raw per-vertex curvature estimators.

use cortex_types::{Point3, Surface, Vector3};
use tracing::warn;

use crate::error::{CurvatureError, CurvatureResult};

/// Produces one raw curvature value per surface vertex.
///
/// Any `Fn(&Surface) -> Vec<f64>` is an estimator, so curvature computed
/// elsewhere can be plugged in as a closure.
pub trait CurvatureEstimator {
    /// Estimate curvature at every vertex of `surface`.
    ///
    /// # Errors
    ///
    /// Returns an error if the surface is malformed or the estimate does not
    /// cover every vertex.
    fn estimate(&self, surface: &Surface) -> CurvatureResult<Vec<f64>>;
}

impl<F> CurvatureEstimator for F
where
    F: Fn(&Surface) -> Vec<f64>,
{
    fn estimate(&self, surface: &Surface) -> CurvatureResult<Vec<f64>> {
        let values = self(surface);
        if values.len() != surface.vertex_count() {
            return Err(CurvatureError::LengthMismatch {
                values: values.len(),
                vertices: surface.vertex_count(),
            });
        }
        Ok(values)
    }
}

/// Mean curvature from the cotangent Laplace-Beltrami operator.
///
/// `H = |Δp| / 2` with `Δp = (1 / 2A) Σ (cot α + cot β)(p_j - p_i)`, where
/// `A` is the barycentric area (a third of each incident triangle). The
/// value is positive where the surface bends away from its normal, so a
/// sphere with outward-facing triangles has `H ≈ 1 / r`.
///
/// Vertices in no triangle, or with zero incident area, get 0.
#[derive(Debug, Clone, Copy, Default)]
pub struct CotangentMeanCurvature;

/// Cotangent of the angle at `a` in triangle (a, b, c); 0 when degenerate.
fn cotangent(a: &Point3<f64>, b: &Point3<f64>, c: &Point3<f64>) -> f64 {
    let ab = b - a;
    let ac = c - a;
    let cross_norm = ab.cross(&ac).norm();
    if cross_norm < 1e-12 {
        0.0
    } else {
        ab.dot(&ac) / cross_norm
    }
}

impl CurvatureEstimator for CotangentMeanCurvature {
    fn estimate(&self, surface: &Surface) -> CurvatureResult<Vec<f64>> {
        surface.validate()?;

        let n = surface.vertex_count();
        let mut laplacian = vec![Vector3::zeros(); n];
        let mut normal = vec![Vector3::zeros(); n];
        let mut area = vec![0.0; n];
        let mut degenerate = 0_usize;

        for &[i0, i1, i2] in &surface.triangles {
            let idx = [i0 as usize, i1 as usize, i2 as usize];
            let p = idx.map(|i| surface.vertices[i]);

            let face = (p[1] - p[0]).cross(&(p[2] - p[0]));
            let face_area = face.norm() * 0.5;
            if face_area < 1e-12 {
                degenerate += 1;
                continue;
            }

            for k in 0..3 {
                let (a, b, c) = (k, (k + 1) % 3, (k + 2) % 3);
                area[idx[a]] += face_area / 3.0;
                // Area-weighted face normal.
                normal[idx[a]] += face;

                // Edge b-c is opposite corner a.
                let w = cotangent(&p[a], &p[b], &p[c]);
                laplacian[idx[b]] += w * (p[c] - p[b]);
                laplacian[idx[c]] += w * (p[b] - p[c]);
            }
        }

        if degenerate > 0 {
            warn!(degenerate, "Skipped zero-area triangles in curvature estimate");
        }

        Ok((0..n)
            .map(|v| {
                if area[v] <= 0.0 {
                    return 0.0;
                }
                let delta = laplacian[v] / (2.0 * area[v]);
                let h = delta.norm() / 2.0;
                if delta.dot(&normal[v]) > 0.0 {
                    -h
                } else {
                    h
                }
            })
            .collect())
    }
}
