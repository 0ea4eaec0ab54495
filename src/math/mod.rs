/// 3D point type (meters, z positive up).
pub type Point3 = nalgebra::Point3<f64>;

/// 3D vector type.
pub type Vector3 = nalgebra::Vector3<f64>;

/// Tolerance for grouping floating-point coordinates into levels.
pub const TOLERANCE: f64 = 1e-10;

/// Returns `count` evenly spaced values over `[start, end]`, both ends included.
///
/// A count of one yields `[start]`; zero yields an empty vector.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn linspace(start: f64, end: f64, count: usize) -> Vec<f64> {
    match count {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (end - start) / (count - 1) as f64;
            (0..count)
                .map(|i| {
                    if i == count - 1 {
                        end
                    } else {
                        (i as f64).mul_add(step, start)
                    }
                })
                .collect()
        }
    }
}
