/// Tangent-plane vector helpers for annotation geometry
///
/// Vectors are `[ra, dec]` pairs in a local flat-sky frame where the RA
/// component has already been compressed by the cosine of declination, so
/// both components are true angular distances.
use crate::utils::coordinate_math::{cosine_declination_term, Coordinate};

/// Direction from one pointing to the next in the local tangent plane
///
/// The RA difference is compressed by the cosine of the *destination*
/// declination.
///
/// # Arguments
/// * `from` - Start of the step
/// * `to` - End of the step
///
/// # Returns
/// Unnormalized vector `[dRA·cos(dec_to), dDec]` in degrees
pub fn tangent_direction(from: &Coordinate, to: &Coordinate) -> [f64; 2] {
    [
        (to.ra - from.ra) * cosine_declination_term(to.dec),
        to.dec - from.dec,
    ]
}

/// Calculate the magnitude (length) of a 2D vector
pub fn vector_magnitude_2d(v: &[f64; 2]) -> f64 {
    (v[0] * v[0] + v[1] * v[1]).sqrt()
}

/// Normalize a 2D vector to unit length
///
/// # Returns
/// `None` when the input has zero (or non-finite) magnitude
pub fn normalize_vector_2d(v: &[f64; 2]) -> Option<[f64; 2]> {
    let mag = vector_magnitude_2d(v);
    if mag > 0.0 && mag.is_finite() {
        Some([v[0] / mag, v[1] / mag])
    } else {
        None
    }
}

/// Left-hand perpendicular: `+RA` maps to `+Dec`
#[inline]
pub fn perpendicular_2d(v: &[f64; 2]) -> [f64; 2] {
    [-v[1], v[0]]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_zero_vector() {
        assert_eq!(normalize_vector_2d(&[0.0, 0.0]), None);
    }

    #[test]
    fn test_normalize_unit_length() {
        let u = normalize_vector_2d(&[3.0, 4.0]).expect("non-zero vector");
        assert!((u[0] - 0.6).abs() < 1e-12);
        assert!((u[1] - 0.8).abs() < 1e-12);
        assert!((vector_magnitude_2d(&u) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_direction_compresses_ra_at_destination_dec() {
        let d = tangent_direction(&Coordinate::new(10.0, 0.0), &Coordinate::new(11.0, 60.0));
        assert!((d[0] - 0.5).abs() < 1e-12);
        assert!((d[1] - 60.0).abs() < 1e-12);
    }

    #[test]
    fn test_perpendicular_is_orthogonal() {
        let v = [0.3, -0.7];
        let p = perpendicular_2d(&v);
        assert!((v[0] * p[0] + v[1] * p[1]).abs() < 1e-15);
        assert_eq!(perpendicular_2d(&[1.0, 0.0]), [0.0, 1.0]);
    }
}
