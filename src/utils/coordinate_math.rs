//! Flat-sky coordinate primitives used to build sky-plot annotations
//!
//! Offsets and rotations here treat RA/Dec as planar over the small angular
//! extent of an instrument field of view. They are not rigorous spherical
//! transforms and RA is never wrapped into [0, 360).

use serde::{Deserialize, Serialize};

use crate::utils::config::{ARCSEC_PER_DEGREE, MIN_COSINE_DECLINATION};

/// Sky position in degrees
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Coordinate {
    /// Right ascension in degrees
    pub ra: f64,
    /// Declination in degrees
    pub dec: f64,
}

impl Coordinate {
    /// The conventional rotation center `{ ra: 0, dec: 0 }`
    pub const ORIGIN: Coordinate = Coordinate { ra: 0.0, dec: 0.0 };

    pub const fn new(ra: f64, dec: f64) -> Self {
        Coordinate { ra, dec }
    }

    /// Apply an arcsecond offset, see [`offset_coordinate`]
    pub fn offset_by(&self, offset: &Offset) -> Coordinate {
        offset_coordinate(self, offset)
    }

    /// Rotate about [`Coordinate::ORIGIN`]
    pub fn rotated(&self, angle_deg: f64) -> Coordinate {
        rotate_coordinate(self, angle_deg, &Coordinate::ORIGIN)
    }

    /// `[ra, dec]` pair as handed to the sky viewer
    pub fn to_pair(&self) -> [f64; 2] {
        [self.ra, self.dec]
    }
}

impl From<[f64; 2]> for Coordinate {
    fn from(pair: [f64; 2]) -> Self {
        Coordinate::new(pair[0], pair[1])
    }
}

impl From<(f64, f64)> for Coordinate {
    fn from((ra, dec): (f64, f64)) -> Self {
        Coordinate::new(ra, dec)
    }
}

/// Displacement on the sky in arcseconds
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Offset {
    /// RA offset in arcseconds, measured on the sky (not scaled by cos(dec))
    pub ra: f64,
    /// Dec offset in arcseconds
    pub dec: f64,
}

impl Offset {
    pub const fn new(ra: f64, dec: f64) -> Self {
        Offset { ra, dec }
    }

    /// Rotate the offset in its own tangent plane, clockwise for positive angles
    pub fn rotated(&self, angle_deg: f64) -> Offset {
        let (x, y) = rotate_xy(self.ra, self.dec, angle_deg);
        Offset::new(x, y)
    }
}

impl From<(f64, f64)> for Offset {
    fn from((ra, dec): (f64, f64)) -> Self {
        Offset::new(ra, dec)
    }
}

/// Cosine of the declination, floored so it is always safe to divide by
///
/// # Arguments
/// * `dec_deg` - Declination in degrees
///
/// # Returns
/// `max(cos(dec), 1e-4)`
#[inline]
pub fn cosine_declination_term(dec_deg: f64) -> f64 {
    dec_deg.to_radians().cos().max(MIN_COSINE_DECLINATION)
}

/// Offset a coordinate by a displacement given in arcseconds
///
/// The RA displacement is scaled by the cosine of the *final* declination,
/// so the Dec shift is applied first.
pub fn offset_coordinate(initial: &Coordinate, offset_arcsec: &Offset) -> Coordinate {
    let dec = initial.dec + offset_arcsec.dec / ARCSEC_PER_DEGREE;
    let ra = initial.ra + offset_arcsec.ra / ARCSEC_PER_DEGREE / cosine_declination_term(dec);
    Coordinate { ra, dec }
}

/// Rotate a coordinate about a center, clockwise for positive angles
///
/// RA is the x axis and Dec the y axis of a local tangent plane. A negative
/// angle therefore turns `+RA` toward `+Dec`.
///
/// # Arguments
/// * `coordinate` - Point to rotate
/// * `angle_deg` - Rotation angle in degrees
/// * `center` - Rotation center, usually [`Coordinate::ORIGIN`]
pub fn rotate_coordinate(coordinate: &Coordinate, angle_deg: f64, center: &Coordinate) -> Coordinate {
    let (x, y) = rotate_xy(
        coordinate.ra - center.ra,
        coordinate.dec - center.dec,
        angle_deg,
    );
    Coordinate {
        ra: x + center.ra,
        dec: y + center.dec,
    }
}

fn rotate_xy(x: f64, y: f64, angle_deg: f64) -> (f64, f64) {
    let (sin, cos) = angle_deg.to_radians().sin_cos();
    (x * cos + y * sin, -x * sin + y * cos)
}
