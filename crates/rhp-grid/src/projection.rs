//! HEALPix and rHEALPix projections of the unit sphere.
//!
//! All angles are radians; planar coordinates are in units of the sphere radius. The HEALPix
//! image spans `x ∈ [-π, π)`, `y ∈ [-π/2, π/2]`. rHEALPix moves the four polar triangles of each
//! hemisphere into a single square centred on the pole image above (below) the configured
//! equatorial square.

use std::f64::consts::{FRAC_PI_2, FRAC_PI_4, PI};

/// Latitude where the equatorial and polar HEALPix zones meet: `asin(2/3)`.
pub fn phi_0() -> f64 {
    (2.0f64 / 3.0).asin()
}

/// Wrap a longitude into `[-π, π)`.
pub fn wrap_longitude(lam: f64) -> f64 {
    (lam + PI).rem_euclid(2.0 * PI) - PI
}

/// Index (0-3) of the π/2-wide column containing `x`.
fn column(x: f64) -> i32 {
    (((x + PI) / FRAC_PI_2).floor() as i32).clamp(0, 3)
}

/// `x` of the centre of column `c` (the apex of its polar triangles).
fn column_center(c: i32) -> f64 {
    -3.0 * FRAC_PI_4 + FRAC_PI_2 * f64::from(c)
}

/// Rotate `(dx, dy)` anticlockwise by `k` quarter turns.
fn quarter_turns(dx: f64, dy: f64, k: i32) -> (f64, f64) {
    match k.rem_euclid(4) {
        0 => (dx, dy),
        1 => (-dy, dx),
        2 => (-dx, -dy),
        _ => (dy, -dx),
    }
}

pub fn healpix_forward(lam: f64, phi: f64) -> (f64, f64) {
    let lam = wrap_longitude(lam);
    if phi.abs() <= phi_0() {
        return (lam, 3.0 * PI / 8.0 * phi.sin());
    }
    let sigma = (3.0 * (1.0 - phi.sin().abs())).sqrt();
    let lam_c = column_center(column(lam));
    (
        lam_c + (lam - lam_c) * sigma,
        phi.signum() * FRAC_PI_4 * (2.0 - sigma),
    )
}

pub fn healpix_inverse(x: f64, y: f64) -> (f64, f64) {
    if y.abs() <= FRAC_PI_4 {
        return (wrap_longitude(x), (8.0 * y / (3.0 * PI)).clamp(-1.0, 1.0).asin());
    }
    let x_c = column_center(column(x));
    let tau = 2.0 - 4.0 * y.abs().min(FRAC_PI_2) / PI;
    let phi = y.signum() * (1.0 - tau * tau / 3.0).clamp(-1.0, 1.0).asin();
    if tau <= f64::EPSILON {
        // Pole: longitude is arbitrary, report the column centre.
        return (x_c, phi);
    }
    (wrap_longitude(x_c + (x - x_c) / tau), phi)
}

/// Fold HEALPix polar triangles into the rHEALPix polar squares.
pub fn combine_triangles(x: f64, y: f64, north_square: u8, south_square: u8) -> (f64, f64) {
    if y.abs() <= FRAC_PI_4 {
        return (x, y);
    }
    let j = column(x);
    let apex_x = column_center(j);
    if y > 0.0 {
        let k = j - i32::from(north_square);
        let (rx, ry) = quarter_turns(x - apex_x, y - FRAC_PI_2, k);
        (column_center(i32::from(north_square)) + rx, FRAC_PI_2 + ry)
    } else {
        let k = j - i32::from(south_square);
        let (rx, ry) = quarter_turns(x - apex_x, y + FRAC_PI_2, -k);
        (column_center(i32::from(south_square)) + rx, -FRAC_PI_2 + ry)
    }
}

/// Inverse of [`combine_triangles`].
pub fn split_triangles(x: f64, y: f64, north_square: u8, south_square: u8) -> (f64, f64) {
    if y.abs() <= FRAC_PI_4 {
        return (x, y);
    }
    if y > 0.0 {
        let center = column_center(i32::from(north_square));
        let (dx, dy) = (x - center, y - FRAC_PI_2);
        // Quarter of the square: 0 below the pole, then anticlockwise.
        let k = if dy <= -dx.abs() {
            0
        } else if dx >= dy.abs() {
            1
        } else if dy >= dx.abs() {
            2
        } else {
            3
        };
        let (rx, ry) = quarter_turns(dx, dy, -k);
        let j = (i32::from(north_square) + k).rem_euclid(4);
        (column_center(j) + rx, FRAC_PI_2 + ry)
    } else {
        let center = column_center(i32::from(south_square));
        let (dx, dy) = (x - center, y + FRAC_PI_2);
        // Quarter of the square: 0 above the pole, then clockwise.
        let k = if dy >= dx.abs() {
            0
        } else if dx >= dy.abs() {
            1
        } else if dy <= -dx.abs() {
            2
        } else {
            3
        };
        let (rx, ry) = quarter_turns(dx, dy, k);
        let j = (i32::from(south_square) + k).rem_euclid(4);
        (column_center(j) + rx, -FRAC_PI_2 + ry)
    }
}

/// rHEALPix projection of `(λ, β)` where `β` is an authalic latitude.
pub fn rhealpix_forward(lam: f64, beta: f64, north_square: u8, south_square: u8) -> (f64, f64) {
    let (x, y) = healpix_forward(lam, beta);
    combine_triangles(x, y, north_square, south_square)
}

/// Inverse rHEALPix projection, returning `(λ, β)`.
pub fn rhealpix_inverse(x: f64, y: f64, north_square: u8, south_square: u8) -> (f64, f64) {
    let (x, y) = split_triangles(x, y, north_square, south_square);
    healpix_inverse(x, y)
}
