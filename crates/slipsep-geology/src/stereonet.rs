//! Stereonet conversions between lines on a plane and geographic lines.
//!
//! Directions live on a unit sphere given by longitude/latitude in radians.
//! The sphere's cartesian frame has `x` pointing down, `y` east and `z`
//! north, so the lower hemisphere of a stereonet is the `x > 0` half.
//! Plane arguments are (strike, dip) in degrees with the right-hand rule
//! (dip direction = strike + 90).

use serde::{Deserialize, Serialize};
use slipsep_core::error::{Result, SlipSepError};
use slipsep_math::{DVec3, Vector3};

/// A point on the stereonet sphere, in radians.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Geographic {
    pub lon: f64,
    pub lat: f64,
}

/// A line given by plunge (degrees below horizontal, `[0, 90]`) and bearing
/// (degrees clockwise from north, `[0, 360)`).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Lineation {
    pub plunge: f64,
    pub bearing: f64,
}

impl Lineation {
    /// Unit vector in the (east, north, up) frame pointing down the plunge.
    pub fn to_vector(&self) -> Vector3 {
        let p = self.plunge.to_radians();
        let b = self.bearing.to_radians();
        DVec3::new(b.sin() * p.cos(), b.cos() * p.cos(), -p.sin())
    }

    /// Lineation of a (east, north, up) vector, taking its lower end.
    pub fn from_vector(v: Vector3) -> Self {
        let v = if v.z > 0.0 { -v } else { v };
        let plunge = (-v.z / v.length()).asin().to_degrees();
        let bearing = v.x.atan2(v.y).to_degrees().rem_euclid(360.0);
        Self { plunge, bearing }
    }
}

fn sph2cart(g: Geographic) -> Vector3 {
    DVec3::new(
        g.lat.cos() * g.lon.cos(),
        g.lat.cos() * g.lon.sin(),
        g.lat.sin(),
    )
}

fn cart2sph(v: Vector3) -> Geographic {
    let r = v.length();
    Geographic {
        lon: v.y.atan2(v.x),
        lat: (v.z / r).asin(),
    }
}

/// Rotation about the vertical (`x`) axis, turning bearings clockwise by
/// `theta` degrees.
fn rotate_about_vertical(g: Geographic, theta: f64) -> Geographic {
    let t = theta.to_radians();
    let v = sph2cart(g);
    cart2sph(DVec3::new(
        v.x,
        v.y * t.cos() + v.z * t.sin(),
        -v.y * t.sin() + v.z * t.cos(),
    ))
}

/// Point of the line lying on plane (strike, dip) at `rake_angle` degrees
/// from the strike direction, measured toward the dip direction.
///
/// Negative rakes are taken from the opposite end of strike.
pub fn rake(strike: f64, dip: f64, rake_angle: f64) -> Geographic {
    let rake_angle = if rake_angle < 0.0 {
        rake_angle + 180.0
    } else {
        rake_angle
    };
    let g = Geographic {
        lon: (90.0 - dip).to_radians(),
        lat: (90.0 - rake_angle).to_radians(),
    };
    rotate_about_vertical(g, strike)
}

/// Pole to plane (strike, dip), on the lower hemisphere.
pub fn pole(strike: f64, dip: f64) -> Geographic {
    let g = Geographic {
        lon: (-dip).to_radians(),
        lat: 0.0,
    };
    rotate_about_vertical(g, strike)
}

/// Plunge and bearing of a stereonet point. Upward lines are reported by
/// their opposite, downward end.
pub fn geographic_to_plunge_bearing(g: Geographic) -> Lineation {
    let v = sph2cart(g);
    let r = v.length().max(1e-15);

    let mut plunge = (v.x / r).asin().to_degrees();
    let mut bearing = 90.0 - v.z.atan2(v.y).to_degrees();
    if bearing < 0.0 {
        bearing += 360.0;
    }

    if plunge < 0.0 {
        plunge = -plunge;
        bearing -= 180.0;
        if bearing < 0.0 {
            bearing += 360.0;
        }
    }
    Lineation { plunge, bearing }
}

/// Line of intersection of two planes given as (strike, dip) pairs.
///
/// Planes of identical orientation share every line through the centre of the
/// stereonet and give [`SlipSepError::CoincidentPlanes`].
pub fn plane_intersection(strike1: f64, dip1: f64, strike2: f64, dip2: f64) -> Result<Lineation> {
    let p1 = sph2cart(pole(strike1, dip1));
    let p2 = sph2cart(pole(strike2, dip2));
    let line = p1.cross(p2);
    if line.length() < 1e-12 {
        tracing::debug!(strike1, dip1, strike2, dip2, "planes share their orientation");
        return Err(SlipSepError::CoincidentPlanes);
    }
    Ok(geographic_to_plunge_bearing(cart2sph(line)))
}

/// Rake on plane (strike, dip) of the line on that plane trending `azimuth`.
///
/// The result lies in `(-90, 90]`: positive rakes are measured from the strike
/// direction, negative ones from the opposite end of strike.
pub fn azimuth_to_rake(strike: f64, dip: f64, azimuth: f64) -> Result<f64> {
    let line = plane_intersection(strike, dip, azimuth, 90.0)?;
    Ok(lineation_to_rake(strike, dip, line))
}

/// Rake of a line assumed to lie on the plane (strike, dip), in `(-90, 90]`.
pub fn lineation_to_rake(strike: f64, dip: f64, line: Lineation) -> f64 {
    let s = strike.to_radians();
    let dd = (strike + 90.0).to_radians();
    let d = dip.to_radians();
    let along_strike = DVec3::new(s.sin(), s.cos(), 0.0);
    let down_dip = DVec3::new(dd.sin() * d.cos(), dd.cos() * d.cos(), -d.sin());

    let w = line.to_vector();
    let pitch = w.dot(down_dip).atan2(w.dot(along_strike)).to_degrees();
    if pitch > 90.0 {
        pitch - 180.0
    } else if pitch <= -90.0 {
        pitch + 180.0
    } else {
        pitch
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn plunge_bearing(strike: f64, dip: f64, r: f64) -> Lineation {
        geographic_to_plunge_bearing(rake(strike, dip, r))
    }

    #[test]
    fn test_zero_rake_points_along_strike() {
        let l = plunge_bearing(30.0, 50.0, 0.0);
        assert_relative_eq!(l.plunge, 0.0, epsilon = 1e-9);
        assert_relative_eq!(l.bearing, 30.0, epsilon = 1e-9);
    }

    #[test]
    fn test_ninety_rake_is_down_dip() {
        let l = plunge_bearing(270.0, 60.0, 90.0);
        assert_relative_eq!(l.plunge, 60.0, epsilon = 1e-9);
        let b = l.bearing.rem_euclid(360.0);
        assert!(b < 1e-9 || 360.0 - b < 1e-9, "bearing {b}");
    }

    #[test]
    fn test_oblique_rake_plunge() {
        // sin(plunge) = sin(rake) * sin(dip)
        let l = plunge_bearing(100.0, 40.0, 35.0);
        let expected = (35f64.to_radians().sin() * 40f64.to_radians().sin()).asin().to_degrees();
        assert_relative_eq!(l.plunge, expected, epsilon = 1e-9);
    }

    #[test]
    fn test_pole_plunge() {
        let l = geographic_to_plunge_bearing(pole(0.0, 30.0));
        assert_relative_eq!(l.plunge, 60.0, epsilon = 1e-9);
        assert_relative_eq!(l.bearing, 270.0, epsilon = 1e-9);
    }

    #[test]
    fn test_lineation_vector_round_trip() {
        let l = Lineation { plunge: 25.0, bearing: 310.0 };
        let back = Lineation::from_vector(l.to_vector());
        assert_relative_eq!(back.plunge, 25.0, epsilon = 1e-9);
        assert_relative_eq!(back.bearing, 310.0, epsilon = 1e-9);
        let up = Lineation::from_vector(-l.to_vector());
        assert_relative_eq!(up.bearing, 310.0, epsilon = 1e-9);
    }

    #[test]
    fn test_plane_intersection_lies_on_both_planes() {
        let line = plane_intersection(20.0, 40.0, 150.0, 70.0).unwrap();
        let w = line.to_vector();
        for (strike, dip) in [(20.0_f64, 40.0_f64), (150.0, 70.0)] {
            let dd = (strike + 90.0).to_radians();
            let d = dip.to_radians();
            let normal = DVec3::new(dd.sin() * d.sin(), dd.cos() * d.sin(), d.cos());
            assert_relative_eq!(w.dot(normal), 0.0, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_same_orientation_has_no_intersection() {
        assert!(matches!(
            plane_intersection(45.0, 30.0, 45.0, 30.0),
            Err(SlipSepError::CoincidentPlanes)
        ));
    }

    #[test]
    fn test_azimuth_to_rake_inverts_rake() {
        for r in [10.0, 45.0, 80.0] {
            let l = plunge_bearing(200.0, 55.0, r);
            let back = azimuth_to_rake(200.0, 55.0, l.bearing).unwrap();
            assert_relative_eq!(back, r, epsilon = 1e-7);
        }
        // Lines past the dip direction come back measured from the other end.
        let l = plunge_bearing(200.0, 55.0, 120.0);
        let back = azimuth_to_rake(200.0, 55.0, l.bearing).unwrap();
        assert_relative_eq!(back, -60.0, epsilon = 1e-7);
    }
}
