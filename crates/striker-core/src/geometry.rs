use thiserror::Error;

use crate::Vector2;

/// Squared lengths below this are treated as zero when normalizing.
const DEGENERATE_EPSILON: f64 = 1e-12;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GeometryError {
    /// The two points coincide, so there is no direction between them.
    #[error("cannot compute a direction between coincident points")]
    DivideByZero,
}

/// Euclidean distance between two points.
pub fn distance(a: Vector2, b: Vector2) -> f64 {
    (b - a).norm()
}

/// Unit vector pointing from `a` to `b`.
///
/// Fails with [`GeometryError::DivideByZero`] when the points coincide. Callers
/// treat that case as "already there".
pub fn direction(a: Vector2, b: Vector2) -> Result<Vector2, GeometryError> {
    let v = b - a;
    let len_sq = v.norm_squared();
    if len_sq < DEGENERATE_EPSILON {
        return Err(GeometryError::DivideByZero);
    }
    Ok(v / len_sq.sqrt())
}

/// Signed angle in degrees from `origin` to `direction`, counter-clockwise
/// positive, in (-180, 180].
///
/// Neither vector needs to be normalized.
pub fn bearing(origin: Vector2, direction: Vector2) -> f64 {
    let from = origin.y.atan2(origin.x).to_degrees();
    let to = direction.y.atan2(direction.x).to_degrees();
    normalize_angle(to - from)
}

/// Bearing from an agent at `pos` facing `forward` to the point `target`.
pub fn bearing_to(pos: Vector2, forward: Vector2, target: Vector2) -> Result<f64, GeometryError> {
    Ok(bearing(forward, direction(pos, target)?))
}

/// Reduce an angle in degrees into (-180, 180].
///
/// `180` stays `180` and `-180` becomes `180`. Non-finite input is returned
/// unchanged.
pub fn normalize_angle(angle: f64) -> f64 {
    if !angle.is_finite() {
        return angle;
    }
    // fmod is exact, the loop below settles the boundary
    let mut angle = if angle.abs() > 720.0 {
        angle % 360.0
    } else {
        angle
    };
    while angle > 180.0 || angle <= -180.0 {
        if angle > 180.0 {
            angle -= 360.0;
        } else {
            angle += 360.0;
        }
    }
    angle
}

pub fn round_to_hundredths(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn test_distance() {
        let a = Vector2::new(0.0, 0.0);
        let b = Vector2::new(3.0, 4.0);
        assert_eq!(distance(a, b), 5.0);
        assert_eq!(distance(b, a), 5.0);
        assert_eq!(distance(a, a), 0.0);
    }

    #[test]
    fn test_direction() {
        let d = direction(Vector2::new(1.0, 1.0), Vector2::new(1.0, 5.0)).unwrap();
        assert_relative_eq!(d.x, 0.0);
        assert_relative_eq!(d.y, 1.0);

        let d = direction(Vector2::new(0.0, 0.0), Vector2::new(-3.0, 4.0)).unwrap();
        assert_relative_eq!(d.norm(), 1.0, epsilon = 1e-12);
        assert_relative_eq!(d.x, -0.6, epsilon = 1e-12);
    }

    #[test]
    fn test_direction_coincident_points() {
        let p = Vector2::new(10.0, -4.0);
        assert_eq!(direction(p, p), Err(GeometryError::DivideByZero));
    }

    #[test]
    fn test_normalize_angle_boundaries() {
        assert_eq!(normalize_angle(0.0), 0.0);
        assert_eq!(normalize_angle(180.0), 180.0);
        assert_eq!(normalize_angle(-180.0), 180.0);
        assert_eq!(normalize_angle(540.0), 180.0);
        assert_eq!(normalize_angle(-540.0), 180.0);
        assert_eq!(normalize_angle(181.0), -179.0);
        assert_eq!(normalize_angle(-181.0), 179.0);
        assert_eq!(normalize_angle(720.0), 0.0);
        assert_eq!(normalize_angle(3600.0 + 90.0), 90.0);
    }

    #[test]
    fn test_bearing() {
        let forward = Vector2::new(1.0, 0.0);
        assert_relative_eq!(bearing(forward, Vector2::new(1.0, 0.0)), 0.0);
        assert_relative_eq!(bearing(forward, Vector2::new(0.0, 1.0)), 90.0);
        assert_relative_eq!(bearing(forward, Vector2::new(0.0, -1.0)), -90.0);
        assert_relative_eq!(bearing(forward, Vector2::new(-1.0, 0.0)), 180.0);

        // Crossing the -x axis must wrap, not report 270
        let facing = Vector2::new(-1.0, -1.0);
        assert_relative_eq!(
            bearing(facing, Vector2::new(-1.0, 1.0)),
            -90.0,
            epsilon = 1e-9
        );
    }

    #[test]
    fn test_bearing_swap_is_antisymmetric() {
        let a = Vector2::new(1.0, 2.0);
        let b = Vector2::new(-3.0, 0.5);
        assert_relative_eq!(bearing(a, b), -bearing(b, a), epsilon = 1e-9);
    }

    #[test]
    fn test_bearing_to() {
        let pos = Vector2::new(10.0, 10.0);
        let forward = Vector2::new(0.0, 1.0);
        let angle = bearing_to(pos, forward, Vector2::new(20.0, 10.0)).unwrap();
        assert_relative_eq!(angle, -90.0, epsilon = 1e-9);
        assert!(bearing_to(pos, forward, pos).is_err());
    }

    #[test]
    fn test_round_to_hundredths() {
        assert_eq!(round_to_hundredths(1.23456), 1.23);
        assert_eq!(round_to_hundredths(-45.678), -45.68);
        assert_eq!(round_to_hundredths(100.0), 100.0);
    }

    proptest! {
        #[test]
        fn normalize_angle_lands_in_range(a in -1.0e9f64..1.0e9f64) {
            let n = normalize_angle(a);
            prop_assert!(n > -180.0 && n <= 180.0, "{} normalized to {}", a, n);
        }

        #[test]
        fn normalize_angle_is_idempotent(a in -1.0e9f64..1.0e9f64) {
            let n = normalize_angle(a);
            prop_assert_eq!(normalize_angle(n), n);
        }

        #[test]
        fn bearing_swap_is_antisymmetric_everywhere(
            ax in -10.0f64..10.0, ay in -10.0f64..10.0,
            bx in -10.0f64..10.0, by in -10.0f64..10.0
        ) {
            let a = Vector2::new(ax, ay);
            let b = Vector2::new(bx, by);
            prop_assume!(a.norm() > 1e-3 && b.norm() > 1e-3);
            let forward = bearing(a, b);
            prop_assume!(forward.abs() < 179.999);
            prop_assert!((forward + bearing(b, a)).abs() < 1e-9);
        }
    }
}
