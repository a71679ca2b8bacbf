use nalgebra::{Point3, Vector3};

/// Lengths below this are treated as zero when normalising.
pub const EPSILON: f64 = 1e-12;

/// Vector pointing from `p1` to `p2`.
#[inline]
pub fn difference(p1: &Point3<f64>, p2: &Point3<f64>) -> Vector3<f64> {
    p2 - p1
}

#[inline]
pub fn cross(v1: &Vector3<f64>, v2: &Vector3<f64>) -> Vector3<f64> {
    v1.cross(v2)
}

#[inline]
pub fn dot(v1: &Vector3<f64>, v2: &Vector3<f64>) -> f64 {
    v1.dot(v2)
}

#[inline]
pub fn distance(p1: &Point3<f64>, p2: &Point3<f64>) -> f64 {
    (p2 - p1).norm()
}

pub fn normalize_or_zero(v: &Vector3<f64>) -> Vector3<f64> {
    let norm = v.norm();
    if norm < EPSILON {
        Vector3::zeros()
    } else {
        v / norm
    }
}

/// Angle in radians at vertex `b` formed by the rays towards `a` and `c`.
///
/// The cosine is clamped to `[-1, 1]` before `acos`, so accumulated rounding on
/// (anti)parallel arms never produces `NaN`. A zero-length arm yields `0.0`.
pub fn angle_between(a: &Point3<f64>, b: &Point3<f64>, c: &Point3<f64>) -> f64 {
    let ba = a - b;
    let bc = c - b;
    let denom = ba.norm() * bc.norm();
    if denom < EPSILON {
        return 0.0;
    }
    (ba.dot(&bc) / denom).clamp(-1.0, 1.0).acos()
}

/// Signed torsion angle in radians about the `p2`-`p3` axis, in `(-π, π]`.
///
/// The magnitude is the angle between the two plane normals measured at the
/// origin; the sign comes from the orientation of their cross product relative
/// to the central bond.
pub fn dihedral(p1: &Point3<f64>, p2: &Point3<f64>, p3: &Point3<f64>, p4: &Point3<f64>) -> f64 {
    let q = difference(p1, p2);
    let r = difference(p3, p2);
    let s = difference(p4, p3);

    let t = cross(&q, &r);
    let u = cross(&s, &r);
    let v = cross(&u, &t);

    let origin = Point3::origin();
    let magnitude = angle_between(&Point3::from(t), &origin, &Point3::from(u));

    if dot(&v, &r) < 0.0 {
        -magnitude
    } else {
        magnitude
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::{FRAC_PI_2, PI};

    const TOL: f64 = 1e-12;

    #[test]
    fn difference_points_from_first_to_second() {
        let v = difference(&Point3::new(1.0, 2.0, 3.0), &Point3::new(4.0, 6.0, 8.0));
        assert_eq!(v, Vector3::new(3.0, 4.0, 5.0));
    }

    #[test]
    fn cross_and_dot_follow_right_hand_rule() {
        let x = Vector3::x();
        let y = Vector3::y();
        assert_eq!(cross(&x, &y), Vector3::z());
        assert_eq!(dot(&x, &y), 0.0);
        assert_eq!(dot(&x, &x), 1.0);
    }

    #[test]
    fn normalize_or_zero_guards_degenerate_vectors() {
        assert_eq!(normalize_or_zero(&Vector3::zeros()), Vector3::zeros());
        let n = normalize_or_zero(&Vector3::new(0.0, 3.0, 4.0));
        assert!((n.norm() - 1.0).abs() < TOL);
    }

    #[test]
    fn angle_between_measures_right_angle() {
        let a = Point3::new(1.0, 0.0, 0.0);
        let b = Point3::origin();
        let c = Point3::new(0.0, 2.0, 0.0);
        assert!((angle_between(&a, &b, &c) - FRAC_PI_2).abs() < TOL);
    }

    #[test]
    fn angle_between_clamps_collinear_arms() {
        let a = Point3::new(-3.8, 0.0, 0.0);
        let b = Point3::origin();
        let c = Point3::new(3.8 * (1.0 + 1e-15), 0.0, 0.0);
        let angle = angle_between(&a, &b, &c);
        assert!(!angle.is_nan());
        assert!((angle - PI).abs() < 1e-7);

        let same = angle_between(&c, &b, &c);
        assert!(!same.is_nan());
        assert!(same.abs() < 1e-7);
    }

    #[test]
    fn angle_between_with_zero_length_arm_is_zero() {
        let p = Point3::new(1.0, 1.0, 1.0);
        assert_eq!(angle_between(&p, &p, &Point3::origin()), 0.0);
    }

    #[test]
    fn dihedral_of_cis_and_trans_configurations() {
        let p1 = Point3::new(1.0, 1.0, 0.0);
        let p2 = Point3::new(0.0, 0.0, 0.0);
        let p3 = Point3::new(0.0, 0.0, 1.0);

        let cis = dihedral(&p1, &p2, &p3, &Point3::new(1.0, 1.0, 1.0));
        assert!(cis.abs() < 1e-7);

        let trans = dihedral(&p1, &p2, &p3, &Point3::new(-1.0, -1.0, 1.0));
        assert!((trans.abs() - PI).abs() < 1e-7);
    }

    #[test]
    fn dihedral_sign_flips_with_mirror_image() {
        let p1 = Point3::new(1.0, 0.0, 0.0);
        let p2 = Point3::origin();
        let p3 = Point3::new(0.0, 0.0, 1.0);
        let plus = dihedral(&p1, &p2, &p3, &Point3::new(0.0, 1.0, 1.0));
        let minus = dihedral(&p1, &p2, &p3, &Point3::new(0.0, -1.0, 1.0));
        assert!((plus.abs() - FRAC_PI_2).abs() < TOL);
        assert!((plus + minus).abs() < TOL);
        assert!(plus != minus);
    }
}
