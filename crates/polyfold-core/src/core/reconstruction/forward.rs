use crate::core::models::residue::Residue;
use crate::core::utils::geometry::{EPSILON, cross, difference, normalize_or_zero};
use nalgebra::{Point3, Vector3};
use std::f64::consts::PI;

/// Places every residue of the chain, starting from the fixed gauge.
///
/// Residue 0 sits at the origin and residue 1 on the +x axis. Residue 2 lies in
/// the xy-plane and only needs the bond angle at residue 1. Every later residue
/// `i` is built from the three residues before it using `bond_angle[i-1]` and
/// `dihedral[i-2]`, so an edit only ever affects positions downstream of it.
pub fn reconstruct(residues: &[Residue]) -> Vec<Point3<f64>> {
    let mut positions = Vec::with_capacity(residues.len());
    extend_positions(residues, &mut positions);
    positions
}

/// Reuses `previous[..start]` and recomputes the rest of the chain.
///
/// Placement is deterministic, so the result is bit-identical to [`reconstruct`]
/// as long as nothing before `start` changed since `previous` was computed.
pub fn reconstruct_suffix(
    residues: &[Residue],
    previous: &[Point3<f64>],
    start: usize,
) -> Vec<Point3<f64>> {
    let keep = start.min(previous.len()).min(residues.len());
    let mut positions = Vec::with_capacity(residues.len());
    positions.extend_from_slice(&previous[..keep]);
    extend_positions(residues, &mut positions);
    positions
}

fn extend_positions(residues: &[Residue], positions: &mut Vec<Point3<f64>>) {
    for i in positions.len()..residues.len() {
        let next = place_residue(residues, positions, i);
        positions.push(next);
    }
}

fn place_residue(residues: &[Residue], placed: &[Point3<f64>], i: usize) -> Point3<f64> {
    let bond_length = residues[i].bond_length;
    // Undefined slots never occur inside a well-formed chain; a straight
    // continuation keeps the placement finite if one does.
    match i {
        0 => Point3::origin(),
        1 => Point3::new(bond_length, 0.0, 0.0),
        2 => {
            let theta = residues[1].bond_angle.unwrap_or(PI);
            placed[1] + Vector3::new(-theta.cos(), theta.sin(), 0.0) * bond_length
        }
        _ => place_next(
            &placed[i - 3],
            &placed[i - 2],
            &placed[i - 1],
            bond_length,
            residues[i - 1].bond_angle.unwrap_or(PI),
            residues[i - 2].dihedral_angle.unwrap_or(PI),
        ),
    }
}

/// Natural extension reference frame step.
///
/// Builds the local frame of the `a -> b -> c` bonds (bond direction, in-plane
/// normal, bi-normal) and returns the point `d` such that `|cd| = bond_length`,
/// `angle(b, c, d) = theta` and `dihedral(a, b, c, d) = tao`.
///
/// When `a`, `b` and `c` are collinear the dihedral is undefined; the frame is
/// then completed with an arbitrary perpendicular so `|cd|` and the bond angle
/// still hold.
pub fn place_next(
    a: &Point3<f64>,
    b: &Point3<f64>,
    c: &Point3<f64>,
    bond_length: f64,
    theta: f64,
    tao: f64,
) -> Point3<f64> {
    let bc = normalize_or_zero(&difference(b, c));
    let mut normal = normalize_or_zero(&cross(&difference(a, b), &bc));
    if normal.norm() < EPSILON {
        normal = perpendicular_to(&bc);
    }
    let in_plane = cross(&normal, &bc);

    let (sin_theta, cos_theta) = theta.sin_cos();
    let (sin_tao, cos_tao) = tao.sin_cos();

    let offset = bc * (-cos_theta)
        + in_plane * (sin_theta * cos_tao)
        + normal * (sin_theta * sin_tao);

    c + offset * bond_length
}

/// A unit vector perpendicular to `v`, or zero if `v` is zero.
fn perpendicular_to(v: &Vector3<f64>) -> Vector3<f64> {
    let axis = if v.x.abs() <= v.y.abs() && v.x.abs() <= v.z.abs() {
        Vector3::x()
    } else if v.y.abs() <= v.z.abs() {
        Vector3::y()
    } else {
        Vector3::z()
    };
    normalize_or_zero(&cross(v, &axis))
}
