/// Importance of the pair `(i, j)` in every weighted score.
///
/// Long-range pairs dominate because they carry the fold; neighbours along the
/// chain are nearly fixed by the bond geometry anyway.
pub fn pair_weight(i: usize, j: usize) -> f64 {
    match i.abs_diff(j) {
        0..6 => 1.0,
        6..12 => 2.0,
        12..24 => 4.0,
        _ => 8.0,
    }
}
