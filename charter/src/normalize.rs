use crate::chart::NoteRecord;

/// Rescale every present `x` linearly so the smallest maps to 0 and the
/// largest to `target`. Notes without an `x` are left untouched, and a
/// degenerate range (all x equal, or no x at all) keeps the offsets but
/// applies no scaling.
pub fn normalize(notes: &mut [NoteRecord], target: i64) {
    let xs: Vec<i64> = notes.iter().filter_map(|n| n.x).collect();
    let (min, max) = match (xs.iter().min(), xs.iter().max()) {
        (Some(&min), Some(&max)) => (min, max),
        _ => return,
    };

    let scale = if max != min {
        target as f64 / (max - min) as f64
    } else {
        1.0
    };

    for note in notes.iter_mut() {
        if let Some(x) = note.x {
            note.x = Some(((x - min) as f64 * scale).round() as i64);
        }
    }
}
