use crate::chart::{Beat, ChartDoc};
use crate::error::CharterError;
use num_integer::Integer;

/// How far a beat fraction may be reduced.
///
/// Chart tooling in the wild disagrees on this: plain gcd reduction can
/// leave a denominator of 1, which some editors render ambiguously, so
/// one lineage rescales those back to halves. Both behaviors are kept
/// selectable rather than picking one.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SimplifyPolicy {
    /// Full gcd reduction, nothing else.
    Strict,
    /// gcd reduction, then rescale a denominator of 1 up to 2
    /// (`n/1` becomes `2n/2`, same value).
    FloorAtTwo,
}

/// Reduce `numerator / denominator` to lowest terms under `policy`.
///
/// gcd(0, d) = d, so a zero numerator reduces to 0/1 (or 0/2 under
/// [`SimplifyPolicy::FloorAtTwo`]). The returned denominator always
/// divides the input denominator, except for the floor-at-two rescue
/// which pins it at exactly 2.
pub fn reduce(
    numerator: u32,
    denominator: u32,
    policy: SimplifyPolicy,
) -> Result<(u32, u32), CharterError> {
    if denominator == 0 {
        return Err(CharterError::InvalidDenominator(0));
    }

    let divisor = numerator.gcd(&denominator);
    let (num, den) = (numerator / divisor, denominator / divisor);

    match policy {
        SimplifyPolicy::Strict => Ok((num, den)),
        SimplifyPolicy::FloorAtTwo if den < 2 => Ok((num * 2, 2)),
        SimplifyPolicy::FloorAtTwo => Ok((num, den)),
    }
}

/// Reduce one beat's fraction, leaving the measure alone.
///
/// Beats carrying the denominator-0 sentinel are passed through
/// unchanged; they are display placeholders, not times.
pub fn simplify_beat(beat: Beat, policy: SimplifyPolicy) -> Beat {
    match reduce(beat.numerator, beat.denominator, policy) {
        Ok((num, den)) => Beat::new(beat.measure, num, den),
        Err(_) => beat,
    }
}

/// Rewrite every note's `beat` and `endbeat` in the chart to reduced
/// form. This is the whole-chart export pass; note order and all other
/// fields are untouched.
pub fn simplify_chart(chart: &mut ChartDoc, policy: SimplifyPolicy) {
    for note in &mut chart.note {
        note.beat = simplify_beat(note.beat, policy);
        if let Some(end) = note.endbeat {
            note.endbeat = Some(simplify_beat(end, policy));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::NoteRecord;
    use num_integer::Integer;

    #[test]
    fn test_strict_reduces_to_lowest_terms() {
        assert_eq!(reduce(2, 4, SimplifyPolicy::Strict).unwrap(), (1, 2));
        assert_eq!(reduce(6, 8, SimplifyPolicy::Strict).unwrap(), (3, 4));
        assert_eq!(reduce(3, 4, SimplifyPolicy::Strict).unwrap(), (3, 4));
        assert_eq!(reduce(0, 16, SimplifyPolicy::Strict).unwrap(), (0, 1));
    }

    #[test]
    fn test_strict_preserves_value_and_is_coprime() {
        for den in 1u32..=32 {
            for num in 0..=2 * den {
                let (rn, rd) = reduce(num, den, SimplifyPolicy::Strict).unwrap();
                // Rational equality: num/den == rn/rd
                assert_eq!(num as u64 * rd as u64, rn as u64 * den as u64);
                assert!(rn == 0 || rn.gcd(&rd) == 1);
                assert_eq!(den % rd, 0);
            }
        }
    }

    #[test]
    fn test_floor_at_two_rescues_whole_beats() {
        assert_eq!(reduce(4, 4, SimplifyPolicy::FloorAtTwo).unwrap(), (2, 2));
        assert_eq!(reduce(0, 8, SimplifyPolicy::FloorAtTwo).unwrap(), (0, 2));
        // Denominator already >= 2 after reduction: untouched
        assert_eq!(reduce(2, 4, SimplifyPolicy::FloorAtTwo).unwrap(), (1, 2));
        assert_eq!(reduce(3, 8, SimplifyPolicy::FloorAtTwo).unwrap(), (3, 8));
    }

    #[test]
    fn test_zero_denominator_rejected() {
        assert_eq!(
            reduce(1, 0, SimplifyPolicy::Strict),
            Err(CharterError::InvalidDenominator(0))
        );
    }

    #[test]
    fn test_simplify_chart_rewrites_beat_and_endbeat() {
        let mut chart = ChartDoc::default();
        chart.note.push(NoteRecord {
            beat: Beat::new(0, 2, 8),
            x: Some(100),
            endbeat: Some(Beat::new(1, 4, 8)),
        });
        chart.note.push(NoteRecord::new(Beat::new(2, 0, 0), 50));

        simplify_chart(&mut chart, SimplifyPolicy::Strict);

        assert_eq!(chart.note[0].beat, Beat::new(0, 1, 4));
        assert_eq!(chart.note[0].endbeat, Some(Beat::new(1, 1, 2)));
        assert_eq!(chart.note[0].x, Some(100));
        // Sentinel beat passes through untouched
        assert_eq!(chart.note[1].beat, Beat::new(2, 0, 0));
    }
}
