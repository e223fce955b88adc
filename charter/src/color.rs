use crate::chart::Beat;
use num_integer::Integer;

/// Display color of a note, keyed by its rhythmic divisor.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NoteColor {
    Red,
    Blue,
    Green,
    Purple,
    Yellow,
    /// Fallback for sentinel beats and divisors outside the table.
    Gray,
}

impl NoteColor {
    pub fn name(&self) -> &'static str {
        match self {
            NoteColor::Red => "red",
            NoteColor::Blue => "blue",
            NoteColor::Green => "green",
            NoteColor::Purple => "purple",
            NoteColor::Yellow => "yellow",
            NoteColor::Gray => "gray",
        }
    }
}

/// Classify a beat by its reduced divisor `(1, denominator / gcd)`.
///
/// A zero numerator counts as a whole beat (divisor 1). Pure lookup,
/// never touches the beat itself.
pub fn classify(beat: &Beat) -> NoteColor {
    if beat.denominator == 0 {
        return NoteColor::Gray;
    }

    let divisor = if beat.numerator == 0 {
        1
    } else {
        beat.denominator / beat.numerator.gcd(&beat.denominator)
    };

    match divisor {
        1 => NoteColor::Red,
        2 => NoteColor::Blue,
        3 | 6 | 12 | 24 => NoteColor::Green,
        4 => NoteColor::Purple,
        8 | 16 | 32 => NoteColor::Yellow,
        _ => NoteColor::Gray,
    }
}
