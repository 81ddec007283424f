// Whole-track resolution.
//
// Wires each note to its neighbours and runs the phonemizer over every note.
// Two notes are neighbours only when they touch: the earlier note's end tick
// equals the later note's start. A rest between notes makes the later one
// phrase-initial. Notes are expected in position order.
//
// Each note resolves independently, so `par_resolve_track` can fan out over
// rayon's pool and still return exactly what `resolve_track` returns.

use crate::note::{Note, Phoneme};
use crate::phonemizer::Phonemizer;
use rayon::prelude::*;

/// Previous and next neighbours of `notes[index]`.
pub fn neighbours(notes: &[Note], index: usize) -> (Option<&Note>, Option<&Note>) {
    let Some(note) = notes.get(index) else {
        return (None, None);
    };
    let prev = index
        .checked_sub(1)
        .and_then(|i| notes.get(i))
        .filter(|prev| prev.end() == i64::from(note.position));
    let next = notes
        .get(index + 1)
        .filter(|next| note.end() == i64::from(next.position));
    (prev, next)
}

fn resolve_at<P>(phonemizer: &P, notes: &[Note], index: usize) -> Vec<Phoneme>
where
    P: Phonemizer + ?Sized,
{
    let (prev, next) = neighbours(notes, index);
    phonemizer.process(&notes[index..], prev, next)
}

/// Phonemes for every note, in order.
pub fn resolve_track<P>(phonemizer: &P, notes: &[Note]) -> Vec<Vec<Phoneme>>
where
    P: Phonemizer + ?Sized,
{
    (0..notes.len())
        .map(|i| resolve_at(phonemizer, notes, i))
        .collect()
}

/// `resolve_track` across the rayon pool.
pub fn par_resolve_track<P>(phonemizer: &P, notes: &[Note]) -> Vec<Vec<Phoneme>>
where
    P: Phonemizer + Sync + ?Sized,
{
    (0..notes.len())
        .into_par_iter()
        .map(|i| resolve_at(phonemizer, notes, i))
        .collect()
}
