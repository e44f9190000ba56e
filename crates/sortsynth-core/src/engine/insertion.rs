use crate::moves::{MoveLog, Recorder};

/// Insertion sort.
///
/// The key walks left one Swap at a time, then is placed with an Overwrite.
/// The Overwrite is emitted even when the key never moved, so every position
/// from 1 to n-1 produces exactly one Overwrite.
pub fn insertion<T: PartialOrd + Clone>(values: &[T]) -> MoveLog<T> {
    let mut rec = Recorder::new(values);
    let n = rec.len();

    for i in 1..n {
        let key = rec.get(i).clone();
        let mut j = i;
        while j > 0 && *rec.get(j - 1) > key {
            rec.swap(j - 1, j);
            j -= 1;
        }
        rec.overwrite(j, key);
    }
    rec.finish()
}
