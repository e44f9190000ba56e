use crate::moves::{MoveLog, Recorder};

/// Bubble sort: full adjacent-pair passes until a pass makes no swap.
pub fn bubble<T: PartialOrd + Clone>(values: &[T]) -> MoveLog<T> {
    let mut rec = Recorder::new(values);
    let n = rec.len();
    if n <= 1 {
        return rec.finish();
    }

    loop {
        let mut swapped = false;
        for j in 0..n - 1 {
            if rec.get(j) > rec.get(j + 1) {
                rec.swap(j, j + 1);
                swapped = true;
            }
        }
        if !swapped {
            break;
        }
    }
    rec.finish()
}
