use crate::moves::{MoveLog, Recorder};

/// Quick sort with Lomuto partitioning around the last element.
///
/// Every element moved into the less-than region is recorded as a Swap, even
/// when it swaps with itself, and the pivot placement is always recorded.
pub fn quick<T: PartialOrd + Clone>(values: &[T]) -> MoveLog<T> {
    let mut rec = Recorder::new(values);
    let n = rec.len();
    if n > 1 {
        sort_range(&mut rec, 0, n - 1);
    }
    rec.finish()
}

/// Sort the inclusive range `lo..=hi`, low partition first.
fn sort_range<T: PartialOrd + Clone>(rec: &mut Recorder<T>, lo: usize, hi: usize) {
    if lo >= hi {
        return;
    }
    let pivot = partition(rec, lo, hi);
    if pivot > lo {
        sort_range(rec, lo, pivot - 1);
    }
    sort_range(rec, pivot + 1, hi);
}

fn partition<T: PartialOrd + Clone>(rec: &mut Recorder<T>, lo: usize, hi: usize) -> usize {
    let pivot = rec.get(hi).clone();
    let mut store = lo;
    for j in lo..hi {
        if *rec.get(j) < pivot {
            rec.swap(store, j);
            store += 1;
        }
    }
    rec.swap(store, hi);
    store
}
