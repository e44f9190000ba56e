use crate::moves::{MoveLog, Recorder};

/// Top-down merge sort.
///
/// Each recursive call returns its sorted run as a scratch vector; only the
/// writes back into the shared index range are logged, one Overwrite per
/// position. Ties take from the left run, which keeps the sort stable.
pub fn merge<T: PartialOrd + Clone>(values: &[T]) -> MoveLog<T> {
    let mut rec = Recorder::new(values);
    let n = rec.len();
    if n > 1 {
        sort_run(&mut rec, 0, n);
    }
    rec.finish()
}

fn sort_run<T: PartialOrd + Clone>(rec: &mut Recorder<T>, lo: usize, hi: usize) -> Vec<T> {
    if hi - lo <= 1 {
        return rec.values()[lo..hi].to_vec();
    }
    let mid = lo + (hi - lo) / 2;
    let left = sort_run(rec, lo, mid);
    let right = sort_run(rec, mid, hi);

    let merged = merge_runs(&left, &right);
    for (offset, value) in merged.iter().enumerate() {
        rec.overwrite(lo + offset, value.clone());
    }
    merged
}

fn merge_runs<T: PartialOrd + Clone>(left: &[T], right: &[T]) -> Vec<T> {
    let mut out = Vec::with_capacity(left.len() + right.len());
    let (mut a, mut b) = (0, 0);
    while a < left.len() && b < right.len() {
        if right[b] < left[a] {
            out.push(right[b].clone());
            b += 1;
        } else {
            out.push(left[a].clone());
            a += 1;
        }
    }
    out.extend_from_slice(&left[a..]);
    out.extend_from_slice(&right[b..]);
    out
}
