use crate::moves::{MoveLog, Recorder};

/// Heap sort over a max-heap built bottom-up.
pub fn heap<T: PartialOrd + Clone>(values: &[T]) -> MoveLog<T> {
    let mut rec = Recorder::new(values);
    let n = rec.len();
    if n <= 1 {
        return rec.finish();
    }

    for start in (0..n / 2).rev() {
        sift_down(&mut rec, start, n);
    }
    for end in (1..n).rev() {
        rec.swap(0, end);
        sift_down(&mut rec, 0, end);
    }
    rec.finish()
}

/// Restore the heap property below `root` within the first `size` slots.
///
/// When both children are equal and larger than the parent the left child is
/// promoted.
fn sift_down<T: PartialOrd + Clone>(rec: &mut Recorder<T>, mut root: usize, size: usize) {
    loop {
        let left = 2 * root + 1;
        let right = left + 1;
        let mut largest = root;

        if left < size && rec.get(left) > rec.get(largest) {
            largest = left;
        }
        if right < size && rec.get(right) > rec.get(largest) {
            largest = right;
        }
        if largest == root {
            return;
        }
        rec.swap(root, largest);
        root = largest;
    }
}
