use crate::moves::{MoveLog, Recorder};

/// Selection sort. The first occurrence of the minimum wins, and a Swap is
/// only recorded when the minimum is not already in place.
pub fn selection<T: PartialOrd + Clone>(values: &[T]) -> MoveLog<T> {
    let mut rec = Recorder::new(values);
    let n = rec.len();

    for i in 0..n.saturating_sub(1) {
        let mut min = i;
        for j in i + 1..n {
            if rec.get(j) < rec.get(min) {
                min = j;
            }
        }
        if min != i {
            rec.swap(i, min);
        }
    }
    rec.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Move;

    #[test]
    fn swaps_minimum_into_place() {
        let log = selection(&[0.3, 0.1, 0.2]);
        assert_eq!(
            log.moves(),
            &[Move::Swap { i: 0, j: 1 }, Move::Swap { i: 1, j: 2 }]
        );
    }

    #[test]
    fn minimum_already_in_place_is_skipped() {
        let log = selection(&[0.1, 0.3, 0.2]);
        assert_eq!(log.moves(), &[Move::Swap { i: 1, j: 2 }]);
    }

    #[test]
    fn at_most_one_swap_per_position() {
        let log = selection(&[0.9, 0.8, 0.7, 0.6, 0.5, 0.4]);
        assert!(log.swap_count() <= 5);
        assert_eq!(
            log.replay(&[0.9, 0.8, 0.7, 0.6, 0.5, 0.4]),
            vec![0.4, 0.5, 0.6, 0.7, 0.8, 0.9]
        );
    }
}
