use rand::{rngs::StdRng, seq::SliceRandom, SeedableRng};
use tracing::debug;

use crate::data::Frame;
use crate::error::PrepError;

/// The two disjoint partitions produced by [`train_test_split`]. Every input
/// row lands in exactly one of them.
#[derive(Debug, Clone, PartialEq)]
pub struct Split {
    pub train: Frame,
    pub test: Frame,
}

/// Partition `frame` into test and train subsets.
///
/// The test subset gets exactly `round(test_ratio * n)` rows, chosen by
/// shuffling row indices with an RNG seeded from `seed`. The same input and
/// seed always yield the same partitions, row for row. Row order inside each
/// partition follows the shuffle, not the original order.
pub fn train_test_split(frame: &Frame, test_ratio: f64, seed: u64) -> Result<Split, PrepError> {
    if !(test_ratio > 0.0 && test_ratio < 1.0) {
        return Err(PrepError::InvalidRatio { ratio: test_ratio });
    }
    let n = frame.len();
    if n == 0 {
        return Err(PrepError::EmptyDataset);
    }

    let mut indices: Vec<usize> = (0..n).collect();
    let mut rng = StdRng::seed_from_u64(seed);
    indices.shuffle(&mut rng);

    let n_test = (test_ratio * n as f64).round() as usize;
    let (test_idx, train_idx) = indices.split_at(n_test);

    debug!(n, n_test, n_train = train_idx.len(), seed, "split dataset");
    Ok(Split {
        train: frame.take(train_idx),
        test: frame.take(test_idx),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::Value;

    fn numbered_frame(n: usize) -> Frame {
        let rows = (0..n).map(|i| vec![Value::Int(i as i64)]).collect();
        Frame::new(vec!["Id".into()], rows)
    }

    #[test]
    fn partition_sizes_add_up() {
        for (n, ratio) in [(10, 0.3), (7, 0.5), (100, 0.8), (4, 0.25)] {
            let frame = numbered_frame(n);
            let split = train_test_split(&frame, ratio, 42).unwrap();

            let expected_test = (ratio * n as f64).round() as usize;
            assert_eq!(split.test.len(), expected_test);
            assert_eq!(split.train.len() + split.test.len(), n);
        }
    }

    #[test]
    fn every_row_lands_exactly_once() {
        let frame = numbered_frame(20);
        let split = train_test_split(&frame, 0.4, 42).unwrap();

        let mut seen: Vec<i64> = split
            .train
            .rows()
            .iter()
            .chain(split.test.rows())
            .map(|r| match &r[0] {
                Value::Int(v) => *v,
                other => panic!("unexpected value {:?}", other),
            })
            .collect();
        seen.sort_unstable();
        assert_eq!(seen, (0..20).collect::<Vec<i64>>());
    }

    #[test]
    fn same_seed_same_partition() {
        let frame = numbered_frame(50);
        let first = train_test_split(&frame, 0.2, 42).unwrap();
        let second = train_test_split(&frame, 0.2, 42).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn different_seed_usually_differs() {
        let frame = numbered_frame(50);
        let a = train_test_split(&frame, 0.2, 42).unwrap();
        let b = train_test_split(&frame, 0.2, 43).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn out_of_range_ratios_are_rejected() {
        let frame = numbered_frame(10);
        for ratio in [0.0, 1.0, 1.5, -0.2] {
            let err = train_test_split(&frame, ratio, 42).unwrap_err();
            assert!(matches!(err, PrepError::InvalidRatio { ratio: r } if r == ratio));
        }
    }

    #[test]
    fn empty_dataset_is_rejected() {
        let frame = numbered_frame(0);
        let err = train_test_split(&frame, 0.5, 42).unwrap_err();
        assert!(matches!(err, PrepError::EmptyDataset));
    }

    #[test]
    fn single_row_leaves_one_side_empty() {
        let frame = numbered_frame(1);

        // round(0.25 * 1) = 0: everything trains
        let low = train_test_split(&frame, 0.25, 42).unwrap();
        assert_eq!((low.train.len(), low.test.len()), (1, 0));

        // round(0.75 * 1) = 1: everything tests
        let high = train_test_split(&frame, 0.75, 42).unwrap();
        assert_eq!((high.train.len(), high.test.len()), (0, 1));
    }
}
