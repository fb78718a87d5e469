//! Seeded train/validation split.
//!
//! Row indices are shuffled with a `StdRng` seeded from the run seed, so the
//! same seed always selects the same validation wells.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use super::ModelError;

/// Row indices for the two halves of a split
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrainValidationSplit {
    pub train: Vec<usize>,
    pub validation: Vec<usize>,
}

/// Split `rows` row indices into training and validation parts.
///
/// Validation size is `ceil(rows * validation_fraction)`; the remainder trains.
/// Both parts must end up non-empty.
pub fn split_train_validation(
    rows: usize,
    validation_fraction: f64,
    seed: u64,
) -> Result<TrainValidationSplit, ModelError> {
    let too_small = || ModelError::SplitTooSmall {
        rows,
        fraction: validation_fraction,
    };

    if !(validation_fraction > 0.0 && validation_fraction < 1.0) {
        return Err(too_small());
    }

    let validation_rows = (rows as f64 * validation_fraction).ceil() as usize;
    if validation_rows == 0 || validation_rows >= rows {
        return Err(too_small());
    }

    let mut indices: Vec<usize> = (0..rows).collect();
    let mut rng = StdRng::seed_from_u64(seed);
    indices.shuffle(&mut rng);

    let train = indices.split_off(validation_rows);
    Ok(TrainValidationSplit {
        train,
        validation: indices,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_sizes_round_validation_up() {
        let split = split_train_validation(10, 0.25, 1).unwrap();
        assert_eq!(split.validation.len(), 3);
        assert_eq!(split.train.len(), 7);

        let split = split_train_validation(100_000, 0.25, 12_345).unwrap();
        assert_eq!(split.validation.len(), 25_000);
        assert_eq!(split.train.len(), 75_000);
    }

    #[test]
    fn test_split_is_a_partition() {
        let split = split_train_validation(50, 0.3, 7).unwrap();
        let mut all: Vec<usize> = split.train.iter().chain(&split.validation).copied().collect();
        all.sort_unstable();
        assert_eq!(all, (0..50).collect::<Vec<_>>());
    }

    #[test]
    fn test_split_is_deterministic_per_seed() {
        let a = split_train_validation(200, 0.25, 42).unwrap();
        let b = split_train_validation(200, 0.25, 42).unwrap();
        let c = split_train_validation(200, 0.25, 43).unwrap();
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_split_too_small_rejected() {
        assert!(matches!(
            split_train_validation(1, 0.25, 0),
            Err(ModelError::SplitTooSmall { rows: 1, .. })
        ));
        assert!(split_train_validation(0, 0.25, 0).is_err());
        assert!(split_train_validation(10, 0.0, 0).is_err());
        assert!(split_train_validation(10, 1.0, 0).is_err());
    }
}
