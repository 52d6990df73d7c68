//! Size targeting: search for an encode quality that fits a byte budget.
//!
//! Encoded size only grows roughly with quality, so the search is a
//! bounded bisection rather than an exact solve:
//!
//! 1. Encode at quality 1.0. If that already fits, stop.
//! 2. Otherwise bisect `[min_quality, 1.0]`. An over-budget attempt lowers
//!    the ceiling; a fitting one raises the floor and becomes the best fit.
//! 3. Stop once a fit uses at least `1 - fit_slack` of the budget, the
//!    interval is narrower than [`MIN_QUALITY_STEP`], or the attempt cap
//!    is reached.
//! 4. While nothing fits, the last attempt is spent on `min_quality`.
//!
//! Missing the budget is not an error. The caller gets the smallest result
//! seen and `met_target == false`.

use crate::config::SizeTargetPolicy;
use crate::encode::EncodedResult;

/// Bisection stops refining once the quality interval is this narrow.
pub const MIN_QUALITY_STEP: f32 = 0.01;

/// The result of a size-targeted encode.
#[derive(Debug, Clone)]
pub struct TargetOutcome {
    pub result: EncodedResult,
    /// Quality the returned result was encoded at.
    pub quality: f32,
    /// Encode attempts spent.
    pub attempts: u32,
    pub met_target: bool,
}

/// Run the quality search.
///
/// `encode` produces a blob at a given quality. `checkpoint` runs before
/// every attempt and aborts the search by returning an error (used for
/// supersession). Errors from either are returned unchanged.
pub fn search_quality<E, F, C>(
    target_bytes: u64,
    policy: &SizeTargetPolicy,
    mut encode: F,
    mut checkpoint: C,
) -> Result<TargetOutcome, E>
where
    F: FnMut(f32) -> Result<EncodedResult, E>,
    C: FnMut() -> Result<(), E>,
{
    let floor = policy.min_quality.clamp(0.0, 1.0);
    let max_attempts = policy.max_attempts.max(1);
    let min_fill = target_bytes as f64 * (1.0 - policy.fit_slack.clamp(0.0, 1.0) as f64);

    checkpoint()?;
    let first = encode(1.0)?;
    log_attempt(1, max_attempts, 1.0, &first, target_bytes);
    if first.byte_length() as u64 <= target_bytes {
        return Ok(TargetOutcome {
            result: first,
            quality: 1.0,
            attempts: 1,
            met_target: true,
        });
    }

    let mut low = floor;
    let mut high = 1.0f32;
    let mut attempts = 1u32;
    let mut best_fit: Option<(EncodedResult, f32)> = None;
    let mut smallest = (first, 1.0f32);
    let mut tried_floor = floor >= 1.0;

    while attempts < max_attempts && !tried_floor {
        let narrow = high - low < MIN_QUALITY_STEP;
        let candidate = match best_fit {
            Some(_) if narrow => break,
            Some(_) => (low + high) / 2.0,
            None if narrow || attempts + 1 == max_attempts => floor,
            None => (low + high) / 2.0,
        };
        tried_floor = candidate <= floor;

        checkpoint()?;
        let result = encode(candidate)?;
        attempts += 1;
        log_attempt(attempts, max_attempts, candidate, &result, target_bytes);

        let size = result.byte_length() as u64;
        if size <= target_bytes {
            if size as f64 >= min_fill {
                return Ok(TargetOutcome {
                    result,
                    quality: candidate,
                    attempts,
                    met_target: true,
                });
            }
            low = candidate;
            best_fit = Some((result, candidate));
        } else {
            high = candidate;
            if result.byte_length() < smallest.0.byte_length() {
                smallest = (result, candidate);
            }
        }
    }

    if let Some((result, quality)) = best_fit {
        return Ok(TargetOutcome {
            result,
            quality,
            attempts,
            met_target: true,
        });
    }

    let (result, quality) = smallest;
    log::warn!(
        "size target missed: {} bytes at quality {:.3} (target {})",
        result.byte_length(),
        quality,
        target_bytes
    );
    Ok(TargetOutcome {
        result,
        quality,
        attempts,
        met_target: false,
    })
}

fn log_attempt(
    attempt: u32,
    max_attempts: u32,
    quality: f32,
    result: &EncodedResult,
    target: u64,
) {
    log::debug!(
        "size target attempt {}/{}: quality {:.3} -> {} bytes (target {})",
        attempt,
        max_attempts,
        quality,
        result.byte_length(),
        target
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encode::EncodeError;
    use crate::format::OutputFormat;
    use std::cell::RefCell;

    /// Fake encoder whose output grows linearly with quality.
    fn linear_encoder(
        bytes_at_full: usize,
        log: &RefCell<Vec<f32>>,
    ) -> impl FnMut(f32) -> Result<EncodedResult, EncodeError> + '_ {
        move |quality| {
            log.borrow_mut().push(quality);
            Ok(EncodedResult {
                bytes: vec![0u8; ((bytes_at_full as f32) * quality).round().max(1.0) as usize],
                format: OutputFormat::Jpeg,
                width: 1,
                height: 1,
            })
        }
    }

    fn no_abort() -> Result<(), EncodeError> {
        Ok(())
    }

    #[test]
    fn test_already_under_budget_takes_one_attempt() {
        let log = RefCell::new(Vec::new());
        let outcome =
            search_quality(5000, &SizeTargetPolicy::default(), linear_encoder(1000, &log), no_abort)
                .unwrap();

        assert!(outcome.met_target);
        assert_eq!(outcome.attempts, 1);
        assert_eq!(outcome.quality, 1.0);
        assert_eq!(*log.borrow(), vec![1.0]);
    }

    #[test]
    fn test_exact_budget_at_full_quality() {
        let log = RefCell::new(Vec::new());
        let outcome =
            search_quality(1000, &SizeTargetPolicy::default(), linear_encoder(1000, &log), no_abort)
                .unwrap();
        assert_eq!(outcome.attempts, 1);
        assert!(outcome.met_target);
    }

    #[test]
    fn test_finds_fit_close_to_budget() {
        let log = RefCell::new(Vec::new());
        let outcome =
            search_quality(500, &SizeTargetPolicy::default(), linear_encoder(1000, &log), no_abort)
                .unwrap();

        assert!(outcome.met_target);
        assert!(outcome.result.byte_length() <= 500);
        assert!(outcome.result.byte_length() >= 450);
        assert!(outcome.attempts <= 7);
    }

    #[test]
    fn test_strict_variant_stops_at_first_fit() {
        let policy = SizeTargetPolicy {
            fit_slack: 1.0,
            ..Default::default()
        };
        let log = RefCell::new(Vec::new());
        // 1.0 -> 1000 (over), 0.55 -> 550 (fits, stop)
        let outcome = search_quality(600, &policy, linear_encoder(1000, &log), no_abort).unwrap();

        assert!(outcome.met_target);
        assert_eq!(outcome.attempts, 2);
        assert!((outcome.quality - 0.55).abs() < 1e-6);
    }

    #[test]
    fn test_unreachable_target_returns_floor_result() {
        let log = RefCell::new(Vec::new());
        let policy = SizeTargetPolicy::default();
        let outcome = search_quality(10, &policy, linear_encoder(1000, &log), no_abort).unwrap();

        assert!(!outcome.met_target);
        assert_eq!(outcome.attempts, policy.max_attempts);
        assert!((outcome.quality - policy.min_quality).abs() < f32::EPSILON);
        assert_eq!(outcome.result.byte_length(), 100);
        assert_eq!(*log.borrow().last().unwrap(), policy.min_quality);
    }

    #[test]
    fn test_floor_fit_is_met() {
        let log = RefCell::new(Vec::new());
        let policy = SizeTargetPolicy {
            max_attempts: 2,
            ..Default::default()
        };
        let outcome = search_quality(150, &policy, linear_encoder(1000, &log), no_abort).unwrap();

        assert!(outcome.met_target);
        assert_eq!(*log.borrow(), vec![1.0, 0.1]);
        assert_eq!(outcome.result.byte_length(), 100);
    }

    #[test]
    fn test_single_attempt_policy() {
        let log = RefCell::new(Vec::new());
        let policy = SizeTargetPolicy {
            max_attempts: 1,
            ..Default::default()
        };
        let outcome = search_quality(10, &policy, linear_encoder(1000, &log), no_abort).unwrap();

        assert!(!outcome.met_target);
        assert_eq!(outcome.attempts, 1);
        assert_eq!(outcome.quality, 1.0);
    }

    #[test]
    fn test_returns_smallest_when_sizes_are_not_monotonic() {
        // Sizes dip in the middle of the range and rise again at the floor.
        let encode = |quality: f32| -> Result<EncodedResult, EncodeError> {
            let len = if quality < 0.2 { 900 } else { (1000.0 * quality) as usize + 300 };
            Ok(EncodedResult {
                bytes: vec![0u8; len],
                format: OutputFormat::Jpeg,
                width: 1,
                height: 1,
            })
        };
        let outcome =
            search_quality(100, &SizeTargetPolicy::default(), encode, no_abort).unwrap();

        assert!(!outcome.met_target);
        assert!(outcome.result.byte_length() < 900);
    }

    #[test]
    fn test_encode_error_propagates() {
        let encode = |_: f32| -> Result<EncodedResult, EncodeError> {
            Err(EncodeError::InvalidDimensions {
                width: 0,
                height: 0,
            })
        };
        let result = search_quality(100, &SizeTargetPolicy::default(), encode, no_abort);
        assert!(matches!(result, Err(EncodeError::InvalidDimensions { .. })));
    }

    #[test]
    fn test_checkpoint_aborts_between_attempts() {
        let log = RefCell::new(Vec::new());
        let mut checks = 0;
        let checkpoint = || {
            checks += 1;
            if checks > 2 {
                Err(EncodeError::InvalidQuality(-1.0))
            } else {
                Ok(())
            }
        };
        let result = search_quality(
            10,
            &SizeTargetPolicy::default(),
            linear_encoder(1000, &log),
            checkpoint,
        );

        assert!(result.is_err());
        assert_eq!(log.borrow().len(), 2);
    }
}
