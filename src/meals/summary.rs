use super::repo::DietStatus;

/// Longest contiguous run of on-diet meals over flags in storage order.
///
/// Running counter: increment on yes, reset on no, keep the maximum seen.
pub fn best_sequence(flags: &[DietStatus]) -> i64 {
    let mut best = 0i64;
    let mut current = 0i64;
    for flag in flags {
        match flag {
            DietStatus::Yes => {
                current += 1;
                if current > best {
                    best = current;
                }
            }
            DietStatus::No => current = 0,
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use DietStatus::{No, Yes};

    #[test]
    fn empty_sequence_is_zero() {
        assert_eq!(best_sequence(&[]), 0);
    }

    #[test]
    fn all_off_diet_is_zero() {
        assert_eq!(best_sequence(&[No, No, No]), 0);
    }

    #[test]
    fn all_on_diet_counts_every_meal() {
        assert_eq!(best_sequence(&[Yes, Yes, Yes, Yes]), 4);
    }

    #[test]
    fn longest_run_wins() {
        assert_eq!(best_sequence(&[Yes, Yes, No, Yes, Yes, Yes]), 3);
    }

    #[test]
    fn earlier_run_is_kept_when_later_ties() {
        assert_eq!(best_sequence(&[Yes, Yes, No, Yes, Yes]), 2);
    }

    #[test]
    fn run_ending_at_the_tail_is_counted() {
        assert_eq!(best_sequence(&[No, Yes, Yes]), 2);
    }
}
