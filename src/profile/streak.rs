use time::OffsetDateTime;
use tracing::warn;

/// Advances the consecutive-day treatment streak for a login happening at
/// `now`. The day delta is taken over whole UTC calendar days, so the hour
/// of day never matters:
///
/// - no previous login: streak starts at 1,
/// - same calendar day: streak unchanged,
/// - exactly the next day: streak + 1,
/// - any larger gap: reset to 1.
///
/// A `now` earlier than the recorded last login (clock skew, out-of-order
/// delivery) is treated as a same-day login and logged; the streak never
/// decreases. `last_login` always advances to `now`.
pub fn advance(
    current_streak: i32,
    last_login: Option<OffsetDateTime>,
    now: OffsetDateTime,
) -> (i32, OffsetDateTime) {
    let Some(last) = last_login else {
        return (1, now);
    };

    let delta_days = now.date().to_julian_day() - last.date().to_julian_day();
    let streak = match delta_days {
        0 => current_streak,
        1 => current_streak + 1,
        d if d > 1 => 1,
        d => {
            warn!(
                delta_days = d,
                "login earlier than recorded last login; keeping streak"
            );
            current_streak
        }
    };
    (streak, now)
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    #[test]
    fn first_login_starts_streak_at_one() {
        let now = datetime!(2025-03-10 09:00 UTC);
        assert_eq!(advance(0, None, now), (1, now));
    }

    #[test]
    fn same_day_login_keeps_streak_but_advances_last_login() {
        let morning = datetime!(2025-03-10 09:00 UTC);
        let evening = datetime!(2025-03-10 21:30 UTC);
        let (streak, last_login) = advance(1, Some(morning), evening);
        assert_eq!(streak, 1);
        assert_eq!(last_login, evening);
    }

    #[test]
    fn next_day_login_increments() {
        let (streak, _) = advance(
            1,
            Some(datetime!(2025-03-10 23:59 UTC)),
            datetime!(2025-03-11 00:01 UTC),
        );
        assert_eq!(streak, 2);
    }

    #[test]
    fn skipped_day_resets_to_one() {
        let (streak, _) = advance(
            5,
            Some(datetime!(2025-03-10 09:00 UTC)),
            datetime!(2025-03-12 09:00 UTC),
        );
        assert_eq!(streak, 1);
    }

    #[test]
    fn increments_across_month_and_year_boundaries() {
        let (streak, _) = advance(
            3,
            Some(datetime!(2024-12-31 22:00 UTC)),
            datetime!(2025-01-01 07:00 UTC),
        );
        assert_eq!(streak, 4);
    }

    #[test]
    fn backwards_clock_keeps_streak() {
        let later = datetime!(2025-03-12 09:00 UTC);
        let earlier = datetime!(2025-03-10 09:00 UTC);
        let (streak, last_login) = advance(4, Some(later), earlier);
        assert_eq!(streak, 4);
        assert_eq!(last_login, earlier);
    }

    #[test]
    fn multi_day_login_sequence() {
        let day0 = datetime!(2025-06-01 08:00 UTC);
        let day0_later = datetime!(2025-06-01 20:00 UTC);
        let day1 = datetime!(2025-06-02 08:00 UTC);
        let day3 = datetime!(2025-06-04 08:00 UTC);

        let (streak, last) = advance(0, None, day0);
        assert_eq!(streak, 1);
        let (streak, last) = advance(streak, Some(last), day0_later);
        assert_eq!(streak, 1);
        let (streak, last) = advance(streak, Some(last), day1);
        assert_eq!(streak, 2);
        let (streak, _) = advance(streak, Some(last), day3);
        assert_eq!(streak, 1);
    }
}
