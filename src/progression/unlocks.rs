//! Time-gated bonus unlocks
//!
//! The signup bonus is released in monthly tranches counted from the
//! registration instant. A "month" is a fixed 30-day interval, not a
//! calendar month.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::data::ConfigError;
use crate::time::Timestamp;

const MILLIS_PER_DAY: u64 = 24 * 60 * 60 * 1000;

pub const TOTAL_BONUS: u32 = 1000;
pub const INITIAL_UNLOCKED: u32 = 100;
pub const MONTHLY_UNLOCK: u32 = 100;
pub const UNLOCK_INTERVAL_DAYS: u32 = 30;
pub const TOTAL_UNLOCKS: u32 = 9;

/// Shape of the bonus release plan
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnlockPlan {
    /// Full bonus once every tranche is released
    pub total_bonus: u32,
    /// Amount available immediately at registration
    pub initial_unlocked: u32,
    /// Amount released per tranche
    pub monthly_unlock: u32,
    /// Length of one tranche interval in days
    pub interval_days: u32,
    /// Number of tranches after the initial release
    pub total_unlocks: u32,
}

impl UnlockPlan {
    pub const STANDARD: UnlockPlan = UnlockPlan {
        total_bonus: TOTAL_BONUS,
        initial_unlocked: INITIAL_UNLOCKED,
        monthly_unlock: MONTHLY_UNLOCK,
        interval_days: UNLOCK_INTERVAL_DAYS,
        total_unlocks: TOTAL_UNLOCKS,
    };

    /// Length of one tranche interval
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_millis())
    }

    fn interval_millis(&self) -> u64 {
        self.interval_days as u64 * MILLIS_PER_DAY
    }

    /// Check that the tranches add up to the total bonus
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.interval_days == 0 {
            return Err(ConfigError::Invalid("unlock interval must be at least one day".to_string()));
        }
        if self.total_unlocks == 0 {
            return Err(ConfigError::Invalid("unlock plan needs at least one tranche".to_string()));
        }
        let scheduled = self.monthly_unlock as u64 * self.total_unlocks as u64 + self.initial_unlocked as u64;
        if scheduled != self.total_bonus as u64 {
            return Err(ConfigError::Invalid(format!(
                "tranches release {} but total bonus is {}",
                scheduled, self.total_bonus
            )));
        }
        Ok(())
    }

    /// Number of tranches released by `now`, capped at the tranche count
    pub fn unlocks_completed(&self, registered: Timestamp, now: Timestamp) -> u32 {
        let elapsed = now.saturating_since(registered).as_millis() as u64;
        let completed = elapsed.checked_div(self.interval_millis()).unwrap_or(u64::MAX);
        completed.min(self.total_unlocks as u64) as u32
    }

    /// Instant at which the tranche with the given 1-based month unlocks
    pub fn tranche_date(&self, registered: Timestamp, month: u32) -> Timestamp {
        registered.plus(Duration::from_millis(self.interval_millis().saturating_mul(month as u64)))
    }

    /// Build the full schedule as seen at `now`
    pub fn compute(&self, registered: Timestamp, now: Timestamp) -> BonusSchedule {
        let completed = self.unlocks_completed(registered, now);

        let unlocked = self
            .initial_unlocked
            .saturating_add(completed.saturating_mul(self.monthly_unlock));
        let locked = self.total_bonus.saturating_sub(unlocked);

        let next_unlock_date = if completed < self.total_unlocks {
            Some(self.tranche_date(registered, completed + 1))
        } else {
            None
        };

        let monthly_unlocks = (0..self.total_unlocks)
            .map(|i| MonthlyUnlock {
                month: i + 1,
                amount: self.monthly_unlock,
                date: self.tranche_date(registered, i + 1),
                unlocked: i < completed,
            })
            .collect();

        let progress_percent = if self.total_bonus == 0 {
            0.0
        } else {
            100.0 * unlocked as f64 / self.total_bonus as f64
        };

        log::debug!(
            "Bonus schedule at {}: {} tranches done, {}/{} unlocked",
            now, completed, unlocked, self.total_bonus
        );

        BonusSchedule {
            total_bonus: self.total_bonus,
            unlocked,
            locked,
            next_unlock_date,
            monthly_unlocks,
            progress_percent,
        }
    }
}

impl Default for UnlockPlan {
    fn default() -> Self {
        Self::STANDARD
    }
}

/// One scheduled tranche
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MonthlyUnlock {
    /// 1-based tranche number
    pub month: u32,
    pub amount: u32,
    pub date: Timestamp,
    pub unlocked: bool,
}

/// Bonus release state at a given instant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BonusSchedule {
    pub total_bonus: u32,
    pub unlocked: u32,
    pub locked: u32,
    /// Absent once every tranche is released
    pub next_unlock_date: Option<Timestamp>,
    pub monthly_unlocks: Vec<MonthlyUnlock>,
    /// 0..=100
    pub progress_percent: f64,
}

impl BonusSchedule {
    pub fn is_fully_unlocked(&self) -> bool {
        self.next_unlock_date.is_none()
    }

    pub fn unlocked_tranches(&self) -> usize {
        self.monthly_unlocks.iter().filter(|t| t.unlocked).count()
    }

    /// Wait until the next tranche, zero if it is already due
    pub fn time_until_next_unlock(&self, now: Timestamp) -> Option<Duration> {
        self.next_unlock_date.map(|next| next.saturating_since(now))
    }
}

/// Compute the standard bonus schedule
pub fn compute_schedule(registered: Timestamp, now: Timestamp) -> BonusSchedule {
    UnlockPlan::STANDARD.compute(registered, now)
}

#[cfg(test)]
mod tests {
    use super::*;

    const DAY_MS: u64 = MILLIS_PER_DAY;
    const MONTH_MS: u64 = 30 * DAY_MS;

    fn at(millis: u64) -> Timestamp {
        Timestamp::from_millis(millis)
    }

    #[test]
    fn test_standard_plan_is_valid() {
        assert!(UnlockPlan::STANDARD.validate().is_ok());
    }

    #[test]
    fn test_invalid_plans_rejected() {
        let mut plan = UnlockPlan::STANDARD;
        plan.monthly_unlock = 50;
        assert!(plan.validate().is_err());

        let mut plan = UnlockPlan::STANDARD;
        plan.interval_days = 0;
        assert!(plan.validate().is_err());
    }

    #[test]
    fn test_fresh_registration() {
        let registered = at(5_000);
        let schedule = compute_schedule(registered, registered);

        assert_eq!(schedule.unlocked, 100);
        assert_eq!(schedule.locked, 900);
        assert_eq!(schedule.next_unlock_date, Some(at(5_000 + MONTH_MS)));
        assert_eq!(schedule.monthly_unlocks.len(), 9);
        assert!(schedule.monthly_unlocks.iter().all(|t| !t.unlocked));
        assert_eq!(schedule.progress_percent, 10.0);
    }

    #[test]
    fn test_just_before_first_tranche() {
        let schedule = compute_schedule(at(0), at(MONTH_MS - 1));
        assert_eq!(schedule.unlocked, 100);
        assert_eq!(schedule.next_unlock_date, Some(at(MONTH_MS)));
    }

    #[test]
    fn test_one_month_and_a_millisecond() {
        let schedule = compute_schedule(at(0), at(MONTH_MS + 1));

        assert_eq!(schedule.unlocked, 200);
        assert_eq!(schedule.locked, 800);
        assert!(schedule.monthly_unlocks[0].unlocked);
        assert!(schedule.monthly_unlocks[1..].iter().all(|t| !t.unlocked));
        assert_eq!(schedule.next_unlock_date, Some(at(2 * MONTH_MS)));
        assert_eq!(schedule.progress_percent, 20.0);
    }

    #[test]
    fn test_fully_unlocked() {
        for months in [9, 10, 48] {
            let schedule = compute_schedule(at(0), at(months * MONTH_MS));
            assert_eq!(schedule.unlocked, 1000);
            assert_eq!(schedule.locked, 0);
            assert_eq!(schedule.next_unlock_date, None);
            assert!(schedule.is_fully_unlocked());
            assert_eq!(schedule.unlocked_tranches(), 9);
            assert_eq!(schedule.progress_percent, 100.0);
        }
    }

    #[test]
    fn test_now_before_registration_clamps() {
        let schedule = compute_schedule(at(10 * MONTH_MS), at(0));
        assert_eq!(schedule.unlocked, 100);
        assert_eq!(schedule.unlocked_tranches(), 0);
        assert_eq!(schedule.next_unlock_date, Some(at(11 * MONTH_MS)));
    }

    #[test]
    fn test_tranche_dates_and_order() {
        let registered = at(1_000);
        let schedule = compute_schedule(registered, at(4 * MONTH_MS));

        for (i, tranche) in schedule.monthly_unlocks.iter().enumerate() {
            assert_eq!(tranche.month, i as u32 + 1);
            assert_eq!(tranche.amount, 100);
            assert_eq!(tranche.date, at(1_000 + (i as u64 + 1) * MONTH_MS));
        }
        // 4 months minus 1000ms elapsed: three tranches
        assert_eq!(schedule.unlocked_tranches(), 3);
    }

    #[test]
    fn test_unlocked_tranches_form_prefix_and_never_decrease() {
        let registered = at(0);
        let mut previous = 0;
        for day in 0..320 {
            let schedule = compute_schedule(registered, at(day * DAY_MS));
            assert_eq!(schedule.unlocked + schedule.locked, 1000);
            assert!(schedule.unlocked >= previous);
            previous = schedule.unlocked;

            let done = schedule.unlocked_tranches();
            assert!(schedule.monthly_unlocks[..done].iter().all(|t| t.unlocked));
            assert!(schedule.monthly_unlocks[done..].iter().all(|t| !t.unlocked));
            assert_eq!(schedule.unlocked, 100 + done as u32 * 100);
        }
    }

    #[test]
    fn test_nanosecond_registration() {
        let registered = Timestamp::from_nanos(1_700_000_000_000_000_000);
        let now = Timestamp::from_millis(1_700_000_000_000 + 2 * MONTH_MS);
        let schedule = compute_schedule(registered, now);
        assert_eq!(schedule.unlocked, 300);
    }

    #[test]
    fn test_time_until_next_unlock() {
        let schedule = compute_schedule(at(0), at(10 * DAY_MS));
        assert_eq!(
            schedule.time_until_next_unlock(at(10 * DAY_MS)),
            Some(Duration::from_millis(20 * DAY_MS))
        );

        let done = compute_schedule(at(0), at(9 * MONTH_MS));
        assert_eq!(done.time_until_next_unlock(at(9 * MONTH_MS)), None);
    }

    #[test]
    fn test_idempotent() {
        let a = compute_schedule(at(123), at(77 * DAY_MS));
        let b = compute_schedule(at(123), at(77 * DAY_MS));
        assert_eq!(a, b);
    }
}
