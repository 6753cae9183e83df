use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::model::catalog::{self, CORE_MODULE_COUNT};
use crate::model::ids::ModuleId;
use crate::time::whole_days_between;

/// Days a member must be enrolled before the bonus module opens.
pub const DAYS_TO_UNLOCK_BONUS: i64 = 7;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ProgressError {
    #[error("module {0} is not part of the catalog")]
    UnknownModule(ModuleId),
}

/// Completed modules plus the origin of the bonus countdown.
///
/// Completion is append-only and the enrollment date is written at most once.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProgressState {
    completed: BTreeSet<ModuleId>,
    enrollment_date: Option<DateTime<Utc>>,
}

impl ProgressState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Rehydrate from persisted values, dropping ids the catalog does not know.
    #[must_use]
    pub fn from_persisted(
        completed: impl IntoIterator<Item = ModuleId>,
        enrollment_date: Option<DateTime<Utc>>,
    ) -> Self {
        Self {
            completed: completed
                .into_iter()
                .filter(|id| catalog::is_catalogued(*id))
                .collect(),
            enrollment_date,
        }
    }

    /// Record a module as completed.
    ///
    /// Returns `true` when the set changed, `false` if it was already complete.
    ///
    /// # Errors
    ///
    /// Returns `ProgressError::UnknownModule` for ids outside the catalog.
    pub fn mark_complete(&mut self, id: ModuleId) -> Result<bool, ProgressError> {
        if !catalog::is_catalogued(id) {
            return Err(ProgressError::UnknownModule(id));
        }
        Ok(self.completed.insert(id))
    }

    #[must_use]
    pub fn is_complete(&self, id: ModuleId) -> bool {
        self.completed.contains(&id)
    }

    /// Completed ids in ascending order.
    #[must_use]
    pub fn completed_ids(&self) -> Vec<ModuleId> {
        self.completed.iter().copied().collect()
    }

    /// Number of completed core (non-bonus) modules.
    #[must_use]
    pub fn completed_core_count(&self) -> u32 {
        let count = self
            .completed
            .iter()
            .filter(|id| catalog::is_core(**id))
            .count();
        u32::try_from(count).unwrap_or(u32::MAX)
    }

    /// Share of core modules completed, rounded to the nearest integer percent.
    #[must_use]
    pub fn completion_percentage(&self) -> u8 {
        let done = self.completed_core_count().min(CORE_MODULE_COUNT);
        // round(done / total * 100) with half-up rounding in integers
        let pct = (done * 200 + CORE_MODULE_COUNT) / (2 * CORE_MODULE_COUNT);
        u8::try_from(pct.min(100)).unwrap_or(100)
    }

    #[must_use]
    pub fn enrollment_date(&self) -> Option<DateTime<Utc>> {
        self.enrollment_date
    }

    /// Set the enrollment date if it has never been set.
    ///
    /// Returns `true` when the date was written.
    pub fn ensure_enrollment(&mut self, at: DateTime<Utc>) -> bool {
        if self.enrollment_date.is_some() {
            return false;
        }
        self.enrollment_date = Some(at);
        true
    }

    /// Whole days since enrollment, or `None` before enrollment is known.
    #[must_use]
    pub fn days_enrolled(&self, now: DateTime<Utc>) -> Option<i64> {
        self.enrollment_date
            .map(|enrolled| whole_days_between(enrolled, now))
    }

    #[must_use]
    pub fn can_access_bonus(&self, now: DateTime<Utc>) -> bool {
        self.days_enrolled(now)
            .is_some_and(|days| days >= DAYS_TO_UNLOCK_BONUS)
    }

    /// Days left until the bonus module opens; zero once it is open.
    #[must_use]
    pub fn days_until_bonus(&self, now: DateTime<Utc>) -> u32 {
        let remaining = match self.days_enrolled(now) {
            Some(days) => DAYS_TO_UNLOCK_BONUS.saturating_sub(days).max(0),
            None => DAYS_TO_UNLOCK_BONUS,
        };
        u32::try_from(remaining).unwrap_or(u32::MAX)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::catalog::BONUS_MODULE_ID;
    use crate::time::fixed_now;
    use chrono::Duration;

    fn enrolled_days_ago(days: i64) -> ProgressState {
        ProgressState::from_persisted([], Some(fixed_now() - Duration::days(days)))
    }

    #[test]
    fn mark_complete_is_idempotent() {
        let mut state = ProgressState::new();
        assert_eq!(state.mark_complete(ModuleId::new(1)), Ok(true));
        assert_eq!(state.mark_complete(ModuleId::new(1)), Ok(false));
        assert!(state.is_complete(ModuleId::new(1)));
        assert_eq!(state.completed_ids(), vec![ModuleId::new(1)]);
    }

    #[test]
    fn unknown_modules_are_rejected() {
        let mut state = ProgressState::new();
        assert_eq!(
            state.mark_complete(ModuleId::new(9)),
            Err(ProgressError::UnknownModule(ModuleId::new(9)))
        );
        assert!(state.completed_ids().is_empty());
    }

    #[test]
    fn percentage_steps_by_quarter() {
        let mut state = ProgressState::new();
        assert_eq!(state.completion_percentage(), 0);
        let mut last = 0;
        for id in 1..=4 {
            state.mark_complete(ModuleId::new(id)).unwrap();
            let pct = state.completion_percentage();
            assert_eq!(u32::from(pct), 25 * id);
            assert!(pct > last);
            last = pct;
        }
        assert_eq!(state.completion_percentage(), 100);
    }

    #[test]
    fn bonus_module_does_not_count_toward_percentage() {
        let mut state = ProgressState::new();
        state.mark_complete(BONUS_MODULE_ID).unwrap();
        assert!(state.is_complete(BONUS_MODULE_ID));
        assert_eq!(state.completion_percentage(), 0);

        for id in 1..=4 {
            state.mark_complete(ModuleId::new(id)).unwrap();
        }
        assert_eq!(state.completion_percentage(), 100);
    }

    #[test]
    fn persisted_unknown_ids_are_dropped() {
        let state = ProgressState::from_persisted(
            [ModuleId::new(2), ModuleId::new(77), ModuleId::new(0)],
            None,
        );
        assert_eq!(state.completed_ids(), vec![ModuleId::new(2)]);
    }

    #[test]
    fn bonus_unlocks_after_exactly_seven_days() {
        let state = enrolled_days_ago(7);
        assert!(state.can_access_bonus(fixed_now()));
        assert_eq!(state.days_until_bonus(fixed_now()), 0);
    }

    #[test]
    fn bonus_locked_three_days_in() {
        let state = enrolled_days_ago(3);
        assert!(!state.can_access_bonus(fixed_now()));
        assert_eq!(state.days_until_bonus(fixed_now()), 4);
    }

    #[test]
    fn partial_day_does_not_count() {
        let state = ProgressState::from_persisted(
            [],
            Some(fixed_now() - Duration::days(7) + Duration::minutes(1)),
        );
        assert!(!state.can_access_bonus(fixed_now()));
        assert_eq!(state.days_until_bonus(fixed_now()), 1);
    }

    #[test]
    fn missing_enrollment_keeps_bonus_locked() {
        let state = ProgressState::new();
        assert!(!state.can_access_bonus(fixed_now()));
        assert_eq!(state.days_until_bonus(fixed_now()), 7);
    }

    #[test]
    fn clock_moved_backward_keeps_bonus_locked() {
        let state = ProgressState::from_persisted([], Some(fixed_now() + Duration::days(2)));
        assert!(!state.can_access_bonus(fixed_now()));
        assert_eq!(state.days_until_bonus(fixed_now()), 9);
    }

    #[test]
    fn unlock_matches_zero_days_remaining() {
        for days in -3..20 {
            let state = enrolled_days_ago(days);
            let now = fixed_now();
            assert_eq!(
                state.can_access_bonus(now),
                state.days_until_bonus(now) == 0,
                "days = {days}"
            );
        }
    }

    #[test]
    fn enrollment_is_set_once() {
        let mut state = ProgressState::new();
        assert!(state.ensure_enrollment(fixed_now()));
        assert!(!state.ensure_enrollment(fixed_now() + Duration::days(1)));
        assert_eq!(state.enrollment_date(), Some(fixed_now()));
    }
}
