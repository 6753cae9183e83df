use course_core::model::{ModuleId, catalog};
use services::ProgressTracker;

/// Progress figures read once per render.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ProgressSummary {
    pub percentage: u8,
    pub completed: Vec<ModuleId>,
    pub bonus_unlocked: bool,
    pub days_until_bonus: u32,
}

impl ProgressSummary {
    #[must_use]
    pub fn from_tracker(tracker: &ProgressTracker) -> Self {
        Self {
            percentage: tracker.completion_percentage(),
            completed: tracker.snapshot().completed_ids(),
            bonus_unlocked: tracker.can_access_bonus(),
            days_until_bonus: tracker.days_until_bonus(),
        }
    }

    #[must_use]
    pub fn is_complete(&self, id: ModuleId) -> bool {
        self.completed.contains(&id)
    }

    #[must_use]
    pub fn completed_core(&self) -> usize {
        self.completed
            .iter()
            .filter(|id| catalog::is_core(**id))
            .count()
    }
}

/// "1 dia" / "N dias".
#[must_use]
pub fn days_label(days: u32) -> String {
    if days == 1 {
        "1 dia".to_string()
    } else {
        format!("{days} dias")
    }
}

#[must_use]
pub fn locked_label(days: u32) -> String {
    format!("Bloqueado por {}", days_label(days))
}
