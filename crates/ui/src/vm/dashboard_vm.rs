use course_core::model::{CORE_MODULE_COUNT, MemberProfile, catalog};

use crate::vm::progress_summary::{ProgressSummary, locked_label};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ModuleCardVm {
    pub id: u32,
    pub label: String,
    pub title: &'static str,
    pub subtitle: &'static str,
    pub lessons: String,
    pub completed: bool,
    pub cta: &'static str,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BonusCardVm {
    pub id: u32,
    pub title: String,
    pub subtitle: &'static str,
    pub unlocked: bool,
    pub locked_label: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DashboardVm {
    pub greeting: String,
    pub percentage: u8,
    pub percentage_label: String,
    pub badge: String,
    pub modules: Vec<ModuleCardVm>,
    pub bonus: BonusCardVm,
}

#[must_use]
pub fn build_dashboard_vm(profile: Option<&MemberProfile>, progress: &ProgressSummary) -> DashboardVm {
    let greeting = match profile {
        Some(profile) => format!("Bem-vindo(a), {}! 👋", profile.greeting_name()),
        None => "Bem-vindo(a)! 👋".to_string(),
    };

    let modules = catalog::core_modules()
        .map(|module| {
            let completed = progress.is_complete(module.id());
            ModuleCardVm {
                id: module.id().value(),
                label: format!("Módulo {}", module.id()),
                title: module.title(),
                subtitle: module.subtitle(),
                lessons: format!("{} aulas", module.materials().len()),
                completed,
                cta: if completed { "Revisar" } else { "Acessar" },
            }
        })
        .collect();

    let bonus = catalog::bonus_module();
    let bonus = BonusCardVm {
        id: bonus.id().value(),
        title: format!("📓 Módulo {}: {}", bonus.id(), bonus.title()),
        subtitle: bonus.subtitle(),
        unlocked: progress.bonus_unlocked,
        locked_label: (!progress.bonus_unlocked).then(|| locked_label(progress.days_until_bonus)),
    };

    DashboardVm {
        greeting,
        percentage: progress.percentage,
        percentage_label: format!("{}% concluído", progress.percentage),
        badge: format!("{}/{}", progress.completed_core(), CORE_MODULE_COUNT),
        modules,
        bonus,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use course_core::model::{BONUS_MODULE_ID, Email, MemberId, ModuleId};

    fn summary(completed: &[u32], bonus_unlocked: bool, days_until_bonus: u32) -> ProgressSummary {
        let completed: Vec<ModuleId> = completed.iter().copied().map(ModuleId::new).collect();
        let core = completed
            .iter()
            .filter(|id| catalog::is_core(**id))
            .count() as u8;
        ProgressSummary {
            percentage: core * 25,
            completed,
            bonus_unlocked,
            days_until_bonus,
        }
    }

    #[test]
    fn fresh_member_sees_empty_progress_and_locked_bonus() {
        let vm = build_dashboard_vm(None, &summary(&[], false, 7));

        assert_eq!(vm.greeting, "Bem-vindo(a)! 👋");
        assert_eq!(vm.percentage_label, "0% concluído");
        assert_eq!(vm.badge, "0/4");
        assert_eq!(vm.modules.len(), 4);
        assert!(vm.modules.iter().all(|card| card.cta == "Acessar"));
        assert!(!vm.bonus.unlocked);
        assert_eq!(vm.bonus.locked_label.as_deref(), Some("Bloqueado por 7 dias"));
    }

    #[test]
    fn badge_ignores_bonus_completion() {
        let vm = build_dashboard_vm(None, &summary(&[1, 3, BONUS_MODULE_ID.value()], true, 0));

        assert_eq!(vm.badge, "2/4");
        assert_eq!(vm.percentage_label, "50% concluído");
        assert!(vm.modules[0].completed);
        assert_eq!(vm.modules[0].cta, "Revisar");
        assert!(!vm.modules[1].completed);
        assert!(vm.bonus.unlocked);
        assert_eq!(vm.bonus.locked_label, None);
    }

    #[test]
    fn single_day_left_uses_singular() {
        let vm = build_dashboard_vm(None, &summary(&[], false, 1));

        assert_eq!(vm.bonus.locked_label.as_deref(), Some("Bloqueado por 1 dia"));
    }

    #[test]
    fn greeting_uses_member_name() {
        let profile = MemberProfile::new(
            MemberId::generate(),
            Email::parse("bia@example.com").unwrap(),
            None,
        );

        let vm = build_dashboard_vm(Some(&profile), &summary(&[], false, 7));

        assert_eq!(vm.greeting, "Bem-vindo(a), bia! 👋");
    }

    #[test]
    fn cards_carry_catalog_titles() {
        let vm = build_dashboard_vm(None, &summary(&[], false, 7));

        assert_eq!(vm.modules[0].label, "Módulo 1");
        assert_eq!(vm.modules[0].title, "Começando do Zero");
        assert_eq!(vm.modules[0].lessons, "5 aulas");
        assert_eq!(vm.bonus.title, "📓 Módulo 5: Estratégias Secretas");
    }
}
