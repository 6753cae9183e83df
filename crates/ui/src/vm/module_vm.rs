use course_core::model::document::{resolve_download_url, resolve_view_url};
use course_core::model::{Material, Module, ModuleId, catalog};

use crate::vm::progress_summary::{ProgressSummary, locked_label};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MaterialVm {
    pub title: &'static str,
    pub view_url: String,
    pub download_url: String,
}

impl From<&Material> for MaterialVm {
    fn from(material: &Material) -> Self {
        Self {
            title: material.title(),
            view_url: resolve_view_url(material.source_url()),
            download_url: resolve_download_url(material.source_url()),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ModulePageVm {
    pub id: ModuleId,
    pub heading: &'static str,
    pub header_label: String,
    pub count_label: String,
    pub materials: Vec<MaterialVm>,
    pub completed: bool,
}

impl ModulePageVm {
    fn new(module: &Module, completed: bool) -> Self {
        let count = module.materials().len();
        let (short, long) = if module.is_bonus() {
            ("materiais", "materiais bônus")
        } else {
            ("aulas", "aulas")
        };
        Self {
            id: module.id(),
            heading: module.heading(),
            header_label: format!("{count} {short} disponíveis"),
            count_label: format!("{count} {long} disponíveis"),
            materials: module.materials().iter().map(MaterialVm::from).collect(),
            completed,
        }
    }
}

/// What the module route shows for a given id.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ModuleAccess {
    Open(ModulePageVm),
    Locked { label: String },
    Missing,
}

#[must_use]
pub fn module_access(id: ModuleId, progress: &ProgressSummary) -> ModuleAccess {
    let Some(module) = catalog::find_module(id) else {
        return ModuleAccess::Missing;
    };
    if module.is_bonus() && !progress.bonus_unlocked {
        return ModuleAccess::Locked {
            label: locked_label(progress.days_until_bonus),
        };
    }
    ModuleAccess::Open(ModulePageVm::new(module, progress.is_complete(id)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use course_core::model::BONUS_MODULE_ID;

    fn progress(completed: &[u32], bonus_unlocked: bool, days_until_bonus: u32) -> ProgressSummary {
        ProgressSummary {
            percentage: 0,
            completed: completed.iter().copied().map(ModuleId::new).collect(),
            bonus_unlocked,
            days_until_bonus,
        }
    }

    #[test]
    fn core_module_lists_resolved_materials() {
        let ModuleAccess::Open(page) = module_access(ModuleId::new(1), &progress(&[], false, 7))
        else {
            panic!("core module should be open");
        };

        assert_eq!(page.materials.len(), 5);
        assert_eq!(page.count_label, "5 aulas disponíveis");
        assert!(!page.completed);
        let first = &page.materials[0];
        assert_eq!(
            first.view_url,
            "https://drive.google.com/file/d/1GjgDM3tJdYBUZ4p6t_tmrV5eUBdl3fqm/preview"
        );
        assert_eq!(
            first.download_url,
            "https://drive.google.com/uc?export=download&id=1GjgDM3tJdYBUZ4p6t_tmrV5eUBdl3fqm"
        );
    }

    #[test]
    fn completed_flag_comes_from_progress() {
        let ModuleAccess::Open(page) = module_access(ModuleId::new(2), &progress(&[2], false, 7))
        else {
            panic!("core module should be open");
        };

        assert!(page.completed);
    }

    #[test]
    fn bonus_is_locked_until_unlocked() {
        assert_eq!(
            module_access(BONUS_MODULE_ID, &progress(&[], false, 3)),
            ModuleAccess::Locked {
                label: "Bloqueado por 3 dias".into()
            }
        );

        let ModuleAccess::Open(page) = module_access(BONUS_MODULE_ID, &progress(&[], true, 0))
        else {
            panic!("bonus should open once unlocked");
        };
        assert_eq!(page.count_label, "5 materiais bônus disponíveis");
        assert_eq!(page.header_label, "5 materiais disponíveis");
    }

    #[test]
    fn unknown_module_is_missing() {
        assert_eq!(
            module_access(ModuleId::new(9), &progress(&[], true, 0)),
            ModuleAccess::Missing
        );
    }
}
