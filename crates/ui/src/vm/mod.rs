mod auth_vm;
mod dashboard_vm;
mod module_vm;
mod progress_summary;

pub use auth_vm::{RESET_SENT_NOTICE, login_error_message, reset_error_message};
pub use dashboard_vm::{BonusCardVm, DashboardVm, ModuleCardVm, build_dashboard_vm};
pub use module_vm::{MaterialVm, ModuleAccess, ModulePageVm, module_access};
pub use progress_summary::{ProgressSummary, days_label, locked_label};
