pub mod catalog;
pub mod document;
mod ids;
mod member;
mod progress;
mod settings;

pub use catalog::{BONUS_MODULE_ID, CORE_MODULE_COUNT, Material, Module};
pub use ids::{MemberId, ModuleId, ParseIdError};
pub use member::{
    Credentials, CredentialsDraft, Email, MemberError, MemberProfile, PasswordPolicy,
};
pub use progress::{DAYS_TO_UNLOCK_BONUS, ProgressError, ProgressState};
pub use settings::{AuthStrategy, BackendSettings, BackendSettingsDraft, SettingsError};
