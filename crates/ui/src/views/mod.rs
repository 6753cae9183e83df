mod auth;
mod dashboard;
mod module;
mod not_found;
mod state;

#[cfg(test)]
mod test_harness;
#[cfg(test)]
mod view_smoke;

pub use auth::AuthView;
pub use dashboard::DashboardView;
pub use module::ModuleView;
pub use not_found::NotFoundView;
pub use state::ViewError;
