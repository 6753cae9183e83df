mod scripts;
mod view;

pub use view::ModuleView;
