pub mod breadcrumbs;
pub mod deferred;
pub mod editor;
pub mod file_content_page;
pub mod file_icon;

pub use breadcrumbs::Breadcrumbs;
pub use deferred::deferred;
pub use editor::FileEditor;
pub use file_icon::FileIcon;
