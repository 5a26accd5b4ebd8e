mod page_view;
mod panel_form;
mod status_bar;

pub use page_view::PageViewWidget;
pub use panel_form::{PanelFormWidget, PanelStatusBarWidget};
pub use status_bar::StatusBarWidget;
