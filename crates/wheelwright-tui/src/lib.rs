pub mod app;
pub mod event;
pub mod input;
pub mod panel;
pub mod scroll;
pub mod theme;
pub mod widgets;

pub use app::App;
pub use panel::PanelApp;
pub use theme::Theme;
