//! Console front-end
//!
//! A main window with the conversion form and a settings window, both
//! driving the handlers in `actions`.

mod main_window;
mod prompt;
mod settings_window;

pub use main_window::run;
pub use prompt::Terminal;
