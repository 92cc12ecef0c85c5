//! UI Components
//!
//! Each component keeps its own state and turns terminal events into Actions.
//! The mod list is drawn through a render context since it needs the model.

pub mod help_dialog;
pub mod layout;
pub mod mod_list;
pub mod quit_dialog;

pub use help_dialog::HelpDialog;
pub use layout::{calculate_main_layout, centered_popup};
pub use mod_list::{draw_mod_list, ModListComponent, ModListRenderContext};
pub use quit_dialog::QuitDialog;
