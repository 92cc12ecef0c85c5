//! Model layer - state that does not depend on the terminal
//!
//! - `ModListModel` - the ordered mod list and its drag span
//! - `InteractionController` - gesture handling and selection
//! - `ModalStack` - overlay management

pub mod entry;
pub mod interaction;
pub mod mod_list;
pub mod modal;

pub use entry::{ModState, RecordEntry};
pub use interaction::{Gesture, InteractionController, NudgeDirection, SelectModifier};
pub use mod_list::ModListModel;
pub use modal::{Modal, ModalStack};
