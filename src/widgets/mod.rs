//! Built-in widgets.

pub mod completion;
pub mod grid;
pub mod panel;
pub mod progress;
pub mod scroll_window;
pub mod text_field;

pub use completion::{CompletionAction, CompletionOverlay, CompletionSource, FieldState};
pub use grid::Grid;
pub use panel::Panel;
pub use progress::ProgressBar;
pub use scroll_window::{ItemRow, ScrollKeyResponse, ScrollWindow};
pub use text_field::TextField;
