//! Form editing: text buffers, pickers, field state and request bodies.

pub mod payload;
pub mod picker;
pub mod state;
mod text_input;

pub use picker::{CheckList, OptionsState, Picker, PickerOption};
pub use state::{FieldInput, FieldState, FormState};
pub use text_input::TextInput;
