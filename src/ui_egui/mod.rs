pub mod grid_widget;
mod item_dialog;

pub use grid_widget::GridWidget;
pub use item_dialog::ItemDialogState;
