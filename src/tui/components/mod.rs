//! TUI components using tui-realm.

pub mod alert;
pub mod date_field;
pub mod help;
pub mod notice;
pub mod style_grid;
pub mod submit_button;
pub mod text_field;

pub use alert::render_alert;
pub use date_field::DateField;
pub use help::{
    GALLERY_FOOTER_ACTIONS, REGISTER_FOOTER_ACTIONS, format_footer, read_modal_key, render_help,
};
pub use notice::Notice;
pub use style_grid::StyleGridView;
pub use submit_button::SubmitButton;
pub use text_field::TextField;
