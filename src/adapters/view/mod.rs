//! View adapters.

mod card_form_view;

pub use card_form_view::CardFormView;
