//! Modal edit / delete forms bound to a REST endpoint.
//!
//! A form is described by a list of `ApiFormField`s. `use_edit_api_form_modal`
//! PATCHes the record, `use_delete_api_form_modal` DELETEs it with the
//! auxiliary field values as the request body. On success the modal closes
//! and `on_form_success` runs; on failure the server's error body is shown
//! against the fields and the modal stays open.

mod fields;
mod modal;
mod state;
mod view;

pub use fields::{build_body, initial_input, parse_input, ApiFormField, ChoiceOption, FormFieldKind};
pub use modal::{use_delete_api_form_modal, use_edit_api_form_modal, ApiFormProps, FormModal};
pub use state::FormModalState;
pub use view::RelatedSelect;
