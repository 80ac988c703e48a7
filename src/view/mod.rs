//! Generic list/detail shells rendering engine state to the terminal.

pub mod detail;
pub mod form;
pub mod list;

pub use detail::{ResourceView, ViewMode};
pub use form::{FormContext, FormRenderer, GenericForm, NeedForm, PostForm, POST_CONTENT_MAX_LENGTH};
pub use list::{render_error, render_list, render_loading, Pagination, LIMIT_CHOICES};
