//! Page views.
//!
//! A [`PageView`] is the explicitly constructed owner of everything one page
//! needs while it is open: its index, outline, preference record and the
//! debounced search input feeding the suggestions panel.

mod view;

pub use view::{PageView, SearchInput, SuggestionPanel};
