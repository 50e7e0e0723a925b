//! List coordinator: fetch lifecycle, pagination and mutations.
//!
//! ```text
//!  debounced criteria ──► on_filter_criteria_changed ─┐
//!  page buttons ────────► on_page_changed ────────────┼─► refresh ──► spawned list call
//!  create/update/delete ─► spawned write call         │                     │
//!                                 │                   │                     ▼
//!                                 └──► Completion ────┴──── apply ◄─── Completion
//! ```
//!
//! API calls run on spawned tasks and report back through an unbounded
//! channel as [`Completion`] events. State only changes inside
//! [`ListCoordinator::apply`] and the request-issuing methods, all of which
//! the session loop calls from a single task.

pub mod completion;
pub mod list;
pub mod state;

pub use completion::{Applied, Completion, MutationKind};
pub use list::ListCoordinator;
pub use state::ListState;

/// Banner text after a failed listing fetch.
pub const FETCH_FAILED: &str = "Failed to fetch products. Please try again.";

/// Banner text after a failed create or update.
pub const SAVE_FAILED: &str = "Failed to save product. Please try again.";

/// Banner text after a failed delete.
pub const DELETE_FAILED: &str = "Failed to delete product. Please try again.";
