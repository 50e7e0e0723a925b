//! Events delivered back to the coordinator when an API call finishes.

use std::fmt;

use crate::domain::{Product, ProductId, ProductPage};
use crate::error::RequestError;

/// Which write a [`Completion::Mutation`] belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationKind {
    /// `POST /products`.
    Create,
    /// `PATCH /products/{id}`.
    Update(ProductId),
    /// `DELETE /products/{id}`.
    Delete(ProductId),
}

impl fmt::Display for MutationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Create => f.write_str("create"),
            Self::Update(id) => write!(f, "update #{id}"),
            Self::Delete(id) => write!(f, "delete #{id}"),
        }
    }
}

/// Result of a finished API call, tagged with what issued it.
#[derive(Debug)]
pub enum Completion {
    /// A listing fetch finished.
    Fetch {
        /// Sequence number assigned when the fetch was issued.
        seq: u64,
        /// Page or failure.
        result: Result<ProductPage, RequestError>,
    },
    /// A create, update or delete finished.
    Mutation {
        /// The write that finished.
        kind: MutationKind,
        /// Stored product for create/update, `None` for delete.
        result: Result<Option<Product>, RequestError>,
    },
}

/// What [`super::ListCoordinator::apply`] did with a completion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Applied {
    /// The latest fetch succeeded and replaced the listing.
    Loaded,
    /// A superseded fetch finished; its result was discarded.
    Stale,
    /// The latest fetch failed; the previous listing was kept.
    LoadFailed,
    /// A write succeeded and a refresh was issued.
    Mutated {
        /// The write that succeeded.
        kind: MutationKind,
        /// Stored product for create/update.
        product: Option<Product>,
    },
    /// A write failed; nothing was refreshed.
    MutationFailed(MutationKind),
}
