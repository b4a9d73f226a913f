//! Session state: the user's repositories and issues as cached from GitHub.

mod draft;
mod error;
mod key;
mod models;
mod store;

pub use draft::{IssueChanges, IssueDraft};
pub use error::TrackerError;
pub use models::{Issue, Repository};
pub use store::Tracker;
