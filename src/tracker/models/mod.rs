mod comment;
mod issue;
mod repository;

pub use comment::Comment;
pub use issue::{Issue, Milestone};
pub use repository::Repository;
