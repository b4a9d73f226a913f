use chrono::{DateTime, Utc};

use crate::infra::github::RemoteComment;

/// A comment on an issue. Immutable once fetched or created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    pub id: u64,
    /// `None` for comments by deleted accounts.
    pub author: Option<String>,
    pub body: String,
    pub created_at: Option<DateTime<Utc>>,
}

impl From<RemoteComment> for Comment {
    fn from(remote: RemoteComment) -> Self {
        Self {
            id: remote.id,
            author: remote.user.map(|u| u.login),
            body: remote.body.unwrap_or_default(),
            created_at: remote.created_at,
        }
    }
}
