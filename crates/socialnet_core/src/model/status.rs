//! Status post record.

/// One short status post owned by a user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Status {
    /// Caller-chosen unique id.
    pub status_id: String,
    /// Owning user's `user_id`.
    pub user_id: String,
    pub text: String,
}

impl Status {
    pub fn new(
        status_id: impl Into<String>,
        user_id: impl Into<String>,
        text: impl Into<String>,
    ) -> Self {
        Self {
            status_id: status_id.into(),
            user_id: user_id.into(),
            text: text.into(),
        }
    }
}
