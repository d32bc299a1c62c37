/// A single message row in the `chat_messages` table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    pub id: i64,
    pub room: String,
    pub user_id: String,
    /// Free-form; clients use `"student"` and `"teacher"`.
    pub role: String,
    pub text: String,
    /// Milliseconds since the Unix epoch.
    pub ts: i64,
}

/// A message about to be appended; the row id is assigned by the database.
#[derive(Debug, Clone)]
pub struct NewChatMessage {
    pub room: String,
    pub user_id: String,
    pub role: String,
    pub text: String,
    pub ts: i64,
}
