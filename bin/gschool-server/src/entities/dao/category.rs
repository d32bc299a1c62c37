/// A single row in the `categories` table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryRecord {
    pub name: String,
    pub blocked: bool,
    /// Category-specific redirect; `None` falls back to the global setting.
    pub block_url: Option<String>,
}
