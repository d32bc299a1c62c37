pub mod category;
pub mod chat;

pub use category::CategoryRecord;
pub use chat::{ChatMessage, NewChatMessage};
