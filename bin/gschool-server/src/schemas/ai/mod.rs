pub mod categories;
pub mod chat;
pub mod classify;
pub mod settings;
