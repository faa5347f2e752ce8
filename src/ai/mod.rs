//! Model service clients

pub mod chat;

pub use chat::{error_sentinel, ChatClient, ChatMessage};
