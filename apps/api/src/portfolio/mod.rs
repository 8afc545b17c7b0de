pub mod handlers;
pub mod slug;
