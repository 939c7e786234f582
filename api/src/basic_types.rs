pub type UpdateId = i64;
pub type UserId = i64;
pub type ChatIntId = i64;
pub type MessageId = i32;
pub type MessageThreadId = i32;
