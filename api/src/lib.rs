pub mod basic_types;
pub mod endpoints;
pub mod proto;
pub mod request;
pub mod response;
