pub mod api;
pub mod context;
pub mod inputs;
pub mod release;
pub mod result;
pub mod retry;
