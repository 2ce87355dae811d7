pub mod export;
pub mod notify;
pub mod remote;
pub mod tracing_setup;
