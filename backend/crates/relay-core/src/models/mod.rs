pub mod client_event;
pub mod relay_event;
pub mod snapshot;
