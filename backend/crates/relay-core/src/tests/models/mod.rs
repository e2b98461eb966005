mod client_event;
mod relay_event;
mod snapshot;
