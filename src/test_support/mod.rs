//! Helpers shared by unit tests that talk to local mock servers.

pub mod socket_guard;
