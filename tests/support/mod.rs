#![allow(dead_code)]

pub mod raw_server;
pub mod recording_host;
pub mod socket_guard;
