#![allow(dead_code)]

pub mod recording_view;
pub mod upload_server;
