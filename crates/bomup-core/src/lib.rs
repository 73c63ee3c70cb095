pub mod artifact;
pub mod config;
pub mod controller;
pub mod naming;
pub mod transport;
pub mod view;

#[cfg(not(target_arch = "wasm32"))]
pub mod catalog;
#[cfg(not(target_arch = "wasm32"))]
pub mod logging;
#[cfg(not(target_arch = "wasm32"))]
pub mod storage;
