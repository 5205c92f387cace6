pub mod compute;
pub mod config;
pub mod controller;
pub mod entities;
pub mod panel;
pub mod timer;
