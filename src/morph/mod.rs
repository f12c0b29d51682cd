pub mod config;
pub mod controller;
pub mod frame;
pub mod player;
