pub mod bot;
pub mod channels;
pub mod config;
pub mod kb;
pub mod llm;
pub mod shared;
pub mod web;
