#![forbid(unsafe_code)]

pub mod build;
pub mod chapter;
pub mod cli;
pub mod config;
pub mod entry;
pub mod formats;
pub mod http;
pub mod image_cache;
pub mod links;
pub mod logging;
pub mod normalize;
pub mod slug;
