//! UDP Cache - A minimal authenticated key-value cache over UDP
//!
//! Clients authenticate once per source address with `AUTH Basic`, then
//! issue GET/SET/DELETE against a shared cache whose entries are swept after
//! sitting idle for longer than a global timeout.

pub mod auth;
pub mod cache;
pub mod client;
pub mod config;
pub mod error;
pub mod protocol;
pub mod server;
pub mod tasks;

pub use client::CacheClient;
pub use config::{ClientConfig, Config};
pub use server::{Dispatcher, SessionTable, UdpCacheServer};
pub use tasks::spawn_cleanup_task;
