//! Ranking service clients

pub mod http;
