//! Core domain logic shared by the server and the collector

pub mod cost;
