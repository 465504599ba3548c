//! Shared data model and service clients for the marquee movie browser.

pub mod catalog;
pub mod config;
pub mod counter;
pub mod favorites;
pub mod model;
pub mod platform;
pub mod storage;
