//! Business dashboard core: a latency-simulating mock backend, the
//! session/onboarding flow with its route guard, and headless page state.

pub mod app;
pub mod config;
pub mod error;
pub mod notify;
pub mod output;
pub mod pages;
pub mod service;
pub mod session;
pub mod store;
pub mod types;
