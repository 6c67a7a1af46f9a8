//! Live mandi (wholesale market) prices for Indian crops.
//!
//! Drives a headless Chromium instance against the Agmarknet portal,
//! waits for the client-side price table to render, and extracts typed
//! price records from it. A data.gov.in API source is available as an
//! alternative when an API key is supplied.

pub mod cli;
pub mod market;
pub mod renderer;
