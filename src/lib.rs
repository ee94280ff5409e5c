//! Client for the Litle & Co. Online payments gateway.
//!
//! Translates a generic payment transaction record (authorization, sale,
//! capture, credit, void) into the gateway's versioned XML wire format,
//! submits it over an injected HTTPS POST transport, and interprets the XML
//! response into a generic success/failure outcome.

pub mod cards;
pub mod configs;
pub mod connectors;
pub mod consts;
pub mod errors;
pub mod types;
pub mod utils;

pub use connectors::Litle;
