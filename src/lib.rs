//! dnspeek: capture DNS traffic and decode it into readable reports.
//!
//! [`dns`] is the wire decoder and [`render`] turns decoded messages into
//! text; both are pure. The remaining modules are the capture host.

pub mod capture;
pub mod cli;
pub mod config;
pub mod core;
pub mod dns;
pub mod logging;
pub mod packet;
pub mod render;
pub mod ui;
