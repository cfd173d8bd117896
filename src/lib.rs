//! Triage Assistant - conversational symptom triage
//!
//! This crate turns free-text or voice symptom descriptions into a structured
//! triage assessment and serves it over a web chat API and a WhatsApp webhook.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
