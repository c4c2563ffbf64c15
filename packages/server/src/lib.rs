// Ayothedoc Lead Service - API Core
//
// This crate provides the backend API for the business-audit lead pipeline:
// validate a submission, analyze the lead's website, generate an automation
// audit report with Gemini, deliver it by email, and keep a best-effort
// durable record across a chain of storage backends.

pub mod common;
pub mod config;
pub mod domains;
pub mod kernel;
pub mod server;

pub use config::*;
