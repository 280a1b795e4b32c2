//! Dispute Assistant - conversational intake for banking disputes
//!
//! A scripted dialogue collects dispute details one field at a time,
//! validates them, and files a dispute record. Free text the dialogue
//! cannot place is answered by an optional LLM with a static fallback.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
