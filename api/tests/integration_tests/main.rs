//! Integration tests for the Logview API.
//!
//! These tests drive the complete router: ingestion, filtered queries,
//! analytics, and the real-time WebSocket stream.

mod common;

mod analytics_tests;
mod logs_tests;
mod websocket_tests;
