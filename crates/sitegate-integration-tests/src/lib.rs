//! End-to-end integration tests for SiteGate
//!
//! These tests wire the routing middleware, the site handler, the backend
//! client and the theme registry together and drive them over real HTTP.
