//! Internal test modules - whitebox tests with crate access
//!
//! These drive `TuiApp<TestBackend>` through the acceptance test harness,
//! with a scripted fetcher standing in for the HTTP API.
