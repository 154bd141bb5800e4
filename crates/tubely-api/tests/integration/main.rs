//! API integration tests.
//!
//! The router is driven in-process with `oneshot`. Media tools and the object
//! store are replaced by fixtures from `support.rs`.

mod support;

mod video_tests;
