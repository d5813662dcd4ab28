//! Unit test module
//!
//! Handler tests live here, separate from source files. They drive handlers through a recording
//! [`mock_bot::MockBot`] and a scripted object localizer.

mod logging_test;
