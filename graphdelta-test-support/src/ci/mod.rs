//! Environment-driven knobs shared by test suites across the workspace.

pub mod property_test_profile;
