//! Cross-module property tests.
