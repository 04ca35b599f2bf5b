//! Unit tests for core_types
