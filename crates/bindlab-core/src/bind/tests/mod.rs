//! Tests for the binding table and placeholder substitution
//!
//! Organized into focused submodules: pure string substitution on one
//! side, table-driven tree rendering on the other.

use super::*;

// Test helper functions
mod helpers;
