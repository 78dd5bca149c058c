// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Music theory utilities.
//!
//! This module provides pitch classes, key qualities and the key names
//! that the Camelot wheel is built from.

pub mod key;

pub use key::{KeyName, Note, ParseKeyNameError, Quality};
