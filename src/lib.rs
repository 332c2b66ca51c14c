// Copyright 2026 Harvester Contributors
// SPDX-License-Identifier: Apache-2.0

//! Moodle checklist harvester library.
//!
//! Logs into a Moodle portal, walks each enrolled course to its latest
//! checklist page, and relays every checklist item to an IFTTT Maker
//! webhook. Exposed as a library crate for integration testing.

pub mod cli;
pub mod config;
pub mod error;
pub mod harvest;
pub mod portal;
pub mod relay;
