//! Use Cases module
//!
//! This module contains the application use cases that orchestrate
//! the business logic by coordinating between ports and domain entities.

pub mod ffuf;
