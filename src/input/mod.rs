// src/input/mod.rs

//! Input file handling.
//!
//! The input format is line oriented:
//!
//! ```text
//! # comment
//! resources cpu:2 disk:1
//! task build 100 50 cpu:1 disk:1
//! ```
//!
//! [`parser`] turns it into a [`Workload`]: the seed counts for the ledger
//! plus one [`TaskSpec`] per `task` line, in file order.

pub mod parser;

use std::collections::BTreeMap;

pub use parser::{parse_file, parse_str};

use crate::task::TaskSpec;

/// Parsed contents of an input file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Workload {
    /// Seed count per resource name.
    pub resources: BTreeMap<String, u64>,
    /// Tasks in file order; the position is the task index.
    pub tasks: Vec<TaskSpec>,
}
