//! The external formatter
//!
//! The formatter itself is a black box. This module knows how to describe its
//! options and how to run it on one file.

pub mod formatter;
pub mod options;

pub use formatter::{CommandLine, CommandRunner, Invoker};
pub use options::{DESCRIPTORS, FormatOptions, OptionDescriptor, OptionValue};
