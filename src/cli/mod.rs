//! CLI subcommand implementations for the loginscout binary.

pub mod doctor;
pub mod scan_cmd;
pub mod serve_cmd;
