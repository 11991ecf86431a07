//! Integration tests for gztar archive trees

mod cli_contracts;
mod round_trip;
mod tree_structure;
