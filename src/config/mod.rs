//! Configuration files for the command-line tools.

pub mod track_finder;
