
/// Helper functions for opening (optionally gzipped) files and read/writing JSON via serde
pub mod file_io;
/// Helper functions for generating the progress bars
pub mod progress_bar;
