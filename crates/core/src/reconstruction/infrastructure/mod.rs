pub mod colmap_runner;
