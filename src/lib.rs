// stocksql library entry point.
//
// Module layout:
// - cli: command-line surface and job orchestration
// - parser: structure statement extraction and product row parsing
// - generator: SQL script assembly and run reports
// - logger/progress: shared CLI plumbing (stderr logging, bars)

pub mod cli;
pub mod generator;
pub mod logger;
pub mod parser;
pub mod progress;
