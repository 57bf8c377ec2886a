mod config;
mod io;
mod replacement;
mod report;
