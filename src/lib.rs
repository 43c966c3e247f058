pub mod app;
pub mod cli;
pub mod config;
pub mod images;
pub mod output;
pub mod paginator;
pub mod related;
pub mod results;
pub mod session;
pub mod tracking;

#[cfg(test)]
mod tests;
