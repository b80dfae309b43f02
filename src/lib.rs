pub mod commands;
pub mod config;
pub mod delegate;
pub mod error;
pub mod fs_utils;
pub mod idea;
pub mod locator;
pub mod options;
pub mod picker;
pub mod profiles;
pub mod project;
pub mod resolver;
pub mod shell;
pub mod ui;

#[cfg(test)]
pub mod test_utils;
