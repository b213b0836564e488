pub mod cli;
pub mod client;
pub mod config;
pub mod input;
pub mod interrupt;
pub mod puzzle;
pub mod scaffold;
pub mod statement;
pub mod workspace;
