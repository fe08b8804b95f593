//! Shared helpers: dates, HTML escaping, paths, external commands.

pub mod date;
pub mod exec;
pub mod html;
pub mod path;
pub mod plural;
