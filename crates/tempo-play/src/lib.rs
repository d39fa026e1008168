//! Console front end for tempo.

pub mod command;
pub mod error;
pub mod session;

pub use command::{ColorChoice, Command, parse_command};
pub use error::PlayError;
pub use session::Session;
