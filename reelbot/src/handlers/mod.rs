//! Bot handlers: /start, /help, Instagram links, unknown commands.

mod commands;
mod link_handler;
mod unknown_command;

pub use commands::{HelpHandler, StartHandler, USAGE};
pub use link_handler::{find_instagram_link, LinkHandler};
pub use unknown_command::UnknownCommandHandler;
