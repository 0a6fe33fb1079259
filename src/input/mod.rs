pub mod events;
pub mod handler;
pub mod parse;

// Re-export the essential types
pub use events::{Command, Request};
pub use handler::{Reply, RequestHandler, FAILURE_TEXT, HELP_TEXT, OUTSIDE_TEXT};
pub use parse::parse_coordinates;
