mod config;
mod datetime;
mod document;
mod frontmatter;

pub use self::config::*;
pub use self::datetime::*;
pub use self::document::*;
pub use self::frontmatter::*;

pub type Status = status::Status;
pub type Result<T, E = Status> = std::result::Result<T, E>;
