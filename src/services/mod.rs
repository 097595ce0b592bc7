// Service exports
pub mod directory;
pub mod sessions;

pub use directory::{load_directory, parse_directory, DirectoryError};
pub use sessions::SessionRegistry;
