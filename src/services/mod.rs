// Service exports
pub mod directory;

pub use directory::{load_embeddings, Dataset, DirectoryError, ProfileDirectory};
