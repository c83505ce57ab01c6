//! Data models for Bookshelf

pub mod book;
pub mod collection;
pub mod google_book;

// Re-export commonly used types
pub use book::{AddBooks, Book};
pub use collection::{Collection, CollectionDetails, CreateCollection, NewCollection, OwnerSummary};
pub use google_book::{GoogleBook, VolumeList};
