//! Ingest: reading signal batches, selecting rows by email id, writing
//! extracted batches back out.

pub mod reader;
pub mod selector;
pub mod writer;

pub use reader::{read_batch, read_batch_from_reader, Batch, IdSource};
pub use selector::{select, Selection, SelectionStrategy};
pub use writer::{write_batch, write_batch_to};
