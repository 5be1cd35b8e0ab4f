mod writer;

pub use writer::{DatasetRecord, DatasetWriter};
