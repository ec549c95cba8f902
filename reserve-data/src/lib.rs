pub mod csv_sink;
pub mod loader;

pub use csv_sink::{CsvSink, CsvSinkFactory};
pub use loader::{EntryLoader, EntryLoaderError, EntryRecord, RejectedEntry, ReplayReport};
