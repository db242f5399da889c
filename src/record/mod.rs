//! Record module for serializing extracted inventories

pub mod types;
pub mod writer;

pub use types::{ExtendedParameter, Inventory, RecordKind};
pub use writer::{
    write_inventory, CsvWriter, ExtendedCsvWriter, JsonWriter, OutputFormat, RecordWriter,
};
