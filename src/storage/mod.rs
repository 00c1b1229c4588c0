mod file_storage;

pub use file_storage::{read_json, remove_file, write_json, Result, StorageError};
