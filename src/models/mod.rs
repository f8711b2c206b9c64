pub mod loaders;
pub mod payload;
pub mod worker;

pub use loaders::{load_workers_from_str, load_workers_toml};
pub use payload::{CsvFile, ResultPayload, UploadPayload};
pub use worker::{RowId, WorkerListForm, WorkerRecord, WorkerRow};
