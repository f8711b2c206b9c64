pub mod result_presenter;
pub mod result_store;
pub mod result_view;

pub use result_presenter::{failure_notice, PersistedResult, ResultPresenter, Summary};
pub use result_store::{FileStore, MemoryStore, ResultStore, RESULT_STORAGE_KEY};
pub use result_view::{render_table, ResultView};
