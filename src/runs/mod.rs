pub mod filter;
pub mod storage;
pub mod types;

pub use filter::{select_run, sort_chronological};
pub use storage::{get_runs_path, load_run_store, save_run_store};
pub use types::{Run, RunInput, RunStore};
