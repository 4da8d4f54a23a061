pub mod batch;
pub mod error;
pub mod fuzzy;
pub mod iso;
pub mod locale;
pub mod matchers;
pub mod normalize;
pub mod parts;
pub mod repair;
pub mod store;

pub use batch::{discover_files, normalize_file, run_batch, BatchOptions, BatchSummary, FileReport};
pub use error::{FuzzyError, NormalizeError};
pub use normalize::{
    normalize_collection, normalize_films, normalize_record, normalize_showtime, resolve_showtime,
    NormalizeStats, Resolution, Strategy,
};
pub use parts::{infer_year, DateParts, Meridiem};
pub use store::CollectionFile;
