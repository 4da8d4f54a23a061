pub mod film;
pub mod normalized;
pub mod showtime;

pub use film::FilmRecord;
pub use normalized::NormalizedFields;
pub use showtime::{ShowtimeRecord, DATETIME_KEY, DISPLAY_TEXT_KEY, ORIGINAL_DISPLAY_TEXT_KEY};
