pub mod count_type;
pub mod path_filter;
pub mod settings;

pub use count_type::{
    CharacterCountType, CountConfig, CountType, CountTypeSelection, PageCountType, SessionCountType,
};
pub use path_filter::PathFilter;
pub use settings::{
    DEFAULT_CHARS_PER_MINUTE, DEFAULT_CHARS_PER_PAGE, DEFAULT_SEPARATOR, DEFAULT_WORDS_PER_MINUTE,
    DEFAULT_WORDS_PER_PAGE, NoteCountSettings,
};
