pub mod fetch;
pub mod site;

pub use fetch::{Fetch, FetchResponse};
pub use site::{ChapterOrder, ChapterQuery, Source};
