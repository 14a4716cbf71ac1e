pub mod paginate;

pub use paginate::{PageExtractor, PaginationWalker};
