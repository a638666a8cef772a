mod filter;
mod issue;

pub use filter::Filter;
pub use issue::Issue;
