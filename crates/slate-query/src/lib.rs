mod filter;
mod query;
mod sort;
mod value;

pub use filter::{Clause, Filter, LogicalOp};
pub use query::{Aggregate, Query};
pub use sort::{Sort, SortDirection};
pub use value::QueryValue;
