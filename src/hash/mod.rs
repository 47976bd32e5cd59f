//! Hash Module
//!
//! The hash value type: a mapping from field name to a string-encoded value.
//!
//! ## Responsibilities
//! - Read and write individual fields
//! - Atomically transform a field (integer increment)
//! - Keep every stored value as an opaque string
//!
//! ## Numeric Interpretation
//! Fields never carry a numeric type. A field is parsed as a base-10 `i64`
//! only at increment time and the result is written back as its decimal
//! string form:
//!
//! ```text
//!   "9000" ──parse──▶ 9000 ──+delta──▶ 9010 ──format──▶ "9010"
//!             │                 │
//!             ▼                 ▼
//!       NotAnInteger     IncrementOverflow
//!      (field untouched)  (field untouched)
//! ```

mod integer;
mod map;

pub use integer::{add_checked, parse_i64};
pub use map::Hash;
