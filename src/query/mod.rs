//! PostgREST request builder: table and columns from validated input, values percent-encoded.

mod builder;
pub mod params;
pub use builder::*;
pub use params::*;
