//! Plain data: identifiers, properties, wire records and search filters, plus the
//! [`deserialize`] functions that turn records into entities.

pub mod deserialize;
pub mod filter;
pub mod properties;
pub mod record;

pub use filter::*;
pub use properties::*;
pub use record::*;
