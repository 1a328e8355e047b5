// parsable-json: carry any parse/format type as a JSON string scalar

pub mod adapter;
pub mod as_string;
pub mod errors;
pub mod json;
pub mod parsable;
pub mod parsed;
pub mod registry;

pub use adapter::ParsableAdapter;
pub use errors::{Error, ParseError, Result};
pub use parsable::{type_name, FormatProvider, Parsable};
pub use parsed::Parsed;
pub use registry::{Converter, ConverterRegistry};
