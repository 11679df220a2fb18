//! ZENTRA Cloud vendor implementation.
//!
//! ZENTRA uses a static account token sent as `Authorization: Token <t>` and
//! takes station-local `MM-DD-YYYY HH:MM` range bounds. Readings can also be
//! windowed by mrid (monotonic reading id).

mod descriptor;
pub(crate) mod parser;
mod request;

pub use descriptor::zentra_descriptor;
pub use parser::ZentraNormalizer;
pub use request::ZentraRequestBuilder;
