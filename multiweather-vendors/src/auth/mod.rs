//! Shared auth strategies.
//!
//! | Strategy | Vendors | Network |
//! |----------|---------|---------|
//! | [`StaticKeyAuth`] | Zentra, Spectrum, Campbell (pre-issued token) | none |
//! | [`TokenExchangeAuth`] | Onset, Campbell (password grant) | token endpoint on cache miss |
//! | [`HmacSignedAuth`] | Davis | none |
//! | [`RegisteredAuth`] | Rainwise | none |

mod hmac_signed;
mod registered;
mod static_key;
mod token_exchange;

pub use hmac_signed::{HmacSignedAuth, signature_message, sign};
pub use registered::RegisteredAuth;
pub use static_key::StaticKeyAuth;
pub use token_exchange::{TokenExchangeAuth, TokenGrant, parse_token_response};
