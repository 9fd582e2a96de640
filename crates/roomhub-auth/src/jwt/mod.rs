//! JWT token encoding, decoding, and claims management.

pub mod claims;
pub mod decoder;
pub mod encoder;

pub use claims::{AccessClaims, RefreshClaims, TokenType};
pub use decoder::{AccessTokenState, JwtDecoder};
pub use encoder::{JwtEncoder, TokenPair};
