pub mod claims;
pub mod errors;
pub mod issuer;

pub use claims::TokenClaims;
pub use claims::ISSUER;
pub use errors::TokenError;
pub use issuer::issue_token;
pub use issuer::verify_token;
pub use issuer::TokenIssuer;
