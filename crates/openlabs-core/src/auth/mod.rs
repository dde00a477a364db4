//! Credential extraction from login responses.
//!
//! The server's mechanism for returning the session token is not stable
//! across deployments: it has been observed in cookies under several
//! names, in raw `Set-Cookie` headers, in JSON body fields, and in
//! response headers. Extraction is therefore a prioritized search over a
//! snapshot of the whole response rather than a single lookup.

pub mod extract;

pub use extract::{
    extract_credentials, ExtractedCredentials, LoginResponse, ENC_KEY_COOKIE, PLACEHOLDER_TOKEN,
    TOKEN_COOKIE_ALIASES,
};
