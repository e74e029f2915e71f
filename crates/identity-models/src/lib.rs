#![deny(missing_docs)]

//! # Identity Models
//!
//! Value types shared by the identity SDK and the mock identity service.
//!
//! ## Module layout
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`credentials`] | Tokens issued by the resource-owner password grant |
//! | [`error`] | The closed [`AuthError`] taxonomy and its [`FailureCause`] |
//! | [`profile`] | The loosely-typed user profile returned by the users API |

pub mod credentials;
pub mod error;
pub mod profile;

pub use credentials::*;
pub use error::*;
pub use profile::*;
