//! Session-domain identifiers, keys, statuses, and opaque credentials.

pub mod credential;
pub mod id;
pub mod key;
pub mod status;

pub use credential::*;
pub use id::*;
pub use key::*;
pub use status::*;
