//! Session identity and meal ownership.

mod ownership;
mod session;

pub use ownership::{authorize, owned_meal, Access};
pub use session::{
    identify, issue, session_layer, CurrentUser, Profile, Resolved, SessionResolver, SessionToken,
    SESSION_TOKEN_KEY,
};
