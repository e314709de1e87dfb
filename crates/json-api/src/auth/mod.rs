//! Bearer-token auth middleware.

pub(crate) mod middleware;
