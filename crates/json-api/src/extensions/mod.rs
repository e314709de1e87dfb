//! Handler helper extensions.

mod depot;
mod point_in_time;
mod result;

pub(crate) use depot::*;
pub(crate) use point_in_time::*;
pub(crate) use result::*;
