//! Outer surfaces: the operation dispatcher and the CSV script reader.

pub mod csv;
pub mod dispatch;
