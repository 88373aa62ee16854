//! Widths of the fixed-width types that are stored as raw bytes

pub(crate) const DECIMAL32_WIDTH: usize = 4;
pub(crate) const DECIMAL64_WIDTH: usize = 8;
pub(crate) const DECIMAL128_WIDTH: usize = 16;
pub(crate) const UUID_WIDTH: usize = 16;
