//! Encodes a model blob as a C array initializer and as a DeviceScript hex
//! literal.

pub mod blob;
pub mod driver;
pub mod encode;
pub mod fixture;
pub mod header;
