//! credwire: a fixed-layout binary codec for device provisioning credential records.
//!
//! Records are described by an immutable [`RecordSchema`] -- an ordered list of
//! named fields (fixed-width unsigned integers, fixed-length byte arrays,
//! zero-padded strings) whose byte offsets are precomputed at construction. The
//! [`codec`] module converts between a [`Record`] and the schema's exact byte
//! layout; [`thread`] provides the concrete Thread network credential schema.

pub mod codec;
pub mod error;
pub mod schema;
pub mod thread;
pub mod value;

pub use codec::{decode, encode};
pub use error::Error;
pub use schema::{Endianness, FieldKind, FieldSpec, IntWidth, RecordSchema, StringEncoding};
pub use thread::ThreadNetworkInfo;
pub use value::{Record, Value};
