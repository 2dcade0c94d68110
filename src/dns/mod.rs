//! DNS wire-format decoding.
//!
//! Bytes in, [`Message`] out. Decoding is all-or-nothing: a call either
//! returns a message whose sections match the header counts, or a
//! [`DecodeError`]. Nothing here logs or keeps state between calls.

mod cursor;
mod error;
mod header;
mod message;
mod name;
mod question;
mod record;
mod types;

pub use cursor::ByteCursor;
pub use error::{DecodeError, DecodeResult};
pub use header::{Flags, HEADER_LEN, Header, Opcode, Rcode};
pub use message::{Message, Role};
pub use name::{MAX_NAME_LEN, MAX_POINTER_JUMPS, decode_name, decode_name_at};
pub use question::Question;
pub use record::ResourceRecord;
pub use types::{RecordClass, RecordType};
