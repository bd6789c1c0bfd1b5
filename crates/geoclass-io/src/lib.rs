//! Sequential binary I/O for `geoclass` data files.
//!
//! This crate provides the two stream primitives the type registry and the
//! feature value buffers are serialized with:
//!
//! - [`Scanner`]: reads typed values from any [`std::io::Read`]
//! - [`Writer`]: writes typed values to any [`std::io::Write`]
//!
//! # Encoding
//!
//! | value            | encoding                                       |
//! |------------------|------------------------------------------------|
//! | `bool`           | one byte, `0` or `1` (any non-zero reads true) |
//! | `u8` / `i8`      | one byte                                       |
//! | `u16`/`u32`/`u64`| fixed width, little endian                     |
//! | number           | unsigned LEB128 varint                         |
//! | string           | varint byte length, then UTF-8 bytes           |
//!
//! Both sides keep a sticky error flag next to the `Result` of every call, so
//! a caller that chains many writes can check [`Writer::has_error`] once at
//! the end.
//!
//! # Examples
//!
//! ```
//! use geoclass_io::{Scanner, Writer};
//!
//! let mut writer = Writer::new(Vec::new());
//! writer.write_number_u32(300).unwrap();
//! writer.write_string("highway").unwrap();
//! writer.write_bool(true).unwrap();
//! let bytes = writer.close().unwrap();
//!
//! let mut scanner = Scanner::new(bytes.as_slice());
//! assert_eq!(scanner.read_number_u32().unwrap(), 300);
//! assert_eq!(scanner.read_string().unwrap(), "highway");
//! assert!(scanner.read_bool().unwrap());
//! ```

pub mod error;
pub mod scanner;
pub mod varint;
pub mod writer;

pub use error::{Error, Result};
pub use scanner::Scanner;
pub use writer::Writer;
