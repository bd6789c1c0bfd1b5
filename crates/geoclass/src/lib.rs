//! Tag-driven type classification for geodata.
//!
//! `geoclass` turns loosely structured key/value tag records into objects
//! of a registered type, and extracts the typed attributes ("features")
//! each type declares into a compact buffer that can be encoded to disk.
//!
//! # Architecture
//!
//! - [`registry`]: the tag table and the type registry ([`TypeConfig`]),
//!   including classification and the binary `types.dat` file
//! - [`condition`]: boolean condition trees over tags
//! - [`feature`]: the closed catalog of attribute extractors
//! - [`buffer`]: [`FeatureValueBuffer`], the per-object value container
//! - [`diagnostic`]: the sink for non-fatal parse warnings
//!
//! A registry is configured once, in code or from a data file, and then
//! shared read-only by any number of threads:
//!
//! ```text
//! tags --classify--> TypeInfoRef --set_type--> FeatureValueBuffer
//!                                               --parse--> values --write--> bytes
//! ```
//!
//! # Example
//!
//! ```
//! use geoclass::condition::{Condition, Operator};
//! use geoclass::feature::{FeatureKind, FeatureValue};
//! use geoclass::registry::{GeometryKind, GeometryKinds, TagMap, TypeConfig, TypeInfo};
//! use geoclass::{CollectingSink, FeatureValueBuffer, ObjectRef};
//!
//! let mut config = TypeConfig::new();
//! let highway = config.register_tag_for_external_use("highway");
//! let width = config.tag_id("width");
//!
//! let mut info = TypeInfo::new("highway_track");
//! info.add_condition(
//!     GeometryKinds::WAY,
//!     Condition::compare(highway, Operator::Eq, "track"),
//! );
//! info.add_feature(FeatureKind::Width).unwrap();
//! config.add_type(info).unwrap();
//!
//! let mut tags = TagMap::new();
//! tags.insert(highway, "track".to_string());
//! tags.insert(width, "3,5m".to_string());
//!
//! let info = config.classify(&tags, GeometryKind::Way);
//! assert_eq!(info.name(), "highway_track");
//!
//! let sink = CollectingSink::new();
//! let mut buffer = FeatureValueBuffer::with_type(info.clone());
//! buffer.parse(&config, &tags, ObjectRef::way(1), &sink);
//!
//! assert_eq!(buffer.find_value(FeatureKind::Width), Some(&FeatureValue::Width(4)));
//! assert!(sink.is_empty());
//! ```

pub mod buffer;
pub mod condition;
pub mod diagnostic;
pub mod error;
pub mod feature;
pub mod registry;

pub use buffer::FeatureValueBuffer;
pub use diagnostic::{CollectingSink, Diagnostic, DiagnosticSink, LogSink, NullSink, ObjectKind, ObjectRef};
pub use error::{Error, Result};
pub use registry::{
    GeometryKind, GeometryKinds, TYPES_DATA_FILE, TagId, TagMap, TypeConfig, TypeId, TypeInfo,
    TypeInfoRef,
};
