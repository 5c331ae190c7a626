//! Point record for rotating lidar sensors.
//!
//! [`Point`] is a fixed 16-byte, 8-byte aligned record holding one lidar
//! return. Its fields are published to point-cloud containers under the
//! names listed in [`Point::FIELDS`]. Note that the in-memory `ring` field is
//! published as `channel`.
//!
//! ```
//! use os_point::Point;
//!
//! let mut point = Point::default();
//! *point.get_mut::<4>() = 7;
//!
//! assert_eq!(point.ring, 7);
//! assert_eq!(os_point::external_name("ring"), Some("channel"));
//! ```

pub mod fields;
pub mod point;
pub mod raw;
pub mod source;

pub use fields::{
    check_schema, external_name, field_by_external_name, field_by_name, FieldDef, FieldKind,
    FieldValue, SchemaError,
};
pub use point::{FieldAt, Point, PointTuple, PointTupleMut};
pub use raw::{RawFormatError, POINT_STEP};
pub use source::{quantize_intensity, DualReturnPoint, LegacyPoint, SourcePoint};
