use crate::point::Point;
use serde::Serialize;
use std::{fmt, mem::offset_of, mem::size_of};
use thiserror::Error;

/// Scalar storage type of a registered field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum FieldKind {
    F32,
    U8,
    U16,
}

impl FieldKind {
    /// Width in bytes.
    pub const fn size(self) -> usize {
        match self {
            FieldKind::F32 => 4,
            FieldKind::U8 => 1,
            FieldKind::U16 => 2,
        }
    }

    pub fn value_kind(self) -> pcd_rs::ValueKind {
        match self {
            FieldKind::F32 => pcd_rs::ValueKind::F32,
            FieldKind::U8 => pcd_rs::ValueKind::U8,
            FieldKind::U16 => pcd_rs::ValueKind::U16,
        }
    }

    /// Decodes one native-endian value of this kind.
    ///
    /// `bytes` must be exactly [`FieldKind::size`] long.
    fn decode(self, bytes: &[u8]) -> Option<FieldValue> {
        let value = match self {
            FieldKind::F32 => FieldValue::F32(f32::from_ne_bytes(bytes.try_into().ok()?)),
            FieldKind::U8 => FieldValue::U8(*bytes.first()?),
            FieldKind::U16 => FieldValue::U16(u16::from_ne_bytes(bytes.try_into().ok()?)),
        };
        Some(value)
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            FieldKind::F32 => "f32",
            FieldKind::U8 => "u8",
            FieldKind::U16 => "u16",
        };
        f.write_str(text)
    }
}

/// A single field value read through the registration table.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    F32(f32),
    U8(u8),
    U16(u16),
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::F32(val) => write!(f, "{val}"),
            FieldValue::U8(val) => write!(f, "{val}"),
            FieldValue::U16(val) => write!(f, "{val}"),
        }
    }
}

/// Registration entry mapping an in-memory field to its published name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct FieldDef {
    /// Name of the struct field.
    pub name: &'static str,
    /// Name consumers see in point-cloud files and messages.
    pub external_name: &'static str,
    pub kind: FieldKind,
    /// Byte offset inside [`Point`].
    pub offset: usize,
}

impl FieldDef {
    const fn new(
        name: &'static str,
        external_name: &'static str,
        kind: FieldKind,
        offset: usize,
    ) -> Self {
        Self {
            name,
            external_name,
            kind,
            offset,
        }
    }

    pub const fn size(&self) -> usize {
        self.kind.size()
    }
}

impl Point {
    /// Published fields in layout order.
    pub const FIELDS: [FieldDef; 6] = [
        FieldDef::new("x", "x", FieldKind::F32, offset_of!(Point, x)),
        FieldDef::new("y", "y", FieldKind::F32, offset_of!(Point, y)),
        FieldDef::new("z", "z", FieldKind::F32, offset_of!(Point, z)),
        FieldDef::new(
            "intensity",
            "intensity",
            FieldKind::U8,
            offset_of!(Point, intensity),
        ),
        FieldDef::new(
            "return_type",
            "return_type",
            FieldKind::U8,
            offset_of!(Point, return_type),
        ),
        FieldDef::new("ring", "channel", FieldKind::U16, offset_of!(Point, ring)),
    ];

    /// Reads a field by its external name using the registration table.
    pub fn value(&self, external_name: &str) -> Option<FieldValue> {
        let def = field_by_external_name(external_name)?;
        let bytes = bytemuck::bytes_of(self);
        def.kind.decode(&bytes[def.offset..def.offset + def.size()])
    }

    /// All field values in registration order.
    pub fn values(&self) -> [FieldValue; 6] {
        [
            FieldValue::F32(self.x),
            FieldValue::F32(self.y),
            FieldValue::F32(self.z),
            FieldValue::U8(self.intensity),
            FieldValue::U8(self.return_type),
            FieldValue::U16(self.ring),
        ]
    }
}

// Table entries must be contiguous and cover the whole record.
const _: () = {
    let fields = &Point::FIELDS;
    let mut end = 0;
    let mut idx = 0;

    while idx < fields.len() {
        assert!(fields[idx].offset == end);
        end += fields[idx].kind.size();
        idx += 1;
    }

    assert!(end == size_of::<Point>());
};

/// Looks up a field by its struct field name.
pub fn field_by_name(name: &str) -> Option<&'static FieldDef> {
    Point::FIELDS.iter().find(|def| def.name == name)
}

/// Looks up a field by its published name.
pub fn field_by_external_name(external_name: &str) -> Option<&'static FieldDef> {
    Point::FIELDS
        .iter()
        .find(|def| def.external_name == external_name)
}

/// Published name of a struct field.
pub fn external_name(name: &str) -> Option<&'static str> {
    field_by_name(name).map(|def| def.external_name)
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    #[error("expect {expect} fields, but found {found}")]
    FieldCount { expect: usize, found: usize },
    #[error("field {index} is named '{found}', but '{expect}' is expected")]
    Name {
        index: usize,
        expect: &'static str,
        found: String,
    },
    #[error("field '{name}' has type {found:?}, but {expect:?} is expected")]
    Kind {
        name: &'static str,
        expect: pcd_rs::ValueKind,
        found: pcd_rs::ValueKind,
    },
    #[error("field '{name}' has count {found}, but it must be a scalar")]
    Count { name: &'static str, found: u64 },
}

/// Checks that a PCD schema has exactly the fields published by [`Point`],
/// in the same order and with the same types.
pub fn check_schema<'a, I>(field_defs: I) -> Result<(), SchemaError>
where
    I: IntoIterator<Item = &'a pcd_rs::FieldDef>,
{
    let field_defs: Vec<_> = field_defs.into_iter().collect();

    if field_defs.len() != Point::FIELDS.len() {
        return Err(SchemaError::FieldCount {
            expect: Point::FIELDS.len(),
            found: field_defs.len(),
        });
    }

    for (index, (expect, found)) in Point::FIELDS.iter().zip(field_defs).enumerate() {
        let pcd_rs::FieldDef {
            ref name,
            kind,
            count,
        } = *found;

        if name != expect.external_name {
            return Err(SchemaError::Name {
                index,
                expect: expect.external_name,
                found: name.clone(),
            });
        }

        if kind != expect.kind.value_kind() {
            return Err(SchemaError::Kind {
                name: expect.external_name,
                expect: expect.kind.value_kind(),
                found: kind,
            });
        }

        if count != 1 {
            return Err(SchemaError::Count {
                name: expect.external_name,
                found: count,
            });
        }
    }

    Ok(())
}
