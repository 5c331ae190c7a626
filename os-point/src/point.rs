use bytemuck::{Pod, Zeroable};
use pcd_rs::{PcdDeserialize, PcdSerialize};
use serde::{Deserialize, Serialize};
use std::mem::{align_of, offset_of, size_of};

/// One lidar return in the sensor frame. 16 bytes, 8-byte aligned; `ring`
/// is published as `channel`.
#[repr(C, align(8))]
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Pod,
    Zeroable,
    PcdSerialize,
    PcdDeserialize,
    Serialize,
    Deserialize,
)]
pub struct Point {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    // truncated from the 16/32-bit signal channel
    pub intensity: u8,
    pub return_type: u8,
    #[pcd(rename = "channel")]
    #[serde(rename = "channel")]
    pub ring: u16,
}

const _: () = {
    assert!(size_of::<Point>() == 16);
    assert!(align_of::<Point>() == 8);
    assert!(offset_of!(Point, x) == 0);
    assert!(offset_of!(Point, y) == 4);
    assert!(offset_of!(Point, z) == 8);
    assert!(offset_of!(Point, intensity) == 12);
    assert!(offset_of!(Point, return_type) == 13);
    assert!(offset_of!(Point, ring) == 14);
};

impl Default for Point {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            z: 0.0,
            intensity: 0,
            return_type: 0,
            ring: 0,
        }
    }
}

pub type PointTuple<'a> = (&'a f32, &'a f32, &'a f32, &'a u8, &'a u16);

pub type PointTupleMut<'a> = (&'a mut f32, &'a mut f32, &'a mut f32, &'a mut u8, &'a mut u16);

impl Point {
    /// Borrows `x, y, z, intensity, ring`. `return_type` is not part of
    /// this view.
    pub fn as_tuple(&self) -> PointTuple<'_> {
        (&self.x, &self.y, &self.z, &self.intensity, &self.ring)
    }

    pub fn as_tuple_mut(&mut self) -> PointTupleMut<'_> {
        (
            &mut self.x,
            &mut self.y,
            &mut self.z,
            &mut self.intensity,
            &mut self.ring,
        )
    }

    /// Field `I` of the tuple view. Only `0..=4` compile.
    pub fn get<const I: usize>(&self) -> &<Self as FieldAt<I>>::Output
    where
        Self: FieldAt<I>,
    {
        <Self as FieldAt<I>>::field(self)
    }

    pub fn get_mut<const I: usize>(&mut self) -> &mut <Self as FieldAt<I>>::Output
    where
        Self: FieldAt<I>,
    {
        <Self as FieldAt<I>>::field_mut(self)
    }
}

pub trait FieldAt<const I: usize> {
    type Output;

    fn field(&self) -> &Self::Output;

    fn field_mut(&mut self) -> &mut Self::Output;
}

macro_rules! impl_field_at {
    ($($index:literal => $field:ident: $ty:ty),* $(,)?) => {
        $(
            impl FieldAt<$index> for Point {
                type Output = $ty;

                fn field(&self) -> &$ty {
                    &self.$field
                }

                fn field_mut(&mut self) -> &mut $ty {
                    &mut self.$field
                }
            }
        )*
    };
}

impl_field_at! {
    0 => x: f32,
    1 => y: f32,
    2 => z: f32,
    3 => intensity: u8,
    4 => ring: u16,
}
