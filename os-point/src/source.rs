//! Richer per-profile records produced by the decoding stage, and the
//! conversion from them into [`Point`].

use crate::point::Point;
use num_traits::ToPrimitive;
use pcd_rs::{PcdDeserialize, PcdSerialize};
use serde::{Deserialize, Serialize};

pub trait SourcePoint {
    fn x(&self) -> f32;

    fn y(&self) -> f32;

    fn z(&self) -> f32;

    fn intensity(&self) -> u8;

    fn ring(&self) -> u16;
}

// `return_type` is not carried over and stays 0, so multi-return information
// is lost on this path.
impl<S> From<&S> for Point
where
    S: SourcePoint + ?Sized,
{
    fn from(src: &S) -> Self {
        Self {
            x: src.x(),
            y: src.y(),
            z: src.z(),
            intensity: src.intensity(),
            return_type: u8::default(),
            ring: src.ring(),
        }
    }
}

/// Saturates a signal of any width into `0..=255`. Negative and NaN map to 0.
pub fn quantize_intensity<T>(signal: T) -> u8
where
    T: ToPrimitive,
{
    match signal.to_f64() {
        Some(val) if val >= u8::MAX as f64 => u8::MAX,
        Some(val) if val > 0.0 => val as u8,
        _ => 0,
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Default, PcdSerialize, PcdDeserialize, Serialize, Deserialize,
)]
pub struct LegacyPoint {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub t: u32,
    pub range: u32,
    pub signal: u32,
    pub reflectivity: u32,
    pub near_ir: u32,
    #[pcd(rename = "channel")]
    #[serde(rename = "channel")]
    pub ring: u16,
}

impl SourcePoint for LegacyPoint {
    fn x(&self) -> f32 {
        self.x
    }

    fn y(&self) -> f32 {
        self.y
    }

    fn z(&self) -> f32 {
        self.z
    }

    fn intensity(&self) -> u8 {
        quantize_intensity(self.signal)
    }

    fn ring(&self) -> u16 {
        self.ring
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Default, PcdSerialize, PcdDeserialize, Serialize, Deserialize,
)]
pub struct DualReturnPoint {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub t: u32,
    pub range: u32,
    pub signal: u16,
    pub reflectivity: u8,
    pub return_type: u8,
    pub near_ir: u16,
    #[pcd(rename = "channel")]
    #[serde(rename = "channel")]
    pub ring: u16,
}

impl SourcePoint for DualReturnPoint {
    fn x(&self) -> f32 {
        self.x
    }

    fn y(&self) -> f32 {
        self.y
    }

    fn z(&self) -> f32 {
        self.z
    }

    fn intensity(&self) -> u8 {
        quantize_intensity(self.signal)
    }

    fn ring(&self) -> u16 {
        self.ring
    }
}
