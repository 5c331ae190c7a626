//! Raw record buffers.
//!
//! A raw buffer is a plain sequence of records in the exact layout of
//! [`Point`], with a stride of [`POINT_STEP`] bytes and no header. In-memory
//! views use native byte order, the stream functions always use little endian.

use crate::point::Point;
use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use std::{
    io::{self, prelude::*},
    mem::size_of,
};
use thiserror::Error;

/// Distance in bytes between consecutive records.
pub const POINT_STEP: usize = size_of::<Point>();

#[derive(Debug, Error)]
pub enum RawFormatError {
    #[error("buffer length {len} is not a multiple of the {}-byte point step", POINT_STEP)]
    Length { len: usize },
    #[error("truncated record: expect {} bytes, but read {read} bytes", POINT_STEP)]
    Truncated { read: usize },
    #[error(transparent)]
    Io(#[from] io::Error),
}

impl Point {
    /// Views a slice of points as its underlying bytes.
    pub fn slice_as_bytes(points: &[Point]) -> &[u8] {
        bytemuck::cast_slice(points)
    }

    /// Copies native-endian records out of a byte buffer.
    ///
    /// The buffer does not need to be aligned.
    pub fn vec_from_bytes(bytes: &[u8]) -> Result<Vec<Point>, RawFormatError> {
        if bytes.len() % POINT_STEP != 0 {
            return Err(RawFormatError::Length { len: bytes.len() });
        }
        Ok(bytemuck::pod_collect_to_vec(bytes))
    }

    /// Writes the record as 16 little-endian bytes.
    pub fn write_le<W>(&self, writer: &mut W) -> io::Result<()>
    where
        W: Write,
    {
        writer.write_f32::<LittleEndian>(self.x)?;
        writer.write_f32::<LittleEndian>(self.y)?;
        writer.write_f32::<LittleEndian>(self.z)?;
        writer.write_u8(self.intensity)?;
        writer.write_u8(self.return_type)?;
        writer.write_u16::<LittleEndian>(self.ring)?;
        Ok(())
    }

    /// Reads one little-endian record.
    ///
    /// Returns `Ok(None)` on a clean end of stream and an error if the
    /// stream ends in the middle of a record.
    pub fn read_le<R>(reader: &mut R) -> Result<Option<Point>, RawFormatError>
    where
        R: Read,
    {
        let mut buf = [0u8; POINT_STEP];
        let mut read = 0;

        while read < POINT_STEP {
            match reader.read(&mut buf[read..]) {
                Ok(0) => break,
                Ok(cnt) => read += cnt,
                Err(err) if err.kind() == io::ErrorKind::Interrupted => continue,
                Err(err) => return Err(err.into()),
            }
        }

        match read {
            0 => return Ok(None),
            POINT_STEP => {}
            read => return Err(RawFormatError::Truncated { read }),
        }

        let mut rdr = &buf[..];
        let point = Point {
            x: rdr.read_f32::<LittleEndian>()?,
            y: rdr.read_f32::<LittleEndian>()?,
            z: rdr.read_f32::<LittleEndian>()?,
            intensity: rdr.read_u8()?,
            return_type: rdr.read_u8()?,
            ring: rdr.read_u16::<LittleEndian>()?,
        };
        Ok(Some(point))
    }
}
