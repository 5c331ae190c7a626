use anyhow::{Context, Result};
use log::warn;
use os_point::Point;
use pcd_rs::{DataKind, ViewPoint};
use std::{
    fs::File,
    io::{self, prelude::*, BufReader, BufWriter},
    iter,
    path::Path,
};

/// Writes raw little-endian point records.
pub struct RawBinWriter {
    writer: Option<BufWriter<File>>,
}

impl RawBinWriter {
    pub fn from_path(path: impl AsRef<Path>) -> io::Result<Self> {
        let writer = BufWriter::new(File::create(path)?);
        Ok(Self {
            writer: Some(writer),
        })
    }

    pub fn push(&mut self, point: &Point) -> io::Result<()> {
        match self.writer.as_mut() {
            Some(writer) => point.write_le(writer),
            None => Err(io::Error::new(
                io::ErrorKind::BrokenPipe,
                "the writer is already finished",
            )),
        }
    }

    pub fn finish(mut self) -> io::Result<()> {
        match self.writer.take() {
            Some(mut writer) => writer.flush(),
            None => Ok(()),
        }
    }
}

impl Drop for RawBinWriter {
    fn drop(&mut self) {
        if let Some(mut writer) = self.writer.take() {
            if let Err(err) = writer.flush() {
                warn!("unable to flush the raw point file: {err}");
            }
        }
    }
}

pub fn load_bin_iter<P>(path: P) -> Result<impl Iterator<Item = Result<Point>>>
where
    P: AsRef<Path>,
{
    let bin_path = path.as_ref();

    let mut input = BufReader::new(
        File::open(bin_path)
            .with_context(|| format!("Failed to open file {}", bin_path.display()))?,
    );

    let mut next = move || -> Result<Option<Point>> { Ok(Point::read_le(&mut input)?) };

    Ok(iter::from_fn(move || next().transpose()))
}

pub fn create_pcd_writer<P>(
    pcd_file: P,
    width: u64,
    height: u64,
    viewpoint: ViewPoint,
    data_kind: DataKind,
) -> Result<pcd_rs::Writer<Point, BufWriter<File>>>
where
    P: AsRef<Path>,
{
    let pcd_file = pcd_file.as_ref();
    let writer = pcd_rs::WriterInit {
        width,
        height,
        viewpoint,
        data_kind,
        schema: None,
    }
    .create(pcd_file)
    .with_context(|| format!("unable to create file '{}'", pcd_file.display()))?;
    Ok(writer)
}

pub fn create_pcd_reader<P>(input_path: P) -> Result<pcd_rs::Reader<Point, BufReader<File>>>
where
    P: AsRef<Path>,
{
    let input_path = input_path.as_ref();
    let reader = pcd_rs::Reader::open(input_path)
        .with_context(|| format!("unable to open file '{}'", input_path.display()))?;
    Ok(reader)
}
