use crate::{
    io::{create_pcd_reader, create_pcd_writer, load_bin_iter, RawBinWriter},
    opts::Convert,
    types::FileFormat,
    utils::guess_file_format,
};
use anyhow::{anyhow, bail, ensure, Context, Result};
use itertools::Itertools;
use log::info;
use os_point::Point;
use pcd_rs::{DataKind, ViewPoint};
use std::path::Path;

pub fn convert(args: Convert) -> Result<()> {
    let Convert {
        from,
        to,
        input,
        output,
    } = args;

    let input_format = match from {
        Some(format) => format,
        None => guess_file_format(&input).ok_or_else(|| {
            anyhow!("cannot guess format of input file '{}'", input.display())
        })?,
    };
    let output_format = match to {
        Some(format) => format,
        None => guess_file_format(&output).ok_or_else(|| {
            anyhow!("cannot guess format of output file '{}'", output.display())
        })?,
    };

    use FileFormat as F;
    match (input_format, output_format) {
        (F::RawBin, F::RawBin) => {
            bail!("Nothing to be done");
        }
        (F::RawBin, to) => {
            let points: Vec<_> = load_bin_iter(&input)?.try_collect()?;
            let layout = CloudLayout::unorganized(points.len());
            save_pcd(&points, layout, &output, data_kind(to))?;
        }
        (_, F::RawBin) => {
            let (points, _) = load_pcd(&input)?;
            save_bin(&points, &output)?;
        }
        (_, to) => {
            let (points, layout) = load_pcd(&input)?;
            save_pcd(&points, layout, &output, data_kind(to))?;
        }
    }

    info!(
        "converted '{}' ({input_format:?}) to '{}' ({output_format:?})",
        input.display(),
        output.display()
    );

    Ok(())
}

fn data_kind(format: FileFormat) -> DataKind {
    match format {
        FileFormat::AsciiPcd => DataKind::Ascii,
        _ => DataKind::Binary,
    }
}

/// Organization of a cloud as stored in a PCD header.
struct CloudLayout {
    width: u64,
    height: u64,
    viewpoint: ViewPoint,
}

impl CloudLayout {
    fn unorganized(len: usize) -> Self {
        Self {
            width: len as u64,
            height: 1,
            viewpoint: Default::default(),
        }
    }
}

fn load_pcd<P>(path: P) -> Result<(Vec<Point>, CloudLayout)>
where
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let reader = create_pcd_reader(path)?;
    let pcd_rs::PcdMeta {
        width,
        height,
        ref viewpoint,
        ..
    } = *reader.meta();
    let layout = CloudLayout {
        width,
        height,
        viewpoint: viewpoint.clone(),
    };

    let points: Vec<_> = reader
        .try_collect()
        .with_context(|| format!("failed to read points from '{}'", path.display()))?;
    info!(
        "loaded {} points ({width}x{height}) from '{}'",
        points.len(),
        path.display()
    );
    Ok((points, layout))
}

fn save_pcd<P>(
    points: &[Point],
    layout: CloudLayout,
    pcd_file: P,
    data_kind: DataKind,
) -> Result<()>
where
    P: AsRef<Path>,
{
    let CloudLayout {
        width,
        height,
        viewpoint,
    } = layout;
    ensure!(
        width * height == points.len() as u64,
        "a {width}x{height} cloud cannot hold {} points",
        points.len()
    );

    let mut writer = create_pcd_writer(pcd_file, width, height, viewpoint, data_kind)?;

    points.iter().try_for_each(|point| -> Result<_> {
        writer.push(point)?;
        Ok(())
    })?;

    writer.finish()?;

    Ok(())
}

fn save_bin<P>(points: &[Point], bin_file: P) -> Result<()>
where
    P: AsRef<Path>,
{
    let mut writer = RawBinWriter::from_path(bin_file)?;

    for point in points {
        writer.push(point)?;
    }

    writer.finish()?;
    Ok(())
}
