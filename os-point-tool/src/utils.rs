use crate::types::FileFormat;
use std::path::Path;

pub fn guess_file_format<P>(file: P) -> Option<FileFormat>
where
    P: AsRef<Path>,
{
    let file = file.as_ref();
    let file_name = file.file_name()?.to_str()?;

    let format = if file_name.ends_with(".ascii.pcd") {
        FileFormat::AsciiPcd
    } else if file_name.ends_with(".pcd") {
        FileFormat::BinaryPcd
    } else if file_name.ends_with(".bin") {
        FileFormat::RawBin
    } else {
        return None;
    };

    Some(format)
}
