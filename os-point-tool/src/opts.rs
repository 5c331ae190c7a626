use crate::types::FileFormat;
use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
pub enum Opts {
    Info(Info),
    Fields(Fields),
    Convert(Convert),
    Dump(Dump),
}

/// Show the field definitions of a .pcd file.
#[derive(Debug, Clone, Parser)]
pub struct Info {
    pub file: PathBuf,
}

/// Show the registered fields of the point record.
#[derive(Debug, Clone, Parser)]
pub struct Fields {
    #[clap(long)]
    pub json: bool,
}

/// Point cloud file conversion.
#[derive(Debug, Clone, Parser)]
pub struct Convert {
    #[clap(short, long)]
    pub from: Option<FileFormat>,

    #[clap(short, long)]
    pub to: Option<FileFormat>,

    #[clap(short, long)]
    pub input: PathBuf,

    #[clap(short, long)]
    pub output: PathBuf,
}

/// Print the points of a file.
#[derive(Debug, Clone, Parser)]
pub struct Dump {
    #[clap(short, long)]
    pub format: Option<FileFormat>,

    #[clap(long)]
    pub json: bool,

    pub input: PathBuf,
}
