use clap::ValueEnum;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum)]
pub enum FileFormat {
    #[value(name = "pcd.binary")]
    BinaryPcd,
    #[value(name = "pcd.ascii")]
    AsciiPcd,
    #[value(name = "bin")]
    RawBin,
}
