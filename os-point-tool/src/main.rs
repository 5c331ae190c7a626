mod convert;
mod dump;
mod fields;
mod info;
mod io;
mod opts;
mod types;
mod utils;

use anyhow::Result;
use clap::Parser;
use opts::{Info, Opts};

fn main() -> Result<()> {
    pretty_env_logger::init();
    let opts = Opts::parse();

    match opts {
        Opts::Info(Info { file }) => {
            crate::info::info(file)?;
        }
        Opts::Fields(args) => {
            crate::fields::fields(args)?;
        }
        Opts::Convert(args) => {
            crate::convert::convert(args)?;
        }
        Opts::Dump(args) => {
            crate::dump::dump(args)?;
        }
    }

    Ok(())
}
