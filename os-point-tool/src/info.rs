use anyhow::{ensure, Result};
use log::debug;
use std::path::Path;

pub fn info(file: impl AsRef<Path>) -> Result<()> {
    let file = file.as_ref();

    ensure!(
        file.extension().map(|ext| ext == "pcd").unwrap_or(false),
        "file name must ends with '.pcd', but get '{}'",
        file.display()
    );

    let reader = pcd_rs::DynReader::open(file)?;
    let meta = reader.meta();
    debug!(
        "{}: width={} height={} data={:?}",
        file.display(),
        meta.width,
        meta.height,
        meta.data
    );

    println!("name\ttype\tcount");
    meta.field_defs.iter().for_each(|field| {
        let pcd_rs::FieldDef {
            ref name,
            kind,
            count,
        } = *field;

        println!("{}\t{:?}\t{}", name, kind, count);
    });

    match os_point::check_schema(meta.field_defs.iter()) {
        Ok(()) => println!("compatible with the point record"),
        Err(err) => println!("not compatible with the point record: {err}"),
    }

    Ok(())
}
