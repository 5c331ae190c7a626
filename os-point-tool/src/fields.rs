use crate::opts::Fields;
use anyhow::Result;
use os_point::Point;

pub fn fields(args: Fields) -> Result<()> {
    let Fields { json } = args;

    if json {
        let text = serde_json::to_string_pretty(&Point::FIELDS)?;
        println!("{text}");
        return Ok(());
    }

    println!("name\texternal\ttype\toffset\tsize");
    for def in &Point::FIELDS {
        println!(
            "{}\t{}\t{}\t{}\t{}",
            def.name,
            def.external_name,
            def.kind,
            def.offset,
            def.size()
        );
    }
    println!("point step: {}", os_point::POINT_STEP);

    Ok(())
}
