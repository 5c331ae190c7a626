use crate::{
    io::{create_pcd_reader, load_bin_iter},
    opts::Dump,
    types::FileFormat,
    utils::guess_file_format,
};
use anyhow::{anyhow, Result};
use itertools::Itertools;
use os_point::{FieldValue, Point};
use serde_json::{json, Map, Value};
use std::path::Path;

pub fn dump(args: Dump) -> Result<()> {
    let Dump {
        input,
        format,
        json,
    } = args;

    let format = match format {
        Some(format) => format,
        None => guess_file_format(&input)
            .ok_or_else(|| anyhow!("unable to guess file format of '{}'", input.display()))?,
    };

    use FileFormat as F;
    match format {
        F::BinaryPcd | F::AsciiPcd => dump_pcd(&input, json)?,
        F::RawBin => dump_bin(&input, json)?,
    }

    Ok(())
}

fn dump_pcd<P>(path: P, json: bool) -> Result<()>
where
    P: AsRef<Path>,
{
    let reader = create_pcd_reader(path)?;

    print_header(json);
    for point in reader {
        print_point(&point?, json)?;
    }

    Ok(())
}

fn dump_bin<P>(path: P, json: bool) -> Result<()>
where
    P: AsRef<Path>,
{
    print_header(json);
    for point in load_bin_iter(path)? {
        print_point(&point?, json)?;
    }

    Ok(())
}

fn print_header(json: bool) {
    if !json {
        println!("{}", Point::FIELDS.iter().map(|def| def.external_name).join("\t"));
    }
}

fn print_point(point: &Point, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string(&point_to_json(point))?);
    } else {
        println!("{}", point.values().iter().join("\t"));
    }
    Ok(())
}

/// Builds a JSON object keyed by the published field names.
///
/// JSON has no NaN or infinity, so non-finite coordinates are written as the
/// strings "NaN", "inf" and "-inf".
fn point_to_json(point: &Point) -> Value {
    let fields: Map<String, Value> = Point::FIELDS
        .iter()
        .zip(point.values())
        .map(|(def, value)| {
            let value = match value {
                FieldValue::F32(val) if !val.is_finite() => json!(value.to_string()),
                FieldValue::F32(val) => json!(val),
                FieldValue::U8(val) => json!(val),
                FieldValue::U16(val) => json!(val),
            };
            (def.external_name.to_string(), value)
        })
        .collect();
    Value::Object(fields)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_uses_external_names() {
        let point = Point {
            x: 1.5,
            y: -2.0,
            z: 0.25,
            intensity: 9,
            return_type: 1,
            ring: 31,
        };
        let value = point_to_json(&point);

        assert_eq!(
            value,
            json!({
                "x": 1.5,
                "y": -2.0,
                "z": 0.25,
                "intensity": 9,
                "return_type": 1,
                "channel": 31,
            })
        );

        let parsed: Point = serde_json::from_value(value).unwrap();
        assert_eq!(parsed, point);
    }

    #[test]
    fn non_finite_coordinates_are_strings() {
        let point = Point {
            x: f32::NAN,
            y: f32::INFINITY,
            z: f32::NEG_INFINITY,
            ..Point::default()
        };
        let value = point_to_json(&point);

        assert_eq!(value["x"], "NaN");
        assert_eq!(value["y"], "inf");
        assert_eq!(value["z"], "-inf");
        assert_eq!(value["channel"], 0);

        let text = serde_json::to_string(&value).unwrap();
        assert!(!text.contains("null"));
    }

    #[test]
    fn text_row_follows_field_order() {
        let point = Point {
            x: 3.0,
            y: 0.5,
            z: -1.0,
            intensity: 200,
            return_type: 2,
            ring: 64,
        };

        assert_eq!(point.values().iter().join("\t"), "3\t0.5\t-1\t200\t2\t64");
    }
}
