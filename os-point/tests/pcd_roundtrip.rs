use os_point::{check_schema, DualReturnPoint, Point};
use pcd_rs::{DataKind, DynReader, Field, Reader, WriterInit};
use std::path::Path;
use tempfile::TempDir;

fn sample_points() -> Vec<Point> {
    vec![
        Point {
            x: 0.0,
            y: -0.0,
            z: 0.0,
            intensity: 0,
            return_type: 0,
            ring: 0,
        },
        Point {
            x: 1.25,
            y: -73.5,
            z: 0.001,
            intensity: 255,
            return_type: 1,
            ring: 127,
        },
        Point {
            x: -1e-6,
            y: 1e6,
            z: -2.5,
            intensity: 42,
            return_type: 2,
            ring: u16::MAX,
        },
    ]
}

fn write_points(path: &Path, points: &[Point], data_kind: DataKind) {
    let mut writer = WriterInit {
        width: points.len() as u64,
        height: 1,
        viewpoint: Default::default(),
        data_kind,
        schema: None,
    }
    .create(path)
    .unwrap();

    for point in points {
        writer.push(point).unwrap();
    }
    writer.finish().unwrap();
}

fn read_points(path: &Path) -> Vec<Point> {
    let reader: Reader<Point, _> = Reader::open(path).unwrap();
    reader.map(|point| point.unwrap()).collect()
}

#[test]
fn binary_roundtrip_is_bit_exact() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("scan.pcd");
    let points = sample_points();

    write_points(&path, &points, DataKind::Binary);
    let loaded = read_points(&path);

    assert_eq!(loaded.len(), points.len());
    for (lhs, rhs) in loaded.iter().zip(&points) {
        assert_eq!(record_bytes(lhs), record_bytes(rhs));
    }
}

#[test]
fn ascii_roundtrip() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("scan.pcd");
    let points = sample_points();

    write_points(&path, &points, DataKind::Ascii);
    let loaded = read_points(&path);

    assert_eq!(loaded, points);
}

#[test]
fn file_schema_uses_external_names() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("scan.pcd");
    write_points(&path, &sample_points(), DataKind::Binary);

    let reader = DynReader::open(&path).unwrap();
    let names: Vec<_> = reader
        .meta()
        .field_defs
        .iter()
        .map(|def| def.name.clone())
        .collect();

    assert_eq!(
        names,
        ["x", "y", "z", "intensity", "return_type", "channel"]
    );
    assert_eq!(check_schema(reader.meta().field_defs.iter()), Ok(()));
}

#[test]
fn values_read_back_by_external_name() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("scan.pcd");
    let points = sample_points();
    write_points(&path, &points, DataKind::Binary);

    let reader = DynReader::open(&path).unwrap();
    let index_of = |name: &str| {
        reader
            .meta()
            .field_defs
            .iter()
            .position(|def| def.name == name)
            .unwrap()
    };
    let x_idx = index_of("x");
    let y_idx = index_of("y");
    let z_idx = index_of("z");
    let intensity_idx = index_of("intensity");
    let return_type_idx = index_of("return_type");
    let channel_idx = index_of("channel");

    let records: Vec<_> = reader.map(|record| record.unwrap()).collect();
    assert_eq!(records.len(), points.len());

    let f32_bits = |field: &Field, name: &str| match field {
        Field::F32(values) => values[0].to_bits(),
        other => panic!("unexpected {name} field {other:?}"),
    };
    let u8_value = |field: &Field, name: &str| match field {
        Field::U8(values) => values[0],
        other => panic!("unexpected {name} field {other:?}"),
    };

    for (record, point) in records.iter().zip(&points) {
        assert_eq!(f32_bits(&record.0[x_idx], "x"), point.x.to_bits());
        assert_eq!(f32_bits(&record.0[y_idx], "y"), point.y.to_bits());
        assert_eq!(f32_bits(&record.0[z_idx], "z"), point.z.to_bits());
        assert_eq!(
            u8_value(&record.0[intensity_idx], "intensity"),
            point.intensity
        );
        assert_eq!(
            u8_value(&record.0[return_type_idx], "return_type"),
            point.return_type
        );
        match &record.0[channel_idx] {
            Field::U16(values) => assert_eq!(values[0], point.ring),
            other => panic!("unexpected channel field {other:?}"),
        }
    }
}

#[test]
fn profile_records_convert_after_loading() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("dual.pcd");
    let src = vec![
        DualReturnPoint {
            x: 3.0,
            y: 4.0,
            z: 5.0,
            signal: 1000,
            return_type: 1,
            ring: 12,
            ..Default::default()
        },
        DualReturnPoint {
            x: -3.0,
            signal: 17,
            return_type: 2,
            ring: 13,
            ..Default::default()
        },
    ];

    let mut writer = WriterInit {
        width: src.len() as u64,
        height: 1,
        viewpoint: Default::default(),
        data_kind: DataKind::Binary,
        schema: None,
    }
    .create(&path)
    .unwrap();
    for point in &src {
        writer.push(point).unwrap();
    }
    writer.finish().unwrap();

    // a profile file does not match the point schema
    let reader = DynReader::open(&path).unwrap();
    assert!(check_schema(reader.meta().field_defs.iter()).is_err());

    let reader: Reader<DualReturnPoint, _> = Reader::open(&path).unwrap();
    let points: Vec<Point> = reader
        .map(|point| Point::from(&point.unwrap()))
        .collect();

    assert_eq!(points[0].as_tuple(), (&3.0, &4.0, &5.0, &255, &12));
    assert_eq!(points[1].as_tuple(), (&-3.0, &0.0, &0.0, &17, &13));
    assert!(points.iter().all(|point| point.return_type == 0));
}

fn record_bytes(point: &Point) -> &[u8] {
    Point::slice_as_bytes(std::slice::from_ref(point))
}
