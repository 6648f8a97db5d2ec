//! End-to-end pipeline over real files.
//!
//! Synthesises a small SMSPEC/UNSMRY pair on disk, then runs the whole
//! chain: array stream, column resolution, row materialisation. The
//! writer below produces the same framing and blocking a simulator
//! would.

use smry::codec::{to_disk, ElementType};
use smry::io::{ArrayStream, Values};
use smry::summary::{
    decode_intehead, read_rows, resolve_columns, ColumnInput, Simulator, UnitSystem,
};
use std::io::Write;

fn record(payload: &[u8]) -> Vec<u8> {
    let len = (payload.len() as i32).to_be_bytes();
    let mut out = Vec::new();
    out.extend_from_slice(&len);
    out.extend_from_slice(payload);
    out.extend_from_slice(&len);
    out
}

/// Append one array: header record plus body records blocked the way the
/// format manual specifies.
fn write_array(out: &mut Vec<u8>, keyword: &str, dtype: ElementType, host_body: &[u8]) {
    let esize = dtype.element_size();
    let count = if esize == 0 { 0 } else { host_body.len() / esize };

    let mut header = Vec::with_capacity(16);
    header.extend_from_slice(&smry::summary::pad8(keyword));
    header.extend_from_slice(&(count as i32).to_be_bytes());
    header.extend_from_slice(&dtype.tag());
    out.extend_from_slice(&record(&header));

    for chunk in host_body.chunks(dtype.block_size() * esize.max(1)) {
        let elems = chunk.len() / esize;
        let mut disk = vec![0u8; chunk.len()];
        to_disk(&mut disk, chunk, dtype, elems).unwrap();
        out.extend_from_slice(&record(&disk));
    }
}

fn write_strings(out: &mut Vec<u8>, keyword: &str, values: &[&str]) {
    let mut host = Vec::new();
    for value in values {
        host.extend_from_slice(&smry::summary::pad8(value));
    }
    write_array(out, keyword, ElementType::Char, &host);
}

fn write_ints(out: &mut Vec<u8>, keyword: &str, values: &[i32]) {
    let host: Vec<u8> = values.iter().flat_map(|v| v.to_ne_bytes()).collect();
    write_array(out, keyword, ElementType::Inte, &host);
}

fn write_floats(out: &mut Vec<u8>, keyword: &str, values: &[f32]) {
    let host: Vec<u8> = values.iter().flat_map(|v| v.to_ne_bytes()).collect();
    write_array(out, keyword, ElementType::Real, &host);
}

/// A five-column specification: TIME, two wells of WOPR, a voided WWCT,
/// and FOPR.
fn smspec_bytes() -> Vec<u8> {
    let mut out = Vec::new();
    write_ints(&mut out, "INTEHEAD", &[2, 100]);
    write_ints(&mut out, "DIMENS", &[5, 10, 10, 3, 0, -1]);
    write_strings(
        &mut out,
        "KEYWORDS",
        &["TIME", "WOPR", "WOPR", "WWCT", "FOPR"],
    );
    write_strings(&mut out, "WGNAMES", &[":+:+:+:+", "W1", "W2", ":+:+:+:+", ":+:+:+:+"]);
    write_ints(&mut out, "NUMS", &[-1, -1, -1, -1, -1]);
    write_strings(
        &mut out,
        "UNITS",
        &["DAYS", "SM3/DAY", "SM3/DAY", "", "SM3/DAY"],
    );
    out
}

/// Two report steps: two ministeps in the first, one in the second.
fn unsmry_bytes() -> Vec<u8> {
    let mut out = Vec::new();
    write_ints(&mut out, "SEQHDR", &[-982574]);
    write_ints(&mut out, "MINISTEP", &[0]);
    write_floats(&mut out, "PARAMS", &[0.0, 10.0, 20.0, 99.0, 30.0]);
    write_ints(&mut out, "MINISTEP", &[1]);
    write_floats(&mut out, "PARAMS", &[1.0, 11.0, 21.0, 99.0, 31.0]);
    write_ints(&mut out, "SEQHDR", &[-982574]);
    write_ints(&mut out, "MINISTEP", &[0]);
    write_floats(&mut out, "PARAMS", &[2.0, 12.0, 22.0, 99.0, 32.0]);
    out
}

fn on_disk(bytes: &[u8]) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(bytes).unwrap();
    file
}

fn string_array(arrays: &[(String, Values)], name: &str) -> Vec<String> {
    arrays
        .iter()
        .find(|(kw, _)| kw.trim_end() == name)
        .map(|(_, values)| match values {
            Values::Str(s) => s.clone(),
            other => panic!("{} is not a string array: {:?}", name, other),
        })
        .unwrap()
}

fn int_array(arrays: &[(String, Values)], name: &str) -> Vec<i32> {
    arrays
        .iter()
        .find(|(kw, _)| kw.trim_end() == name)
        .map(|(_, values)| match values {
            Values::Inte(n) => n.clone(),
            other => panic!("{} is not an integer array: {:?}", name, other),
        })
        .unwrap()
}

#[test]
fn full_pipeline() {
    let smspec = on_disk(&smspec_bytes());
    let unsmry = on_disk(&unsmry_bytes());

    let mut spec = ArrayStream::from_path(smspec.path()).unwrap();
    let arrays = spec.read_all().unwrap();

    let (unit, simulator) = decode_intehead(&int_array(&arrays, "INTEHEAD"));
    assert_eq!(unit, Some(UnitSystem::Field));
    assert_eq!(simulator, Some(Simulator::Eclipse100));

    let keywords = string_array(&arrays, "KEYWORDS");
    let wgnames = string_array(&arrays, "WGNAMES");
    let nums = int_array(&arrays, "NUMS");

    let plan = resolve_columns(
        &ColumnInput {
            keywords: &keywords,
            wgnames: &wgnames,
            nums: &nums,
            ..Default::default()
        },
        ":",
    )
    .unwrap();

    assert_eq!(plan.names(), ["TIME", "WOPR:W1", "WOPR:W2", "FOPR"]);
    assert_eq!(plan.positions(), [0, 1, 2, 4]);

    let mut data = ArrayStream::from_path(unsmry.path()).unwrap();
    let rows = read_rows(&mut data, plan.positions()).unwrap();

    assert_eq!(rows.len(), 3);
    let expected = [
        (1, 0, vec![0.0, 10.0, 20.0, 30.0]),
        (1, 1, vec![1.0, 11.0, 21.0, 31.0]),
        (2, 0, vec![2.0, 12.0, 22.0, 32.0]),
    ];
    for (row, (report, mini, values)) in rows.iter().zip(expected) {
        assert_eq!(row.report_step(), report);
        assert_eq!(row.ministep(), mini);
        assert_eq!(row.values(), values);
    }
}

#[test]
fn full_pipeline_gzipped() {
    use flate2::write::GzEncoder;
    use flate2::Compression;

    let gzip = |bytes: &[u8]| {
        let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(bytes).unwrap();
        encoder.finish().unwrap()
    };

    let smspec = on_disk(&gzip(&smspec_bytes()));
    let unsmry = on_disk(&gzip(&unsmry_bytes()));

    let mut spec = ArrayStream::from_path(smspec.path()).unwrap();
    let arrays = spec.read_all().unwrap();
    let keywords = string_array(&arrays, "KEYWORDS");
    let wgnames = string_array(&arrays, "WGNAMES");
    let nums = int_array(&arrays, "NUMS");

    let plan = resolve_columns(
        &ColumnInput {
            keywords: &keywords,
            wgnames: &wgnames,
            nums: &nums,
            ..Default::default()
        },
        ":",
    )
    .unwrap();

    let mut data = ArrayStream::from_path(unsmry.path()).unwrap();
    let rows = read_rows(&mut data, plan.positions()).unwrap();

    assert_eq!(plan.names(), ["TIME", "WOPR:W1", "WOPR:W2", "FOPR"]);
    assert_eq!(rows.len(), 3);
    assert_eq!(rows.get(2).unwrap().values(), [2.0, 12.0, 22.0, 32.0]);
}

#[test]
fn single_step_file() {
    // one report-step group, the .Snnnn layout
    let mut bytes = Vec::new();
    write_ints(&mut bytes, "SEQHDR", &[0]);
    write_ints(&mut bytes, "MINISTEP", &[0]);
    write_floats(&mut bytes, "PARAMS", &[3.5, 4.5]);
    let file = on_disk(&bytes);

    let mut stream = ArrayStream::from_path(file.path()).unwrap();
    let rows = read_rows(&mut stream, &[0, 1]).unwrap();

    assert_eq!(rows.len(), 1);
    let row = rows.get(0).unwrap();
    assert_eq!(row.report_step(), 1);
    assert_eq!(row.ministep(), 0);
    assert_eq!(row.values(), [3.5, 4.5]);
}

#[test]
fn large_blocked_specification() {
    // more columns than one 105-element string block
    let n = 250usize;
    let keywords: Vec<String> = (0..n).map(|_| "WOPR".to_string()).collect();
    let wgnames: Vec<String> = (0..n).map(|i| format!("W{}", i)).collect();
    let nums: Vec<i32> = vec![-1; n];

    let mut bytes = Vec::new();
    write_strings(
        &mut bytes,
        "KEYWORDS",
        &keywords.iter().map(String::as_str).collect::<Vec<_>>(),
    );
    write_strings(
        &mut bytes,
        "WGNAMES",
        &wgnames.iter().map(String::as_str).collect::<Vec<_>>(),
    );
    write_ints(&mut bytes, "NUMS", &nums);
    let file = on_disk(&bytes);

    let mut stream = ArrayStream::from_path(file.path()).unwrap();
    let arrays = stream.read_all().unwrap();

    let read_keywords = string_array(&arrays, "KEYWORDS");
    let read_wgnames = string_array(&arrays, "WGNAMES");
    assert_eq!(read_keywords.len(), n);

    let plan = resolve_columns(
        &ColumnInput {
            keywords: &read_keywords,
            wgnames: &read_wgnames,
            nums: &int_array(&arrays, "NUMS"),
            ..Default::default()
        },
        ":",
    )
    .unwrap();

    // every well is distinct, nothing dropped
    assert_eq!(plan.len(), n);
    assert_eq!(plan.names()[249], "WOPR:W249");
}
