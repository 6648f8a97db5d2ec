//! Property-based tests for the record codec and the summary indexer.
//!
//! Uses proptest for randomized testing: round trips at every layer of
//! the codec, the classifier's first-character laws, and resolver
//! invariants.

use proptest::prelude::*;
use smry::codec::{to_disk, to_native, ElementType};
use smry::io::{ArrayStream, RecordReader, Values};
use smry::summary::classify::{identifies, partial_identifiers, NUMS, WGNAMES};
use smry::summary::{pad8, resolve_columns, ColumnInput};

fn arb_element_type() -> impl Strategy<Value = ElementType> {
    prop_oneof![
        Just(ElementType::Inte),
        Just(ElementType::Real),
        Just(ElementType::Doub),
        Just(ElementType::Char),
        Just(ElementType::Mess),
        Just(ElementType::Logi),
        Just(ElementType::X231),
        (1u8..=99).prop_map(ElementType::C0nn),
    ]
}

/// Types that carry payload bytes
fn arb_sized_type() -> impl Strategy<Value = ElementType> {
    prop_oneof![
        Just(ElementType::Inte),
        Just(ElementType::Real),
        Just(ElementType::Doub),
        Just(ElementType::Char),
        Just(ElementType::Logi),
        (1u8..=99).prop_map(ElementType::C0nn),
    ]
}

mod codec_properties {
    use super::*;

    proptest! {
        #[test]
        fn typeid_round_trip(dtype in arb_element_type()) {
            let tag = dtype.tag();
            prop_assert_eq!(ElementType::from_tag(&tag).unwrap(), dtype);
        }

        #[test]
        fn native_disk_round_trip(
            dtype in arb_sized_type(),
            elems in 0usize..64,
            seed in prop::collection::vec(any::<u8>(), 0..8192),
        ) {
            let nbytes = elems * dtype.element_size();
            prop_assume!(seed.len() >= nbytes);
            let host = &seed[..nbytes];

            let mut disk = vec![0u8; nbytes];
            to_disk(&mut disk, host, dtype, elems).unwrap();
            let mut back = vec![0u8; nbytes];
            to_native(&mut back, &disk, dtype, elems).unwrap();

            prop_assert_eq!(host, &back[..]);
        }

        #[test]
        fn record_framing_round_trip(payload in prop::collection::vec(any::<u8>(), 0..4096)) {
            let len = (payload.len() as i32).to_be_bytes();
            let mut data = Vec::new();
            data.extend_from_slice(&len);
            data.extend_from_slice(&payload);
            data.extend_from_slice(&len);

            let mut reader = RecordReader::new(&data[..]);
            let mut buf = Vec::new();
            prop_assert_eq!(reader.read_record(&mut buf).unwrap(), Some(payload.len()));
            prop_assert_eq!(&buf, &payload);
            prop_assert_eq!(reader.read_record(&mut buf).unwrap(), None);
        }

        #[test]
        fn stream_round_trip_any_blocking(
            values in prop::collection::vec(any::<i32>(), 0..3000),
            block in 1usize..1200,
        ) {
            // writer blocking is irrelevant to what the reader yields
            let mut header = Vec::new();
            header.extend_from_slice(b"NUMS    ");
            header.extend_from_slice(&(values.len() as i32).to_be_bytes());
            header.extend_from_slice(b"INTE");

            let mut data = Vec::new();
            let frame = |out: &mut Vec<u8>, payload: &[u8]| {
                let len = (payload.len() as i32).to_be_bytes();
                out.extend_from_slice(&len);
                out.extend_from_slice(payload);
                out.extend_from_slice(&len);
            };
            frame(&mut data, &header);
            for chunk in values.chunks(block) {
                let disk: Vec<u8> = chunk.iter().flat_map(|v| v.to_be_bytes()).collect();
                frame(&mut data, &disk);
            }

            let mut stream = ArrayStream::new(&data[..]);
            let array = stream.next().unwrap();
            prop_assert_eq!(array.count() as usize, values.len());
            prop_assert_eq!(array.values(), Values::Inte(values));
            prop_assert!(stream.next().unwrap().is_end());
        }
    }
}

mod classifier_properties {
    use super::*;

    fn arb_suffix() -> impl Strategy<Value = String> {
        "[A-Z0-9]{0,6}"
    }

    proptest! {
        #[test]
        fn aquifer_block_region_keywords_need_nums_only(
            first in prop::sample::select(vec!['A', 'B', 'R']),
            suffix in arb_suffix(),
        ) {
            let keyword = pad8(&format!("{}{}", first, suffix));
            for id in partial_identifiers() {
                let expected = if id == NUMS { 1 } else { 0 };
                prop_assert_eq!(identifies(id, &keyword), expected);
            }
        }

        #[test]
        fn group_and_pressure_keywords_need_wgnames_only(
            first in prop::sample::select(vec!['G', 'P']),
            suffix in arb_suffix(),
        ) {
            let keyword = pad8(&format!("{}{}", first, suffix));
            prop_assume!(!(first == 'G' && keyword[1] == b'M'));

            for id in partial_identifiers() {
                let expected = if id == WGNAMES { 1 } else { 0 };
                prop_assert_eq!(identifies(id, &keyword), expected);
            }
        }

        #[test]
        fn mnemonic_families_are_never_qualified(
            first in prop::sample::select(vec!['G', 'W']),
            suffix in arb_suffix(),
        ) {
            let keyword = pad8(&format!("{}M{}", first, suffix));
            for id in partial_identifiers() {
                prop_assert_eq!(identifies(id, &keyword), 0);
            }
        }

        #[test]
        fn return_value_is_the_total_identifier_count(keyword in "[A-Z][A-Z0-9]{0,7}") {
            // every positive return agrees with the number of
            // identifiers that report the keyword as qualified; the
            // local-grid completion family is the lone exception (five
            // arrays qualify it, the ruleset reports four)
            let keyword = pad8(&keyword);
            prop_assume!(!(keyword[0] == b'L' && keyword[1] == b'C'));
            let hits: Vec<u32> = partial_identifiers()
                .into_iter()
                .map(|id| identifies(id, &keyword))
                .filter(|&n| n > 0)
                .collect();

            for &n in &hits {
                prop_assert_eq!(n as usize, hits.len());
            }
        }
    }
}

mod resolver_properties {
    use super::*;

    fn arb_inputs() -> impl Strategy<Value = (Vec<String>, Vec<String>, Vec<i32>)> {
        (0usize..40).prop_flat_map(|n| {
            (
                prop::collection::vec(
                    prop::sample::select(vec![
                        "TIME", "FOPR", "WOPR", "WWCT", "GOPR", "COFR", "RPR", "BPR",
                    ])
                    .prop_map(String::from),
                    n..=n,
                ),
                prop::collection::vec(
                    prop::sample::select(vec!["W1", "W2", "G1", ":+:+:+:+", "        "])
                        .prop_map(String::from),
                    n..=n,
                ),
                prop::collection::vec(-2i32..100, n..=n),
            )
        })
    }

    proptest! {
        #[test]
        fn resolution_is_idempotent((keywords, wgnames, nums) in arb_inputs()) {
            let input = ColumnInput {
                keywords: &keywords,
                wgnames: &wgnames,
                nums: &nums,
                ..Default::default()
            };
            let first = resolve_columns(&input, ":").unwrap();
            let second = resolve_columns(&input, ":").unwrap();
            prop_assert_eq!(first, second);
        }

        #[test]
        fn emitted_names_are_unique((keywords, wgnames, nums) in arb_inputs()) {
            let input = ColumnInput {
                keywords: &keywords,
                wgnames: &wgnames,
                nums: &nums,
                ..Default::default()
            };
            let plan = resolve_columns(&input, ":").unwrap();

            let mut names = plan.names().to_vec();
            names.sort();
            names.dedup();
            prop_assert_eq!(names.len(), plan.len());
        }

        #[test]
        fn positions_point_into_the_input((keywords, wgnames, nums) in arb_inputs()) {
            let input = ColumnInput {
                keywords: &keywords,
                wgnames: &wgnames,
                nums: &nums,
                ..Default::default()
            };
            let plan = resolve_columns(&input, ":").unwrap();

            prop_assert_eq!(plan.names().len(), plan.positions().len());
            for window in plan.positions().windows(2) {
                prop_assert!(window[0] < window[1]);
            }
            for &position in plan.positions() {
                prop_assert!(position < keywords.len());
            }
        }
    }
}
