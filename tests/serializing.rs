//! Serializer output formatting and the configuration surface.

use rstest::rstest;
use yamlet::{parse, serialize, serialize_file, serialize_to_writer, ErrorKind, Node, SerializeConfig};

fn sample_tree() -> Node {
    let mut root = Node::None;
    root.entry("a").set("1");
    let b = root.entry("b");
    b.push_back().set("x");
    b.push_back().set("y");
    root
}

#[test]
fn test_default_formatting() {
    let out = serialize(&sample_tree(), &SerializeConfig::default()).unwrap();
    assert_eq!(out, "a: 1\nb:\n  - x\n  - y\n");
}

#[test]
fn test_sequence_root() {
    let mut root = Node::None;
    for text in ["1", "2", "3"] {
        root.push_back().set(text);
    }
    let out = serialize(&root, &SerializeConfig::default()).unwrap();
    assert_eq!(out, "- 1\n- 2\n- 3\n");
}

#[test]
fn test_indent_width_applies_to_map_children() {
    let config = SerializeConfig {
        indent_width: 4,
        ..SerializeConfig::default()
    };
    let out = serialize(&sample_tree(), &config).unwrap();
    assert_eq!(out, "a: 1\nb:\n    - x\n    - y\n");
}

#[test]
fn test_map_keys_are_emitted_in_sorted_order() {
    let mut root = Node::None;
    root.entry("zeta").set("1");
    root.entry("alpha").set("2");
    let out = serialize(&root, &SerializeConfig::default()).unwrap();
    assert_eq!(out, "alpha: 2\nzeta: 1\n");
}

#[test]
fn test_none_children_are_never_emitted() {
    let mut root = Node::None;
    root.entry("kept").set("1");
    root.entry("skipped");
    let out = serialize(&root, &SerializeConfig::default()).unwrap();
    assert_eq!(out, "kept: 1\n");

    let mut list = Node::None;
    list.push_back().set("1");
    list.push_back();
    list.push_back().set("2");
    let out = serialize(&list, &SerializeConfig::default()).unwrap();
    assert_eq!(out, "- 1\n- 2\n");
}

#[test]
fn test_map_under_sequence_inline_and_newline() {
    let mut root = Node::None;
    let entry = root.push_back();
    entry.entry("k1").set("v1");
    entry.entry("k2").set("v2");

    let out = serialize(&root, &SerializeConfig::default()).unwrap();
    assert_eq!(out, "- k1: v1\n  k2: v2\n");

    let config = SerializeConfig {
        sequence_map_new_line: true,
        ..SerializeConfig::default()
    };
    let out = serialize(&root, &config).unwrap();
    assert_eq!(out, "-\n  k1: v1\n  k2: v2\n");
}

#[test]
fn test_nested_sequences_start_on_a_new_line() {
    let mut root = Node::None;
    let inner = root.push_back();
    inner.push_back().set("deep");
    let out = serialize(&root, &SerializeConfig::default()).unwrap();
    assert_eq!(out, "-\n  - deep\n");
}

#[test]
fn test_map_scalar_new_line() {
    let mut root = Node::None;
    root.entry("a").set("1");
    let config = SerializeConfig {
        map_scalar_new_line: true,
        ..SerializeConfig::default()
    };
    let out = serialize(&root, &config).unwrap();
    assert_eq!(out, "a:\n  1\n");
}

#[test]
fn test_multiline_scalars_use_literal_blocks() {
    let mut root = Node::None;
    root.entry("kept").set("line1\nline2\n");
    root.entry("stripped").set("line1\nline2");
    let out = serialize(&root, &SerializeConfig::default()).unwrap();
    assert_eq!(
        out,
        "kept: |\n  line1\n  line2\nstripped: |-\n  line1\n  line2\n"
    );
}

#[test]
fn test_long_scalars_fold() {
    let mut root = Node::None;
    root.entry("a").set("aaaa bbbb cccc dddd");
    let config = SerializeConfig {
        max_scalar_line_length: 10,
        ..SerializeConfig::default()
    };
    let out = serialize(&root, &config).unwrap();
    assert_eq!(out, "a: >-\n  aaaa bbbb cccc\n  dddd\n");

    // Folding disabled: the line stays inline no matter how long.
    let config = SerializeConfig {
        max_scalar_line_length: 0,
        ..SerializeConfig::default()
    };
    let out = serialize(&root, &config).unwrap();
    assert_eq!(out, "a: aaaa bbbb cccc dddd\n");
}

#[test]
fn test_reserved_keys_are_quoted() {
    let mut root = Node::None;
    root.entry("a:b").set("1");
    root.entry("c-d").set("2");
    let out = serialize(&root, &SerializeConfig::default()).unwrap();
    assert_eq!(out, "\"a:b\": 1\n\"c-d\": 2\n");
}

#[rstest]
#[case(0)]
#[case(1)]
fn test_indent_width_below_minimum_fails(#[case] indent_width: usize) {
    let config = SerializeConfig {
        indent_width,
        ..SerializeConfig::default()
    };
    let error = serialize(&sample_tree(), &config).unwrap_err();
    assert_eq!(error.kind(), ErrorKind::Operation);
}

#[test]
fn test_serialize_to_writer() {
    let mut buffer = Vec::new();
    serialize_to_writer(&sample_tree(), &mut buffer, &SerializeConfig::default()).unwrap();
    assert_eq!(buffer, b"a: 1\nb:\n  - x\n  - y\n");
}

#[test]
fn test_serialize_file_and_parse_file_agree() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out.yaml");
    serialize_file(&sample_tree(), &path, &SerializeConfig::default()).unwrap();
    let reread = yamlet::parse_file(&path).unwrap();
    assert_eq!(reread, sample_tree());
}

#[test]
fn test_serialize_file_bad_destination_is_an_operation_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing").join("out.yaml");
    let error = serialize_file(&sample_tree(), &path, &SerializeConfig::default()).unwrap_err();
    assert_eq!(error.kind(), ErrorKind::Operation);
}

#[test]
fn test_parsed_block_scalars_serialize_back_to_blocks() {
    let source = "text: |\n  line1\n  line2\n";
    let root = parse(source).unwrap();
    let out = serialize(&root, &SerializeConfig::default()).unwrap();
    assert_eq!(out, source);
}
