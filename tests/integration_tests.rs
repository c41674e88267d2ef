use requote::{preprocess, preprocess_with_details, Format};

/// Minimal RFC 4180 reader used to check that repaired CSV splits into the
/// expected cells. Test-local on purpose: the crate under test must not be
/// trusted to verify itself.
fn read_csv(text: &str) -> Vec<Vec<String>> {
    let mut rows = vec![vec![]];
    let mut cell = String::new();
    let mut chars = text.chars().peekable();
    let mut in_quotes = false;
    while let Some(ch) = chars.next() {
        if in_quotes {
            if ch == '"' {
                if chars.peek() == Some(&'"') {
                    chars.next();
                    cell.push('"');
                } else {
                    in_quotes = false;
                }
            } else {
                cell.push(ch);
            }
        } else {
            match ch {
                '"' if cell.is_empty() => in_quotes = true,
                ',' => {
                    rows.last_mut().unwrap().push(std::mem::take(&mut cell));
                }
                '\n' => {
                    rows.last_mut().unwrap().push(std::mem::take(&mut cell));
                    rows.push(vec![]);
                }
                '\r' => {}
                other => cell.push(other),
            }
        }
    }
    rows.last_mut().unwrap().push(cell);
    rows
}

#[test]
fn yaml_escapes_inner_double_quotes() {
    assert_eq!(
        preprocess(r#"description: "say "hello" world""#, Format::Yaml),
        r#"description: "say \"hello\" world""#
    );
}

#[test]
fn yaml_reprocessing_doubles_backslashes() {
    assert_eq!(
        preprocess(r#"description: "Say \"hello\" world""#, Format::Yaml),
        r#"description: "Say \\"hello\\" world""#
    );
}

#[test]
fn yaml_doubles_inner_single_quotes() {
    assert_eq!(
        preprocess("description: 'it's broken'", Format::Yaml),
        "description: 'it''s broken'"
    );
}

#[test]
fn json_escapes_inner_quotes_and_parses() {
    let fixed = preprocess(r#"{"description": "say "hello" world"}"#, Format::Json);
    assert_eq!(fixed, r#"{"description": "say \"hello\" world"}"#);

    let value: serde_json::Value = serde_json::from_str(&fixed).unwrap();
    assert_eq!(value["description"], "say \"hello\" world");
}

#[test]
fn csv_doubles_quotes_in_quoted_cell() {
    assert_eq!(
        preprocess("Project,Summary\nENG,\"Say \"hello\" world\"", Format::Csv),
        "Project,Summary\nENG,\"Say \"\"hello\"\" world\""
    );
}

#[test]
fn csv_rewraps_unquoted_cell_containing_quotes() {
    assert_eq!(
        preprocess("A,B\ntest \"value\",other", Format::Csv),
        "A,B\n\"test \"\"value\"\"\",other"
    );
}

#[test]
fn empty_and_whitespace_inputs_are_returned_as_is() {
    for format in [Format::Yaml, Format::Json, Format::Csv] {
        for input in ["", "  ", "\n", " \t \r\n "] {
            let result = preprocess_with_details(input, format);
            assert_eq!(result.output, input);
            assert!(!result.modified);
            assert!(result.changes.is_empty());
        }
    }
}

#[test]
fn valid_yaml_passes_through_untouched() {
    let input = "name: \"Alice\"\nrole: 'admin'\ncount: 3\nnotes: |\n  free text\nitems:\n  - \"one\"\n  - 'two'";
    let result = preprocess_with_details(input, Format::Yaml);
    assert_eq!(result.output, input);
    assert!(!result.modified);
}

#[test]
fn valid_json_passes_through_untouched() {
    let input = r#"{"id": 7, "name": "Alice", "tags": ["a", "b"], "ok": true, "gone": null}"#;
    let result = preprocess_with_details(input, Format::Json);
    assert_eq!(result.output, input);
    assert!(!result.modified);
}

#[test]
fn valid_csv_passes_through_untouched() {
    let input = "A,B,C\n1,\"x,y\",3\n4,\"pre \"\"escaped\"\"\",6";
    let result = preprocess_with_details(input, Format::Csv);
    assert_eq!(result.output, input);
    assert!(!result.modified);
}

#[test]
fn valid_csv_with_leading_quoted_cells_passes_through() {
    // A quoted cell ending one row followed by a row that opens with a
    // quoted cell.
    for input in ["A,B\nx,\"a\"\n\"b\",y", "A\n\"x\"\n\"y\""] {
        let result = preprocess_with_details(input, Format::Csv);
        assert_eq!(result.output, input);
        assert!(!result.modified);
        assert!(result.changes.is_empty());
    }
}

#[test]
fn yaml_multiline_value_closes_and_escapes() {
    let input = "summary: \"He said \"wait\" and\nthen left\"\nstatus: open";
    let fixed = preprocess(input, Format::Yaml);
    assert_eq!(
        fixed,
        "summary: \"He said \\\"wait\\\" and\nthen left\"\nstatus: open"
    );
}

#[test]
fn yaml_multiline_value_keeps_crlf_inside_buffered_content() {
    let input = "summary: \"He said \"wait\" and\r\nthen left\"\r\nstatus: open";
    let fixed = preprocess(input, Format::Yaml);
    assert_eq!(
        fixed,
        "summary: \"He said \\\"wait\\\" and\r\nthen left\"\r\nstatus: open"
    );
}

#[test]
fn yaml_unterminated_value_is_force_closed() {
    let input = "summary: \"left open\nand more words";
    let fixed = preprocess(input, Format::Yaml);
    assert_eq!(fixed, "summary: \"left open\nand more words\"");
}

#[test]
fn yaml_trailing_comment_after_close_survives() {
    let input = "name: \"has \"inner\" quotes\" # keep me";
    let fixed = preprocess(input, Format::Yaml);
    assert_eq!(fixed, "name: \"has \\\"inner\\\" quotes\" # keep me");
}

#[test]
fn json_nested_containers_repair_only_broken_values() {
    let input = r#"{"outer": {"list": ["say "hi"", 2], "plain": "ok"}}"#;
    let fixed = preprocess(input, Format::Json);
    assert_eq!(fixed, r#"{"outer": {"list": ["say \"hi\"", 2], "plain": "ok"}}"#);
    assert!(serde_json::from_str::<serde_json::Value>(&fixed).is_ok());
}

#[test]
fn json_value_resembling_structure_is_kept_whole() {
    let input = r#"{"expr": "take "arr[0]" first"}"#;
    let fixed = preprocess(input, Format::Json);
    assert_eq!(fixed, r#"{"expr": "take \"arr[0]\" first"}"#);
    assert!(serde_json::from_str::<serde_json::Value>(&fixed).is_ok());
}

#[test]
fn json_reprocessing_doubles_backslashes() {
    let once = preprocess(r#"{"d": "say "hi""}"#, Format::Json);
    assert_eq!(once, r#"{"d": "say \"hi\""}"#);
    let twice = preprocess(&once, Format::Json);
    assert_eq!(twice, r#"{"d": "say \\"hi\\""}"#);
}

#[test]
fn csv_repaired_output_matches_header_column_count() {
    let input = "Project,Summary,Owner\nENG,\"Say \"hello\" world\",me\nOPS,plain \"odd\" cell,you";
    let fixed = preprocess(input, Format::Csv);
    let rows = read_csv(&fixed);
    assert_eq!(rows.len(), 3);
    for row in &rows {
        assert_eq!(row.len(), 3);
    }
    assert_eq!(rows[1][1], "Say \"hello\" world");
    assert_eq!(rows[2][1], "plain \"odd\" cell");
}

#[test]
fn csv_multiline_cell_keeps_detected_line_endings() {
    let input = "A,B\r\n\"first\r\nsecond \"inner\" part\",x";
    let result = preprocess_with_details(input, Format::Csv);
    assert!(result.modified);
    assert_eq!(
        result.output,
        "A,B\r\n\"first\r\nsecond \"\"inner\"\" part\",x"
    );
}

#[test]
fn csv_ambiguous_adjacent_cells_close_at_first_boundary() {
    // `"a","b"` after the comma could be one mangled cell or two cells;
    // the text alone cannot say. The locator closes each span at its first
    // definite boundary and leaves the extra-cell question to the
    // downstream parser. Documented limitation, pinned here.
    let input = "name,note\nx,\"a\",\"b\"";
    let fixed = preprocess(input, Format::Csv);
    assert_eq!(fixed, input);
}

#[test]
fn csv_idempotent_on_repaired_output() {
    let input = "A,B\ntest \"value\",other\nENG,\"Say \"hello\" world\"";
    let once = preprocess(input, Format::Csv);
    let twice = preprocess(&once, Format::Csv);
    assert_eq!(once, twice);
}

#[test]
fn yaml_single_quote_idempotent_on_repaired_output() {
    let input = "a: 'it's broken'\nb: 'fine'";
    let once = preprocess(input, Format::Yaml);
    let twice = preprocess(&once, Format::Yaml);
    assert_eq!(once, "a: 'it''s broken'\nb: 'fine'");
    assert_eq!(once, twice);
}

#[test]
fn pathological_quote_runs_do_not_panic() {
    for format in [Format::Yaml, Format::Json, Format::Csv] {
        for input in [
            "\"\"\"\"\"\"\"\"\"",
            "a: \"\"\"\"\"\"",
            "{\"\":\"\"\"\"}",
            ",\"\",\"\"\"\n\"",
        ] {
            let _ = preprocess(input, format);
        }
    }
}

#[test]
fn cr_only_input_round_trips_style() {
    let input = "a: \"x \"y\" z\"\rb: 1";
    let result = preprocess_with_details(input, Format::Yaml);
    assert!(result.modified);
    assert_eq!(result.output, "a: \"x \\\"y\\\" z\"\rb: 1");
}
