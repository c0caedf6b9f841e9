//! Reading label and cluster id columns.

use std::io::{self, BufRead, Cursor, Read};

use clustalign_providers_text::{IdColumn, TextProvider, TextProviderError};
use rstest::rstest;

#[rstest]
#[case("billing\nrefund\n", &["billing", "refund"])]
#[case("billing\r\nrefund\r\n", &["billing", "refund"])]
#[case("  billing \t\nrefund", &["billing", "refund"])]
#[case("lonely", &["lonely"])]
fn try_from_reader_trims_line_endings(#[case] input: &str, #[case] expected: &[&str]) {
    let provider =
        TextProvider::try_from_reader("labels", Cursor::new(input)).expect("input is valid");
    assert_eq!(provider.name(), "labels");
    assert_eq!(provider.len(), expected.len());
    assert!(!provider.is_empty());
    assert_eq!(provider.lines(), expected);
}

#[rstest]
fn empty_input_is_rejected() {
    let err = TextProvider::try_from_reader("labels", Cursor::new(""))
        .expect_err("empty input must fail");
    assert!(matches!(err, TextProviderError::EmptyInput));
}

#[rstest]
#[case("a\n\nb\n", 2)]
#[case("   \na\n", 1)]
#[case("a\nb\n\t\n", 3)]
fn blank_lines_report_their_number(#[case] input: &str, #[case] line: usize) {
    let err = TextProvider::try_from_reader("labels", Cursor::new(input))
        .expect_err("blank lines must fail");
    assert!(
        matches!(err, TextProviderError::BlankLine { line: found } if found == line),
        "{err:?}"
    );
    assert_eq!(err.to_string(), format!("line {line} is blank"));
}

#[rstest]
fn new_rejects_empty_and_blank_lines() {
    assert!(matches!(
        TextProvider::new("ids", Vec::new()),
        Err(TextProviderError::EmptyInput)
    ));
    assert!(matches!(
        TextProvider::new("ids", vec!["1".to_owned(), String::new()]),
        Err(TextProviderError::BlankLine { line: 2 })
    ));
}

#[rstest]
#[case("2\n10\n-1\n", IdColumn::Integers(vec![2, 10, -1]))]
#[case("2\nten\n", IdColumn::Strings(vec!["2".to_owned(), "ten".to_owned()]))]
#[case("1.5\n2\n", IdColumn::Strings(vec!["1.5".to_owned(), "2".to_owned()]))]
fn into_ids_prefers_integers_when_every_line_parses(
    #[case] input: &str,
    #[case] expected: IdColumn,
) {
    let provider =
        TextProvider::try_from_reader("clusters", Cursor::new(input)).expect("input is valid");
    let ids = provider.into_ids();
    assert_eq!(ids.len(), expected.len());
    assert_eq!(ids, expected);
}

#[rstest]
fn into_lines_returns_the_trimmed_lines() {
    let provider =
        TextProvider::try_from_reader("labels", Cursor::new("x \ny\n")).expect("input is valid");
    assert_eq!(provider.into_lines(), vec!["x".to_owned(), "y".to_owned()]);
}

struct FailingReader;

impl Read for FailingReader {
    fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
        Err(io::Error::other("disk vanished"))
    }
}

impl BufRead for FailingReader {
    fn fill_buf(&mut self) -> io::Result<&[u8]> {
        Err(io::Error::other("disk vanished"))
    }

    fn consume(&mut self, _amt: usize) {}
}

#[rstest]
fn read_failures_surface_as_io_errors() {
    let err = TextProvider::try_from_reader("labels", FailingReader).expect_err("reader fails");
    assert!(matches!(err, TextProviderError::Io(_)));
    assert!(err.to_string().contains("disk vanished"));
}

#[rstest]
fn missing_files_surface_as_io_errors() {
    let err = TextProvider::try_from_path("labels", "/definitely/not/here/labels.txt")
        .expect_err("file is missing");
    assert!(matches!(err, TextProviderError::Io(_)));
}

#[rstest]
fn invalid_utf8_is_an_io_error() {
    let result = TextProvider::try_from_reader("labels", Cursor::new(vec![0xff, b'\n']));
    assert!(matches!(result, Err(TextProviderError::Io(_))));
}
