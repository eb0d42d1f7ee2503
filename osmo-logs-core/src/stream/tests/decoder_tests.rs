use crate::stream::LineDecoder;

#[test]
fn partial_line_is_carried_to_next_chunk() {
    let mut decoder = LineDecoder::new();

    let first = decoder.push(b"2024/01/01 10:00:00 [t] hi\n2024/01/");
    let second = decoder.push(b"01/01 10:00:01 [t] there\n");

    assert_eq!(first, vec!["2024/01/01 10:00:00 [t] hi"]);
    assert_eq!(second, vec!["2024/01/01 10:00:01 [t] there"]);
    assert_eq!(decoder.pending_len(), 0);
    assert_eq!(decoder.finish(), None);
}

#[test]
fn chunk_without_newline_is_buffered() {
    let mut decoder = LineDecoder::new();

    assert!(decoder.push(b"abc").is_empty());
    assert!(decoder.push(b"def").is_empty());
    assert_eq!(decoder.pending_len(), 6);
    assert_eq!(decoder.finish().as_deref(), Some("abcdef"));
}

#[test]
fn multibyte_character_split_across_chunks() {
    let mut decoder = LineDecoder::new();

    assert!(decoder.push(b"caf\xc3").is_empty());
    let lines = decoder.push(b"\xa9\n");

    assert_eq!(lines, vec!["café"]);
}

#[test]
fn crlf_and_empty_lines() {
    let mut decoder = LineDecoder::new();

    let lines = decoder.push(b"one\r\n\r\ntwo\n");

    assert_eq!(lines, vec!["one", "", "two"]);
}

#[test]
fn invalid_utf8_is_replaced() {
    let mut decoder = LineDecoder::new();

    let lines = decoder.push(b"bad \xff byte\n");

    assert_eq!(lines, vec!["bad \u{fffd} byte"]);
}
