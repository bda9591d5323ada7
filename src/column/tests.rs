use super::*;

fn col_from(rows: &[&str]) -> StringColumn {
    StringColumn::from_rows(rows).unwrap()
}

#[test]
fn test_empty_column() {
    let col = StringColumn::new();
    assert_eq!(col.row_count(), 0);
    assert!(col.is_empty());
    assert_eq!(col.total_bytes(), 0);
    assert_eq!(col.offsets(), &[0]);
}

#[test]
fn test_push_rows() {
    let mut col = StringColumn::new();
    col.push(b"abc").unwrap();
    col.push(b"").unwrap();
    col.push(b"de").unwrap();
    assert_eq!(col.row_count(), 3);
    assert_eq!(col.row(0), b"abc");
    assert_eq!(col.row(1), b"");
    assert_eq!(col.row(2), b"de");
    assert_eq!(col.total_bytes(), 5);
}

#[test]
fn test_offsets_monotone() {
    let col = col_from(&["user_id_1234_log", "abc", "x__y"]);
    let offsets = col.offsets();
    assert_eq!(offsets[0], 0);
    assert_eq!(offsets.len(), col.row_count() + 1);
    for w in offsets.windows(2) {
        assert!(w[0] <= w[1]);
    }
    assert_eq!(*offsets.last().unwrap() as usize, col.total_bytes());
}

#[test]
fn test_row_views_match_input() {
    let rows = ["alpha", "", "beta_gamma", "_"];
    let col = col_from(&rows);
    for (i, r) in rows.iter().enumerate() {
        assert_eq!(col.row(i), r.as_bytes());
    }
    let collected: Vec<&[u8]> = col.iter().collect();
    assert_eq!(collected.len(), rows.len());
}

#[test]
fn test_from_delimited_basic() {
    let col = StringColumn::from_delimited(b"a\nbb\nccc\n", b'\n').unwrap();
    assert_eq!(col.row_count(), 3);
    assert_eq!(col.row(0), b"a");
    assert_eq!(col.row(1), b"bb");
    assert_eq!(col.row(2), b"ccc");
}

#[test]
fn test_from_delimited_no_trailing_delim() {
    let col = StringColumn::from_delimited(b"a\nbb", b'\n').unwrap();
    assert_eq!(col.row_count(), 2);
    assert_eq!(col.row(1), b"bb");
}

#[test]
fn test_from_delimited_empty_rows_preserved() {
    let col = StringColumn::from_delimited(b"a\n\nb\n", b'\n').unwrap();
    assert_eq!(col.row_count(), 3);
    assert_eq!(col.row(1), b"");
}

#[test]
fn test_from_delimited_empty_input() {
    let col = StringColumn::from_delimited(b"", b'\n').unwrap();
    assert_eq!(col.row_count(), 0);
}

#[test]
fn test_from_delimited_via_read_file() {
    use std::io::Write;

    let mut f = tempfile::NamedTempFile::new().unwrap();
    f.write_all(b"user_id_1234_log\nuser_id_5678_log\n").unwrap();
    let data = crate::common::io::read_file(f.path()).unwrap();
    let col = StringColumn::from_delimited(&data, b'\n').unwrap();
    assert_eq!(col.row_count(), 2);
    assert_eq!(col.row(1), b"user_id_5678_log");
}

#[test]
fn test_extend_delimited_appends() {
    let mut col = StringColumn::from_delimited(b"a\nb\n", b'\n').unwrap();
    col.extend_delimited(b"c\nd", b'\n').unwrap();
    assert_eq!(col.row_count(), 4);
    assert_eq!(col.row(3), b"d");
}

#[test]
fn test_from_delimited_nul_terminated() {
    let col = StringColumn::from_delimited(b"a,b\0c,d\0", b'\0').unwrap();
    assert_eq!(col.row_count(), 2);
    assert_eq!(col.row(0), b"a,b");
    assert_eq!(col.row(1), b"c,d");
}
