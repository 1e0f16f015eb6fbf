use super::*;

const WIN_FILE: &str = "08-14-16  09:59PM                43378 License.rtf";
const WIN_DIR: &str = "08-16-16  10:29PM       <DIR>          RegexTester";

fn extract(line: &str) -> Option<Entry> {
    let reference = NaiveDate::from_ymd_opt(2030, 1, 1).unwrap();
    WindowsExtractor.extract(line, reference)
}

#[test]
fn file_line_is_parsed() {
    let entry = extract(WIN_FILE).expect("file entry");
    assert_eq!(entry.name, "License.rtf");
    assert!(!entry.is_directory);
    assert_eq!(entry.permissions, PermissionFlags::NotDeterminable);
    assert_eq!(entry.permissions.as_str(), "notdeterm");
    assert_eq!(entry.owner, None);
    assert_eq!(entry.modified, Timestamp::new(2016, 8, 14, 21, 59));
}

#[test]
fn directory_line_is_parsed() {
    let entry = extract(WIN_DIR).expect("dir entry");
    assert_eq!(entry.name, "RegexTester");
    assert!(entry.is_directory);
    assert_eq!(entry.permissions, PermissionFlags::NotDeterminable);
    assert_eq!(entry.modified, Timestamp::new(2016, 8, 16, 22, 29));
}

#[test]
fn reference_date_is_ignored() {
    // Windows lines always carry their own year.
    let entry = extract(WIN_FILE).expect("entry");
    assert_eq!(entry.modified.year, 2016);
}

#[test]
fn names_with_spaces_are_kept_whole() {
    let entry = extract("01-05-20  08:00AM        1024 Setup Notes.txt").expect("entry");
    assert_eq!(entry.name, "Setup Notes.txt");
    assert_eq!(entry.modified, Timestamp::new(2020, 1, 5, 8, 0));

    let entry = extract("01-05-20  08:00AM       <DIR>          Program Files").expect("entry");
    assert!(entry.is_directory);
    assert_eq!(entry.name, "Program Files");
}

#[test]
fn trailing_carriage_return_is_trimmed() {
    let entry = extract("08-16-16  10:29PM       <DIR>          RegexTester\r").expect("entry");
    assert_eq!(entry.name, "RegexTester");
}

#[test]
fn size_without_name_yields_empty_name() {
    let entry = extract("08-14-16  09:59PM                43378").expect("entry");
    assert_eq!(entry.name, "");
}

#[test]
fn short_lines_do_not_panic() {
    assert!(extract("08-14-1").is_none());
    for line in ["08-14-16", "08-14-16 ", "08-14-16  09:5", "08-14-16  09:59PM", "08-14-16  é"] {
        let entry = extract(line).expect("entry for date-only line");
        assert_eq!(entry.name, "", "line {:?}", line);
    }
}

#[test]
fn dot_entries_are_extracted_verbatim() {
    // Filtering of navigation entries happens when the listing is assembled.
    let entry = extract("08-16-16  10:29PM       <DIR>          ..").expect("entry");
    assert_eq!(entry.name, "..");
    assert!(entry.is_synthetic());
}
