//! Review spreadsheet writer

use review_common::db::Review;
use review_common::time::format_display;
use rust_xlsxwriter::{Format, Workbook, XlsxError};
use std::path::Path;

/// Header row: storage keys for the ids, display labels for the content fields
pub const HEADERS: [&str; 7] = ["id", "column_id", "姓名", "稿件", "播音", "垫乐", "提交时间"];

const SHEET_NAME: &str = "Reviews";

/// Build the workbook for `reviews` and write it to `path`, replacing any file there
pub fn write_reviews(reviews: &[Review], path: &Path) -> Result<(), XlsxError> {
    let mut workbook = Workbook::new();
    let header_format = Format::new().set_bold();

    let worksheet = workbook.add_worksheet();
    worksheet.set_name(SHEET_NAME)?;

    for (col, header) in HEADERS.iter().enumerate() {
        worksheet.write_string_with_format(0, col as u16, *header, &header_format)?;
    }

    for (index, review) in reviews.iter().enumerate() {
        let row = index as u32 + 1;
        worksheet.write_number(row, 0, review.id as f64)?;
        worksheet.write_number(row, 1, review.column_id as f64)?;
        worksheet.write_string(row, 2, review.name.as_str())?;
        worksheet.write_string(row, 3, review.script.as_str())?;
        worksheet.write_string(row, 4, review.broadcast.as_str())?;
        worksheet.write_string(row, 5, review.padding.as_str())?;
        worksheet.write_string(row, 6, format_display(&review.submit_time))?;
    }

    worksheet.set_column_width(6, 20)?;

    workbook.save(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use calamine::{open_workbook, Data, Reader, Xlsx};
    use chrono::{TimeZone, Utc};

    fn read_rows(path: &Path) -> Vec<Vec<Data>> {
        let mut workbook: Xlsx<_> = open_workbook(path).unwrap();
        let range = workbook.worksheet_range(SHEET_NAME).unwrap();
        range.rows().map(|row| row.to_vec()).collect()
    }

    fn text(s: &str) -> Data {
        Data::String(s.to_string())
    }

    fn sample_review(id: i64) -> Review {
        Review {
            id,
            column_id: 3,
            name: "张三".to_string(),
            script: "晨间新闻".to_string(),
            broadcast: "李四".to_string(),
            padding: "轻音乐".to_string(),
            submit_time: Utc.with_ymd_and_hms(2024, 5, 1, 8, 30, 0).unwrap(),
        }
    }

    #[test]
    fn test_write_creates_xlsx_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("reviews.xlsx");

        write_reviews(&[sample_review(1), sample_review(2)], &path).unwrap();

        let rows = read_rows(&path);
        assert_eq!(rows.len(), 3);
        assert_eq!(
            rows[0],
            HEADERS.iter().map(|h| text(h)).collect::<Vec<_>>()
        );
        assert_eq!(
            rows[1],
            vec![
                Data::Float(1.0),
                Data::Float(3.0),
                text("张三"),
                text("晨间新闻"),
                text("李四"),
                text("轻音乐"),
                text("2024-05-01 08:30:00"),
            ]
        );
        assert_eq!(rows[2][0], Data::Float(2.0));
    }

    #[test]
    fn test_header_labels() {
        assert_eq!(&HEADERS[2..], &["姓名", "稿件", "播音", "垫乐", "提交时间"]);
    }

    #[test]
    fn test_write_overwrites_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("reviews.xlsx");
        std::fs::write(&path, b"stale contents").unwrap();

        write_reviews(&[], &path).unwrap();

        // Header row only
        let rows = read_rows(&path);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0][2], text("姓名"));
    }

    #[test]
    fn test_write_into_missing_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent").join("reviews.xlsx");
        assert!(write_reviews(&[sample_review(1)], &path).is_err());
    }
}
