// src/export.rs

use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};

use crate::model::FlatRow;

/// Byte-order mark so spreadsheet tools pick UTF-8 for the CJK columns.
const UTF8_BOM: &[u8] = b"\xef\xbb\xbf";

/// Write the dataset as a BOM-prefixed UTF-8 CSV, header row first, one
/// record per row. Creates the parent directory if needed.
pub fn write_csv(path: impl AsRef<Path>, rows: &[FlatRow]) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).with_context(|| format!("creating {:?}", parent))?;
    }

    let mut file = File::create(path).with_context(|| format!("creating {:?}", path))?;
    file.write_all(UTF8_BOM)
        .with_context(|| format!("writing BOM to {:?}", path))?;

    let mut writer = csv::Writer::from_writer(file);
    for row in rows {
        writer
            .serialize(row)
            .with_context(|| format!("writing row to {:?}", path))?;
    }
    writer
        .flush()
        .with_context(|| format!("flushing {:?}", path))?;
    Ok(())
}

/// Read a dataset back for the analysis stage. The csv reader strips the BOM
/// itself; empty numeric cells come back as `None`.
pub fn read_csv(path: impl AsRef<Path>) -> Result<Vec<FlatRow>> {
    let path = path.as_ref();
    let mut reader =
        csv::Reader::from_path(path).with_context(|| format!("opening {:?}", path))?;
    let mut rows = Vec::new();
    for record in reader.deserialize() {
        let row: FlatRow = record.with_context(|| format!("reading row from {:?}", path))?;
        rows.push(row);
    }
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn sample_rows() -> Vec<FlatRow> {
        vec![
            FlatRow {
                rank: "1".into(),
                name: "钟睒睒".into(),
                wealth: Some(4500.0),
                wealth_change: "-24%".into(),
                company: "农夫山泉".into(),
                industry: "食品饮料".into(),
                headquarters: "杭州".into(),
                gender: "先生".into(),
                age: Some(69.0),
                birthplace: "中国-浙江-杭州".into(),
                education: "本科".into(),
                school: "电大".into(),
                birthday: "1954-12-01".into(),
            },
            FlatRow {
                rank: "2".into(),
                name: "张一鸣".into(),
                wealth: None,
                age: None,
                ..FlatRow::default()
            },
        ]
    }

    #[test]
    fn file_starts_with_bom_and_header() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join("out.csv");
        write_csv(&path, &sample_rows()).unwrap();

        let bytes = fs::read(&path).unwrap();
        assert_eq!(&bytes[..3], UTF8_BOM);
        let text = String::from_utf8(bytes[3..].to_vec()).unwrap();
        let header = text.lines().next().unwrap();
        assert_eq!(
            header,
            "rank,name,wealth,wealth_change,company,industry,headquarters,\
             gender,age,birthplace,education,school,birthday"
        );
    }

    #[test]
    fn round_trip_preserves_null_and_empty_asymmetry() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join("out.csv");
        let rows = sample_rows();
        write_csv(&path, &rows).unwrap();

        let back = read_csv(&path).unwrap();
        assert_eq!(back, rows);
        assert_eq!(back[1].wealth, None);
        assert_eq!(back[1].age, None);
        assert_eq!(back[1].gender, "");
    }

    #[test]
    fn write_creates_missing_parent_dir() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join("doc").join("out.csv");
        write_csv(&path, &sample_rows()).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn read_missing_file_errors() {
        let tmp = tempdir().unwrap();
        assert!(read_csv(tmp.path().join("absent.csv")).is_err());
    }
}
