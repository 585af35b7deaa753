// Discount Card - core/export.rs
//
// Excel, CSV and JSON export of the displayed provider rows.
// The writer-generic functions work on any Write trait object; the
// directory-level entry point picks a fresh file name and creates it.

use crate::core::model::ProviderRecord;
use crate::util::constants::{
    EXPORT_FILE_PREFIX, EXPORT_HEADERS, EXPORT_SHEET_NAME, EXPORT_SUFFIX_LEN,
    MAX_EXPORT_NAME_ATTEMPTS, UTF8_BOM,
};
use crate::util::error::ExportError;
use rust_xlsxwriter::{Format, Workbook};
use serde::Serialize;
use std::fmt;
use std::fs::{File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Output file format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ExportFormat {
    /// Excel workbook with a single sheet.
    #[default]
    Xlsx,
    /// Comma-separated values, opened directly by spreadsheet applications.
    Csv,
    /// Pretty-printed array of objects keyed by column header.
    Json,
}

impl ExportFormat {
    pub fn extension(self) -> &'static str {
        match self {
            Self::Xlsx => "xlsx",
            Self::Csv => "csv",
            Self::Json => "json",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Xlsx => "Excel",
            Self::Csv => "CSV",
            Self::Json => "JSON",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "xlsx" => Ok(Self::Xlsx),
            "csv" => Ok(Self::Csv),
            "json" => Ok(Self::Json),
            other => Err(format!(
                "unknown export format \"{other}\" (expected \"xlsx\", \"csv\" or \"json\")"
            )),
        }
    }
}

/// Result of a successful export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportOutcome {
    pub path: PathBuf,
    pub rows: usize,
}

/// JSON shape of one exported row. Field order is the column order.
#[derive(Serialize)]
struct ExportRow<'a> {
    #[serde(rename = "Provider Name")]
    provider_name: &'a str,
    #[serde(rename = "Address")]
    address: &'a str,
    #[serde(rename = "Phone")]
    phone: &'a str,
    #[serde(rename = "Hotline")]
    hotline: &'a str,
    #[serde(rename = "Agreed Prices")]
    agreed_prices: &'a str,
}

impl<'a> From<&'a ProviderRecord> for ExportRow<'a> {
    fn from(record: &'a ProviderRecord) -> Self {
        let [provider_name, address, phone, hotline, agreed_prices] = record.display_cells();
        Self {
            provider_name,
            address,
            phone,
            hotline,
            agreed_prices,
        }
    }
}

/// Export rows to an Excel workbook.
///
/// One sheet: a bold header row, then one row per record. Absent values are
/// left as blank cells.
pub fn export_xlsx<W: Write>(
    rows: &[ProviderRecord],
    mut writer: W,
    export_path: &Path,
) -> Result<usize, ExportError> {
    let xlsx_err = |source| ExportError::Xlsx {
        path: export_path.to_path_buf(),
        source,
    };

    let mut workbook = Workbook::new();
    let header_format = Format::new().set_bold();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(EXPORT_SHEET_NAME).map_err(xlsx_err)?;

    for (col, header) in (0..).zip(EXPORT_HEADERS) {
        worksheet
            .write_string_with_format(0, col, header, &header_format)
            .map_err(xlsx_err)?;
    }

    let mut count = 0;
    for (row_idx, row) in (1..).zip(rows) {
        for (col, cell) in (0..).zip(row.display_cells()) {
            if !cell.is_empty() {
                worksheet
                    .write_string(row_idx, col, cell)
                    .map_err(xlsx_err)?;
            }
        }
        count += 1;
    }

    let bytes = workbook.save_to_buffer().map_err(xlsx_err)?;
    writer
        .write_all(&bytes)
        .and_then(|()| writer.flush())
        .map_err(|e| ExportError::Io {
            path: export_path.to_path_buf(),
            source: e,
        })?;

    Ok(count)
}

/// Export rows to CSV format.
///
/// Writes a UTF-8 byte-order mark, the header row, then one record per row.
pub fn export_csv<W: Write>(
    rows: &[ProviderRecord],
    mut writer: W,
    export_path: &Path,
) -> Result<usize, ExportError> {
    writer.write_all(UTF8_BOM).map_err(|e| ExportError::Io {
        path: export_path.to_path_buf(),
        source: e,
    })?;

    let mut csv_writer = csv::Writer::from_writer(writer);

    csv_writer
        .write_record(EXPORT_HEADERS)
        .map_err(|e| ExportError::Csv {
            path: export_path.to_path_buf(),
            source: e,
        })?;

    let mut count = 0;
    for row in rows {
        csv_writer
            .write_record(row.display_cells())
            .map_err(|e| ExportError::Csv {
                path: export_path.to_path_buf(),
                source: e,
            })?;
        count += 1;
    }

    csv_writer.flush().map_err(|e| ExportError::Io {
        path: export_path.to_path_buf(),
        source: e,
    })?;

    Ok(count)
}

/// Export rows to JSON format (array of objects).
pub fn export_json<W: Write>(
    rows: &[ProviderRecord],
    mut writer: W,
    export_path: &Path,
) -> Result<usize, ExportError> {
    let shaped: Vec<ExportRow<'_>> = rows.iter().map(ExportRow::from).collect();
    serde_json::to_writer_pretty(&mut writer, &shaped).map_err(|e| ExportError::Json {
        path: export_path.to_path_buf(),
        source: e,
    })?;
    writer.flush().map_err(|e| ExportError::Io {
        path: export_path.to_path_buf(),
        source: e,
    })?;
    Ok(rows.len())
}

/// Write `rows` in `format` to `writer`.
fn write_rows<W: Write>(
    rows: &[ProviderRecord],
    format: ExportFormat,
    writer: W,
    export_path: &Path,
) -> Result<usize, ExportError> {
    match format {
        ExportFormat::Xlsx => export_xlsx(rows, writer, export_path),
        ExportFormat::Csv => export_csv(rows, writer, export_path),
        ExportFormat::Json => export_json(rows, writer, export_path),
    }
}

/// A fresh export file name: prefix, random hex suffix, format extension.
pub fn export_file_name(format: ExportFormat) -> String {
    let hex = uuid::Uuid::new_v4().simple().to_string();
    format!(
        "{EXPORT_FILE_PREFIX}{}.{}",
        &hex[..EXPORT_SUFFIX_LEN],
        format.extension()
    )
}

/// Export `rows` into a newly created, uniquely named file inside `dir`.
///
/// Never overwrites: the file is created with create-new semantics and a
/// fresh name is drawn if one already exists. An empty row set is rejected
/// before anything touches the filesystem. A write failure removes the
/// partially written file.
pub fn export_to_dir(
    rows: &[ProviderRecord],
    dir: &Path,
    format: ExportFormat,
) -> Result<ExportOutcome, ExportError> {
    export_to_dir_with(rows, dir, format, || export_file_name(format))
}

/// `export_to_dir` with the file names drawn from `next_name`.
fn export_to_dir_with<N>(
    rows: &[ProviderRecord],
    dir: &Path,
    format: ExportFormat,
    next_name: N,
) -> Result<ExportOutcome, ExportError>
where
    N: FnMut() -> String,
{
    if rows.is_empty() {
        return Err(ExportError::NothingToExport);
    }

    let (path, file) = create_unique(dir, next_name)?;
    let count = write_or_remove(&path, file, |writer| {
        write_rows(rows, format, writer, &path)
    })?;

    tracing::info!(path = %path.display(), rows = count, format = %format, "Export written");
    Ok(ExportOutcome { path, rows: count })
}

/// Create a new file in `dir`, drawing names until one is free.
///
/// Gives up with `NameExhausted` after `MAX_EXPORT_NAME_ATTEMPTS` taken names.
fn create_unique<N>(dir: &Path, mut next_name: N) -> Result<(PathBuf, File), ExportError>
where
    N: FnMut() -> String,
{
    for attempt in 1..=MAX_EXPORT_NAME_ATTEMPTS {
        let path = dir.join(next_name());
        match OpenOptions::new().write(true).create_new(true).open(&path) {
            Ok(file) => return Ok((path, file)),
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
                tracing::debug!(path = %path.display(), attempt, "Export name taken; retrying");
            }
            Err(e) => return Err(ExportError::Io { path, source: e }),
        }
    }

    Err(ExportError::NameExhausted {
        dir: dir.to_path_buf(),
        attempts: MAX_EXPORT_NAME_ATTEMPTS,
    })
}

/// Run `write` against the freshly created `file`; remove the file if the
/// write fails.
fn write_or_remove<F>(path: &Path, file: File, write: F) -> Result<usize, ExportError>
where
    F: FnOnce(BufWriter<File>) -> Result<usize, ExportError>,
{
    write(BufWriter::new(file)).map_err(|e| {
        if let Err(rm) = std::fs::remove_file(path) {
            tracing::warn!(path = %path.display(), error = %rm, "Could not remove partial export");
        }
        e
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_row(name: &str, phone: Option<&str>) -> ProviderRecord {
        ProviderRecord {
            provider_name: Some(name.to_string()),
            address: Some("12 Tahrir St, Dokki".to_string()),
            phone: phone.map(str::to_string),
            hotline: None,
            agreed_prices: Some("20% off".to_string()),
            governorate: Some("Giza".to_string()),
            ..Default::default()
        }
    }

    fn read_csv(bytes: &[u8]) -> Vec<Vec<String>> {
        let body = bytes.strip_prefix(UTF8_BOM).expect("missing BOM");
        csv::Reader::from_reader(body)
            .records()
            .map(|r| r.unwrap().iter().map(str::to_string).collect())
            .collect()
    }

    #[test]
    fn test_csv_export() {
        let rows = vec![
            make_row("Nile Lab", Some("0233445566")),
            make_row("Delta Clinic", None),
        ];
        let mut buf = Vec::new();
        let count = export_csv(&rows, &mut buf, Path::new("out.csv")).unwrap();
        assert_eq!(count, 2);

        let body = std::str::from_utf8(&buf[UTF8_BOM.len()..]).unwrap();
        assert!(body.starts_with("Provider Name,Address,Phone,Hotline,Agreed Prices"));

        let records = read_csv(&buf);
        assert_eq!(records.len(), 2);
        assert_eq!(
            records[1],
            vec!["Delta Clinic", "12 Tahrir St, Dokki", "", "", "20% off"]
        );
    }

    #[test]
    fn test_json_export_keeps_column_order() {
        let rows = vec![make_row("Nile Lab", Some("0233445566"))];
        let mut buf = Vec::new();
        let count = export_json(&rows, &mut buf, Path::new("out.json")).unwrap();
        assert_eq!(count, 1);

        let output = String::from_utf8(buf).unwrap();
        let name_at = output.find("\"Provider Name\"").unwrap();
        let prices_at = output.find("\"Agreed Prices\"").unwrap();
        assert!(name_at < prices_at);
        assert!(output.contains("\"Hotline\": \"\""));
    }

    #[test]
    fn test_export_file_name_shape() {
        let name = export_file_name(ExportFormat::Csv);
        assert!(name.starts_with(EXPORT_FILE_PREFIX));
        assert!(name.ends_with(".csv"));
        let suffix = &name[EXPORT_FILE_PREFIX.len()..name.len() - ".csv".len()];
        assert_eq!(suffix.len(), EXPORT_SUFFIX_LEN);
        assert!(suffix.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_export_to_dir_writes_unique_files() {
        let dir = tempfile::tempdir().unwrap();
        let rows = vec![make_row("Nile Lab", None)];

        let first = export_to_dir(&rows, dir.path(), ExportFormat::Csv).unwrap();
        let second = export_to_dir(&rows, dir.path(), ExportFormat::Csv).unwrap();

        assert_ne!(first.path, second.path);
        assert_eq!(first.rows, 1);
        let bytes = std::fs::read(&first.path).unwrap();
        assert_eq!(read_csv(&bytes).len(), 1);
    }

    #[test]
    fn test_export_to_dir_rejects_empty_rows() {
        let dir = tempfile::tempdir().unwrap();
        let result = export_to_dir(&[], dir.path(), ExportFormat::Csv);
        assert!(matches!(result, Err(ExportError::NothingToExport)));
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_export_to_missing_dir_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("does-not-exist");
        let rows = vec![make_row("Nile Lab", None)];
        let result = export_to_dir(&rows, &missing, ExportFormat::Json);
        assert!(matches!(result, Err(ExportError::Io { .. })));
    }

    #[test]
    fn test_format_parse() {
        assert_eq!("XLSX".parse::<ExportFormat>(), Ok(ExportFormat::Xlsx));
        assert_eq!("CSV".parse::<ExportFormat>(), Ok(ExportFormat::Csv));
        assert_eq!("json".parse::<ExportFormat>(), Ok(ExportFormat::Json));
        assert!("ods".parse::<ExportFormat>().is_err());
        assert_eq!(ExportFormat::default(), ExportFormat::Xlsx);
    }

    #[test]
    fn test_xlsx_export_reads_back() {
        use calamine::{Data, Reader, Xlsx};

        let rows = vec![
            make_row("Nile Lab", Some("0233445566")),
            make_row("Delta Clinic", None),
            make_row("Giza Scan", Some("0235550000")),
        ];
        let mut buf = Vec::new();
        let count = export_xlsx(&rows, &mut buf, Path::new("out.xlsx")).unwrap();
        assert_eq!(count, 3);

        let mut workbook = Xlsx::new(io::Cursor::new(buf)).unwrap();
        let range = workbook.worksheet_range(EXPORT_SHEET_NAME).unwrap();
        assert_eq!(range.height(), rows.len() + 1);

        let cells = |row: usize| -> Vec<String> {
            range.rows().nth(row).unwrap().iter().map(Data::to_string).collect()
        };
        let header = cells(0);
        assert_eq!(header, EXPORT_HEADERS.to_vec());

        assert_eq!(
            cells(1),
            vec!["Nile Lab", "12 Tahrir St, Dokki", "0233445566", "", "20% off"]
        );
        assert_eq!(range.get_value((2, 2)).cloned().unwrap_or(Data::Empty), Data::Empty);
    }

    #[test]
    fn test_export_to_dir_xlsx_uses_xlsx_extension() {
        let dir = tempfile::tempdir().unwrap();
        let rows = vec![make_row("Nile Lab", None)];
        let outcome = export_to_dir(&rows, dir.path(), ExportFormat::Xlsx).unwrap();
        let name = outcome.path.file_name().unwrap().to_str().unwrap();
        assert!(name.starts_with(EXPORT_FILE_PREFIX));
        assert!(name.ends_with(".xlsx"));
        // A zip container, as every xlsx file is.
        assert!(std::fs::read(&outcome.path).unwrap().starts_with(b"PK"));
    }

    #[test]
    fn test_taken_name_is_skipped() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("taken.csv"), "keep").unwrap();
        let rows = vec![make_row("Nile Lab", None)];

        let mut drawn = 0;
        let outcome = export_to_dir_with(&rows, dir.path(), ExportFormat::Csv, || {
            drawn += 1;
            let name = if drawn == 1 { "taken.csv" } else { "free.csv" };
            name.to_string()
        })
        .unwrap();

        assert_eq!(drawn, 2);
        assert_eq!(outcome.path, dir.path().join("free.csv"));
        assert_eq!(
            std::fs::read_to_string(dir.path().join("taken.csv")).unwrap(),
            "keep"
        );
    }

    #[test]
    fn test_every_name_taken_is_name_exhausted() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("taken.csv"), "keep").unwrap();
        let rows = vec![make_row("Nile Lab", None)];

        let mut drawn = 0;
        let result = export_to_dir_with(&rows, dir.path(), ExportFormat::Csv, || {
            drawn += 1;
            "taken.csv".to_string()
        });

        match result {
            Err(ExportError::NameExhausted { dir: d, attempts }) => {
                assert_eq!(d, dir.path());
                assert_eq!(attempts, MAX_EXPORT_NAME_ATTEMPTS);
            }
            other => panic!("expected NameExhausted, got {other:?}"),
        }
        assert_eq!(drawn, MAX_EXPORT_NAME_ATTEMPTS);
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn test_failed_write_removes_partial_file() {
        let dir = tempfile::tempdir().unwrap();
        let (path, file) = create_unique(dir.path(), || "partial.csv".to_string()).unwrap();
        assert!(path.exists());

        let result = write_or_remove(&path, file, |mut writer| {
            writer.write_all(b"Provider Name,Addr").unwrap();
            writer.flush().unwrap();
            Err(ExportError::Io {
                path: path.clone(),
                source: io::Error::new(io::ErrorKind::Other, "disk full"),
            })
        });

        assert!(matches!(result, Err(ExportError::Io { .. })));
        assert!(!path.exists(), "partial export must be removed");
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }
}
