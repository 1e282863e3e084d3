// CSV/TSV roster import

use std::cmp::Reverse;
use std::io::Read;
use std::path::Path;

use rollcall_recon::{CellValue, Table};

use crate::error::IoError;
use crate::unique_headers;

/// Read a delimited roster. The delimiter is sniffed from the first lines.
pub fn read_table(path: &Path) -> Result<Table, IoError> {
    let content = read_file_as_utf8(path)?;
    let delimiter = sniff_delimiter(&content);
    parse_table(&content, delimiter).map_err(|message| IoError::Format {
        path: path.to_path_buf(),
        message,
    })
}

/// Delimiters tried, in order of preference when two fit equally well.
const DELIMITERS: [u8; 4] = [b',', b';', b'\t', b'|'];

/// Non-blank records read per candidate while sniffing.
const SNIFF_RECORDS: usize = 10;

/// Pick the delimiter that splits the header into at least two columns and
/// leaves the fewest following records at a different width. A wider header
/// wins ties; a single-column file falls back to comma.
fn sniff_delimiter(content: &str) -> u8 {
    DELIMITERS
        .into_iter()
        .filter_map(|delimiter| {
            let widths = record_widths(content, delimiter);
            let (&header, records) = widths.split_first()?;
            if header < 2 {
                return None;
            }
            let ragged = records.iter().filter(|&&w| w != header).count();
            Some((delimiter, ragged, header))
        })
        .min_by_key(|&(_, ragged, header)| (ragged, Reverse(header)))
        .map(|(delimiter, _, _)| delimiter)
        .unwrap_or(b',')
}

/// Field counts of the first non-blank records. Quoted line breaks stay
/// inside their record.
fn record_widths(content: &str, delimiter: u8) -> Vec<usize> {
    csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(false)
        .flexible(true)
        .from_reader(content.as_bytes())
        .records()
        .filter_map(Result::ok)
        .filter(|record| record.iter().any(|field| !field.trim().is_empty()))
        .take(SNIFF_RECORDS)
        .map(|record| record.len())
        .collect()
}

/// Read file and convert to UTF-8 if needed (handles Windows-1252, Latin-1, etc.)
fn read_file_as_utf8(path: &Path) -> Result<String, IoError> {
    let read_err = |source| IoError::Read {
        path: path.to_path_buf(),
        source,
    };
    let mut file = std::fs::File::open(path).map_err(read_err)?;
    let mut bytes = Vec::new();
    file.read_to_end(&mut bytes).map_err(read_err)?;

    match String::from_utf8(bytes) {
        Ok(s) => Ok(s.strip_prefix('\u{feff}').map(str::to_string).unwrap_or(s)),
        Err(e) => {
            let bytes = e.into_bytes();
            // Excel-exported CSVs are commonly Windows-1252
            let (decoded, _, _) = encoding_rs::WINDOWS_1252.decode(&bytes);
            Ok(decoded.into_owned())
        }
    }
}

/// Parse delimited text: first record is the header row, fully blank rows are skipped.
pub fn parse_table(content: &str, delimiter: u8) -> Result<Table, String> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(false)
        .flexible(true)
        .from_reader(content.as_bytes());

    let mut headers: Option<Vec<String>> = None;
    let mut rows = Vec::new();

    for result in reader.records() {
        let record = result.map_err(|e| e.to_string())?;
        if record.iter().all(|f| f.trim().is_empty()) {
            continue;
        }

        match headers {
            None => headers = Some(record.iter().map(str::to_string).collect()),
            Some(_) => rows.push(record.iter().map(CellValue::text).collect::<Vec<_>>()),
        }
    }

    let headers = unique_headers(headers.unwrap_or_default());
    Ok(Table::new(headers, rows))
}
