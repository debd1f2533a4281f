//! CSV Data Loader Module
//! Locates the registry extract, decodes its legacy encoding and reads it with Polars.

use encoding_rs::{Encoding, UTF_8};
use polars::prelude::*;
use std::fmt;
use std::io::{Cursor, Read};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("Data source not found (tried: {})", display_attempts(.attempted))]
    SourceNotFound { attempted: Vec<PathBuf> },
    #[error("Failed to read {source_name}: {error}")]
    Io {
        source_name: String,
        #[source]
        error: std::io::Error,
    },
    #[error("Failed to decode {source_name} as {encoding}: malformed byte sequence")]
    Decode {
        source_name: String,
        encoding: &'static str,
    },
    #[error("Failed to parse CSV: {0}")]
    CsvError(#[from] PolarsError),
}

fn display_attempts(attempted: &[PathBuf]) -> String {
    if attempted.is_empty() {
        return "no candidate path or upload provided".to_string();
    }
    attempted
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Where a loaded table came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataSource {
    File(PathBuf),
    Upload(String),
}

impl fmt::Display for DataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataSource::File(path) => write!(f, "{}", path.display()),
            DataSource::Upload(name) => write!(f, "upload '{}'", name),
        }
    }
}

/// Raw table as read from the source: every column is a string column.
#[derive(Debug, Clone)]
pub struct RawTable {
    pub frame: DataFrame,
    pub source: DataSource,
}

/// Reads the registry CSV from disk or from an upload stream.
pub struct DataLoader {
    encoding: &'static Encoding,
    candidates: Vec<PathBuf>,
}

impl DataLoader {
    pub fn new(encoding: &'static Encoding, candidates: Vec<PathBuf>) -> Self {
        Self {
            encoding,
            candidates,
        }
    }

    pub fn encoding(&self) -> &'static Encoding {
        self.encoding
    }

    pub fn candidates(&self) -> &[PathBuf] {
        &self.candidates
    }

    /// First existing candidate path.
    pub fn locate(&self) -> Result<&Path, LoaderError> {
        for path in &self.candidates {
            debug!(path = %path.display(), "probing dataset location");
            if path.is_file() {
                return Ok(path);
            }
        }
        Err(LoaderError::SourceNotFound {
            attempted: self.candidates.clone(),
        })
    }

    /// Load from the first existing candidate path.
    pub fn load_default(&self) -> Result<RawTable, LoaderError> {
        let path = self.locate()?.to_path_buf();
        self.load_path(&path)
    }

    /// Load a specific file.
    pub fn load_path(&self, path: &Path) -> Result<RawTable, LoaderError> {
        if !path.is_file() {
            return Err(LoaderError::SourceNotFound {
                attempted: vec![path.to_path_buf()],
            });
        }
        let source_name = path.display().to_string();
        let bytes = std::fs::read(path).map_err(|error| LoaderError::Io {
            source_name: source_name.clone(),
            error,
        })?;
        let frame = self.parse_bytes(&bytes, &source_name)?;
        info!(
            source = %source_name,
            rows = frame.height(),
            columns = frame.width(),
            "loaded registry table"
        );
        Ok(RawTable {
            frame,
            source: DataSource::File(path.to_path_buf()),
        })
    }

    /// Load from an uploaded byte stream. `None` means nothing was uploaded.
    pub fn load_upload<R: Read>(
        &self,
        upload: Option<(&str, R)>,
    ) -> Result<RawTable, LoaderError> {
        let Some((name, mut reader)) = upload else {
            return Err(LoaderError::SourceNotFound {
                attempted: Vec::new(),
            });
        };

        let mut bytes = Vec::new();
        reader
            .read_to_end(&mut bytes)
            .map_err(|error| LoaderError::Io {
                source_name: name.to_string(),
                error,
            })?;
        let frame = self.parse_bytes(&bytes, name)?;
        info!(
            source = name,
            rows = frame.height(),
            columns = frame.width(),
            "loaded uploaded registry table"
        );
        Ok(RawTable {
            frame,
            source: DataSource::Upload(name.to_string()),
        })
    }

    /// Decode bytes with the configured encoding, rejecting malformed input.
    pub fn decode(&self, bytes: &[u8], source_name: &str) -> Result<String, LoaderError> {
        let bytes = if self.encoding == UTF_8 {
            bytes.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(bytes)
        } else {
            bytes
        };
        self.encoding
            .decode_without_bom_handling_and_without_replacement(bytes)
            .map(|text| text.into_owned())
            .ok_or_else(|| LoaderError::Decode {
                source_name: source_name.to_string(),
                encoding: self.encoding.name(),
            })
    }

    fn parse_bytes(&self, bytes: &[u8], source_name: &str) -> Result<DataFrame, LoaderError> {
        let text = self.decode(bytes, source_name)?;
        parse_csv_text(text)
    }
}

/// Parse decoded CSV text. All columns are read as strings; empty fields are null.
pub fn parse_csv_text(text: String) -> Result<DataFrame, LoaderError> {
    let df = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(0))
        .map_parse_options(|opts| opts.with_missing_is_null(true))
        .into_reader_with_file_handle(Cursor::new(text.into_bytes()))
        .finish()?;
    Ok(df)
}

#[cfg(test)]
mod tests {
    use super::*;
    use encoding_rs::EUC_KR;

    fn loader(candidates: Vec<PathBuf>) -> DataLoader {
        DataLoader::new(EUC_KR, candidates)
    }

    #[test]
    fn missing_candidates_report_every_attempt() {
        let l = loader(vec!["/nonexistent/a.csv".into(), "/nonexistent/b.csv".into()]);
        match l.load_default() {
            Err(LoaderError::SourceNotFound { attempted }) => {
                assert_eq!(attempted.len(), 2);
            }
            other => panic!("unexpected: {:?}", other.map(|t| t.source)),
        }
        let msg = l.locate().unwrap_err().to_string();
        assert!(msg.contains("/nonexistent/a.csv"));
        assert!(msg.contains("/nonexistent/b.csv"));
    }

    #[test]
    fn no_upload_is_source_not_found() {
        let l = loader(Vec::new());
        let result = l.load_upload::<&[u8]>(None);
        assert!(matches!(
            result,
            Err(LoaderError::SourceNotFound { attempted }) if attempted.is_empty()
        ));
    }

    #[test]
    fn decodes_euc_kr_upload() {
        let (bytes, _, had_errors) = EUC_KR.encode("행정구역,값\n서울특별시,\"1,000\"\n");
        assert!(!had_errors);
        let table = loader(Vec::new())
            .load_upload(Some(("upload.csv", &bytes[..])))
            .unwrap();
        assert_eq!(table.frame.height(), 1);
        let names: Vec<String> = table
            .frame
            .get_column_names()
            .iter()
            .map(|s| s.to_string())
            .collect();
        assert_eq!(names, vec!["행정구역", "값"]);
        let value = table.frame.column("값").unwrap().str().unwrap().get(0);
        assert_eq!(value, Some("1,000"));
        assert_eq!(table.source, DataSource::Upload("upload.csv".into()));
    }

    #[test]
    fn malformed_bytes_are_decode_errors() {
        // 0xFF is never a valid lead byte in EUC-KR
        let bytes: &[u8] = b"region,value\nA,\xFF\xFF\n";
        let err = loader(Vec::new())
            .load_upload(Some(("bad.csv", bytes)))
            .unwrap_err();
        assert!(matches!(err, LoaderError::Decode { encoding: "EUC-KR", .. }));
    }

    #[test]
    fn empty_fields_become_null() {
        let df = parse_csv_text("a,b\n1,\n2,3\n".to_string()).unwrap();
        assert_eq!(df.column("b").unwrap().null_count(), 1);
    }
}
