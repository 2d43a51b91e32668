use std::fs;
use std::path::Path;

use log::info;

use crate::tensor::Tensor;

/// Errors produced while loading a weights file.
#[derive(Debug, thiserror::Error)]
pub enum WeightsError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("missing shape header (expected `rows cols` on the first data line)")]
    MissingHeader,
    #[error("malformed shape header: {0:?}")]
    BadHeader(String),
    #[error("tensor shape {rows}x{cols} has no values")]
    EmptyShape { rows: usize, cols: usize },
    #[error("bad value at position {index}: {token:?}")]
    BadValue { index: usize, token: String },
    #[error("expected {expected} values, found {found}")]
    CountMismatch { expected: usize, found: usize },
}

/// Load a rank-2 weight tensor from a text weights file.
///
/// The format is line-oriented: blank lines and `#` comments are ignored,
/// the first data line is `rows cols`, and the remaining whitespace-separated
/// tokens are the row-major cell values. The tensor takes its display name
/// from the file stem.
pub fn load_weights<P: AsRef<Path>>(path: P) -> Result<Tensor, WeightsError> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path).map_err(|source| WeightsError::Io {
        path: path.display().to_string(),
        source,
    })?;

    let name = path
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| "tensor".to_string());

    let tensor = parse_weights(name, &contents)?;
    info!("loaded tensor '{}' ({}x{})", tensor.name, tensor.rows, tensor.cols);
    Ok(tensor)
}

fn parse_weights(name: String, contents: &str) -> Result<Tensor, WeightsError> {
    let mut lines = contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'));

    let header = lines.next().ok_or(WeightsError::MissingHeader)?;
    let (rows, cols) = parse_header(header)?;
    let expected = rows * cols;
    if expected == 0 {
        return Err(WeightsError::EmptyShape { rows, cols });
    }

    let mut data = Vec::with_capacity(expected);
    for line in lines {
        for token in line.split_whitespace() {
            let value: f32 = token.parse().map_err(|_| WeightsError::BadValue {
                index: data.len() + 1,
                token: token.to_string(),
            })?;
            data.push(value);
        }
    }

    if data.len() != expected {
        return Err(WeightsError::CountMismatch { expected, found: data.len() });
    }

    Ok(Tensor::new(name, rows, cols, data))
}

fn parse_header(header: &str) -> Result<(usize, usize), WeightsError> {
    let mut fields = header.split_whitespace();
    let rows = fields.next().and_then(|f| f.parse().ok());
    let cols = fields.next().and_then(|f| f.parse().ok());
    match (rows, cols, fields.next()) {
        (Some(rows), Some(cols), None) => Ok((rows, cols)),
        _ => Err(WeightsError::BadHeader(header.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn parses_shape_and_values() {
        let tensor = parse_weights(
            "fc1".to_string(),
            "# fc1 weights\n2 3\n0.5 -1.25 2.0\n3.5 4.0 -0.125\n",
        )
        .unwrap();

        assert_eq!(tensor.name, "fc1");
        assert_eq!((tensor.rows, tensor.cols), (2, 3));
        assert_eq!(tensor.value(0, 1), -1.25);
        assert_eq!(tensor.value(1, 2), -0.125);
    }

    #[test]
    fn values_may_span_arbitrary_lines() {
        let tensor = parse_weights("w".to_string(), "2 2\n1 2 3\n4\n").unwrap();
        assert_eq!(tensor.values(), &[1.0, 2.0, 3.0, 4.0]);
    }

    #[test]
    fn missing_header_is_rejected() {
        assert!(matches!(
            parse_weights("w".to_string(), "# nothing here\n"),
            Err(WeightsError::MissingHeader)
        ));
        assert!(matches!(
            parse_weights("w".to_string(), "2 three\n1 2 3 4\n"),
            Err(WeightsError::BadHeader(_))
        ));
    }

    #[test]
    fn count_mismatch_is_rejected() {
        assert!(matches!(
            parse_weights("w".to_string(), "2 2\n1 2 3\n"),
            Err(WeightsError::CountMismatch { expected: 4, found: 3 })
        ));
    }

    #[test]
    fn bad_token_reports_its_position() {
        assert!(matches!(
            parse_weights("w".to_string(), "1 3\n1.0 oops 3.0\n"),
            Err(WeightsError::BadValue { index: 2, .. })
        ));
    }

    #[test]
    fn loads_from_disk_and_names_after_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("conv1.weights");
        let mut file = fs::File::create(&path).unwrap();
        writeln!(file, "1 2").unwrap();
        writeln!(file, "0.5 1.5").unwrap();
        drop(file);

        let tensor = load_weights(&path).unwrap();
        assert_eq!(tensor.name, "conv1");
        assert_eq!(tensor.values(), &[0.5, 1.5]);
    }

    #[test]
    fn unreadable_path_reports_io_error() {
        assert!(matches!(
            load_weights("/nonexistent/missing.weights"),
            Err(WeightsError::Io { .. })
        ));
    }
}
