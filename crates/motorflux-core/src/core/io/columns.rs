use super::traits::{HistogramFile, HistogramIoError, parse_value};
use std::io::BufRead;

const POPULATION_COLUMN: usize = 1;

/// Whitespace-delimited histogram with a single header line; column 1 (0-based) holds the
/// population, column 0 is the bin centre.
///
/// ```text
/// # angle population
/// -177.0 12
/// -171.0 40
/// ```
pub struct ColumnHistogramFile;

impl HistogramFile for ColumnHistogramFile {
    type Error = HistogramIoError;

    fn read_values(reader: &mut impl BufRead) -> Result<Vec<f64>, Self::Error> {
        let mut counts = Vec::new();

        for (idx, line_res) in reader.lines().enumerate().skip(1) {
            let line = line_res?;
            let line_num = idx + 1;
            let content = line.split('#').next().unwrap_or("");
            if content.trim().is_empty() {
                continue;
            }

            let field = content.split_whitespace().nth(POPULATION_COLUMN).ok_or(
                HistogramIoError::MissingColumn {
                    line: line_num,
                    column: POPULATION_COLUMN,
                },
            )?;
            counts.push(parse_value(field, line_num)?);
        }

        Ok(counts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn read_from_takes_second_column_after_header() {
        let content = "angle population\n-177.0 12\n-171.0   40\n\n-165.0\t3\n";
        let hist = ColumnHistogramFile::read_from(&mut Cursor::new(content)).unwrap();
        assert_eq!(hist.values(), &[12.0, 40.0, 3.0]);
    }

    #[test]
    fn read_from_strips_trailing_comments() {
        let content = "header\n1 5 # first\n2 7\n";
        let hist = ColumnHistogramFile::read_from(&mut Cursor::new(content)).unwrap();
        assert_eq!(hist.values(), &[5.0, 7.0]);
    }

    #[test]
    fn read_from_reports_missing_population_column() {
        let content = "header\n1 5\n2\n";
        let result = ColumnHistogramFile::read_from(&mut Cursor::new(content));
        assert!(matches!(
            result,
            Err(HistogramIoError::MissingColumn { line: 3, column: 1 })
        ));
    }

    #[test]
    fn read_values_accepts_negative_energies() {
        let content = "angle energy\n-177 1.25\n-171 -0.5\n";
        let values = ColumnHistogramFile::read_values(&mut Cursor::new(content)).unwrap();
        assert_eq!(values, vec![1.25, -0.5]);
    }

    #[test]
    fn read_from_rejects_negative_population() {
        let content = "header\n1 5\n2 -1\n";
        let result = ColumnHistogramFile::read_from(&mut Cursor::new(content));
        assert!(matches!(result, Err(HistogramIoError::Invalid(_))));
    }
}
