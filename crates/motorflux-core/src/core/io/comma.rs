use super::traits::{HistogramFile, HistogramIoError, parse_value};
use std::io::BufRead;

/// Comma-delimited histogram with a single header line; the first column holds the
/// population of each bin.
///
/// ```text
/// population
/// 12
/// 40
/// ```
pub struct CommaHistogramFile;

impl HistogramFile for CommaHistogramFile {
    type Error = HistogramIoError;

    fn read_values(reader: &mut impl BufRead) -> Result<Vec<f64>, Self::Error> {
        // The header is always the first line, even when it starts with the comment marker.
        reader.read_line(&mut String::new())?;

        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .comment(Some(b'#'))
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut counts = Vec::new();
        for record in csv_reader.records() {
            let record = record?;
            let line = record.position().map_or(0, |p| p.line() as usize) + 1;
            let field = record
                .get(0)
                .filter(|f| !f.is_empty())
                .ok_or(HistogramIoError::MissingColumn { line, column: 0 })?;
            counts.push(parse_value(field, line)?);
        }

        Ok(counts)
    }
}
