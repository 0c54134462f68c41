use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("Invalid --set format: '{0}'. Expected KEY=VALUE.")]
    InvalidSetFormat(String),

    #[error("Key cannot be empty in '{0}'.")]
    EmptyKey(String),

    #[error("Dihedral name list is empty.")]
    EmptyNameList,

    #[error("Invalid dihedral name '{0}': names cannot contain path separators.")]
    InvalidName(String),
}

/// Splits `KEY=VALUE` at the first `=`, trimming both sides.
pub fn parse_key_value(pair: &str) -> Result<(&str, &str), ParseError> {
    let (key, value) = pair
        .split_once('=')
        .ok_or_else(|| ParseError::InvalidSetFormat(pair.to_string()))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(ParseError::EmptyKey(pair.to_string()));
    }
    Ok((key, value.trim()))
}

/// Parses a comma-separated list of dihedral names, e.g. `chi1ALA13,chi2THR51`.
pub fn parse_name_list(list: &str) -> Result<Vec<String>, ParseError> {
    collect_names(list.split(','))
}

/// Parses a names file: one name per line, blank lines and `#` comments ignored.
pub fn parse_names_file(content: &str) -> Result<Vec<String>, ParseError> {
    collect_names(
        content
            .lines()
            .map(|line| line.split_once('#').map_or(line, |(before, _)| before)),
    )
}

fn collect_names<'a>(items: impl Iterator<Item = &'a str>) -> Result<Vec<String>, ParseError> {
    let mut names = Vec::new();
    for item in items.map(str::trim).filter(|s| !s.is_empty()) {
        if item.contains(['/', '\\']) {
            return Err(ParseError::InvalidName(item.to_string()));
        }
        if !names.iter().any(|n| n == item) {
            names.push(item.to_string());
        }
    }
    if names.is_empty() {
        return Err(ParseError::EmptyNameList);
    }
    Ok(names)
}
