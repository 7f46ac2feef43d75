use std::{fs, path::Path};

use log::debug;

use crate::{
    Result,
    dataset::{DataPoint, Dataset},
    error::RegressionErr,
};

/// Loads a `Dataset` from a headered csv file.
///
/// # Arguments
/// * `path` - The csv file.
/// * `feature` - The header of the column holding the feature.
/// * `target` - The header of the column holding the target.
pub fn load_csv(path: impl AsRef<Path>, feature: &str, target: &str) -> Result<Dataset> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)?;
    let dataset = parse_csv(&content, feature, target)?;

    debug!("loaded {} points from {}", dataset.len(), path.display());
    Ok(dataset)
}

/// Parses a headered csv text into a `Dataset`.
///
/// Quoted fields may hold commas. Blank lines are skipped. Negative values are
/// kept, the engine filters them when fitting.
///
/// # Arguments
/// * `content` - The csv text, its first non blank line being the header.
/// * `feature` - The header of the column holding the feature.
/// * `target` - The header of the column holding the target.
pub fn parse_csv(content: &str, feature: &str, target: &str) -> Result<Dataset> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(content.as_bytes());

    let columns = reader.headers()?.clone();
    let column = |name: &str| {
        columns
            .iter()
            .position(|c| c == name)
            .ok_or_else(|| RegressionErr::MissingColumn {
                name: name.to_string(),
            })
    };

    let feature_idx = column(feature)?;
    let target_idx = column(target)?;

    let mut points = Vec::new();

    for record in reader.records() {
        let record = record?;
        let line = record.position().map_or(0, |p| p.line() as usize);

        if record.len() != columns.len() {
            return Err(RegressionErr::RowLength {
                line,
                got: record.len(),
                expected: columns.len(),
            });
        }

        let parse = |idx: usize| {
            record[idx]
                .parse::<f64>()
                .map_err(|_| RegressionErr::Parse {
                    line,
                    column: columns[idx].to_string(),
                    value: record[idx].to_string(),
                })
        };

        points.push(DataPoint::new(parse(feature_idx)?, parse(target_idx)?));
    }

    Ok(Dataset::new(points))
}

#[cfg(test)]
mod tests {
    use super::*;

    const CSV: &str = "\
rent,bedrooms,size_sqft
3000,1,750

4500,2,\"1100\"
-1,0,400
";

    #[test]
    fn picks_columns_by_header() {
        let ds = parse_csv(CSV, "size_sqft", "rent").unwrap();

        assert_eq!(
            ds.points(),
            [
                DataPoint::new(750.0, 3000.0),
                DataPoint::new(1100.0, 4500.0),
                DataPoint::new(400.0, -1.0),
            ]
        );
        assert_eq!(ds.valid().count(), 2);
    }

    #[test]
    fn unknown_column_is_an_error() {
        let err = parse_csv(CSV, "floor", "rent").unwrap_err();
        assert!(matches!(err, RegressionErr::MissingColumn { name } if name == "floor"));
    }

    #[test]
    fn non_numeric_values_are_errors() {
        let err = parse_csv("x,y\n1,2\n3,abc\n", "x", "y").unwrap_err();
        assert!(matches!(
            err,
            RegressionErr::Parse { line: 3, ref column, ref value } if column == "y" && value == "abc"
        ));
    }

    #[test]
    fn short_rows_are_errors() {
        let err = parse_csv("x,y\n1\n", "x", "y").unwrap_err();
        assert!(matches!(
            err,
            RegressionErr::RowLength {
                line: 2,
                got: 1,
                expected: 2
            }
        ));
    }

    #[test]
    fn header_only_gives_an_empty_dataset() {
        let ds = parse_csv("x,y\n", "x", "y").unwrap();
        assert!(ds.is_empty());
    }

    #[test]
    fn blank_input_has_no_columns() {
        assert!(parse_csv("  \n", "x", "y").is_err());
    }

    #[test]
    fn quoted_commas_stay_inside_their_field() {
        let ds = parse_csv(
            "neighborhood,size_sqft,rent\n\"Park Slope, Brooklyn\",750,3000\n",
            "size_sqft",
            "rent",
        )
        .unwrap();
        assert_eq!(ds.points(), [DataPoint::new(750.0, 3000.0)]);

        let ds = parse_csv("\"size, sqft\",rent\n750,3000\n", "size, sqft", "rent").unwrap();
        assert_eq!(ds.points(), [DataPoint::new(750.0, 3000.0)]);
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = load_csv("/definitely/not/here.csv", "x", "y").unwrap_err();
        assert!(matches!(err, RegressionErr::Io(_)));
    }
}
