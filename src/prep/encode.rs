use std::collections::{BTreeMap, BTreeSet};

use tracing::debug;

use crate::data::{Frame, Value};
use crate::error::PrepError;

/// Replace every value of `column` with a zero-based integer code.
///
/// Codes are assigned by sorting the distinct values lexicographically and
/// numbering them in that order, so the mapping is a bijection fixed for the
/// run and independent of row order. Returns the encoded frame and the
/// value-to-code mapping.
pub fn label_encode(
    frame: &Frame,
    column: &str,
) -> Result<(Frame, BTreeMap<String, i64>), PrepError> {
    let col = frame
        .column_index(column)
        .ok_or_else(|| PrepError::Encoding {
            column: column.to_string(),
        })?;

    let distinct: BTreeSet<String> = frame.rows().iter().map(|r| r[col].to_string()).collect();
    let mapping: BTreeMap<String, i64> = distinct
        .into_iter()
        .enumerate()
        .map(|(code, value)| (value, code as i64))
        .collect();

    let rows = frame
        .rows()
        .iter()
        .map(|row| {
            let mut row = row.clone();
            row[col] = Value::Int(mapping[&row[col].to_string()]);
            row
        })
        .collect();

    debug!(column, classes = mapping.len(), "label-encoded column");
    Ok((Frame::new(frame.columns().to_vec(), rows), mapping))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn segments_frame(values: &[&str]) -> Frame {
        let rows = values
            .iter()
            .enumerate()
            .map(|(i, v)| vec![Value::Str(v.to_string()), Value::Int(i as i64 + 1)])
            .collect();
        Frame::new(vec!["Segment".into(), "X".into()], rows)
    }

    #[test]
    fn codes_follow_sorted_order() {
        let frame = segments_frame(&["Consumer", "Corporate", "Consumer", "Home Office"]);
        let (encoded, mapping) = label_encode(&frame, "Segment").unwrap();

        assert_eq!(mapping["Consumer"], 0);
        assert_eq!(mapping["Corporate"], 1);
        assert_eq!(mapping["Home Office"], 2);

        let codes: Vec<&Value> = encoded.rows().iter().map(|r| &r[0]).collect();
        assert_eq!(
            codes,
            vec![&Value::Int(0), &Value::Int(1), &Value::Int(0), &Value::Int(2)]
        );
    }

    #[test]
    fn mapping_is_a_bijection() {
        let frame = segments_frame(&["b", "a", "c", "a", "b"]);
        let (_, mapping) = label_encode(&frame, "Segment").unwrap();

        let codes: BTreeSet<i64> = mapping.values().copied().collect();
        assert_eq!(codes.len(), mapping.len());
        assert_eq!(codes, BTreeSet::from([0, 1, 2]));
    }

    #[test]
    fn mapping_is_stable_across_runs() {
        let frame = segments_frame(&["Corporate", "Consumer", "Home Office"]);
        let (_, first) = label_encode(&frame, "Segment").unwrap();
        let (_, second) = label_encode(&frame, "Segment").unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn missing_column_is_an_encoding_error() {
        let frame = segments_frame(&["Consumer"]);
        let err = label_encode(&frame, "Category").unwrap_err();
        assert!(matches!(err, PrepError::Encoding { column } if column == "Category"));
    }

    #[test]
    fn other_columns_are_untouched() {
        let frame = segments_frame(&["x", "y"]);
        let (encoded, _) = label_encode(&frame, "Segment").unwrap();
        assert_eq!(encoded.rows()[0][1], Value::Int(1));
        assert_eq!(encoded.rows()[1][1], Value::Int(2));
    }
}
