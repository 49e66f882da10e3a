use super::{round1, ColumnKind, Profile};

/// Row counts above this trigger the large-dataset insight.
const LARGE_DATASET_THRESHOLD: usize = 1000;
/// Row counts below this trigger the small-dataset insight.
const SMALL_DATASET_THRESHOLD: usize = 10;

/// Renders a short sequence of human-readable observations from a profile.
///
/// The size insight, when triggered, always comes first; per-column insights
/// follow in the profile's column order. An empty profile yields an empty
/// sequence, and the function never fails.
pub fn summarize(profile: &Profile) -> Vec<String> {
    let mut insights = Vec::new();
    let row_count = profile.row_count;

    if row_count > LARGE_DATASET_THRESHOLD {
        insights.push(format!(
            "Large dataset: {} records returned.",
            format_count(row_count as f64)
        ));
    } else if (1..SMALL_DATASET_THRESHOLD).contains(&row_count) {
        insights.push(format!("Small dataset: only {row_count} records returned."));
    }

    for (name, column) in &profile.columns {
        match column.kind {
            ColumnKind::Numeric => {
                let Some(stats) = &column.numeric else { continue };
                if stats.sum > 0.0 {
                    insights.push(format!(
                        "{name}: total {}, average {}, range {} to {}.",
                        format_count(stats.sum),
                        format_count(stats.mean),
                        format_count(stats.min),
                        format_count(stats.max),
                    ));
                }
            }
            ColumnKind::Categorical => {
                let Some(stats) = &column.categorical else { continue };
                // Only columns whose values repeat substantially are worth a
                // concentration callout.
                if (stats.unique_count as f64) < row_count as f64 * 0.5 {
                    if let Some(top) = stats.top_values.first() {
                        let percentage = round1(top.count as f64 / row_count as f64 * 100.0);
                        insights.push(format!(
                            "{name}: '{}' accounts for {percentage}% of rows.",
                            top.value
                        ));
                    }
                }
            }
            _ => {}
        }
    }

    insights
}

/// Formats a number with thousands separators, keeping up to two decimal
/// places for fractional values.
fn format_count(value: f64) -> String {
    let text = if value.fract() == 0.0 {
        format!("{}", value as i64)
    } else {
        format!("{value:.2}")
    };
    let (int_part, frac_part) = match text.split_once('.') {
        Some((int_part, frac_part)) => (int_part.to_string(), Some(frac_part)),
        None => (text.clone(), None),
    };
    let (sign, digits) = match int_part.strip_prefix('-') {
        Some(rest) => ("-", rest.to_string()),
        None => ("", int_part),
    };

    let mut grouped = String::new();
    for (offset, digit) in digits.chars().enumerate() {
        if offset > 0 && (digits.len() - offset) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    match frac_part {
        Some(frac) => format!("{sign}{grouped}.{frac}"),
        None => format!("{sign}{grouped}"),
    }
}

#[cfg(test)]
mod tests {
    use super::format_count;

    #[test]
    fn groups_thousands() {
        assert_eq!(format_count(1500.0), "1,500");
        assert_eq!(format_count(1234567.0), "1,234,567");
        assert_eq!(format_count(999.0), "999");
    }

    #[test]
    fn keeps_fractional_digits() {
        assert_eq!(format_count(116.67), "116.67");
        assert_eq!(format_count(1234.5), "1,234.50");
    }

    #[test]
    fn handles_negatives() {
        assert_eq!(format_count(-1500.0), "-1,500");
    }
}
