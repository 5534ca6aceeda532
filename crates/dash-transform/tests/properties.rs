//! Identity properties of the row filters.

use dash_transform::{column_numbers, column_strings, filter_at_least, filter_contains};
use polars::prelude::{DataFrame, IntoColumn, NamedFrom, Series};
use proptest::prelude::*;
use proptest::test_runner::Config;

fn table(categories: &[String], values: &[f64]) -> DataFrame {
    DataFrame::new(vec![
        Series::new("Category".into(), categories.to_vec()).into_column(),
        Series::new("Value".into(), values.to_vec()).into_column(),
    ])
    .expect("frame")
}

fn rows() -> impl Strategy<Value = (Vec<String>, Vec<f64>)> {
    prop::collection::vec(("[A-Za-z ]{0,12}", 0.0_f64..1_000.0), 0..40)
        .prop_map(|rows| rows.into_iter().unzip())
}

proptest! {
    #![proptest_config(Config::with_cases(128))]
    #[test]
    fn empty_query_keeps_every_row((categories, values) in rows()) {
        let df = table(&categories, &values);
        let out = filter_contains(&df, "Category", "").expect("filter");
        prop_assert!(out.equals_missing(&df));
    }

    #[test]
    fn zero_threshold_keeps_non_negative_rows((categories, values) in rows()) {
        let df = table(&categories, &values);
        let out = filter_at_least(&df, "Value", 0.0).expect("filter");
        prop_assert_eq!(out.height(), df.height());
        prop_assert_eq!(
            column_numbers(&out, "Value").expect("values"),
            column_numbers(&df, "Value").expect("values")
        );
        prop_assert_eq!(
            column_strings(&out, "Category").expect("categories"),
            column_strings(&df, "Category").expect("categories")
        );
    }

    #[test]
    fn query_matches_are_a_subset(
        (categories, values) in rows(),
        query in "[a-z]{1,3}"
    ) {
        let df = table(&categories, &values);
        let out = filter_contains(&df, "Category", &query).expect("filter");
        prop_assert!(out.height() <= df.height());
        for category in column_strings(&out, "Category").expect("categories").into_iter().flatten() {
            prop_assert!(category.to_lowercase().contains(&query));
        }
    }
}
