//! Mapping between selected categories and the stored value

use crate::tree::FlatCategory;
use crate::value::Value;
use commerce_client::Category;

/// Ids of the selected categories, in the order the UI reports them
pub fn to_value<'a, I>(selected: I) -> Value
where
    I: IntoIterator<Item = &'a Category>,
{
    selected.into_iter().map(|c| c.id.clone()).collect()
}

/// Whether a category is part of the stored value
pub fn is_selected(category: &Category, value: &[String]) -> bool {
    value.iter().any(|id| *id == category.id)
}

/// Options to pre-mark as selected, in option order
pub fn selected_options<'a>(options: &'a [FlatCategory], value: &[String]) -> Vec<&'a FlatCategory> {
    options
        .iter()
        .filter(|option| is_selected(&option.category, value))
        .collect()
}

/// Options whose label contains `query`, ignoring case
///
/// An empty or blank query keeps every option. Tree order and depths are
/// preserved, so a matching child is listed without its ancestors.
pub fn filter_options<'a>(
    options: &'a [FlatCategory],
    query: &str,
    locale: &str,
) -> Vec<&'a FlatCategory> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return options.iter().collect();
    }

    options
        .iter()
        .filter(|option| {
            option
                .category
                .label(locale)
                .to_lowercase()
                .contains(&needle)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::CategoryTree;
    use commerce_client::DEFAULT_LOCALE;

    fn options() -> Vec<FlatCategory> {
        CategoryTree::build(vec![
            Category::new("1").with_name("en-US", "Kitchen"),
            Category::new("2").with_parent("1").with_name("en-US", "Coffee Machines"),
            Category::new("3").with_parent("1").with_key("kettles"),
            Category::new("4"),
        ])
        .flatten()
    }

    #[test]
    fn test_to_value_keeps_ui_order() {
        let options = options();
        let picked = [&options[2].category, &options[0].category];
        assert_eq!(to_value(picked), vec!["3".to_string(), "1".to_string()]);
    }

    #[test]
    fn test_round_trip_marks_exactly_the_selection() {
        let options = options();
        let picked: Vec<&Category> = vec![&options[1].category, &options[3].category];
        let value = to_value(picked.iter().copied());

        for option in &options {
            let expected = picked.iter().any(|p| p.id == option.category.id);
            assert_eq!(is_selected(&option.category, &value), expected);
        }

        let marked: Vec<_> = selected_options(&options, &value)
            .iter()
            .map(|o| o.category.id.as_str())
            .collect();
        assert_eq!(marked, vec!["2", "4"]);
    }

    #[test]
    fn test_unknown_ids_select_nothing() {
        let options = options();
        assert!(selected_options(&options, &["nope".to_string()]).is_empty());
        assert!(selected_options(&options, &[]).is_empty());
    }

    #[test]
    fn test_filter_options() {
        let options = options();

        let hits: Vec<_> = filter_options(&options, "coffee", DEFAULT_LOCALE)
            .iter()
            .map(|o| (o.category.id.as_str(), o.depth))
            .collect();
        assert_eq!(hits, vec![("2", 1)]);

        // Falls back to key, then id
        assert_eq!(filter_options(&options, "KETTLE", DEFAULT_LOCALE).len(), 1);
        assert_eq!(filter_options(&options, "4", DEFAULT_LOCALE).len(), 1);
        assert_eq!(filter_options(&options, "  ", DEFAULT_LOCALE).len(), options.len());
    }
}
