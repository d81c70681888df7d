//! Search-style query generation from a brand profile.

use crate::types::BrandProfile;

/// Number of templates in one round of generated queries.
pub const TEMPLATE_COUNT: usize = 5;

/// Placeholder used in the comparison query when no competitor is given.
const COMPETITOR_PLACEHOLDER: &str = "competitors";

/// First entry of a comma-delimited list; empty input yields `""`.
pub fn first_item(list: &str) -> &str {
    list.split(',').next().unwrap_or_default()
}

/// The five base queries, before disambiguation suffixes.
pub fn base_queries(
    brand: &str,
    products: &str,
    category: &str,
    competitors: &str,
) -> [String; TEMPLATE_COUNT] {
    let product = first_item(products);
    let competitor = if competitors.is_empty() {
        COMPETITOR_PLACEHOLDER
    } else {
        first_item(competitors)
    };

    [
        format!("best {category} brands"),
        format!("{brand} {category} reviews"),
        format!("is {brand} {product} safe"),
        format!("{brand} vs {competitor}"),
        format!("eco friendly {category} options"),
    ]
}

/// Generate exactly `n` queries.
///
/// The base set is repeated with a ` (i)` suffix for round `i` and the
/// result is cut to `n`. Output depends only on the inputs.
pub fn generate_queries(
    brand: &str,
    products: &str,
    category: &str,
    competitors: &str,
    n: usize,
) -> Vec<String> {
    let base = base_queries(brand, products, category, competitors);

    (0..=n / TEMPLATE_COUNT)
        .flat_map(|round| base.iter().map(move |q| format!("{q} ({round})")))
        .take(n)
        .collect()
}

/// Generate queries for a profile.
pub fn generate_for_profile(profile: &BrandProfile, n: usize) -> Vec<String> {
    generate_queries(
        &profile.brand,
        &profile.products,
        &profile.category,
        &profile.competitors,
        n,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_acme_example() {
        let queries = generate_queries("Acme", "Acme Widget", "Widgets", "Contoso", 10);

        assert_eq!(
            queries,
            vec![
                "best Widgets brands (0)",
                "Acme Widgets reviews (0)",
                "is Acme Acme Widget safe (0)",
                "Acme vs Contoso (0)",
                "eco friendly Widgets options (0)",
                "best Widgets brands (1)",
                "Acme Widgets reviews (1)",
                "is Acme Acme Widget safe (1)",
                "Acme vs Contoso (1)",
                "eco friendly Widgets options (1)",
            ]
        );
    }

    #[test]
    fn test_exact_count_across_range() {
        for n in 10..=100 {
            let queries = generate_queries("Glade", "Glade Candles", "Air Care", "Febreze", n);
            assert_eq!(queries.len(), n, "count mismatch for n={n}");
        }
    }

    #[test]
    fn test_truncates_mid_round() {
        let queries = generate_queries("Acme", "Widget", "Widgets", "Contoso", 12);
        assert_eq!(queries.len(), 12);
        assert_eq!(queries[10], "best Widgets brands (2)");
        assert_eq!(queries[11], "Acme Widgets reviews (2)");
    }

    #[test]
    fn test_deterministic() {
        let a = generate_queries("Acme", "A, B", "Widgets", "X, Y", 37);
        let b = generate_queries("Acme", "A, B", "Widgets", "X, Y", 37);
        assert_eq!(a, b);
    }

    #[test]
    fn test_uses_first_list_entries() {
        let queries = generate_queries(
            "Glade",
            "Glade Plug-Ins, Glade Candles",
            "Air Care",
            "Febreze, Air Wick",
            5,
        );
        assert_eq!(queries[2], "is Glade Glade Plug-Ins safe (0)");
        assert_eq!(queries[3], "Glade vs Febreze (0)");
    }

    #[test]
    fn test_empty_lists_do_not_fail() {
        let queries = generate_queries("Acme", "", "Widgets", "", 5);
        assert_eq!(queries[2], "is Acme  safe (0)");
        assert_eq!(queries[3], "Acme vs competitors (0)");
    }

    #[test]
    fn test_first_item() {
        assert_eq!(first_item(""), "");
        assert_eq!(first_item("one"), "one");
        assert_eq!(first_item("one, two"), "one");
        assert_eq!(first_item(",two"), "");
    }

    #[test]
    fn test_profile_generation() {
        let profile = BrandProfile::default();
        let queries = generate_for_profile(&profile, 20);
        assert_eq!(queries.len(), 20);
        assert_eq!(queries[0], "best Air Care brands (0)");
        assert_eq!(queries[19], "eco friendly Air Care options (3)");
    }
}
