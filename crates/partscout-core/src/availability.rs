//! Free-text stock classification.

/// Built-in phrases that mark a listing unavailable.
pub const NEGATIVE_STOCK_TERMS: &[&str] = &[
    "out of stock",
    "sold out",
    "not available",
    "agotado",
    "sin stock",
    "no disponible",
    "fuera de stock",
    "vendido",
];

/// Built-in phrases that mark a listing available.
pub const POSITIVE_STOCK_TERMS: &[&str] = &[
    "in stock",
    "available",
    "add to cart",
    "disponible",
    "en stock",
    "stock disponible",
    "agregar al carro",
];

/// Maps free-text stock wording to an availability flag.
///
/// Negative phrases win over positive ones (`"no disponible"` must not be
/// read as `"disponible"`). Absent or unrecognized text counts as
/// available — sources that never render stock wording would otherwise
/// report everything as sold out.
#[must_use]
pub fn classify_availability(
    stock_text: Option<&str>,
    extra_negative: &[String],
    extra_positive: &[String],
) -> bool {
    let Some(text) = stock_text else {
        return true;
    };
    let lowered = text.to_lowercase();

    if NEGATIVE_STOCK_TERMS.iter().any(|t| lowered.contains(t))
        || extra_negative
            .iter()
            .any(|t| lowered.contains(&t.to_lowercase()))
    {
        return false;
    }

    if POSITIVE_STOCK_TERMS.iter().any(|t| lowered.contains(t))
        || extra_positive
            .iter()
            .any(|t| lowered.contains(&t.to_lowercase()))
    {
        return true;
    }

    // Default-open.
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_text_defaults_to_available() {
        assert!(classify_availability(None, &[], &[]));
    }

    #[test]
    fn unrecognized_text_defaults_to_available() {
        assert!(classify_availability(Some("entrega en 48 horas"), &[], &[]));
    }

    #[test]
    fn negative_keyword_is_case_insensitive() {
        assert!(!classify_availability(Some("AGOTADO"), &[], &[]));
        assert!(!classify_availability(Some("Out Of Stock"), &[], &[]));
    }

    #[test]
    fn negative_wins_over_positive_substring() {
        // "no disponible" contains "disponible"; the negative scan runs
        // first so the item stays unavailable.
        assert!(!classify_availability(
            Some("Producto no disponible"),
            &[],
            &[]
        ));
    }

    #[test]
    fn positive_keyword_reports_available() {
        assert!(classify_availability(Some("Stock disponible"), &[], &[]));
    }

    #[test]
    fn store_specific_negative_terms_extend_the_builtin_list() {
        let extra = vec!["pronto en stock".to_owned()];
        assert!(!classify_availability(Some("Pronto en stock"), &extra, &[]));
    }
}
