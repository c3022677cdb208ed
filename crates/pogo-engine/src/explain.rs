use pogo_models::{Locale, Outcome};

/// Short verdict label shown to the user.
pub fn verdict_label(outcome: Outcome, locale: Locale) -> &'static str {
    match (locale, outcome) {
        (Locale::En, Outcome::Fair) => "equal",
        (Locale::En, Outcome::FavorsRight) => "unfavorable to right side",
        (Locale::En, Outcome::FavorsLeft) => "unfavorable to left side",
        (Locale::He, Outcome::Fair) => "שווה",
        (Locale::He, Outcome::FavorsRight) => "לא שווה לצד ימין",
        (Locale::He, Outcome::FavorsLeft) => "לא שווה לצד שמאל",
    }
}

/// Justification text; always carries the ratio as a percentage with one decimal.
pub fn explanation(ratio: f64, locale: Locale) -> String {
    let percent = format!("{:.1}%", ratio * 100.0);
    match locale {
        Locale::En => format!(
            "Compared combat potential, rarity and special variants. Difference ratio: {percent}"
        ),
        Locale::He => format!(
            "מנוע ה-AI השווה פוטנציאל קרב, נדירות ווריאנטים מיוחדים. יחס ההפרש: {percent}"
        ),
    }
}
