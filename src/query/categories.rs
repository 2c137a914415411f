//! Curated catalog of arXiv subject categories.

use tracing::warn;

/// One entry of the category catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Category {
    /// arXiv category code, e.g. `cs.LG`.
    pub code: &'static str,
    /// Human-readable name.
    pub description: &'static str,
}

/// Categories accepted by `--categories`, in display order.
pub const CATEGORIES: &[Category] = &[
    Category { code: "cs.AI", description: "Artificial Intelligence" },
    Category { code: "cs.LG", description: "Machine Learning" },
    Category { code: "cs.CV", description: "Computer Vision and Pattern Recognition" },
    Category { code: "cs.CL", description: "Computation and Language" },
    Category { code: "cs.NE", description: "Neural and Evolutionary Computing" },
    Category { code: "stat.ML", description: "Machine Learning (Statistics)" },
    Category { code: "math.ST", description: "Statistics Theory" },
    Category { code: "physics.data-an", description: "Data Analysis, Statistics and Probability" },
    Category { code: "q-bio.QM", description: "Quantitative Methods" },
    Category { code: "econ.EM", description: "Econometrics" },
    Category { code: "cs.CR", description: "Cryptography and Security" },
    Category { code: "cs.DB", description: "Databases" },
    Category { code: "cs.IR", description: "Information Retrieval" },
    Category { code: "cs.SE", description: "Software Engineering" },
    Category { code: "cs.SY", description: "Systems and Control" },
    Category { code: "math.OC", description: "Optimization and Control" },
    Category { code: "stat.AP", description: "Applications" },
    Category { code: "physics.comp-ph", description: "Computational Physics" },
];

/// Looks up a catalog entry by code, ignoring ASCII case.
#[must_use]
pub fn find_category(code: &str) -> Option<&'static Category> {
    let code = code.trim();
    CATEGORIES
        .iter()
        .find(|category| category.code.eq_ignore_ascii_case(code))
}

/// Splits user-supplied codes into catalog codes and unknown codes.
///
/// Known codes come back in their canonical spelling, de-duplicated, in input
/// order. Blank entries are ignored.
#[must_use]
pub fn partition_categories<I, S>(codes: I) -> (Vec<&'static str>, Vec<String>)
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut known: Vec<&'static str> = Vec::new();
    let mut unknown = Vec::new();

    for raw in codes {
        let raw = raw.as_ref().trim();
        if raw.is_empty() {
            continue;
        }
        match find_category(raw) {
            Some(category) => {
                if !known.contains(&category.code) {
                    known.push(category.code);
                }
            }
            None => unknown.push(raw.to_string()),
        }
    }

    (known, unknown)
}

/// Returns the known codes and logs a warning for every unknown one.
pub(crate) fn known_categories<S: AsRef<str>>(codes: &[S]) -> Vec<&'static str> {
    let (known, unknown) = partition_categories(codes);
    for code in &unknown {
        warn!(category = %code, "ignoring unknown category; run `categories` to list valid codes");
    }
    known
}
