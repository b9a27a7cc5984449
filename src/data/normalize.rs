//! Row-level normalization steps used by the loader.
//!
//! Expandable columns hold a [`Cell`], which may temporarily be a list of
//! atomic values. [`explode`] turns each list into one row per member.

// ---------------------------------------------------------------------------
// Static label tables
// ---------------------------------------------------------------------------

/// A compound label and the atomic values it stands for.
#[derive(Debug, Clone, Copy)]
pub struct ExpansionRule {
    pub label: &'static str,
    pub members: &'static [&'static str],
}

impl ExpansionRule {
    /// Whether `value` is this rule's compound label, ignoring ASCII case.
    pub fn matches(&self, value: &str) -> bool {
        value.eq_ignore_ascii_case(self.label)
    }
}

pub const DIET_COMPOUND: ExpansionRule = ExpansionRule {
    label: "herbivorous/omnivorous",
    members: &["herbivorous", "omnivorous"],
};

pub const REGION_COMPOUND: ExpansionRule = ExpansionRule {
    label: "North Africa",
    members: &[
        "Algeria",
        "Morocco",
        "Tunisia",
        "Egypt",
        "Libya",
        "Sudan",
        "Western Sahara",
        "Mauritania",
        "South Sudan",
        "Chad",
    ],
};

/// Diets accepted as atomic, compared case-insensitively.
pub const ATOMIC_DIETS: &[&str] = &["herbivorous", "carnivorous", "omnivorous", "unknown"];

/// Old name → current name. Applied to whole cells of every column.
pub const ALIASES: &[(&str, &str)] = &[("USA", "United States"), ("Wales", "United Kingdom")];

/// Characters that make a country cell look like a multi-value label.
const LIST_SEPARATORS: &[char] = &['/', ',', ';'];

// ---------------------------------------------------------------------------
// Staged rows
// ---------------------------------------------------------------------------

/// An expandable cell: missing, a single value, or a list awaiting explode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Cell {
    Missing,
    Value(String),
    List(Vec<String>),
}

impl Cell {
    pub fn from_opt(s: Option<&str>) -> Self {
        match s {
            Some(v) => Cell::Value(v.to_string()),
            None => Cell::Missing,
        }
    }

    pub fn as_value(&self) -> Option<&str> {
        match self {
            Cell::Value(v) => Some(v),
            _ => None,
        }
    }
}

/// Columns that can carry compound labels, in the order they are expanded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpandColumn {
    Diet,
    LivedIn,
}

/// A dinosaur row between parsing and the canonical [`DinoRecord`](super::model::DinoRecord).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StagedRow {
    pub name: String,
    pub dino_type: String,
    pub diet: Cell,
    pub period: String,
    pub period_era: String,
    pub lived_in: Cell,
    pub link: String,
}

impl StagedRow {
    fn cell_mut(&mut self, column: ExpandColumn) -> &mut Cell {
        match column {
            ExpandColumn::Diet => &mut self.diet,
            ExpandColumn::LivedIn => &mut self.lived_in,
        }
    }

    /// Every plain-text field, for table-wide rewrites.
    fn text_fields_mut(&mut self) -> [&mut String; 5] {
        [
            &mut self.name,
            &mut self.dino_type,
            &mut self.period,
            &mut self.period_era,
            &mut self.link,
        ]
    }
}

// ---------------------------------------------------------------------------
// Steps
// ---------------------------------------------------------------------------

/// First two whitespace-separated tokens of a period string.
pub fn period_era(period: &str) -> String {
    period.split_whitespace().take(2).collect::<Vec<_>>().join(" ")
}

/// Upper-case the first letter of each space-separated word, lower-case the rest.
pub fn title_case(s: &str) -> String {
    s.split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first
                    .to_uppercase()
                    .chain(chars.flat_map(char::to_lowercase))
                    .collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

/// Whether a diet cell is acceptable before expansion.
pub fn is_known_diet(value: &str) -> bool {
    DIET_COMPOUND.matches(value)
        || ATOMIC_DIETS.iter().any(|d| value.eq_ignore_ascii_case(d))
}

/// Whether a country cell is acceptable before expansion.
pub fn is_known_country(value: &str) -> bool {
    REGION_COMPOUND.matches(value) || !value.contains(LIST_SEPARATORS)
}

/// Replace every cell in `column` matching `rule.label` with the list of members.
pub fn mark_compound(rows: &mut [StagedRow], column: ExpandColumn, rule: &ExpansionRule) {
    for row in rows.iter_mut() {
        let cell = row.cell_mut(column);
        if cell.as_value().is_some_and(|v| rule.matches(v)) {
            *cell = Cell::List(rule.members.iter().map(|m| m.to_string()).collect());
        }
    }
}

/// One output row per list member in `column`; other rows pass through.
/// Running it on a column without lists returns the rows unchanged.
pub fn explode(rows: Vec<StagedRow>, column: ExpandColumn) -> Vec<StagedRow> {
    let mut out = Vec::with_capacity(rows.len());
    for mut row in rows {
        match std::mem::replace(row.cell_mut(column), Cell::Missing) {
            Cell::List(members) => {
                for member in members {
                    let mut copy = row.clone();
                    *copy.cell_mut(column) = Cell::Value(member);
                    out.push(copy);
                }
            }
            other => {
                *row.cell_mut(column) = other;
                out.push(row);
            }
        }
    }
    out
}

/// Title-case `diet`, `name` and `type`.
pub fn title_case_fields(rows: &mut [StagedRow]) {
    for row in rows.iter_mut() {
        row.name = title_case(&row.name);
        row.dino_type = title_case(&row.dino_type);
        if let Cell::Value(d) = &row.diet {
            row.diet = Cell::Value(title_case(d));
        }
    }
}

/// Rewrite alias cells to their current name, in any column.
pub fn rewrite_aliases(rows: &mut [StagedRow]) {
    let rewrite = |s: &mut String| {
        if let Some((_, to)) = ALIASES.iter().find(|(from, _)| *s == *from) {
            *s = to.to_string();
        }
    };
    for row in rows.iter_mut() {
        for field in row.text_fields_mut() {
            rewrite(field);
        }
        for column in [ExpandColumn::Diet, ExpandColumn::LivedIn] {
            if let Cell::Value(v) = row.cell_mut(column) {
                rewrite(v);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn staged(diet: Option<&str>, lived_in: &str) -> StagedRow {
        StagedRow {
            name: "aardonyx".into(),
            dino_type: "sauropod".into(),
            diet: Cell::from_opt(diet),
            period: "Early Jurassic 199-189 million years ago".into(),
            period_era: "Early Jurassic".into(),
            lived_in: Cell::Value(lived_in.into()),
            link: "https://example.org/aardonyx".into(),
        }
    }

    #[test]
    fn test_period_era() {
        assert_eq!(period_era("Late Cretaceous 74-70 million years ago"), "Late Cretaceous");
        assert_eq!(period_era("Cretaceous"), "Cretaceous");
        assert_eq!(period_era("  Early   Jurassic  "), "Early Jurassic");
        assert_eq!(period_era(""), "");
    }

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("large theropod"), "Large Theropod");
        assert_eq!(title_case("HERBIVOROUS"), "Herbivorous");
        assert_eq!(title_case("t-rex"), "T-rex");
        assert_eq!(title_case(""), "");
    }

    #[test]
    fn test_known_labels() {
        assert!(is_known_diet("Herbivorous/Omnivorous"));
        assert!(is_known_diet("carnivorous"));
        assert!(!is_known_diet("piscivorous"));
        assert!(is_known_country("North Africa"));
        assert!(is_known_country("Mongolia"));
        assert!(!is_known_country("China/Mongolia"));
    }

    #[test]
    fn test_region_label_case_is_consistent() {
        for label in ["north africa", "NORTH AFRICA"] {
            assert!(is_known_country(label));
            let mut rows = vec![staged(None, label)];
            mark_compound(&mut rows, ExpandColumn::LivedIn, &REGION_COMPOUND);
            let rows = explode(rows, ExpandColumn::LivedIn);
            assert_eq!(rows.len(), REGION_COMPOUND.members.len());
        }
        assert!(DIET_COMPOUND.matches("HERBIVOROUS/omnivorous"));
        assert!(!REGION_COMPOUND.matches("North Africa East"));
    }

    #[test]
    fn test_explode_diet_keeps_other_fields() {
        let mut rows = vec![staged(Some("herbivorous/omnivorous"), "China")];
        mark_compound(&mut rows, ExpandColumn::Diet, &DIET_COMPOUND);
        let rows = explode(rows, ExpandColumn::Diet);

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].diet, Cell::Value("herbivorous".into()));
        assert_eq!(rows[1].diet, Cell::Value("omnivorous".into()));
        for r in &rows {
            assert_eq!(r.name, "aardonyx");
            assert_eq!(r.lived_in, Cell::Value("China".into()));
        }
    }

    #[test]
    fn test_explode_region_then_again_is_noop() {
        let mut rows = vec![staged(Some("carnivorous"), "North Africa"), staged(None, "India")];
        mark_compound(&mut rows, ExpandColumn::LivedIn, &REGION_COMPOUND);
        let once = explode(rows, ExpandColumn::LivedIn);
        assert_eq!(once.len(), REGION_COMPOUND.members.len() + 1);

        let twice = explode(once.clone(), ExpandColumn::LivedIn);
        assert_eq!(twice, once);
    }

    #[test]
    fn test_rewrite_aliases_any_column() {
        let mut rows = vec![staged(Some("carnivorous"), "USA"), staged(Some("carnivorous"), "Wales")];
        rows[0].name = "USA".into();
        rewrite_aliases(&mut rows);

        assert_eq!(rows[0].lived_in, Cell::Value("United States".into()));
        assert_eq!(rows[0].name, "United States");
        assert_eq!(rows[1].lived_in, Cell::Value("United Kingdom".into()));
    }

    #[test]
    fn test_alias_is_whole_cell_only() {
        let mut rows = vec![staged(Some("carnivorous"), "USA East")];
        rewrite_aliases(&mut rows);
        assert_eq!(rows[0].lived_in, Cell::Value("USA East".into()));
    }
}
