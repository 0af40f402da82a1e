//! Canton code lookup.

/// The 26 Swiss cantons: two-letter code and the full name used by the
/// boundary file's `kan_name` property.
pub const CANTON_NAMES: [(&str, &str); 26] = [
    ("TG", "Thurgau"),
    ("GR", "Graubünden"),
    ("LU", "Luzern"),
    ("BE", "Bern"),
    ("VS", "Valais"),
    ("BL", "Basel-Landschaft"),
    ("SO", "Solothurn"),
    ("VD", "Vaud"),
    ("SH", "Schaffhausen"),
    ("ZH", "Zürich"),
    ("AG", "Aargau"),
    ("UR", "Uri"),
    ("NE", "Neuchâtel"),
    ("TI", "Ticino"),
    ("SG", "St. Gallen"),
    ("GE", "Genève"),
    ("GL", "Glarus"),
    ("JU", "Jura"),
    ("ZG", "Zug"),
    ("OW", "Obwalden"),
    ("FR", "Fribourg"),
    ("SZ", "Schwyz"),
    ("AR", "Appenzell Ausserrhoden"),
    ("AI", "Appenzell Innerrhoden"),
    ("NW", "Nidwalden"),
    ("BS", "Basel-Stadt"),
];

/// Full canton name for a two-letter code. Exact match, no trimming.
pub fn canton_name(code: &str) -> Option<&'static str> {
    CANTON_NAMES
        .iter()
        .find(|(c, _)| *c == code)
        .map(|(_, name)| *name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_all_codes_unique() {
        let codes: HashSet<&str> = CANTON_NAMES.iter().map(|(c, _)| *c).collect();
        let names: HashSet<&str> = CANTON_NAMES.iter().map(|(_, n)| *n).collect();
        assert_eq!(codes.len(), 26);
        assert_eq!(names.len(), 26);
    }

    #[test]
    fn test_lookup() {
        assert_eq!(canton_name("ZH"), Some("Zürich"));
        assert_eq!(canton_name("AI"), Some("Appenzell Innerrhoden"));
        assert_eq!(canton_name("zh"), None);
        assert_eq!(canton_name("XX"), None);
    }
}
