//! Static canonicalization tables.
//!
//! Everything here is immutable data. Lookups are linear over small slices,
//! which keeps the tables readable and ordered.

/// Canonical units of measure, in their correct casing.
///
/// Includes every alias target so that cleaned output is a fixed point of
/// the unit normalizer.
pub const CANONICAL_UNITS: &[&str] = &[
    "Tablet",
    "Capsule",
    "Bottle",
    "Vial",
    "Ampoule",
    "Sachet",
    "Strip",
    "Pack",
    "Packet",
    "Box",
    "Carton",
    "Tin",
    "Can",
    "Jar",
    "Tube",
    "Ml",
    "Mg",
    "Litre",
    "G",
    "Kg",
    "Unit",
    "Lozenge",
    "Piece",
    "Pessary",
    "Kit",
    "Suppository",
    "Ointment",
    "Drop",
];

/// Lower-case alias → canonical unit.
pub const UNIT_ALIASES: &[(&str, &str)] = &[
    ("tab", "Tablet"),
    ("tablet", "Tablet"),
    ("tablets", "Tablet"),
    ("tabs", "Tablet"),
    ("tb", "Tablet"),
    ("tbs", "Tablet"),
    ("tbl", "Tablet"),
    ("tbt", "Tablet"),
    ("caplet", "Tablet"),
    ("caplets", "Tablet"),
    ("loz", "Lozenge"),
    ("lozenge", "Lozenge"),
    ("troche", "Lozenge"),
    ("caps", "Capsule"),
    ("cp", "Capsule"),
    ("capsule", "Capsule"),
    ("capsules", "Capsule"),
    ("bottle", "Bottle"),
    ("bottles", "Bottle"),
    ("btl", "Bottle"),
    ("vial", "Vial"),
    ("vials", "Vial"),
    ("amps", "Ampoule"),
    ("ampoule", "Ampoule"),
    ("ampul", "Ampoule"),
    ("ampule", "Ampoule"),
    ("ampules", "Ampoule"),
    ("sachet", "Sachet"),
    ("sachets", "Sachet"),
    ("satchet", "Sachet"),
    ("satchets", "Sachet"),
    ("strip", "Strip"),
    ("strips", "Strip"),
    ("blister", "Strip"),
    ("blisters", "Strip"),
    ("pack", "Pack"),
    ("packs", "Pack"),
    ("pkt", "Pack"),
    ("paket", "Packet"),
    ("box", "Box"),
    ("boxes", "Box"),
    ("bx", "Box"),
    ("ctn", "Carton"),
    ("tin", "Tin"),
    ("can", "Can"),
    ("jar", "Jar"),
    ("tube", "Tube"),
    ("tubes", "Tube"),
    ("millilitre", "Ml"),
    ("mls", "Ml"),
    ("syrup", "Ml"),
    ("suspension", "Ml"),
    ("susp", "Ml"),
    ("sol", "Ml"),
    ("solution", "Ml"),
    ("infusion", "Ml"),
    ("injection", "Ml"),
    ("cc", "Ml"),
    ("emulsion", "Ml"),
    ("drop", "Drop"),
    ("drops", "Drop"),
    ("oint", "Ointment"),
    ("crm", "Tube"),
    ("cream", "Tube"),
    ("gel", "Tube"),
    ("l", "Litre"),
    ("litre", "Litre"),
    ("liters", "Litre"),
    ("ltr", "Litre"),
    ("lts", "Litre"),
    ("mgs", "Mg"),
    ("milligram", "Mg"),
    ("gram", "G"),
    ("gm", "G"),
    ("grm", "G"),
    ("gr", "G"),
    ("kilo", "Kg"),
    ("kilos", "Kg"),
    ("kilogram", "Kg"),
    ("kilogrammes", "Kg"),
    ("pc", "Piece"),
    ("pcs", "Piece"),
    ("piece", "Piece"),
    ("pce", "Piece"),
    ("supp", "Suppository"),
    ("supps", "Suppository"),
    ("supository", "Suppository"),
    ("pessary", "Pessary"),
    ("ovule", "Pessary"),
    ("kit", "Kit"),
];

/// VAT type spellings accepted verbatim.
pub const VALID_VAT_TYPES: &[&str] = &["VAT Exempt", "Standard VAT", "Zero Rated", "Exempt"];

/// Words re-emitted in upper case by the title-caser.
pub const UPPERCASE_WORDS: &[&str] = &["VAT", "DR", "MR", "MRS", "MS", "CEO", "CFO"];

/// Words ignored when comparing account names.
pub const FILLER_WORDS: &[&str] = &["the", "and", "&", "for", "to", "in", "of"];

/// Shortest alias key allowed to match as a prefix.
pub const MIN_PREFIX_ALIAS_LEN: usize = 3;

pub fn is_canonical_unit(value: &str) -> bool {
    CANONICAL_UNITS.contains(&value)
}

/// Canonical unit for an exact lower-case alias key.
pub fn alias_target(key: &str) -> Option<&'static str> {
    UNIT_ALIASES
        .iter()
        .find(|(alias, _)| *alias == key)
        .map(|(_, canonical)| *canonical)
}

/// Every alias that maps to `canonical`, in table order.
pub fn aliases_of(canonical: &str) -> Vec<&'static str> {
    UNIT_ALIASES
        .iter()
        .filter(|(_, target)| *target == canonical)
        .map(|(alias, _)| *alias)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_alias_target_is_canonical() {
        for (alias, target) in UNIT_ALIASES {
            assert!(is_canonical_unit(target), "{alias} maps to unknown {target}");
        }
    }

    #[test]
    fn alias_keys_are_unique_and_lower_case() {
        let mut seen = std::collections::BTreeSet::new();
        for (alias, _) in UNIT_ALIASES {
            assert_eq!(*alias, alias.to_lowercase());
            assert!(seen.insert(*alias), "duplicate alias {alias}");
        }
    }

    #[test]
    fn aliases_of_tablet() {
        let aliases = aliases_of("Tablet");
        assert!(aliases.contains(&"tabs"));
        assert!(aliases.contains(&"caplet"));
        assert!(!aliases.contains(&"caps"));
    }
}
