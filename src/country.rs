//! Country alias table and country extraction.
//!
//! The table maps abbreviations, demonyms and ISO 3166 short names to a
//! canonical country name. It is built once and shared read-only.

use regex::Regex;
use std::collections::BTreeSet;
use std::sync::OnceLock;

/// Curated abbreviations.
const ABBREVIATIONS: &[(&str, &str)] = &[
    ("US", "United States"),
    ("USA", "United States"),
    ("U.S.", "United States"),
    ("UK", "United Kingdom"),
    ("U.K.", "United Kingdom"),
    ("UAE", "United Arab Emirates"),
    ("KSA", "Saudi Arabia"),
    ("MY", "Malaysia"),
];

/// Curated demonyms.
const DEMONYMS: &[(&str, &str)] = &[
    ("Mexican", "Mexico"),
    ("Brazilian", "Brazil"),
    ("German", "Germany"),
    ("Colombian", "Colombia"),
    ("Thai", "Thailand"),
    ("Malaysian", "Malaysia"),
    ("Indonesian", "Indonesia"),
    ("Irish", "Ireland"),
    ("Spanish", "Spain"),
    ("Portuguese", "Portugal"),
    ("South African", "South Africa"),
    ("Moroccan", "Morocco"),
    ("Chinese", "China"),
    ("Indian", "India"),
    ("South Korean", "South Korea"),
    ("American", "United States"),
    ("British", "United Kingdom"),
    ("Vietnamese", "Vietnam"),
    ("Russian", "Russian Federation"),
    ("French", "France"),
    ("Israeli", "Israel"),
    ("Israelis", "Israel"),
    ("Romanian", "Romania"),
    ("Canadian", "Canada"),
    ("Venezuela", "Venezuela"),
];

/// ISO 3166-1 short names; each maps to itself.
const ISO_NAMES: &[&str] = &[
    "Aruba",
    "Afghanistan",
    "Angola",
    "Anguilla",
    "Åland Islands",
    "Albania",
    "Andorra",
    "United Arab Emirates",
    "Argentina",
    "Armenia",
    "American Samoa",
    "Antarctica",
    "French Southern Territories",
    "Antigua and Barbuda",
    "Australia",
    "Austria",
    "Azerbaijan",
    "Burundi",
    "Belgium",
    "Benin",
    "Bonaire, Sint Eustatius and Saba",
    "Burkina Faso",
    "Bangladesh",
    "Bulgaria",
    "Bahrain",
    "Bahamas",
    "Bosnia and Herzegovina",
    "Saint Barthélemy",
    "Belarus",
    "Belize",
    "Bermuda",
    "Bolivia, Plurinational State of",
    "Brazil",
    "Barbados",
    "Brunei Darussalam",
    "Bhutan",
    "Bouvet Island",
    "Botswana",
    "Central African Republic",
    "Canada",
    "Cocos (Keeling) Islands",
    "Switzerland",
    "Chile",
    "China",
    "Côte d'Ivoire",
    "Cameroon",
    "Congo, The Democratic Republic of the",
    "Congo",
    "Cook Islands",
    "Colombia",
    "Comoros",
    "Cabo Verde",
    "Costa Rica",
    "Cuba",
    "Curaçao",
    "Christmas Island",
    "Cayman Islands",
    "Cyprus",
    "Czechia",
    "Germany",
    "Djibouti",
    "Dominica",
    "Denmark",
    "Dominican Republic",
    "Algeria",
    "Ecuador",
    "Egypt",
    "Eritrea",
    "Western Sahara",
    "Spain",
    "Estonia",
    "Ethiopia",
    "Finland",
    "Fiji",
    "Falkland Islands (Malvinas)",
    "France",
    "Faroe Islands",
    "Micronesia, Federated States of",
    "Gabon",
    "United Kingdom",
    "Georgia",
    "Guernsey",
    "Ghana",
    "Gibraltar",
    "Guinea",
    "Guadeloupe",
    "Gambia",
    "Guinea-Bissau",
    "Equatorial Guinea",
    "Greece",
    "Grenada",
    "Greenland",
    "Guatemala",
    "French Guiana",
    "Guam",
    "Guyana",
    "Hong Kong",
    "Heard Island and McDonald Islands",
    "Honduras",
    "Croatia",
    "Haiti",
    "Hungary",
    "Indonesia",
    "Isle of Man",
    "India",
    "British Indian Ocean Territory",
    "Ireland",
    "Iran, Islamic Republic of",
    "Iraq",
    "Iceland",
    "Israel",
    "Italy",
    "Jamaica",
    "Jersey",
    "Jordan",
    "Japan",
    "Kazakhstan",
    "Kenya",
    "Kyrgyzstan",
    "Cambodia",
    "Kiribati",
    "Saint Kitts and Nevis",
    "Korea, Republic of",
    "Kuwait",
    "Lao People's Democratic Republic",
    "Lebanon",
    "Liberia",
    "Libya",
    "Saint Lucia",
    "Liechtenstein",
    "Sri Lanka",
    "Lesotho",
    "Lithuania",
    "Luxembourg",
    "Latvia",
    "Macao",
    "Saint Martin (French part)",
    "Morocco",
    "Monaco",
    "Moldova, Republic of",
    "Madagascar",
    "Maldives",
    "Mexico",
    "Marshall Islands",
    "North Macedonia",
    "Mali",
    "Malta",
    "Myanmar",
    "Montenegro",
    "Mongolia",
    "Northern Mariana Islands",
    "Mozambique",
    "Mauritania",
    "Montserrat",
    "Martinique",
    "Mauritius",
    "Malawi",
    "Malaysia",
    "Mayotte",
    "Namibia",
    "New Caledonia",
    "Niger",
    "Norfolk Island",
    "Nigeria",
    "Nicaragua",
    "Niue",
    "Netherlands",
    "Norway",
    "Nepal",
    "Nauru",
    "New Zealand",
    "Oman",
    "Pakistan",
    "Panama",
    "Pitcairn",
    "Peru",
    "Philippines",
    "Palau",
    "Papua New Guinea",
    "Poland",
    "Puerto Rico",
    "Korea, Democratic People's Republic of",
    "Portugal",
    "Paraguay",
    "Palestine, State of",
    "French Polynesia",
    "Qatar",
    "Réunion",
    "Romania",
    "Russian Federation",
    "Rwanda",
    "Saudi Arabia",
    "Sudan",
    "Senegal",
    "Singapore",
    "South Georgia and the South Sandwich Islands",
    "Saint Helena, Ascension and Tristan da Cunha",
    "Svalbard and Jan Mayen",
    "Solomon Islands",
    "Sierra Leone",
    "El Salvador",
    "San Marino",
    "Somalia",
    "Saint Pierre and Miquelon",
    "Serbia",
    "South Sudan",
    "Sao Tome and Principe",
    "Suriname",
    "Slovakia",
    "Slovenia",
    "Sweden",
    "Eswatini",
    "Sint Maarten (Dutch part)",
    "Seychelles",
    "Syrian Arab Republic",
    "Turks and Caicos Islands",
    "Chad",
    "Togo",
    "Thailand",
    "Tajikistan",
    "Tokelau",
    "Turkmenistan",
    "Timor-Leste",
    "Tonga",
    "Trinidad and Tobago",
    "Tunisia",
    "Türkiye",
    "Tuvalu",
    "Taiwan, Province of China",
    "Tanzania, United Republic of",
    "Uganda",
    "Ukraine",
    "United States Minor Outlying Islands",
    "Uruguay",
    "United States",
    "Uzbekistan",
    "Holy See (Vatican City State)",
    "Saint Vincent and the Grenadines",
    "Venezuela, Bolivarian Republic of",
    "Virgin Islands, British",
    "Virgin Islands, U.S.",
    "Viet Nam",
    "Vanuatu",
    "Wallis and Futuna",
    "Samoa",
    "Yemen",
    "South Africa",
    "Zambia",
    "Zimbabwe",
];

/// One alias with its compiled whole-word matcher.
#[derive(Debug)]
struct AliasEntry {
    alias: String,
    canonical: String,
    pattern: Regex,
}

/// Immutable mapping from aliases to canonical country names.
#[derive(Debug)]
pub struct CountryAliases {
    entries: Vec<AliasEntry>,
}

impl CountryAliases {
    /// Build a table from `(alias, canonical)` pairs.
    ///
    /// A later pair with the same alias replaces the earlier canonical name.
    pub fn new<'a, I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut entries: Vec<AliasEntry> = Vec::new();
        for (alias, canonical) in pairs {
            if alias.trim().is_empty() {
                continue;
            }
            if let Some(existing) = entries.iter_mut().find(|e| e.alias == alias) {
                existing.canonical = canonical.to_string();
                continue;
            }
            let pattern = format!(r"(?i)\b{}\b", regex::escape(alias));
            match Regex::new(&pattern) {
                Ok(pattern) => entries.push(AliasEntry {
                    alias: alias.to_string(),
                    canonical: canonical.to_string(),
                    pattern,
                }),
                Err(e) => log::warn!("Skipping country alias {:?}: {}", alias, e),
            }
        }
        Self { entries }
    }

    /// The built-in table: abbreviations, demonyms and ISO names.
    pub fn builtin() -> &'static CountryAliases {
        static TABLE: OnceLock<CountryAliases> = OnceLock::new();
        TABLE.get_or_init(|| {
            let iso = ISO_NAMES.iter().map(|name| (*name, *name));
            CountryAliases::new(
                ABBREVIATIONS
                    .iter()
                    .chain(DEMONYMS.iter())
                    .copied()
                    .chain(iso),
            )
        })
    }

    /// Number of aliases.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the table is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Canonical name of an alias (exact match).
    pub fn canonical(&self, alias: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|e| e.alias == alias)
            .map(|e| e.canonical.as_str())
    }

    /// Canonical countries mentioned in `text`.
    ///
    /// Every alias is searched case-insensitively as a whole word; there is
    /// no disambiguation of aliases that double as ordinary words.
    pub fn extract(&self, text: &str) -> BTreeSet<String> {
        let mut found = BTreeSet::new();
        if text.is_empty() {
            return found;
        }
        for entry in &self.entries {
            if !found.contains(&entry.canonical) && entry.pattern.is_match(text) {
                found.insert(entry.canonical.clone());
            }
        }
        found
    }
}

/// Countries mentioned in `text`, using the built-in table.
pub fn extract_countries(text: &str) -> BTreeSet<String> {
    CountryAliases::builtin().extract(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(items: &[&str]) -> BTreeSet<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_full_name() {
        assert_eq!(
            extract_countries("a hospital in the United States was hit"),
            set(&["United States"])
        );
    }

    #[test]
    fn test_abbreviation_whole_word() {
        assert_eq!(extract_countries("targets US retailers"), set(&["United States"]));
        assert_eq!(extract_countries("USAGE statistics"), set(&[]));
        assert_eq!(extract_countries("a UK insurer"), set(&["United Kingdom"]));
    }

    #[test]
    fn test_case_insensitive() {
        assert_eq!(extract_countries("GERMANY and france"), set(&["France", "Germany"]));
    }

    #[test]
    fn test_demonyms() {
        assert_eq!(extract_countries("a German bank"), set(&["Germany"]));
        assert_eq!(extract_countries("Russian hosting"), set(&["Russian Federation"]));
        assert_eq!(
            extract_countries("a South African retailer"),
            set(&["South Africa"])
        );
    }

    #[test]
    fn test_ambiguous_alias_is_kept() {
        // "my" is an ordinary word but also the Malaysia abbreviation.
        assert_eq!(extract_countries("my data"), set(&["Malaysia"]));
    }

    #[test]
    fn test_multiple_countries() {
        let found = extract_countries("victims in Brazil, Mexico and India");
        assert_eq!(found, set(&["Brazil", "India", "Mexico"]));
    }

    #[test]
    fn test_no_match() {
        assert!(extract_countries("").is_empty());
        assert!(extract_countries("a ransomware loader").is_empty());
    }

    #[test]
    fn test_custom_table() {
        let table = CountryAliases::new([("Oz", "Australia"), ("Aussie", "Australia")]);
        assert_eq!(table.len(), 2);
        assert_eq!(table.canonical("Oz"), Some("Australia"));
        assert_eq!(table.extract("an aussie telco"), set(&["Australia"]));
    }

    #[test]
    fn test_builtin_is_shared() {
        let a = CountryAliases::builtin() as *const _;
        let b = CountryAliases::builtin() as *const _;
        assert_eq!(a, b);
        assert!(CountryAliases::builtin().len() > 200);
        assert_eq!(
            CountryAliases::builtin().canonical("Viet Nam"),
            Some("Viet Nam")
        );
    }
}
