//! Country-to-language collaborator. The extractor recovers from lookup
//! failures locally, so implementations just report unknown codes.

use std::{error, fmt};

use phf::phf_map;

#[derive(Debug, Clone)]
pub struct UnknownCountry(pub String);

impl fmt::Display for UnknownCountry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "no language known for country code: {}", self.0)
    }
}

impl error::Error for UnknownCountry {}

pub trait CountryLanguages: Send + Sync {
    /// Maps a three-letter country code to a language code.
    fn language_for(&self, country: &str) -> Result<&str, UnknownCountry>;
}

/// ISO 3166-1 alpha-3 country code → ISO 639-1 code of the country's
/// main language, for the countries the feed actually covers.
static LANGUAGE_TABLE: phf::Map<&'static str, &'static str> = phf_map! {
    "AUT" => "de",
    "BEL" => "nl",
    "BGR" => "bg",
    "CHE" => "de",
    "CZE" => "cs",
    "DEU" => "de",
    "DNK" => "da",
    "ESP" => "es",
    "EST" => "et",
    "FIN" => "fi",
    "FRA" => "fr",
    "GBR" => "en",
    "GRC" => "el",
    "HRV" => "hr",
    "HUN" => "hu",
    "IRL" => "en",
    "ITA" => "it",
    "LTU" => "lt",
    "LUX" => "fr",
    "LVA" => "lv",
    "NLD" => "nl",
    "NOR" => "no",
    "POL" => "pl",
    "PRT" => "pt",
    "ROU" => "ro",
    "SVK" => "sk",
    "SVN" => "sl",
    "SWE" => "sv",
    "USA" => "en",
};

/// Static table implementation used in production. The feed only ever
/// names countries, never languages directly.
#[derive(Debug, Clone, Copy, Default)]
pub struct IsoLanguageTable;

impl CountryLanguages for IsoLanguageTable {
    fn language_for(&self, country: &str) -> Result<&str, UnknownCountry> {
        LANGUAGE_TABLE
            .get(country)
            .copied()
            .ok_or_else(|| UnknownCountry(country.to_owned()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_countries_resolve() {
        let table = IsoLanguageTable;
        assert_eq!(table.language_for("DEU").unwrap(), "de");
        assert_eq!(table.language_for("GBR").unwrap(), "en");
        assert_eq!(table.language_for("FRA").unwrap(), "fr");
    }

    #[test]
    fn unknown_country_is_an_error() {
        let table = IsoLanguageTable;
        let why = table.language_for("XXX").unwrap_err();
        assert_eq!(why.0, "XXX");
    }
}
