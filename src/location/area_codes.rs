//! Built-in area code table: NANP area codes to "City, ST" labels.
//!
//! The table also carries non-geographic service codes (toll free,
//! emergency, directory assistance, ...). Their labels are service names,
//! so a successful lookup does not always denote a place. Overlay codes
//! share the label of the region they overlay.

use super::types::{LocationError, Result, UNKNOWN_LOCATION};
use serde::de::{Deserializer, MapAccess, Visitor};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::path::Path;

// ─── Built-in dataset ───────────────────────────────────────────

/// Geographic codes, grouped by state.
const GEOGRAPHIC_CODES: &[(&str, &str)] = &[
    // California
    ("209", "Stockton, CA"),
    ("213", "Los Angeles, CA"),
    ("310", "Beverly Hills, CA"),
    ("323", "Los Angeles, CA"),
    ("408", "San Jose, CA"),
    ("415", "San Francisco, CA"),
    ("424", "Los Angeles, CA"),
    ("442", "Oceanside, CA"),
    ("510", "Oakland, CA"),
    ("530", "Chico, CA"),
    ("559", "Fresno, CA"),
    ("562", "Long Beach, CA"),
    ("619", "San Diego, CA"),
    ("626", "Pasadena, CA"),
    ("628", "San Francisco, CA"),
    ("650", "Palo Alto, CA"),
    ("657", "Orange County, CA"),
    ("661", "Bakersfield, CA"),
    ("669", "San Jose, CA"),
    ("707", "Santa Rosa, CA"),
    ("714", "Anaheim, CA"),
    ("747", "Los Angeles, CA"),
    ("760", "San Diego, CA"),
    ("805", "Santa Barbara, CA"),
    ("818", "Los Angeles, CA"),
    ("831", "Monterey, CA"),
    ("858", "La Jolla, CA"),
    ("909", "San Bernardino, CA"),
    ("916", "Sacramento, CA"),
    ("925", "Walnut Creek, CA"),
    ("949", "Irvine, CA"),
    ("951", "Riverside, CA"),
    ("935", "San Diego, CA"),

    // New York
    ("212", "New York City, NY"),
    ("315", "Syracuse, NY"),
    ("332", "New York City, NY"),
    ("347", "New York City, NY"),
    ("516", "Nassau County, NY"),
    ("518", "Albany, NY"),
    ("585", "Rochester, NY"),
    ("607", "Ithaca, NY"),
    ("631", "Suffolk County, NY"),
    ("646", "New York City, NY"),
    ("716", "Buffalo, NY"),
    ("718", "New York City, NY"),
    ("845", "Poughkeepsie, NY"),
    ("914", "Westchester County, NY"),
    ("917", "New York City, NY"),
    ("929", "New York City, NY"),

    // Texas
    ("210", "San Antonio, TX"),
    ("214", "Dallas, TX"),
    ("254", "Waco, TX"),
    ("281", "Houston, TX"),
    ("325", "Abilene, TX"),
    ("346", "Houston, TX"),
    ("361", "Corpus Christi, TX"),
    ("409", "Galveston, TX"),
    ("430", "Tyler, TX"),
    ("432", "Midland, TX"),
    ("469", "Dallas, TX"),
    ("512", "Austin, TX"),
    ("682", "Fort Worth, TX"),
    ("713", "Houston, TX"),
    ("737", "Austin, TX"),
    ("806", "Amarillo, TX"),
    ("817", "Fort Worth, TX"),
    ("830", "San Antonio, TX"),
    ("832", "Houston, TX"),
    ("903", "Tyler, TX"),
    ("915", "El Paso, TX"),
    ("936", "Conroe, TX"),
    ("940", "Denton, TX"),
    ("956", "Harlingen, TX"),
    ("972", "Dallas, TX"),
    ("979", "Bryan, TX"),

    // Florida
    ("239", "Fort Myers, FL"),
    ("305", "Miami, FL"),
    ("321", "Cape Canaveral, FL"),
    ("352", "Gainesville, FL"),
    ("386", "Lake City, FL"),
    ("407", "Orlando, FL"),
    ("561", "West Palm Beach, FL"),
    ("689", "Orlando, FL"),
    ("727", "St. Petersburg, FL"),
    ("754", "Fort Lauderdale, FL"),
    ("772", "St. Lucie, FL"),
    ("786", "Miami, FL"),
    ("813", "Tampa, FL"),
    ("850", "Tallahassee, FL"),
    ("863", "Lakeland, FL"),
    ("904", "Jacksonville, FL"),
    ("941", "Sarasota, FL"),
    ("954", "Fort Lauderdale, FL"),

    // Illinois
    ("217", "Springfield, IL"),
    ("224", "Evanston, IL"),
    ("312", "Chicago, IL"),
    ("331", "Chicago, IL"),
    ("464", "Chicago, IL"),
    ("618", "Centralia, IL"),
    ("630", "Chicago, IL"),
    ("708", "Chicago, IL"),
    ("773", "Chicago, IL"),
    ("779", "Rockford, IL"),
    ("815", "Rockford, IL"),
    ("847", "Evanston, IL"),
    ("872", "Chicago, IL"),

    // Pennsylvania
    ("215", "Philadelphia, PA"),
    ("223", "Harrisburg, PA"),
    ("267", "Philadelphia, PA"),
    ("272", "Wilkes-Barre, PA"),
    ("412", "Pittsburgh, PA"),
    ("484", "Allentown, PA"),
    ("570", "Wilkes-Barre, PA"),
    ("610", "Allentown, PA"),
    ("717", "Harrisburg, PA"),
    ("724", "Pittsburgh, PA"),
    ("814", "Erie, PA"),
    ("835", "Allentown, PA"),
    ("878", "Pittsburgh, PA"),

    // Ohio
    ("216", "Cleveland, OH"),
    ("220", "Ohio, OH"),
    ("234", "Canton, OH"),
    ("283", "Cincinnati, OH"),
    ("330", "Akron, OH"),
    ("380", "Columbus, OH"),
    ("419", "Toledo, OH"),
    ("440", "Cleveland, OH"),
    ("513", "Cincinnati, OH"),
    ("567", "Toledo, OH"),
    ("614", "Columbus, OH"),
    ("740", "Ohio, OH"),

    // Michigan
    ("231", "Traverse City, MI"),
    ("248", "Pontiac, MI"),
    ("269", "Kalamazoo, MI"),
    ("313", "Detroit, MI"),
    ("517", "Lansing, MI"),
    ("586", "Macomb County, MI"),
    ("616", "Grand Rapids, MI"),
    ("734", "Ann Arbor, MI"),
    ("810", "Flint, MI"),
    ("906", "Sault Ste. Marie, MI"),
    ("947", "Oakland County, MI"),
    ("989", "Mt Pleasant, MI"),

    // Georgia
    ("229", "Albany, GA"),
    ("404", "Atlanta, GA"),
    ("470", "Atlanta, GA"),
    ("478", "Macon, GA"),
    ("678", "Atlanta, GA"),
    ("706", "Columbus, GA"),
    ("762", "Columbus, GA"),
    ("770", "Atlanta, GA"),
    ("912", "Savannah, GA"),

    // North Carolina
    ("252", "Rocky Mount, NC"),
    ("336", "Greensboro, NC"),
    ("704", "Charlotte, NC"),
    ("743", "Greensboro, NC"),
    ("828", "Asheville, NC"),
    ("910", "Fayetteville, NC"),
    ("919", "Raleigh, NC"),
    ("980", "Charlotte, NC"),
    ("984", "Raleigh, NC"),

    // Virginia
    ("276", "Bristol, VA"),
    ("434", "Charlottesville, VA"),
    ("540", "Roanoke, VA"),
    ("571", "Arlington, VA"),
    ("703", "Arlington, VA"),
    ("757", "Norfolk, VA"),
    ("804", "Richmond, VA"),

    // Maryland
    ("240", "Silver Spring, MD"),
    ("301", "Silver Spring, MD"),
    ("410", "Baltimore, MD"),
    ("443", "Baltimore, MD"),
    ("667", "Baltimore, MD"),

    // New Jersey
    ("201", "Jersey City, NJ"),
    ("551", "Jersey City, NJ"),
    ("609", "Trenton, NJ"),
    ("732", "New Brunswick, NJ"),
    ("848", "New Brunswick, NJ"),
    ("856", "Camden, NJ"),
    ("862", "Newark, NJ"),
    ("908", "Elizabeth, NJ"),
    ("973", "Newark, NJ"),

    // Massachusetts
    ("339", "Boston, MA"),
    ("351", "Boston, MA"),
    ("413", "Springfield, MA"),
    ("508", "Framingham, MA"),
    ("617", "Boston, MA"),
    ("774", "Framingham, MA"),
    ("781", "Boston, MA"),
    ("857", "Boston, MA"),
    ("978", "Boston, MA"),

    // Washington
    ("206", "Seattle, WA"),
    ("253", "Tacoma, WA"),
    ("360", "Olympia, WA"),
    ("425", "Everett, WA"),
    ("509", "Spokane, WA"),
    ("564", "Olympia, WA"),

    // Colorado
    ("303", "Denver, CO"),
    ("719", "Pueblo, CO"),
    ("720", "Denver, CO"),
    ("970", "Colorado, CO"),

    // Arizona
    ("480", "Phoenix, AZ"),
    ("520", "Tucson, AZ"),
    ("602", "Phoenix, AZ"),
    ("623", "Phoenix, AZ"),
    ("928", "Prescott, AZ"),

    // Nevada
    ("702", "Las Vegas, NV"),
    ("725", "Las Vegas, NV"),
    ("775", "Reno, NV"),

    // Oregon
    ("458", "Eugene, OR"),
    ("503", "Portland, OR"),
    ("541", "Eugene, OR"),
    ("971", "Portland, OR"),

    // Utah
    ("385", "Salt Lake City, UT"),
    ("435", "Utah, UT"),
    ("801", "Salt Lake City, UT"),

    // Idaho
    ("208", "Idaho, ID"),

    // Montana
    ("406", "Montana, MT"),

    // Wyoming
    ("307", "Wyoming, WY"),

    // South Dakota
    ("605", "South Dakota, SD"),

    // North Dakota
    ("701", "North Dakota, ND"),

    // Minnesota
    ("218", "Duluth, MN"),
    ("320", "Saint Cloud, MN"),
    ("507", "Rochester, MN"),
    ("612", "Minneapolis, MN"),
    ("651", "St. Paul, MN"),
    ("763", "Minneapolis, MN"),
    ("952", "Bloomington, MN"),

    // Wisconsin
    ("262", "Kenosha, WI"),
    ("414", "Milwaukee, WI"),
    ("608", "Madison, WI"),
    ("715", "Eau Claire, WI"),
    ("920", "Appleton, WI"),

    // Iowa
    ("319", "Cedar Rapids, IA"),
    ("515", "Des Moines, IA"),
    ("563", "Davenport, IA"),
    ("641", "Mason City, IA"),
    ("712", "Council Bluffs, IA"),

    // Missouri
    ("314", "St. Louis, MO"),
    ("417", "Springfield, MO"),
    ("573", "Missouri, MO"),
    ("636", "St. Louis, MO"),
    ("660", "Missouri, MO"),
    ("816", "Kansas City, MO"),
    ("975", "Kansas City, MO"),

    // Kansas
    ("316", "Wichita, KS"),
    ("620", "Wichita, KS"),
    ("785", "Topeka, KS"),
    ("913", "Kansas City, KS"),

    // Nebraska
    ("308", "North Platte, NE"),
    ("402", "Omaha, NE"),

    // Oklahoma
    ("405", "Oklahoma City, OK"),
    ("539", "Tulsa, OK"),
    ("580", "Oklahoma, OK"),
    ("918", "Tulsa, OK"),

    // Arkansas
    ("479", "Fort Smith, AR"),
    ("501", "Little Rock, AR"),
    ("870", "Jonesboro, AR"),

    // Louisiana
    ("225", "Baton Rouge, LA"),
    ("318", "Shreveport, LA"),
    ("337", "Lake Charles, LA"),
    ("504", "New Orleans, LA"),
    ("985", "Hammond, LA"),

    // Mississippi
    ("228", "Biloxi, MS"),
    ("601", "Jackson, MS"),
    ("662", "Tupelo, MS"),
    ("769", "Jackson, MS"),

    // Alabama
    ("205", "Birmingham, AL"),
    ("251", "Mobile, AL"),
    ("256", "Huntsville, AL"),
    ("334", "Montgomery, AL"),

    // Tennessee
    ("423", "Chattanooga, TN"),
    ("615", "Nashville, TN"),
    ("629", "Nashville, TN"),
    ("731", "Tennessee, TN"),
    ("865", "Knoxville, TN"),
    ("901", "Memphis, TN"),
    ("931", "Tennessee, TN"),

    // Kentucky
    ("270", "Bowling Green, KY"),
    ("502", "Louisville, KY"),
    ("606", "Ashland, KY"),
    ("859", "Lexington, KY"),

    // Indiana
    ("219", "Gary, IN"),
    ("260", "Fort Wayne, IN"),
    ("317", "Indianapolis, IN"),
    ("574", "Elkhart, IN"),
    ("765", "Indiana, IN"),
    ("812", "Evansville, IN"),

    // South Carolina
    ("803", "Columbia, SC"),
    ("843", "Charleston, SC"),
    ("864", "Greenville, SC"),

    // West Virginia
    ("304", "West Virginia, WV"),
    ("681", "West Virginia, WV"),

    // Delaware
    ("302", "Delaware, DE"),

    // Rhode Island
    ("401", "Rhode Island, RI"),

    // Connecticut
    ("203", "Bridgeport, CT"),
    ("475", "New Haven, CT"),
    ("860", "Connecticut, CT"),
    ("959", "Hartford, CT"),

    // Maine
    ("207", "Maine, ME"),

    // New Hampshire
    ("603", "New Hampshire, NH"),

    // Vermont
    ("802", "Vermont, VT"),

    // Alaska
    ("907", "Alaska, AK"),

    // Hawaii
    ("808", "Hawaii, HI"),

    // New Mexico
    ("505", "Albuquerque, NM"),
    ("575", "Las Cruces, NM"),
    ("957", "New Mexico, NM"),
];

/// Non-geographic service codes. Labels are service names, not places.
const SPECIAL_CODES: &[(&str, &str)] = &[
    ("211", "Community Info"),
    ("311", "Special Applications"),
    ("411", "Special Applications"),
    ("500", "Personal Communication"),
    ("555", "Directory Assistance"),
    ("700", "Interexchange Carrier"),
    ("710", "US Government"),
    ("711", "Telecommunications Relay"),
    ("800", "Toll Free"),
    ("811", "Special Applications"),
    ("822", "Toll Free"),
    ("833", "Toll Free"),
    ("844", "Toll Free"),
    ("855", "Toll Free"),
    ("866", "Toll Free"),
    ("877", "Toll Free"),
    ("888", "Toll Free"),
    ("900", "Toll Calls"),
    ("911", "Emergency"),
    ("976", "Unassigned"),
    ("999", "Unavailable"),
];

// ─── Table ──────────────────────────────────────────────────────

/// Whether a code denotes a place or a service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AreaCodeKind {
    Geographic,
    Special,
}

/// One row of the table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AreaCodeEntry {
    pub code: String,
    pub label: String,
    pub kind: AreaCodeKind,
}

/// Immutable area code lookup table.
///
/// Built once at startup and shared by reference; nothing mutates it after
/// construction.
#[derive(Debug, Clone)]
pub struct AreaCodeTable {
    entries: BTreeMap<String, AreaCodeEntry>,
}

impl AreaCodeTable {
    /// The bundled table.
    pub fn builtin() -> Self {
        let rows = GEOGRAPHIC_CODES
            .iter()
            .map(|(code, label)| (*code, *label, AreaCodeKind::Geographic))
            .chain(
                SPECIAL_CODES
                    .iter()
                    .map(|(code, label)| (*code, *label, AreaCodeKind::Special)),
            )
            .map(|(code, label, kind)| {
                let entry = AreaCodeEntry {
                    code: code.to_string(),
                    label: label.to_string(),
                    kind,
                };
                (entry.code.clone(), entry)
            })
            .collect();
        Self { entries: rows }
    }

    /// Build a table from `(code, label, kind)` rows.
    ///
    /// Every code must be exactly three ASCII digits, every label non-blank,
    /// and no code may appear twice.
    pub fn from_entries<I, C, L>(rows: I) -> Result<Self>
    where
        I: IntoIterator<Item = (C, L, AreaCodeKind)>,
        C: Into<String>,
        L: Into<String>,
    {
        let mut entries = BTreeMap::new();
        for (code, label, kind) in rows {
            let code = code.into();
            let label = label.into();
            if !is_area_code(&code) {
                return Err(LocationError::InvalidTable(format!(
                    "'{}' is not a 3-digit area code",
                    code
                )));
            }
            if label.trim().is_empty() {
                return Err(LocationError::InvalidTable(format!(
                    "area code {} has an empty label",
                    code
                )));
            }
            if entries.contains_key(&code) {
                return Err(LocationError::InvalidTable(format!(
                    "duplicate area code {}",
                    code
                )));
            }
            let entry = AreaCodeEntry { code: code.clone(), label, kind };
            entries.insert(code, entry);
        }
        Ok(Self { entries })
    }

    /// Parse a JSON object of `{"212": "New York City, NY", ...}`.
    ///
    /// Rows whose label matches one of the built-in service labels are
    /// marked [`AreaCodeKind::Special`].
    pub fn from_json_str(json: &str) -> Result<Self> {
        let JsonRows(rows) = serde_json::from_str(json)
            .map_err(|e| LocationError::InvalidTable(e.to_string()))?;
        Self::from_entries(rows.into_iter().map(|(code, label)| {
            let kind = if is_special_label(&label) {
                AreaCodeKind::Special
            } else {
                AreaCodeKind::Geographic
            };
            (code, label, kind)
        }))
    }

    /// Load a JSON table from disk.
    pub fn load_json(path: impl AsRef<Path>) -> Result<Self> {
        let data = fs::read_to_string(path)?;
        Self::from_json_str(&data)
    }

    /// Merge another table into this one. Rows from `other` win.
    pub fn with_overrides(mut self, other: AreaCodeTable) -> Self {
        self.entries.extend(other.entries);
        self
    }

    /// Label for an area code, or "Unknown Location" for anything absent,
    /// malformed codes included.
    pub fn lookup(&self, area_code: &str) -> &str {
        self.entries
            .get(area_code)
            .map(|e| e.label.as_str())
            .unwrap_or(UNKNOWN_LOCATION)
    }

    pub fn get(&self, area_code: &str) -> Option<&AreaCodeEntry> {
        self.entries.get(area_code)
    }

    /// Entries in ascending code order.
    pub fn iter(&self) -> impl Iterator<Item = &AreaCodeEntry> {
        self.entries.values()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for AreaCodeTable {
    fn default() -> Self {
        Self::builtin()
    }
}

/// JSON object rows in document order. Repeated keys are kept so that
/// `from_entries` can reject them.
struct JsonRows(Vec<(String, String)>);

impl<'de> Deserialize<'de> for JsonRows {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct RowsVisitor;

        impl<'de> Visitor<'de> for RowsVisitor {
            type Value = JsonRows;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("an object mapping area codes to labels")
            }

            fn visit_map<A>(self, mut map: A) -> std::result::Result<JsonRows, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut rows = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some((code, label)) = map.next_entry::<String, String>()? {
                    rows.push((code, label));
                }
                Ok(JsonRows(rows))
            }
        }

        deserializer.deserialize_map(RowsVisitor)
    }
}

/// Exactly three ASCII digits.
pub fn is_area_code(s: &str) -> bool {
    s.len() == 3 && s.bytes().all(|b| b.is_ascii_digit())
}

fn is_special_label(label: &str) -> bool {
    SPECIAL_CODES.iter().any(|(_, l)| l.eq_ignore_ascii_case(label.trim()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use tempfile::TempDir;

    #[test]
    fn test_lookup_known_codes() {
        let table = AreaCodeTable::builtin();
        assert_eq!(table.lookup("212"), "New York City, NY");
        assert_eq!(table.lookup("800"), "Toll Free");
        assert_eq!(table.lookup("415"), "San Francisco, CA");
    }

    #[test]
    fn test_lookup_unknown_and_malformed() {
        let table = AreaCodeTable::builtin();
        assert_eq!(table.lookup("000"), UNKNOWN_LOCATION);
        assert_eq!(table.lookup(""), UNKNOWN_LOCATION);
        assert_eq!(table.lookup("21"), UNKNOWN_LOCATION);
        assert_eq!(table.lookup("2125"), UNKNOWN_LOCATION);
        assert_eq!(table.lookup("abc"), UNKNOWN_LOCATION);
    }

    #[test]
    fn test_overlay_codes_share_label() {
        let table = AreaCodeTable::builtin();
        for code in ["212", "332", "347", "646", "718", "917", "929"] {
            assert_eq!(table.lookup(code), "New York City, NY", "code {}", code);
        }
    }

    #[test]
    fn test_special_codes_are_not_places() {
        let table = AreaCodeTable::builtin();
        let emergency = table.get("911").unwrap();
        assert_eq!(emergency.label, "Emergency");
        assert_eq!(emergency.kind, AreaCodeKind::Special);
        assert_eq!(table.get("555").unwrap().label, "Directory Assistance");
        assert_eq!(table.get("710").unwrap().label, "US Government");
        assert_eq!(table.get("976").unwrap().label, "Unassigned");
        assert_eq!(table.get("212").unwrap().kind, AreaCodeKind::Geographic);
    }

    #[test]
    fn test_builtin_keys_are_three_digits_and_unique() {
        let mut seen = HashSet::new();
        for (code, label) in GEOGRAPHIC_CODES.iter().chain(SPECIAL_CODES) {
            assert!(is_area_code(code), "bad key {}", code);
            assert!(!label.trim().is_empty(), "empty label for {}", code);
            assert!(seen.insert(*code), "duplicate key {}", code);
        }
        assert_eq!(AreaCodeTable::builtin().len(), seen.len());
    }

    #[test]
    fn test_iter_sorted() {
        let table = AreaCodeTable::builtin();
        let codes: Vec<&str> = table.iter().map(|e| e.code.as_str()).collect();
        let mut sorted = codes.clone();
        sorted.sort();
        assert_eq!(codes, sorted);
    }

    #[test]
    fn test_from_entries_rejects_bad_rows() {
        let bad_key = AreaCodeTable::from_entries([("12", "Nowhere", AreaCodeKind::Geographic)]);
        assert!(matches!(bad_key, Err(LocationError::InvalidTable(_))));

        let bad_label = AreaCodeTable::from_entries([("123", "  ", AreaCodeKind::Geographic)]);
        assert!(matches!(bad_label, Err(LocationError::InvalidTable(_))));

        let dup = AreaCodeTable::from_entries([
            ("123", "A", AreaCodeKind::Geographic),
            ("123", "B", AreaCodeKind::Geographic),
        ]);
        assert!(matches!(dup, Err(LocationError::InvalidTable(_))));
    }

    #[test]
    fn test_from_json_marks_special_labels() {
        let table = AreaCodeTable::from_json_str(r#"{"123": "Test City, TS", "456": "toll free"}"#).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.get("123").unwrap().kind, AreaCodeKind::Geographic);
        assert_eq!(table.get("456").unwrap().kind, AreaCodeKind::Special);
    }

    #[test]
    fn test_from_json_invalid() {
        assert!(AreaCodeTable::from_json_str("[1, 2]").is_err());
        assert!(AreaCodeTable::from_json_str(r#"{"1234": "Too Long"}"#).is_err());
    }

    #[test]
    fn test_from_json_rejects_duplicate_codes() {
        let result = AreaCodeTable::from_json_str(r#"{"212": "Manhattan, NY", "212": "Brooklyn, NY"}"#);
        match result {
            Err(LocationError::InvalidTable(msg)) => assert!(msg.contains("duplicate area code 212")),
            other => panic!("expected duplicate rejection, got {:?}", other.map(|t| t.len())),
        }
    }

    #[test]
    fn test_load_json_duplicate_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("dup.json");
        fs::write(&path, "{\n  \"415\": \"San Francisco, CA\",\n  \"415\": \"Oakland, CA\"\n}").unwrap();
        assert!(matches!(AreaCodeTable::load_json(&path), Err(LocationError::InvalidTable(_))));
    }

    #[test]
    fn test_load_json_and_override() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("codes.json");
        fs::write(&path, r#"{"212": "Manhattan, NY", "000": "Test Range"}"#).unwrap();

        let custom = AreaCodeTable::load_json(&path).unwrap();
        let table = AreaCodeTable::builtin().with_overrides(custom);
        assert_eq!(table.lookup("212"), "Manhattan, NY");
        assert_eq!(table.lookup("000"), "Test Range");
        assert_eq!(table.lookup("347"), "New York City, NY");
    }

    #[test]
    fn test_load_json_missing_file() {
        let dir = TempDir::new().unwrap();
        let result = AreaCodeTable::load_json(dir.path().join("missing.json"));
        assert!(matches!(result, Err(LocationError::Io(_))));
    }
}
