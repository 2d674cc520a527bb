//! District coordinate table
//!
//! Fixed mapping of Kerala districts to centroid coordinates. The table is
//! built once at startup and injected through application state; lookups
//! are pure and perform no I/O.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use shared::GpsCoordinates;

use crate::error::{AppError, AppResult};

/// Immutable district-to-coordinates lookup table
#[derive(Debug, Clone)]
pub struct RegionTable {
    districts: BTreeMap<String, GpsCoordinates>,
}

fn d(mantissa: i64, scale: u32) -> Decimal {
    Decimal::new(mantissa, scale)
}

impl RegionTable {
    /// Build a table from arbitrary entries
    pub fn from_entries(entries: impl IntoIterator<Item = (String, GpsCoordinates)>) -> Self {
        Self {
            districts: entries.into_iter().collect(),
        }
    }

    /// The fourteen districts of Kerala with their centroid coordinates
    pub fn kerala() -> Self {
        let entries = [
            ("Thiruvananthapuram", d(8_524139, 6), d(76_936638, 6)),
            ("Kollam", d(8_893212, 6), d(76_614136, 6)),
            ("Alappuzha", d(9_498066, 6), d(76_338493, 6)),
            ("Pathanamthitta", d(92645, 4), d(76787, 3)),
            ("Kottayam", d(9_591566, 6), d(76_522116, 6)),
            ("Idukki", d(987862, 5), d(77_168903, 6)),
            ("Ernakulam", d(9_981634, 6), d(76_299872, 6)),
            ("Thrissur", d(10_527642, 6), d(76_214423, 6)),
            ("Palakkad", d(1_078666, 5), d(76_654778, 6)),
            ("Malappuram", d(11_072445, 6), d(76_062389, 6)),
            ("Kozhikode", d(11_258753, 6), d(75_780411, 6)),
            ("Wayanad", d(11_685455, 6), d(7_613266, 5)),
            ("Kannur", d(11_874521, 6), d(75_370369, 6)),
            ("Kasaragod", d(1_249858, 5), d(74_989059, 6)),
        ];

        Self::from_entries(
            entries
                .into_iter()
                .map(|(name, lat, lon)| (name.to_string(), GpsCoordinates::new(lat, lon))),
        )
    }

    /// Resolve a district name to its stored coordinates.
    ///
    /// Lookup is exact; an unrecognized name is a client input error, not
    /// a server fault, and is never retried.
    pub fn resolve(&self, district: &str) -> AppResult<GpsCoordinates> {
        self.districts
            .get(district)
            .cloned()
            .ok_or_else(|| AppError::UnknownDistrict(district.to_string()))
    }

    /// Iterate over all known districts
    pub fn iter(&self) -> impl Iterator<Item = (&str, &GpsCoordinates)> {
        self.districts.iter().map(|(name, coords)| (name.as_str(), coords))
    }

    pub fn len(&self) -> usize {
        self.districts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.districts.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kerala_table_has_fourteen_districts() {
        let table = RegionTable::kerala();
        assert_eq!(table.len(), 14);
        assert!(!table.is_empty());
    }

    #[test]
    fn every_district_resolves_to_its_stored_pair() {
        let table = RegionTable::kerala();
        for (name, coords) in table.iter() {
            let resolved = table.resolve(name).unwrap();
            assert_eq!(&resolved, coords, "mismatch for {}", name);
        }
    }

    #[test]
    fn kottayam_resolves_exactly() {
        let table = RegionTable::kerala();
        let coords = table.resolve("Kottayam").unwrap();
        assert_eq!(coords.latitude, d(9_591566, 6));
        assert_eq!(coords.longitude, d(76_522116, 6));
    }

    #[test]
    fn unknown_district_is_a_client_error() {
        let table = RegionTable::kerala();
        let err = table.resolve("Atlantis").unwrap_err();
        assert!(matches!(err, AppError::UnknownDistrict(name) if name == "Atlantis"));
    }

    #[test]
    fn lookup_is_case_sensitive() {
        let table = RegionTable::kerala();
        assert!(table.resolve("kottayam").is_err());
    }

    #[test]
    fn substitute_tables_can_be_injected() {
        let table = RegionTable::from_entries([(
            "Testpuram".to_string(),
            GpsCoordinates::new(d(10, 0), d(76, 0)),
        )]);
        assert_eq!(table.len(), 1);
        assert!(table.resolve("Testpuram").is_ok());
        assert!(table.resolve("Kottayam").is_err());
    }
}
