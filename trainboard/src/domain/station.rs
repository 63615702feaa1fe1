//! Station and station-code types.

use std::fmt;

/// Error returned when parsing an invalid CRS code.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid CRS code: {reason}")]
pub struct InvalidCrs {
    reason: &'static str,
}

/// A valid 3-letter CRS (Computer Reservation System) station code.
///
/// CRS codes are stored as 3 uppercase ASCII letters. Lowercase input is
/// accepted and normalised, since the stations API serves codes in
/// lowercase.
///
/// # Examples
///
/// ```
/// use trainboard::domain::Crs;
///
/// let kgx = Crs::parse("KGX").unwrap();
/// assert_eq!(kgx.as_str(), "KGX");
///
/// // Lowercase input is normalised
/// assert_eq!(Crs::parse("edb").unwrap().as_str(), "EDB");
///
/// // Wrong length is rejected
/// assert!(Crs::parse("KG").is_err());
/// assert!(Crs::parse("KGXX").is_err());
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Crs([u8; 3]);

impl Crs {
    /// Parse a CRS code from a string.
    ///
    /// The input must be exactly 3 ASCII letters; case is normalised to
    /// uppercase.
    pub fn parse(s: &str) -> Result<Self, InvalidCrs> {
        let bytes = s.as_bytes();

        if bytes.len() != 3 {
            return Err(InvalidCrs {
                reason: "must be exactly 3 characters",
            });
        }

        let mut code = [0u8; 3];
        for (i, &b) in bytes.iter().enumerate() {
            if !b.is_ascii_alphabetic() {
                return Err(InvalidCrs {
                    reason: "must be ASCII letters A-Z",
                });
            }
            code[i] = b.to_ascii_uppercase();
        }

        Ok(Crs(code))
    }

    /// Returns the CRS code as a string slice.
    pub fn as_str(&self) -> &str {
        // SAFETY: We only store valid ASCII uppercase letters
        std::str::from_utf8(&self.0).unwrap()
    }
}

impl fmt::Debug for Crs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Crs({})", self.as_str())
    }
}

impl fmt::Display for Crs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A station in the directory.
///
/// Two stations are equal iff their `(id, name, crs)` tuples are equal;
/// the controller relies on this to detect "origin == destination".
///
/// `crs: None` means the station is not bookable: it can be displayed but
/// never used for a fare search. The [`StationDirectory`] drops such
/// stations when it builds its list, so any station picked from a
/// directory snapshot carries a CRS.
///
/// [`StationDirectory`]: crate::stations::StationDirectory
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Station {
    /// Opaque identifier assigned by the stations API.
    pub id: u32,
    /// Display name, e.g. "London Kings Cross".
    pub name: String,
    /// Booking code, absent for non-bookable stations.
    pub crs: Option<Crs>,
}

impl Station {
    /// Create a station with a booking code.
    pub fn new(id: u32, name: impl Into<String>, crs: Crs) -> Self {
        Self {
            id,
            name: name.into(),
            crs: Some(crs),
        }
    }

    /// Create a display-only station, as embedded in fare results.
    ///
    /// Fare responses identify stations by name and (possibly empty) CRS
    /// only; the directory id is not echoed back, so it is fixed at 0.
    pub fn display_only(name: impl Into<String>, crs: Option<Crs>) -> Self {
        Self {
            id: 0,
            name: name.into(),
            crs,
        }
    }

    /// Returns true if the station can be used for a fare search.
    pub fn is_bookable(&self) -> bool {
        self.crs.is_some()
    }
}

impl fmt::Display for Station {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.crs {
            Some(crs) => write!(f, "{} ({})", self.name, crs),
            None => f.write_str(&self.name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_valid_crs() {
        assert!(Crs::parse("KGX").is_ok());
        assert!(Crs::parse("EDB").is_ok());
        assert!(Crs::parse("AAA").is_ok());
        assert!(Crs::parse("ZZZ").is_ok());
    }

    #[test]
    fn lowercase_normalised() {
        assert_eq!(Crs::parse("kgx").unwrap(), Crs::parse("KGX").unwrap());
        assert_eq!(Crs::parse("Edb").unwrap().as_str(), "EDB");
    }

    #[test]
    fn reject_wrong_length() {
        assert!(Crs::parse("").is_err());
        assert!(Crs::parse("K").is_err());
        assert!(Crs::parse("KG").is_err());
        assert!(Crs::parse("KGXX").is_err());
        assert!(Crs::parse("KINGS").is_err());
    }

    #[test]
    fn reject_non_letters() {
        assert!(Crs::parse("K1X").is_err());
        assert!(Crs::parse("K-X").is_err());
        assert!(Crs::parse("K X").is_err());
        assert!(Crs::parse("KÖX").is_err());
    }

    #[test]
    fn display_and_debug() {
        let crs = Crs::parse("EDB").unwrap();
        assert_eq!(format!("{}", crs), "EDB");
        assert_eq!(format!("{:?}", crs), "Crs(EDB)");
    }

    #[test]
    fn station_equality_is_full_tuple() {
        let kgx = Crs::parse("KGX").unwrap();
        let a = Station::new(1, "London Kings Cross", kgx);
        let b = Station::new(1, "London Kings Cross", kgx);
        let c = Station::new(2, "London Kings Cross", kgx);
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn display_only_station_is_not_bookable_without_crs() {
        let s = Station::display_only("Mystery Halt", None);
        assert!(!s.is_bookable());
        assert_eq!(s.id, 0);
    }

    #[test]
    fn station_display() {
        let kgx = Station::new(1, "London Kings Cross", Crs::parse("KGX").unwrap());
        assert_eq!(kgx.to_string(), "London Kings Cross (KGX)");

        let plain = Station::display_only("Mystery Halt", None);
        assert_eq!(plain.to_string(), "Mystery Halt");
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Any 3-letter ASCII string parses, regardless of case.
        #[test]
        fn mixed_case_always_parses(s in "[a-zA-Z]{3}") {
            prop_assert!(Crs::parse(&s).is_ok());
        }

        /// Parsing normalises to uppercase.
        #[test]
        fn normalised_to_uppercase(s in "[a-zA-Z]{3}") {
            let crs = Crs::parse(&s).unwrap();
            let upper = s.to_ascii_uppercase();
            prop_assert_eq!(crs.as_str(), upper.as_str());
        }

        /// Wrong-length strings are always rejected.
        #[test]
        fn wrong_length_rejected(s in "[A-Z]{0,2}|[A-Z]{4,10}") {
            prop_assert!(Crs::parse(&s).is_err());
        }

        /// Strings with digits are rejected.
        #[test]
        fn digits_rejected(s in "[A-Z0-9]{3}".prop_filter("has digit", |s| s.chars().any(|c| c.is_ascii_digit()))) {
            prop_assert!(Crs::parse(&s).is_err());
        }
    }
}
