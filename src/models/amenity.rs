/// Amenities the search provider knows how to filter on
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Amenity {
    WiFi,
    Kitchen,
    Washer,
    Dryer,
    FreeParking,
    Gym,
    Pool,
}

impl Amenity {
    /// Vocabulary in the order amenity codes are emitted
    pub const ALL: [Amenity; 7] = [
        Amenity::WiFi,
        Amenity::Kitchen,
        Amenity::Washer,
        Amenity::Dryer,
        Amenity::FreeParking,
        Amenity::Gym,
        Amenity::Pool,
    ];

    /// Provider-side amenity code
    pub fn code(self) -> u32 {
        match self {
            Amenity::WiFi => 4,
            Amenity::Kitchen => 8,
            Amenity::Washer => 33,
            Amenity::Dryer => 34,
            Amenity::FreeParking => 9,
            Amenity::Gym => 15,
            Amenity::Pool => 7,
        }
    }

    /// Display name as it appears in the preferences form
    pub fn name(self) -> &'static str {
        match self {
            Amenity::WiFi => "WiFi",
            Amenity::Kitchen => "Kitchen",
            Amenity::Washer => "Washer",
            Amenity::Dryer => "Dryer",
            Amenity::FreeParking => "Free Parking",
            Amenity::Gym => "Gym",
            Amenity::Pool => "Pool",
        }
    }

    /// Looks up an amenity by name, ignoring ASCII case and surrounding whitespace.
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim();
        Self::ALL
            .into_iter()
            .find(|amenity| amenity.name().eq_ignore_ascii_case(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_match_provider_table() {
        let codes: Vec<u32> = Amenity::ALL.iter().map(|a| a.code()).collect();
        assert_eq!(codes, vec![4, 8, 33, 34, 9, 15, 7]);
    }

    #[test]
    fn lookup_ignores_case() {
        assert_eq!(Amenity::from_name("wifi"), Some(Amenity::WiFi));
        assert_eq!(Amenity::from_name(" free parking "), Some(Amenity::FreeParking));
        assert_eq!(Amenity::from_name("Sauna"), None);
    }
}
