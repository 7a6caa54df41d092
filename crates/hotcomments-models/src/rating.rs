use serde::{Deserialize, Serialize};
use std::fmt;

/// Star rating attached to a short comment, always within 1..=5.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct StarRating(u8);

impl StarRating {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 5;

    pub fn new(stars: u8) -> Option<Self> {
        (Self::MIN..=Self::MAX).contains(&stars).then_some(Self(stars))
    }

    /// Convert the number embedded in a star class (`allstar50` -> 50).
    /// Douban encodes stars in tens, so the value is divided by 10 and truncated.
    pub fn from_class_value(value: u32) -> Option<Self> {
        u8::try_from(value / 10).ok().and_then(Self::new)
    }

    pub fn stars(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for StarRating {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value).ok_or_else(|| format!("rating {} out of range 1-5", value))
    }
}

impl From<StarRating> for u8 {
    fn from(rating: StarRating) -> Self {
        rating.0
    }
}

impl fmt::Display for StarRating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Serde adapter for `Option<StarRating>`: a missing rating is written as `""`
/// so JSON and CSV output carry the same shape. Reading accepts an integer,
/// `""` or `null`.
pub mod empty_as_none {
    use super::StarRating;
    use serde::de::{self, Visitor};
    use serde::{Deserializer, Serializer};
    use std::fmt;

    pub fn serialize<S>(rating: &Option<StarRating>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match rating {
            Some(r) => serializer.serialize_u8(r.stars()),
            None => serializer.serialize_str(""),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<StarRating>, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(RatingVisitor)
    }

    struct RatingVisitor;

    impl RatingVisitor {
        fn from_u64<E: de::Error>(value: u64) -> Result<Option<StarRating>, E> {
            u8::try_from(value)
                .ok()
                .and_then(StarRating::new)
                .map(Some)
                .ok_or_else(|| E::custom(format!("rating {} out of range 1-5", value)))
        }
    }

    impl<'de> Visitor<'de> for RatingVisitor {
        type Value = Option<StarRating>;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.write_str("an integer from 1 to 5, an empty string or null")
        }

        fn visit_u64<E: de::Error>(self, value: u64) -> Result<Self::Value, E> {
            Self::from_u64(value)
        }

        fn visit_i64<E: de::Error>(self, value: i64) -> Result<Self::Value, E> {
            let value = u64::try_from(value)
                .map_err(|_| E::custom(format!("rating {} out of range 1-5", value)))?;
            Self::from_u64(value)
        }

        fn visit_str<E: de::Error>(self, value: &str) -> Result<Self::Value, E> {
            let value = value.trim();
            if value.is_empty() {
                return Ok(None);
            }
            let n = value
                .parse::<u64>()
                .map_err(|_| E::custom(format!("invalid rating '{}'", value)))?;
            Self::from_u64(n)
        }

        fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
            Ok(None)
        }

        fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
            Ok(None)
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_class_value_divides_by_ten() {
        assert_eq!(StarRating::from_class_value(50).map(StarRating::stars), Some(5));
        assert_eq!(StarRating::from_class_value(15).map(StarRating::stars), Some(1));
        assert_eq!(StarRating::from_class_value(10).map(StarRating::stars), Some(1));
    }

    #[test]
    fn test_from_class_value_out_of_range() {
        assert_eq!(StarRating::from_class_value(0), None);
        assert_eq!(StarRating::from_class_value(9), None);
        assert_eq!(StarRating::from_class_value(60), None);
        assert_eq!(StarRating::from_class_value(u32::MAX), None);
    }

    #[test]
    fn test_try_from_u8() {
        assert!(StarRating::try_from(3).is_ok());
        assert!(StarRating::try_from(6).is_err());
    }
}
