use borsh::{BorshDeserialize, BorshSerialize};
use macropol;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use uint::construct_uint;

#[macropol::macropol]
macro_rules! impl_str_type {
    ($iden: ident, $ty: tt) => {
        /// [`$&iden`] same as [`$&ty`] but JSON serializer serializes it to a string, so callers
        /// that parse JSON numbers as doubles don't lose precision. The original [`$&ty`] value
        /// can be accessed by `$&iden.0`
        #[derive(
            Debug,
            Clone,
            Copy,
            PartialEq,
            Eq,
            PartialOrd,
            Ord,
            Hash,
            BorshDeserialize,
            BorshSerialize,
            Default,
        )]
        pub struct $iden(pub $ty);

        impl From<$ty> for $iden {
            fn from(v: $ty) -> Self {
                Self(v)
            }
        }

        impl From<$iden> for $ty {
            fn from(v: $iden) -> $ty {
                v.0
            }
        }

        impl Serialize for $iden {
            fn serialize<S>(
                &self,
                serializer: S,
            ) -> Result<<S as Serializer>::Ok, <S as Serializer>::Error>
            where
                S: Serializer,
            {
                serializer.serialize_str(&self.0.to_string())
            }
        }

        impl<'de> Deserialize<'de> for $iden {
            fn deserialize<D>(deserializer: D) -> Result<Self, <D as Deserializer<'de>>::Error>
            where
                D: Deserializer<'de>,
            {
                let s: String = Deserialize::deserialize(deserializer)?;
                Ok(Self(str::parse::<$ty>(&s).map_err(|err| {
                    serde::de::Error::custom(err.to_string())
                })?))
            }
        }
    };
}

impl_str_type!(U64, u64);

construct_uint! {
    /// `U256` type implementation.
    ///
    /// The type is implemented with [`uint::construct_uint`] crate but serialized to JSON as a decimal string.
    #[derive(BorshDeserialize, BorshSerialize)]
    pub struct U256(4);
}

impl Serialize for U256 {
    fn serialize<S>(&self, serializer: S) -> Result<<S as Serializer>::Ok, <S as Serializer>::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for U256 {
    fn deserialize<D>(deserializer: D) -> Result<Self, <D as Deserializer<'de>>::Error>
    where
        D: Deserializer<'de>,
    {
        let s: String = Deserialize::deserialize(deserializer)?;
        Ok(Self::from_dec_str(s.as_str())
            .map_err(|err| serde::de::Error::custom(err.to_string()))?)
    }
}

/// Only the most significant bit of the 256 bits is set.
const SIGN_BIT: U256 = U256([0, 0, 0, 1 << 63]);

fn twos_complement(value: U256) -> U256 {
    (!value).overflowing_add(U256::one()).0
}

/// Errors of [`I256::from_dec_str`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseI256Error {
    #[error("cannot parse I256 from an empty string")]
    Empty,
    #[error("invalid decimal number: {0}")]
    InvalidDigits(String),
    #[error("number is out of the I256 range")]
    OutOfRange,
}

/// `I256` type implementation: a signed 256-bit integer.
///
/// Stored as the two's complement of the inner [`U256`], which is also its Borsh encoding.
/// JSON serializer serializes it to a decimal string, e.g. `"-42"`.
///
/// # Examples
/// ```
/// use adt_sdk::types::I256;
///
/// let value: I256 = "-42".parse().unwrap();
/// assert_eq!(value, I256::from(-42));
/// assert!(value.is_negative());
/// assert_eq!(value.to_string(), "-42");
/// assert!("1e3".parse::<I256>().is_err());
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default, BorshSerialize, BorshDeserialize)]
pub struct I256(U256);

impl I256 {
    pub const ZERO: Self = Self(U256([0; 4]));
    pub const MAX: Self = Self(U256([u64::MAX, u64::MAX, u64::MAX, u64::MAX >> 1]));
    pub const MIN: Self = Self(SIGN_BIT);

    /// Returns the raw two's complement bits.
    pub fn into_raw(self) -> U256 {
        self.0
    }

    pub fn is_negative(&self) -> bool {
        self.0.bit(255)
    }

    /// Returns the absolute value. Doesn't overflow for [`I256::MIN`].
    pub fn unsigned_abs(&self) -> U256 {
        if self.is_negative() {
            twos_complement(self.0)
        } else {
            self.0
        }
    }

    /// Parses an optionally signed decimal number.
    pub fn from_dec_str(value: &str) -> Result<Self, ParseI256Error> {
        let (negative, digits) = match value.strip_prefix('-') {
            Some(digits) => (true, digits),
            None => (false, value.strip_prefix('+').unwrap_or(value)),
        };
        if digits.is_empty() {
            return Err(ParseI256Error::Empty);
        }

        let magnitude = U256::from_dec_str(digits)
            .map_err(|err| ParseI256Error::InvalidDigits(err.to_string()))?;

        match (negative, magnitude.cmp(&SIGN_BIT)) {
            (false, Ordering::Less) => Ok(Self(magnitude)),
            (true, Ordering::Less) | (true, Ordering::Equal) => {
                Ok(Self(twos_complement(magnitude)))
            }
            _ => Err(ParseI256Error::OutOfRange),
        }
    }
}

impl From<i128> for I256 {
    fn from(value: i128) -> Self {
        let magnitude = U256::from(value.unsigned_abs());
        if value < 0 {
            Self(twos_complement(magnitude))
        } else {
            Self(magnitude)
        }
    }
}

macro_rules! impl_i256_from {
    ($($ty: ty),*) => {
        $(
            impl From<$ty> for I256 {
                fn from(value: $ty) -> Self {
                    Self::from(value as i128)
                }
            }
        )*
    };
}

impl_i256_from!(i8, i16, i32, i64);

impl Ord for I256 {
    fn cmp(&self, other: &Self) -> Ordering {
        // Flipping the sign bit maps the signed order onto the unsigned one.
        (self.0 ^ SIGN_BIT).cmp(&(other.0 ^ SIGN_BIT))
    }
}

impl PartialOrd for I256 {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for I256 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_negative() {
            write!(f, "-{}", self.unsigned_abs())
        } else {
            fmt::Display::fmt(&self.0, f)
        }
    }
}

impl fmt::Debug for I256 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

impl FromStr for I256 {
    type Err = ParseI256Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_dec_str(s)
    }
}

impl Serialize for I256 {
    fn serialize<S>(&self, serializer: S) -> Result<<S as Serializer>::Ok, <S as Serializer>::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for I256 {
    fn deserialize<D>(deserializer: D) -> Result<Self, <D as Deserializer<'de>>::Error>
    where
        D: Deserializer<'de>,
    {
        let s: String = Deserialize::deserialize(deserializer)?;
        Self::from_dec_str(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    macro_rules! test_serde {
        ($str_type: tt, $int_type: tt, $number: expr) => {
            let a: $int_type = $number;
            let str_a: $str_type = a.into();
            let b: $int_type = str_a.into();
            assert_eq!(a, b);

            let str: String = serde_json::to_string(&str_a).unwrap();
            let deser_a: $str_type = serde_json::from_str(&str).unwrap();
            assert_eq!(a, deser_a.0);
        };
    }

    macro_rules! test_serde_u256 {
        ($number: expr) => {
            let num = $number;
            let str_a = serde_json::to_string(&U256::from(num)).unwrap();
            assert_eq!(str_a, "\"".to_string() + &num.to_string() + "\"");

            let deser_a: U256 = serde_json::from_str(&str_a).unwrap();
            assert_eq!(deser_a, num.into());
        };
    }

    #[test]
    fn test_u256() {
        test_serde_u256!(0);
        test_serde_u256!(1);
        test_serde_u256!(123);
        test_serde_u256!(2u128.pow(100));
        test_serde_u256!(U256::max_value());
    }

    #[test]
    fn test_u64() {
        test_serde!(U64, u64, 0);
        test_serde!(U64, u64, 123);
        test_serde!(U64, u64, 2u64.pow(60));
        test_serde!(U64, u64, u64::MAX);
        assert_eq!(serde_json::to_string(&U64(4)).unwrap(), "\"4\"");
    }

    #[test]
    fn test_i256_from_primitives() {
        assert_eq!(I256::from(0), I256::ZERO);
        assert_eq!(I256::from(11).into_raw(), U256::from(11u64));
        assert_eq!(I256::from(-1).into_raw(), U256::max_value());
        assert_eq!(I256::from(i128::MIN).unsigned_abs(), U256::from(1u128 << 127));
        assert!(I256::from(-5i64).is_negative());
        assert!(!I256::from(5i8).is_negative());
    }

    #[test]
    fn test_i256_decimal_round_trip() {
        for text in ["0", "11", "-44", "170141183460469231731687303715884105727"] {
            assert_eq!(I256::from_dec_str(text).unwrap().to_string(), text);
        }
        assert_eq!(I256::from_dec_str("+7").unwrap(), I256::from(7));
        assert_eq!(I256::from_dec_str("-0").unwrap(), I256::ZERO);

        let max = I256::MAX.to_string();
        let min = I256::MIN.to_string();
        assert!(min.starts_with('-'));
        assert_eq!(I256::from_dec_str(&max).unwrap(), I256::MAX);
        assert_eq!(I256::from_dec_str(&min).unwrap(), I256::MIN);
    }

    #[test]
    fn test_i256_parse_errors() {
        assert_eq!(I256::from_dec_str(""), Err(ParseI256Error::Empty));
        assert_eq!(I256::from_dec_str("-"), Err(ParseI256Error::Empty));
        assert!(matches!(
            I256::from_dec_str("12a"),
            Err(ParseI256Error::InvalidDigits(_))
        ));

        let above_max = (SIGN_BIT).to_string();
        assert_eq!(
            I256::from_dec_str(&above_max),
            Err(ParseI256Error::OutOfRange)
        );
        let below_min = format!("-{}", SIGN_BIT + U256::one());
        assert_eq!(
            I256::from_dec_str(&below_min),
            Err(ParseI256Error::OutOfRange)
        );
    }

    #[test]
    fn test_i256_ordering() {
        let mut values = vec![
            I256::from(3),
            I256::MAX,
            I256::from(-1),
            I256::MIN,
            I256::ZERO,
        ];
        values.sort();
        assert_eq!(
            values,
            vec![
                I256::MIN,
                I256::from(-1),
                I256::ZERO,
                I256::from(3),
                I256::MAX
            ]
        );
    }

    #[test]
    fn test_i256_serde() {
        let value = I256::from(-42);
        let json = serde_json::to_string(&value).unwrap();
        assert_eq!(json, "\"-42\"");
        assert_eq!(serde_json::from_str::<I256>(&json).unwrap(), value);
        assert!(serde_json::from_str::<I256>("\"abc\"").is_err());
    }

    #[test]
    fn test_i256_borsh() {
        let bytes = I256::from(-1).try_to_vec().unwrap();
        assert_eq!(bytes, vec![0xff; 32]);

        let bytes = I256::from(11).try_to_vec().unwrap();
        assert_eq!(bytes[0], 11);
        assert!(bytes[1..].iter().all(|byte| *byte == 0));
        assert_eq!(I256::try_from_slice(&bytes).unwrap(), I256::from(11));
    }
}
