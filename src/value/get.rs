//! Range-checked typed extraction.

use crate::error::InvalidType;

use super::{Data, Value};

/// Types a [`Value`] can be extracted into with `value.get::<T>()`.
///
/// Integer targets succeed only when the stored number fits the target's
/// range; a stored `Int` never converts to an unsigned target and a stored
/// `Float` never converts to an integer target. Float targets accept every
/// numeric variant through a lossy cast. `bool` and `String` require an
/// exact variant match.
pub trait FromValue: Sized {
    fn from_value(value: &Value<'_>) -> Result<Self, InvalidType>;
}

impl FromValue for bool {
    fn from_value(value: &Value<'_>) -> Result<Self, InvalidType> {
        match value.data {
            Data::Bool(b) => Ok(b),
            _ => Err(InvalidType),
        }
    }
}

impl FromValue for String {
    fn from_value(value: &Value<'_>) -> Result<Self, InvalidType> {
        match &value.data {
            Data::Str(s) => Ok(s.as_str().to_owned()),
            _ => Err(InvalidType),
        }
    }
}

macro_rules! from_value_signed {
    ($($t:ty)*) => {$(
        impl FromValue for $t {
            fn from_value(value: &Value<'_>) -> Result<Self, InvalidType> {
                match value.data {
                    Data::Int(n) => <$t>::try_from(n).map_err(|_| InvalidType),
                    Data::Uint(n) => <$t>::try_from(n).map_err(|_| InvalidType),
                    _ => Err(InvalidType),
                }
            }
        }
    )*};
}

macro_rules! from_value_unsigned {
    ($($t:ty)*) => {$(
        impl FromValue for $t {
            fn from_value(value: &Value<'_>) -> Result<Self, InvalidType> {
                match value.data {
                    // A stored signed number never satisfies an unsigned
                    // request, whatever its sign.
                    Data::Uint(n) => <$t>::try_from(n).map_err(|_| InvalidType),
                    _ => Err(InvalidType),
                }
            }
        }
    )*};
}

from_value_signed!(i8 i16 i32 i64);
from_value_unsigned!(u8 u16 u32 u64);

impl FromValue for f64 {
    fn from_value(value: &Value<'_>) -> Result<Self, InvalidType> {
        match value.data {
            Data::Float(n) => Ok(n),
            Data::Int(n) => Ok(n as f64),
            Data::Uint(n) => Ok(n as f64),
            _ => Err(InvalidType),
        }
    }
}

impl FromValue for f32 {
    fn from_value(value: &Value<'_>) -> Result<Self, InvalidType> {
        f64::from_value(value).map(|n| n as f32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn signed_targets_take_either_integer_variant_in_range() {
        assert_eq!(Value::from(-5i64).get::<i8>(), Ok(-5));
        assert_eq!(Value::from(200u64).get::<i8>(), Err(InvalidType));
        assert_eq!(Value::from(200u64).get::<i16>(), Ok(200));
        assert_eq!(Value::from(i64::MIN).get::<i64>(), Ok(i64::MIN));
    }

    #[test]
    fn unsigned_targets_reject_signed_storage() {
        assert_eq!(Value::from(5i64).get::<u64>(), Err(InvalidType));
        assert_eq!(Value::from(5u64).get::<u64>(), Ok(5));
        assert_eq!(Value::from(256u64).get::<u8>(), Err(InvalidType));
    }

    #[test]
    fn floats_accept_every_numeric_variant() {
        assert_eq!(Value::from(2u64).get::<f64>(), Ok(2.0));
        assert_eq!(Value::from(-2i64).get::<f64>(), Ok(-2.0));
        assert_eq!(Value::from(1.5f64).get::<f32>(), Ok(1.5));
        assert_eq!(Value::from(1.5f64).get::<i64>(), Err(InvalidType));
    }

    #[test]
    fn exact_match_for_bool_and_string() {
        assert_eq!(Value::from(true).get::<bool>(), Ok(true));
        assert_eq!(Value::from("x").get::<String>(), Ok("x".to_owned()));
        assert_eq!(Value::from("x").get::<bool>(), Err(InvalidType));
        assert_eq!(Value::null().get::<String>(), Err(InvalidType));
    }
}
