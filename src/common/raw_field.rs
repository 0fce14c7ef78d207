use sqlx::error::BoxDynError;
use sqlx::mysql::{MySqlTypeInfo, MySqlValueRef};
use sqlx::{Decode, MySql, Type, ValueRef};

/// A column value as the driver handed it over. Depending on the column
/// collation MySQL reports the same text as a string or as a binary blob.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum RawField {
    Bytes(Vec<u8>),
    Text(String),
    #[default]
    Empty,
}

impl RawField {
    /// Never fails: invalid UTF-8 is replaced, an absent value is `""`.
    pub fn into_string(self) -> String {
        match self {
            RawField::Bytes(bytes) => match String::from_utf8(bytes) {
                Ok(text) => text,
                Err(e) => String::from_utf8_lossy(e.as_bytes()).into_owned(),
            },
            RawField::Text(text) => text,
            RawField::Empty => String::new(),
        }
    }
}

impl Type<MySql> for RawField {
    fn type_info() -> MySqlTypeInfo {
        <[u8] as Type<MySql>>::type_info()
    }

    fn compatible(_ty: &MySqlTypeInfo) -> bool {
        true
    }
}

/// Textual column types become [`RawField::Text`] when they hold valid
/// UTF-8; binary columns become [`RawField::Bytes`]. Needs a live server
/// to exercise, see `tests/mysql_decode.rs` (run with `DATABASE_URL` set
/// and `--ignored`).
impl<'r> Decode<'r, MySql> for RawField {
    fn decode(value: MySqlValueRef<'r>) -> Result<Self, BoxDynError> {
        if value.is_null() {
            return Ok(RawField::Empty);
        }

        let is_text = <str as Type<MySql>>::compatible(&value.type_info());
        let bytes = <&[u8] as Decode<MySql>>::decode(value)?;
        if bytes.is_empty() {
            return Ok(RawField::Empty);
        }

        if is_text {
            if let Ok(text) = std::str::from_utf8(bytes) {
                return Ok(RawField::Text(text.to_owned()));
            }
        }
        Ok(RawField::Bytes(bytes.to_vec()))
    }
}
