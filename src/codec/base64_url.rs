use crate::codec::{decode, encode};
use serde::{Deserialize, Deserializer, Serializer, de::Error as DeError};
use serde_with::{DeserializeAs, SerializeAs};

/// `serde_with` adapter that represents binary fields as URL-safe unpadded base64 text.
pub struct Base64Url;

impl SerializeAs<Vec<u8>> for Base64Url {
    fn serialize_as<S>(source: &Vec<u8>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&encode(source))
    }
}

impl<'de> DeserializeAs<'de, Vec<u8>> for Base64Url {
    fn deserialize_as<D>(deserializer: D) -> Result<Vec<u8>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let text = String::deserialize(deserializer)?;
        decode(&text).map_err(|err| DeError::custom(format!("{err:#}")))
    }
}
