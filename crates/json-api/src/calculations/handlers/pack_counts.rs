//! Breakdown serialisation in descending pack size order.

use std::fmt;

use serde::{
    Deserialize, Deserializer, Serialize, Serializer,
    de::{self, MapAccess, Visitor},
    ser::SerializeMap,
};

use packopt::breakdown::Breakdown;

/// Pack counts keyed by size, largest size first.
///
/// Serialised as a JSON object whose keys are the sizes as strings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct PackCounts(Vec<(u64, u64)>);

impl From<&Breakdown> for PackCounts {
    fn from(breakdown: &Breakdown) -> Self {
        Self(breakdown.iter_descending().collect())
    }
}

impl Serialize for PackCounts {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;

        for (size, count) in &self.0 {
            map.serialize_entry(&size.to_string(), count)?;
        }

        map.end()
    }
}

impl<'de> Deserialize<'de> for PackCounts {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct PackCountsVisitor;

        impl<'de> Visitor<'de> for PackCountsVisitor {
            type Value = PackCounts;

            fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
                formatter.write_str("an object of pack size to pack count")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut entries = Vec::with_capacity(access.size_hint().unwrap_or_default());

                while let Some((size, count)) = access.next_entry::<String, u64>()? {
                    let size = size.parse::<u64>().map_err(de::Error::custom)?;

                    entries.push((size, count));
                }

                Ok(PackCounts(entries))
            }
        }

        deserializer.deserialize_map(PackCountsVisitor)
    }
}
