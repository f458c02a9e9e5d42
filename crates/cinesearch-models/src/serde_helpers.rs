use serde::{Deserialize, Deserializer};

/// Treat an explicit `null` the same as a missing field.
///
/// The reviews backend stores documents loosely, so fields like `rating` or
/// `reviewSummary` can come back as `null`.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
