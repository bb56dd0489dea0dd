use serde::{Deserialize, Deserializer, Serialize};

pub mod error;
pub mod progress;
pub mod task;

pub use error::{Client as ClientError, InvalidInput as InvalidInputError};
pub use progress::*;
pub use task::*;

/// One entry of a server directory listing.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct FileEntry {
    pub name: String,
    pub path: String,
    pub is_dir: bool,
    #[serde(default)]
    pub is_video: bool,
    #[serde(default)]
    pub size: u64,
}

/// Response of `GET /api/browse`. `path` is the server's canonical form.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct Listing {
    pub path: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub files: Vec<FileEntry>,
}

/// Go encodes empty slices as `null`.
pub fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
