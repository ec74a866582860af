//! Artwork record

use serde::Deserialize;

/// A single artwork record from the Art Institute of Chicago API.
///
/// Identity is the `id` field alone; every other field is display-only
/// and plays no part in selection logic.
///
/// # Example
///
/// ```
/// use artic_lib::model::Artwork;
///
/// let artwork = Artwork::new(27992, "A Sunday on La Grande Jatte");
/// assert_eq!(artwork.id, 27992);
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Artwork {
    /// Unique record identifier.
    pub id: u64,

    /// Artwork title.
    #[serde(default)]
    pub title: String,

    /// Artist display name.
    #[serde(rename = "artist_title")]
    pub artist: Option<String>,

    /// Place the work originates from.
    pub place_of_origin: Option<String>,

    /// Inscriptions on the work, if any.
    pub inscriptions: Option<String>,

    /// Earliest year associated with the work.
    pub date_start: Option<i32>,

    /// Latest year associated with the work.
    pub date_end: Option<i32>,
}

impl Artwork {
    /// Creates a minimal record with only identity and title set.
    pub fn new(id: u64, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            artist: None,
            place_of_origin: None,
            inscriptions: None,
            date_start: None,
            date_end: None,
        }
    }

    /// Sets the artist display name.
    pub fn with_artist(mut self, artist: impl Into<String>) -> Self {
        self.artist = Some(artist.into());
        self
    }
}
