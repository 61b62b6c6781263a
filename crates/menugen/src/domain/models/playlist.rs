use serde::{Deserialize, Serialize};

/// Opaque playlist identifier returned by the playlists resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "PlaylistBody", into = "String")]
pub struct PlaylistRef(String);

impl PlaylistRef {
    pub fn new(id: impl Into<String>) -> Self {
        PlaylistRef(id.into())
    }

    pub fn id(&self) -> &str {
        &self.0
    }
}

impl From<PlaylistRef> for String {
    fn from(playlist: PlaylistRef) -> Self {
        playlist.0
    }
}

// The backend answers with a bare JSON string; an object carrying the id is accepted too.
#[derive(Deserialize)]
#[serde(untagged)]
enum PlaylistBody {
    Bare(String),
    Object {
        #[serde(alias = "playlist_id", alias = "playlistId")]
        id: String,
    },
}

impl From<PlaylistBody> for PlaylistRef {
    fn from(body: PlaylistBody) -> Self {
        match body {
            PlaylistBody::Bare(id) | PlaylistBody::Object { id } => PlaylistRef(id),
        }
    }
}
