mod album;
mod genre;
mod ids;
mod track;

pub use album::{Album, CreateAlbum};
pub use genre::{Genre, GenreFilter};
pub use ids::{AlbumId, ArtistId, GenreId, TrackId};
pub use track::{CreateTrack, Track};
