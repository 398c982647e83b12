use rand::Rng;
use serde::{Deserialize, Serialize};

/// One playable track.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Track {
    pub title: String,
    pub artist: String,
    /// Media URL handed to the audio element.
    pub src: String,
}

impl Track {
    pub fn new(
        title: impl Into<String>,
        artist: impl Into<String>,
        src: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            artist: artist.into(),
            src: src.into(),
        }
    }
}

/// Ordered, immutable track list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Playlist {
    tracks: Vec<Track>,
}

impl Playlist {
    pub fn new(tracks: Vec<Track>) -> Self {
        Self { tracks }
    }

    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    pub fn get(&self, index: usize) -> Option<&Track> {
        self.tracks.get(index)
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    /// Index after `current`, wrapping to the first track.
    pub fn next_index(&self, current: usize) -> Option<usize> {
        match self.len() {
            0 => None,
            len => Some((current + 1) % len),
        }
    }

    /// Index before `current`, wrapping to the last track.
    pub fn previous_index(&self, current: usize) -> Option<usize> {
        match self.len() {
            0 => None,
            len => Some((current % len + len - 1) % len),
        }
    }

    /// A uniformly random index other than `current`. With a single track that track is returned.
    pub fn random_other_index(&self, current: usize, rng: &mut impl Rng) -> Option<usize> {
        match self.len() {
            0 => None,
            1 => Some(0),
            len => {
                let pick = rng.gen_range(0..len - 1);
                Some(if pick >= current % len { pick + 1 } else { pick })
            }
        }
    }

    /// Next index honoring shuffle.
    pub fn advance(&self, current: usize, shuffle: bool, rng: &mut impl Rng) -> Option<usize> {
        if shuffle {
            self.random_other_index(current, rng)
        } else {
            self.next_index(current)
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rand::{rngs::StdRng, SeedableRng};

    use super::*;

    fn playlist(len: usize) -> Playlist {
        Playlist::new(
            (0..len)
                .map(|index| Track::new(format!("t{index}"), "a", format!("/audio/{index}.mp3")))
                .collect(),
        )
    }

    #[test]
    fn next_and_previous_wrap() {
        let list = playlist(3);
        assert_eq!(list.next_index(2), Some(0));
        assert_eq!(list.previous_index(0), Some(2));
        assert_eq!(list.previous_index(1), Some(0));
        assert_eq!(playlist(0).next_index(0), None);
    }

    #[test]
    fn random_pick_never_repeats_current() {
        let list = playlist(4);
        let mut rng = StdRng::seed_from_u64(7);
        for current in 0..4 {
            for _ in 0..50 {
                let pick = list.random_other_index(current, &mut rng).expect("pick");
                assert!(pick < 4);
                assert_ne!(pick, current);
            }
        }
        assert_eq!(playlist(1).random_other_index(0, &mut rng), Some(0));
    }
}
