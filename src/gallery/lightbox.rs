use crate::database::models::Photo;

/// Where the viewer is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LightboxState {
    Closed,
    Open(usize),
}

/// Full-screen viewer over an ordered photo sequence
#[derive(Debug, Clone)]
pub struct Lightbox<'a> {
    photos: &'a [Photo],
    state: LightboxState,
}

impl<'a> Lightbox<'a> {
    pub fn new(photos: &'a [Photo]) -> Self {
        Self {
            photos,
            state: LightboxState::Closed,
        }
    }

    /// Open on a photo. Stays closed when the id is not in the sequence.
    pub fn open(&mut self, photo_id: &str) -> bool {
        match self.photos.iter().position(|p| p.id == photo_id) {
            Some(index) => {
                self.state = LightboxState::Open(index);
                true
            }
            None => {
                self.state = LightboxState::Closed;
                false
            }
        }
    }

    pub fn close(&mut self) {
        self.state = LightboxState::Closed;
    }

    pub fn next(&mut self) {
        if let LightboxState::Open(index) = self.state {
            self.state = LightboxState::Open((index + 1) % self.photos.len());
        }
    }

    pub fn prev(&mut self) {
        if let LightboxState::Open(index) = self.state {
            let len = self.photos.len();
            self.state = LightboxState::Open((index + len - 1) % len);
        }
    }

    pub fn state(&self) -> LightboxState {
        self.state
    }

    pub fn is_open(&self) -> bool {
        matches!(self.state, LightboxState::Open(_))
    }

    pub fn current(&self) -> Option<&'a Photo> {
        match self.state {
            LightboxState::Open(index) => self.photos.get(index),
            LightboxState::Closed => None,
        }
    }

    /// Previous and next photo around the current one
    pub fn neighbors(&self) -> Option<(&'a Photo, &'a Photo)> {
        let LightboxState::Open(index) = self.state else {
            return None;
        };
        let len = self.photos.len();
        Some((
            &self.photos[(index + len - 1) % len],
            &self.photos[(index + 1) % len],
        ))
    }

    pub fn len(&self) -> usize {
        self.photos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.photos.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use proptest::prelude::*;

    fn photos(n: usize) -> Vec<Photo> {
        (0..n)
            .map(|i| Photo {
                id: format!("foto-{}", i),
                album_id: "album".to_string(),
                title: format!("Foto {}", i),
                description: String::new(),
                image_data: String::new(),
                created_at: Utc::now(),
            })
            .collect()
    }

    #[test]
    fn test_open_and_navigate() {
        let photos = photos(3);
        let mut lightbox = Lightbox::new(&photos);
        assert_eq!(lightbox.state(), LightboxState::Closed);

        assert!(lightbox.open("foto-2"));
        assert_eq!(lightbox.state(), LightboxState::Open(2));

        lightbox.next();
        assert_eq!(lightbox.current().map(|p| p.id.as_str()), Some("foto-0"));

        lightbox.prev();
        lightbox.prev();
        assert_eq!(lightbox.current().map(|p| p.id.as_str()), Some("foto-1"));

        let (prev, next) = lightbox.neighbors().unwrap();
        assert_eq!((prev.id.as_str(), next.id.as_str()), ("foto-0", "foto-2"));

        lightbox.close();
        assert!(lightbox.current().is_none());
    }

    #[test]
    fn test_unknown_photo_keeps_closed() {
        let photos = photos(2);
        let mut lightbox = Lightbox::new(&photos);
        assert!(!lightbox.open("missing"));
        assert!(!lightbox.is_open());
    }

    #[test]
    fn test_navigation_is_noop_when_closed() {
        let photos = photos(2);
        let mut lightbox = Lightbox::new(&photos);
        lightbox.next();
        lightbox.prev();
        assert_eq!(lightbox.state(), LightboxState::Closed);
        assert!(lightbox.neighbors().is_none());

        let empty: Vec<Photo> = Vec::new();
        let mut lightbox = Lightbox::new(&empty);
        assert!(!lightbox.open("foto-0"));
        lightbox.next();
        assert!(lightbox.is_empty());
    }

    #[test]
    fn test_single_photo_wraps_onto_itself() {
        let photos = photos(1);
        let mut lightbox = Lightbox::new(&photos);
        lightbox.open("foto-0");
        lightbox.next();
        assert_eq!(lightbox.state(), LightboxState::Open(0));
        let (prev, next) = lightbox.neighbors().unwrap();
        assert_eq!(prev.id, "foto-0");
        assert_eq!(next.id, "foto-0");
    }

    proptest! {
        #[test]
        fn prop_next_then_prev_returns_to_start(len in 1usize..40, start in 0usize..40) {
            let photos = photos(len);
            let start = start % len;
            let mut lightbox = Lightbox::new(&photos);
            lightbox.open(&photos[start].id);

            lightbox.next();
            lightbox.prev();
            prop_assert_eq!(lightbox.state(), LightboxState::Open(start));
        }

        #[test]
        fn prop_len_steps_is_full_cycle(len in 1usize..40, start in 0usize..40) {
            let photos = photos(len);
            let start = start % len;
            let mut lightbox = Lightbox::new(&photos);
            lightbox.open(&photos[start].id);

            for _ in 0..len {
                lightbox.next();
            }
            prop_assert_eq!(lightbox.state(), LightboxState::Open(start));

            for _ in 0..len {
                lightbox.prev();
            }
            prop_assert_eq!(lightbox.state(), LightboxState::Open(start));
        }

        #[test]
        fn prop_index_stays_in_bounds(
            len in 1usize..20,
            moves in prop::collection::vec(any::<bool>(), 0..60),
        ) {
            let photos = photos(len);
            let mut lightbox = Lightbox::new(&photos);
            lightbox.open(&photos[0].id);

            for forward in moves {
                if forward { lightbox.next() } else { lightbox.prev() }
                match lightbox.state() {
                    LightboxState::Open(index) => prop_assert!(index < len),
                    LightboxState::Closed => prop_assert!(false, "closed while navigating"),
                }
            }
        }
    }
}
