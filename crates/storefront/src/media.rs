use shared::domain::{MediaId, MediaItem, MediaKind};

pub fn builtin_media() -> Vec<MediaItem> {
    vec![
        MediaItem {
            id: MediaId::from("m1"),
            kind: MediaKind::Video,
            title: "Intro to EduStream".into(),
            src: "https://interactive-examples.mdn.mozilla.net/media/cc0-videos/flower.mp4".into(),
            poster: Some(
                "https://images.unsplash.com/photo-1519389950473-47ba0277781c?w=600&q=80&auto=format&fit=crop"
                    .into(),
            ),
        },
        MediaItem {
            id: MediaId::from("m2"),
            kind: MediaKind::Audio,
            title: "Sample Audio Lecture".into(),
            src: "https://interactive-examples.mdn.mozilla.net/media/cc0-audio/t-rex-roar.mp3".into(),
            poster: None,
        },
    ]
}

/// Fraction of a media element that has been played, always in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
pub struct PlaybackProgress(f64);

impl PlaybackProgress {
    /// An unknown or zero duration counts as no progress.
    pub fn new(current_secs: f64, duration_secs: f64) -> Self {
        if !duration_secs.is_finite() || duration_secs <= 0.0 || !current_secs.is_finite() {
            return Self(0.0);
        }
        Self((current_secs / duration_secs).clamp(0.0, 1.0))
    }

    pub fn fraction(self) -> f64 {
        self.0
    }

    pub fn percent(self) -> u32 {
        (self.0 * 100.0).round() as u32
    }

    pub fn label(self) -> String {
        format!("{}%", self.percent())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ships_one_video_and_one_audio_item() {
        let media = builtin_media();
        assert_eq!(media.len(), 2);
        assert_eq!(media[0].kind, MediaKind::Video);
        assert!(media[0].poster.is_some());
        assert_eq!(media[1].kind, MediaKind::Audio);
        assert!(media[1].poster.is_none());
    }

    #[test]
    fn progress_is_ratio_of_position_to_duration() {
        let progress = PlaybackProgress::new(30.0, 120.0);
        assert_eq!(progress.fraction(), 0.25);
        assert_eq!(progress.label(), "25%");
    }

    #[test]
    fn unknown_duration_means_no_progress() {
        assert_eq!(PlaybackProgress::new(10.0, 0.0).percent(), 0);
        assert_eq!(PlaybackProgress::new(10.0, f64::NAN).percent(), 0);
        assert_eq!(PlaybackProgress::new(f64::NAN, 10.0).percent(), 0);
    }

    #[test]
    fn progress_is_clamped_and_rounded() {
        assert_eq!(PlaybackProgress::new(200.0, 100.0).label(), "100%");
        assert_eq!(PlaybackProgress::new(-5.0, 100.0).label(), "0%");
        assert_eq!(PlaybackProgress::new(2.0, 3.0).percent(), 67);
    }
}
