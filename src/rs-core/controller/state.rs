use std::fmt;

use super::LoadError;

/// Playback rates the player can be set to.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PlaybackSpeed {
    Quarter,
    Half,
    ThreeQuarters,
    #[default]
    Normal,
    OneAndQuarter,
    OneAndHalf,
    OneAndThreeQuarters,
    Double,
}

impl PlaybackSpeed {
    /// Every selectable speed, from the slowest to the fastest.
    pub const ALL: [PlaybackSpeed; 8] = [
        PlaybackSpeed::Quarter,
        PlaybackSpeed::Half,
        PlaybackSpeed::ThreeQuarters,
        PlaybackSpeed::Normal,
        PlaybackSpeed::OneAndQuarter,
        PlaybackSpeed::OneAndHalf,
        PlaybackSpeed::OneAndThreeQuarters,
        PlaybackSpeed::Double,
    ];

    /// Returns the playback rate as understood by the embedded players, `1.` being the normal
    /// speed.
    pub fn rate(self) -> f64 {
        match self {
            PlaybackSpeed::Quarter => 0.25,
            PlaybackSpeed::Half => 0.5,
            PlaybackSpeed::ThreeQuarters => 0.75,
            PlaybackSpeed::Normal => 1.,
            PlaybackSpeed::OneAndQuarter => 1.25,
            PlaybackSpeed::OneAndHalf => 1.5,
            PlaybackSpeed::OneAndThreeQuarters => 1.75,
            PlaybackSpeed::Double => 2.,
        }
    }

    /// Returns the `PlaybackSpeed` corresponding to the given rate, `None` if it is not one of
    /// the selectable ones.
    pub fn from_rate(rate: f64) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|speed| (speed.rate() - rate).abs() < f64::EPSILON)
    }
}

impl TryFrom<f64> for PlaybackSpeed {
    type Error = LoadError;

    fn try_from(rate: f64) -> Result<Self, Self::Error> {
        Self::from_rate(rate).ok_or(LoadError::UnsupportedSpeed(rate))
    }
}

/// Which of the two trim inputs a value was given for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TrimField {
    Start,
    End,
}

impl fmt::Display for TrimField {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                TrimField::Start => "start",
                TrimField::End => "end",
            }
        )
    }
}

/// Sub-range of the media, in seconds, to restrict playback to.
///
/// `start` is where playback begins and where each loop restarts. `end`, when set, is the
/// position at which a new loop begins. Both are re-read on each loop iteration.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TrimBounds {
    start: f64,
    end: Option<f64>,
}

impl TrimBounds {
    /// Create new `TrimBounds`, checking that both bounds are positive and that the range they
    /// describe is not empty.
    pub fn new(start: f64, end: Option<f64>) -> Result<Self, LoadError> {
        if !start.is_finite() || start < 0. {
            return Err(LoadError::InvalidTrimBound {
                field: TrimField::Start,
                value: start.to_string(),
            });
        }
        if let Some(end) = end {
            if !end.is_finite() || end < 0. {
                return Err(LoadError::InvalidTrimBound {
                    field: TrimField::End,
                    value: end.to_string(),
                });
            }
            if end <= start {
                return Err(LoadError::EmptyTrimRange { start, end });
            }
        }
        Ok(Self { start, end })
    }

    /// Parse `TrimBounds` from the text of the start and end input fields.
    ///
    /// Both fields take a whole number of seconds. An empty start field means `0` and an empty
    /// end field means that playback is not bounded.
    pub fn parse(start: &str, end: &str) -> Result<Self, LoadError> {
        let start = match parse_seconds(start, TrimField::Start)? {
            Some(start) => start,
            None => 0.,
        };
        let end = parse_seconds(end, TrimField::End)?;
        Self::new(start, end)
    }

    pub fn start(&self) -> f64 {
        self.start
    }

    pub fn end(&self) -> Option<f64> {
        self.end
    }
}

impl Default for TrimBounds {
    fn default() -> Self {
        Self {
            start: 0.,
            end: None,
        }
    }
}

fn parse_seconds(text: &str, field: TrimField) -> Result<Option<f64>, LoadError> {
    let text = text.trim();
    if text.is_empty() {
        return Ok(None);
    }
    text.parse::<u32>()
        .map(|secs| Some(f64::from(secs)))
        .map_err(|_| LoadError::InvalidTrimBound {
            field,
            value: text.to_string(),
        })
}

/// Playback information mirrored from the embedded player, as displayed to the user.
#[derive(Clone, Debug, PartialEq)]
pub struct PlaybackState {
    pub(super) is_playing: bool,
    pub(super) speed: PlaybackSpeed,
    pub(super) current_time: f64,
    pub(super) duration: f64,
    pub(super) loop_count: u32,
}

impl PlaybackState {
    pub(super) fn new(is_playing: bool, speed: PlaybackSpeed) -> Self {
        Self {
            is_playing,
            speed,
            current_time: 0.,
            duration: 0.,
            loop_count: 0,
        }
    }

    pub fn is_playing(&self) -> bool {
        self.is_playing
    }

    pub fn speed(&self) -> PlaybackSpeed {
        self.speed
    }

    /// Last known position in seconds.
    pub fn current_time(&self) -> f64 {
        self.current_time
    }

    /// Duration of the media in seconds, `0` as long as it is not known.
    pub fn duration(&self) -> f64 {
        self.duration
    }

    /// Number of times the end of the media (or of the trimmed range) has been reached and
    /// playback restarted.
    pub fn loop_count(&self) -> u32 {
        self.loop_count
    }

    /// Mirror a position read from the player, never going beyond the known duration.
    pub(super) fn mirror_current_time(&mut self, current_time: f64) {
        if !current_time.is_finite() || current_time < 0. {
            return;
        }
        self.current_time = if self.duration > 0. {
            current_time.min(self.duration)
        } else {
            current_time
        };
    }

    pub(super) fn mirror_duration(&mut self, duration: f64) {
        if duration.is_finite() && duration > 0. {
            self.duration = duration;
        }
    }
}

impl Default for PlaybackState {
    fn default() -> Self {
        Self::new(false, PlaybackSpeed::Normal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_speed_from_rate() {
        assert_eq!(PlaybackSpeed::from_rate(0.25), Some(PlaybackSpeed::Quarter));
        assert_eq!(PlaybackSpeed::from_rate(1.), Some(PlaybackSpeed::Normal));
        assert_eq!(
            PlaybackSpeed::from_rate(1.75),
            Some(PlaybackSpeed::OneAndThreeQuarters)
        );
        assert_eq!(PlaybackSpeed::from_rate(2.), Some(PlaybackSpeed::Double));
        assert_eq!(PlaybackSpeed::from_rate(3.), None);
        assert_eq!(PlaybackSpeed::from_rate(0.), None);
        assert_eq!(PlaybackSpeed::from_rate(f64::NAN), None);
        for speed in PlaybackSpeed::ALL {
            assert_eq!(PlaybackSpeed::from_rate(speed.rate()), Some(speed));
        }
        assert!(matches!(
            PlaybackSpeed::try_from(1.1),
            Err(LoadError::UnsupportedSpeed(_))
        ));
    }

    #[test]
    fn test_trim_bounds_parse() {
        assert_eq!(TrimBounds::parse("", ""), Ok(TrimBounds::default()));
        let bounds = TrimBounds::parse("12", "").unwrap();
        assert_eq!(bounds.start(), 12.);
        assert_eq!(bounds.end(), None);
        let bounds = TrimBounds::parse(" 5 ", "30").unwrap();
        assert_eq!(bounds.start(), 5.);
        assert_eq!(bounds.end(), Some(30.));
        let bounds = TrimBounds::parse("", "30").unwrap();
        assert_eq!(bounds.start(), 0.);
        assert_eq!(bounds.end(), Some(30.));
    }

    #[test]
    fn test_trim_bounds_parse_invalid() {
        assert_eq!(
            TrimBounds::parse("abc", ""),
            Err(LoadError::InvalidTrimBound {
                field: TrimField::Start,
                value: "abc".to_string()
            })
        );
        assert_eq!(
            TrimBounds::parse("0", "-4"),
            Err(LoadError::InvalidTrimBound {
                field: TrimField::End,
                value: "-4".to_string()
            })
        );
        assert!(TrimBounds::parse("1.5", "").is_err());
        assert_eq!(
            TrimBounds::parse("30", "30"),
            Err(LoadError::EmptyTrimRange {
                start: 30.,
                end: 30.
            })
        );
        assert!(TrimBounds::parse("40", "30").is_err());
    }

    #[test]
    fn test_trim_bounds_new() {
        assert!(TrimBounds::new(0., None).is_ok());
        assert!(TrimBounds::new(2.5, Some(3.)).is_ok());
        assert!(TrimBounds::new(-1., None).is_err());
        assert!(TrimBounds::new(f64::NAN, None).is_err());
        assert!(TrimBounds::new(0., Some(f64::INFINITY)).is_err());
    }

    #[test]
    fn test_mirror_values() {
        let mut state = PlaybackState::default();
        state.mirror_current_time(12.);
        assert_eq!(state.current_time(), 12.);
        state.mirror_duration(10.);
        state.mirror_current_time(12.);
        assert_eq!(state.current_time(), 10.);
        state.mirror_current_time(-1.);
        assert_eq!(state.current_time(), 10.);
        state.mirror_duration(f64::NAN);
        assert_eq!(state.duration(), 10.);
    }
}
