//! Spoken score announcements
//!
//! A point schedules an announcement a short delay later. A newer point
//! replaces the pending one, so a quick burst of points is read out once
//! with the latest tally. Muting drops announcements when they come due;
//! it never touches the simulation.
//!
//! The actual voice is behind [`Speaker`]; the browser backend lives in
//! `platform::speech`, [`LogSpeaker`] writes to the log.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::consts::NARRATION_DELAY_MS;
use crate::settings::Settings;
use crate::sim::{GameEvent, Score};

/// Narration language
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Language {
    /// Brazilian Portuguese
    #[default]
    PtBr,
    /// US English
    EnUs,
}

impl Language {
    /// BCP 47 tag handed to the speech engine
    pub fn tag(&self) -> &'static str {
        match self {
            Language::PtBr => "pt-BR",
            Language::EnUs => "en-US",
        }
    }

    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag.to_lowercase().as_str() {
            "pt-br" | "pt" => Some(Language::PtBr),
            "en-us" | "en" => Some(Language::EnUs),
            _ => None,
        }
    }

    /// HUD label for a side's score
    pub fn player_label(&self) -> &'static str {
        match self {
            Language::PtBr => "Jogador",
            Language::EnUs => "Player",
        }
    }

    pub fn computer_label(&self) -> &'static str {
        match self {
            Language::PtBr => "Computador",
            Language::EnUs => "Computer",
        }
    }

    /// Mute button caption for the given mute state
    pub fn mute_button_label(&self, muted: bool) -> &'static str {
        match (self, muted) {
            (Language::PtBr, false) => "Silenciar Narração",
            (Language::PtBr, true) => "Ativar Narração",
            (Language::EnUs, false) => "Mute Narration",
            (Language::EnUs, true) => "Unmute Narration",
        }
    }
}

/// A score read-out ready to be spoken
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Announcement {
    pub score: Score,
    pub language: Language,
}

impl Announcement {
    pub fn text(&self) -> String {
        let Score { player, computer } = self.score;
        match self.language {
            Language::PtBr => {
                format!("Jogador: {player} pontos. Computador: {computer} pontos.")
            }
            Language::EnUs => format!("Player: {player} points. Computer: {computer} points."),
        }
    }
}

/// Why a phrase could not be spoken
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NarrationError {
    /// The platform has no speech synthesis
    Unavailable,
    /// The engine refused the utterance
    Rejected(String),
}

impl fmt::Display for NarrationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NarrationError::Unavailable => write!(f, "speech synthesis is not available"),
            NarrationError::Rejected(reason) => write!(f, "speech synthesis rejected: {reason}"),
        }
    }
}

impl std::error::Error for NarrationError {}

/// Something that can say an announcement out loud
pub trait Speaker {
    fn speak(&mut self, announcement: &Announcement) -> Result<(), NarrationError>;
}

/// Speaker that writes announcements to the log
#[derive(Debug, Default)]
pub struct LogSpeaker {
    /// Every phrase spoken so far, oldest first
    pub spoken: Vec<String>,
}

impl Speaker for LogSpeaker {
    fn speak(&mut self, announcement: &Announcement) -> Result<(), NarrationError> {
        let text = announcement.text();
        log::info!("[{}] {}", announcement.language.tag(), text);
        self.spoken.push(text);
        Ok(())
    }
}

#[derive(Debug, Clone, Copy)]
struct Pending {
    due_ms: f64,
    score: Score,
}

/// Debounced score narrator
#[derive(Debug)]
pub struct Narrator {
    muted: bool,
    language: Language,
    delay_ms: f64,
    pending: Option<Pending>,
    last_announced: Score,
    warned: bool,
}

impl Default for Narrator {
    fn default() -> Self {
        Self::new(Language::default(), NARRATION_DELAY_MS)
    }
}

impl Narrator {
    pub fn new(language: Language, delay_ms: f64) -> Self {
        Self {
            muted: false,
            language,
            delay_ms: delay_ms.max(0.0),
            pending: None,
            last_announced: Score::default(),
            warned: false,
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        let mut narrator = Self::new(settings.narration_language, settings.narration_delay_ms);
        narrator.set_muted(settings.narration_muted);
        narrator
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    /// Flip the mute flag, returning the new state
    pub fn toggle_mute(&mut self) -> bool {
        self.muted = !self.muted;
        log::info!("Narration {}", if self.muted { "muted" } else { "unmuted" });
        self.muted
    }

    /// When the pending announcement comes due, if any
    pub fn pending_due(&self) -> Option<f64> {
        self.pending.map(|p| p.due_ms)
    }

    /// Feed a simulation event; only points matter
    pub fn observe(&mut self, event: &GameEvent, now_ms: f64) {
        if let GameEvent::Scored { score, .. } = event {
            self.score_changed(*score, now_ms);
        }
    }

    /// Schedule an announcement for `score`, replacing any pending one
    pub fn score_changed(&mut self, score: Score, now_ms: f64) {
        if score == self.last_announced {
            return;
        }
        if self.pending.is_some() {
            log::debug!("Rescheduling pending announcement");
        }
        self.pending = Some(Pending {
            due_ms: now_ms + self.delay_ms,
            score,
        });
    }

    /// Take the announcement that is due at `now_ms`.
    ///
    /// A due announcement is consumed even when muted, so unmuting later does
    /// not replay stale scores.
    pub fn poll(&mut self, now_ms: f64) -> Option<Announcement> {
        let pending = self.pending.filter(|p| now_ms >= p.due_ms)?;
        self.pending = None;
        self.last_announced = pending.score;

        if self.muted {
            log::debug!("Narration muted, skipping announcement");
            return None;
        }

        Some(Announcement {
            score: pending.score,
            language: self.language,
        })
    }

    /// Poll and hand any due announcement to `speaker`.
    ///
    /// Speech failures are logged, never propagated.
    pub fn update(&mut self, now_ms: f64, speaker: &mut dyn Speaker) {
        let Some(announcement) = self.poll(now_ms) else {
            return;
        };
        if let Err(err) = speaker.speak(&announcement) {
            if self.warned {
                log::debug!("Narration skipped: {err}");
            } else {
                log::warn!("Narration disabled: {err}");
                self.warned = true;
            }
        }
    }
}
