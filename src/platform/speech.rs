//! Web Speech API narration backend

use wasm_bindgen::JsCast;
use web_sys::{SpeechSynthesis, SpeechSynthesisUtterance, SpeechSynthesisVoice};

use crate::narration::{Announcement, NarrationError, Speaker};

/// Speaks announcements through `window.speechSynthesis`
pub struct WebSpeaker {
    synth: Option<SpeechSynthesis>,
}

impl Default for WebSpeaker {
    fn default() -> Self {
        Self::new()
    }
}

impl WebSpeaker {
    pub fn new() -> Self {
        let synth = web_sys::window().and_then(|window| {
            let supported =
                js_sys::Reflect::has(&window, &"speechSynthesis".into()).unwrap_or(false);
            if supported {
                window.speech_synthesis().ok()
            } else {
                None
            }
        });
        if synth.is_none() {
            log::info!("Speech synthesis API not supported in this browser - narration disabled");
        }
        Self { synth }
    }

    pub fn is_available(&self) -> bool {
        self.synth.is_some()
    }

    /// First installed voice whose language matches `tag` exactly or as a prefix
    fn find_voice(synth: &SpeechSynthesis, tag: &str) -> Option<SpeechSynthesisVoice> {
        synth
            .get_voices()
            .iter()
            .filter_map(|v| v.dyn_into::<SpeechSynthesisVoice>().ok())
            .find(|voice| {
                let lang = voice.lang();
                lang == tag || lang.starts_with(tag)
            })
    }
}

impl Speaker for WebSpeaker {
    fn speak(&mut self, announcement: &Announcement) -> Result<(), NarrationError> {
        let synth = self.synth.as_ref().ok_or(NarrationError::Unavailable)?;

        let utterance = SpeechSynthesisUtterance::new_with_text(&announcement.text())
            .map_err(|e| NarrationError::Rejected(format!("{e:?}")))?;
        let tag = announcement.language.tag();
        utterance.set_lang(tag);

        match Self::find_voice(synth, tag) {
            Some(voice) => utterance.set_voice(Some(&voice)),
            None => log::warn!("No {tag} voice installed, using the default voice"),
        }

        synth.speak(&utterance);
        Ok(())
    }
}
