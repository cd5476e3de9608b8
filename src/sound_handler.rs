use quad_snd::{AudioContext, PlaySoundParams, Sound as SndSound};
use std::collections::HashMap;
use std::fs;

macro_rules! define_cues {
    ($name:ident => { $($variant:ident => $file:literal),+ $(,)? }) => {
        #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[
                $($name::$variant),+
            ];

            pub const fn file_name(self) -> &'static str {
                match self {
                    $($name::$variant => $file),+
                }
            }
        }
    };
}

define_cues!(SoundCue => {
    Jump           => "jump.wav",
    CharacterHurt  => "hurt.wav",
    CharacterDead  => "character_dead.wav",
    ChickenDead    => "chicken_dead.wav",
    CollectBottle  => "collect_bottle.wav",
    CollectCoin    => "collect_coin.wav",
    Throw          => "throw.wav",
    Splash         => "splash.wav",
    BossAttention  => "boss_attention.wav",
    BossAttack     => "boss_attack.wav",
    BossHurt       => "boss_hurt.wav",
    Win            => "win.wav",
    Lose           => "lose.wav",
});

define_cues!(MusicTrack => {
    Background => "background.wav",
    Boss       => "boss_theme.wav",
});

/// Fire-and-forget requests emitted by the simulation. The core only ever
/// pushes these into a queue; the shell drains the queue into the handler, so
/// no game-state code touches the audio backend.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum AudioEvent {
    Cue(SoundCue),
    Music(MusicTrack),
    StopMusic,
}

pub struct SoundHandler {
    cues: HashMap<SoundCue, SndSound>,
    tracks: HashMap<MusicTrack, SndSound>,
    audio_context: AudioContext,
    current_track: Option<MusicTrack>,
    pub muted: bool,
}

impl SoundHandler {
    pub fn new() -> Self {
        let audio_context = AudioContext::new();

        let mut cues: HashMap<SoundCue, SndSound> = HashMap::new();
        for cue in SoundCue::ALL {
            if let Ok(bytes) = fs::read(format!("assets/sounds/{}", cue.file_name())) {
                cues.insert(*cue, SndSound::load(&audio_context, &bytes));
            }
        }

        let mut tracks: HashMap<MusicTrack, SndSound> = HashMap::new();
        for track in MusicTrack::ALL {
            if let Ok(bytes) = fs::read(format!("assets/sounds/{}", track.file_name())) {
                tracks.insert(*track, SndSound::load(&audio_context, &bytes));
            }
        }

        SoundHandler {
            cues,
            tracks,
            audio_context,
            current_track: None,
            muted: false,
        }
    }

    pub fn handle(&mut self, event: AudioEvent) {
        match event {
            AudioEvent::Cue(cue) => self.play(cue),
            AudioEvent::Music(track) => self.play_music(track),
            AudioEvent::StopMusic => self.stop_music(),
        }
    }

    pub fn play(&self, cue: SoundCue) {
        if self.muted {
            return;
        }
        if let Some(sound) = self.cues.get(&cue) {
            sound.play(&self.audio_context, PlaySoundParams::default());
        }
    }

    /// Starts a looping track, pausing whichever track was playing before.
    pub fn play_music(&mut self, track: MusicTrack) {
        if self.current_track == Some(track) {
            return;
        }
        self.stop_music();
        self.current_track = Some(track);
        if self.muted {
            return;
        }
        if let Some(sound) = self.tracks.get(&track) {
            sound.play(
                &self.audio_context,
                PlaySoundParams {
                    looped: true,
                    volume: 0.6,
                },
            );
        }
    }

    pub fn stop_music(&mut self) {
        if let Some(track) = self.current_track.take() {
            if let Some(sound) = self.tracks.get(&track) {
                sound.stop(&self.audio_context);
            }
        }
    }

    pub fn set_muted(&mut self, muted: bool) {
        if muted && !self.muted {
            if let Some(track) = self.current_track {
                if let Some(sound) = self.tracks.get(&track) {
                    sound.stop(&self.audio_context);
                }
            }
        } else if !muted && self.muted {
            if let Some(track) = self.current_track.take() {
                self.muted = false;
                self.play_music(track);
            }
        }
        self.muted = muted;
    }
}
