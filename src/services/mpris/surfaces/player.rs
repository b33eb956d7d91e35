use std::sync::Arc;

use tracing::{debug, warn};

use super::{build_metadata, capability_denied, unknown_property};
use crate::config::BridgeConfig;
use crate::services::mpris::{
    AdapterResult, EventDispatcher, Interface, LoopStatus, Metadata, PlayState, PlayerAdapter,
    PropertyValue, TrackId, error::AdapterResultExt, properties::player,
};
use crate::{BridgeError, Result};

const LOOP_STATUS_CHANGED: &[&str] = &[player::LOOP_STATUS];
const RATE_CHANGED: &[&str] = &[player::RATE];
const SHUFFLE_CHANGED: &[&str] = &[player::SHUFFLE];
const VOLUME_CHANGED: &[&str] = &[player::VOLUME];

/// Substitutes `default` for a NaN or infinite value reported by the host.
fn finite_or(property: &'static str, value: f64, default: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        warn!(property, value, "Host reported a non-finite value, using default");
        default
    }
}

/// Transport controls and playback state.
///
/// Every transport method checks its capability predicate first. A false
/// predicate turns the call into a no-op that touches neither the host nor the
/// notifier.
#[derive(Clone)]
pub struct PlayerSurface {
    adapter: Arc<dyn PlayerAdapter>,
    config: Arc<BridgeConfig>,
    dispatcher: EventDispatcher,
}

impl PlayerSurface {
    pub(crate) fn new(
        adapter: Arc<dyn PlayerAdapter>,
        config: Arc<BridgeConfig>,
        dispatcher: EventDispatcher,
    ) -> Self {
        Self {
            adapter,
            config,
            dispatcher,
        }
    }

    /// Skip to the next track.
    ///
    /// # Errors
    ///
    /// Returns `BridgeError::Adapter` if the host fails.
    pub fn next(&self) -> Result<()> {
        if !self.can_go_next()? {
            capability_denied("Next");
            return Ok(());
        }
        self.adapter.next().implemented("next")?;
        Ok(())
    }

    /// Go back to the previous track.
    ///
    /// # Errors
    ///
    /// Returns `BridgeError::Adapter` if the host fails.
    pub fn previous(&self) -> Result<()> {
        if !self.can_go_previous()? {
            capability_denied("Previous");
            return Ok(());
        }
        self.adapter.previous().implemented("previous")?;
        Ok(())
    }

    /// Pause playback.
    ///
    /// # Errors
    ///
    /// Returns `BridgeError::Adapter` if the host fails.
    pub fn pause(&self) -> Result<()> {
        if !self.can_pause()? {
            capability_denied("Pause");
            return Ok(());
        }
        self.adapter.pause().implemented("pause")?;
        Ok(())
    }

    /// Pause when playing, otherwise start or resume playback.
    ///
    /// Gated by `CanPause` alone.
    ///
    /// # Errors
    ///
    /// Returns `BridgeError::Adapter` if the host fails.
    pub fn play_pause(&self) -> Result<()> {
        if !self.can_pause()? {
            capability_denied("PlayPause");
            return Ok(());
        }

        if self.playback_status()? == PlayState::Playing {
            self.adapter.pause().implemented("pause")?;
            Ok(())
        } else {
            self.start_playback()
        }
    }

    /// Stop playback.
    ///
    /// # Errors
    ///
    /// Returns `BridgeError::Adapter` if the host fails.
    pub fn stop(&self) -> Result<()> {
        if !self.can_control()? {
            capability_denied("Stop");
            return Ok(());
        }
        self.adapter.stop().implemented("stop")?;
        Ok(())
    }

    /// Resume a paused track, or start playback from scratch.
    ///
    /// # Errors
    ///
    /// Returns `BridgeError::Adapter` if the host fails.
    pub fn play(&self) -> Result<()> {
        if !self.can_play()? {
            capability_denied("Play");
            return Ok(());
        }
        self.start_playback()
    }

    fn start_playback(&self) -> Result<()> {
        if self.playback_status()? == PlayState::Paused
            && self.adapter.resume().implemented("resume")?.is_some()
        {
            return Ok(());
        }

        self.adapter.play().implemented("play")?;
        Ok(())
    }

    /// Move the playback position by `offset` microseconds.
    ///
    /// A target before the start clamps to 0. A target past the end of the
    /// track skips to the next track instead.
    ///
    /// # Errors
    ///
    /// Returns `BridgeError::Adapter` if the host fails.
    pub fn seek(&self, offset: i64) -> Result<()> {
        if !self.can_seek()? {
            capability_denied("Seek");
            return Ok(());
        }

        let target = self.position()?.saturating_add(offset).max(0);

        if self.track_length()?.is_some_and(|length| target > length) {
            debug!(target, "Seek target is past the end of the track, skipping");
            return self.next();
        }

        self.seek_to(target)
    }

    /// Jump to `position` microseconds within `track`.
    ///
    /// Ignored when `track` is not the current track or the position lies
    /// outside it.
    ///
    /// # Errors
    ///
    /// Returns `BridgeError::Adapter` if the host fails.
    pub fn set_position(&self, track: &TrackId, position: i64) -> Result<()> {
        if !self.can_seek()? {
            capability_denied("SetPosition");
            return Ok(());
        }

        let metadata = self.metadata()?;
        if metadata.track_id() != Some(track) {
            debug!(%track, "SetPosition for a track that is not current, ignoring");
            return Ok(());
        }

        let length = metadata
            .length()
            .filter(|length| *length > 0)
            .unwrap_or(i64::MAX);
        if position < 0 || position > length {
            debug!(position, length, "SetPosition outside the track, ignoring");
            return Ok(());
        }

        self.seek_to(position)
    }

    fn seek_to(&self, position: i64) -> Result<()> {
        if self.adapter.seek(position).implemented("seek")?.is_some() {
            self.dispatcher.seeked(position)?;
        }
        Ok(())
    }

    /// Open and play `uri`.
    ///
    /// # Errors
    ///
    /// Returns `BridgeError::Adapter` if the host fails.
    pub fn open_uri(&self, uri: &str) -> Result<()> {
        if !self.can_control()? {
            capability_denied("OpenUri");
            return Ok(());
        }
        self.adapter.open_uri(uri).implemented("open_uri")?;
        Ok(())
    }

    /// # Errors
    ///
    /// Returns `BridgeError::Adapter` if the host fails.
    pub fn playback_status(&self) -> Result<PlayState> {
        self.adapter
            .playback_status()
            .or_fallback("playback_status", PlayState::Stopped)
    }

    /// # Errors
    ///
    /// Returns `BridgeError::Adapter` if the host fails.
    pub fn loop_status(&self) -> Result<LoopStatus> {
        self.adapter
            .loop_status()
            .or_fallback("loop_status", LoopStatus::None)
    }

    /// Change the loop mode from its wire tag.
    ///
    /// # Errors
    ///
    /// Returns `BridgeError::InvalidEnum` for an unknown tag, or
    /// `BridgeError::Adapter` if the host fails.
    pub fn set_loop_status(&self, status: &str) -> Result<()> {
        let status: LoopStatus = status.parse()?;
        if !self.can_control()? {
            capability_denied("LoopStatus");
            return Ok(());
        }
        if self
            .adapter
            .set_loop_status(status)
            .implemented("set_loop_status")?
            .is_some()
        {
            self.dispatcher.refresh(Interface::Player, LOOP_STATUS_CHANGED)?;
        }
        Ok(())
    }

    /// # Errors
    ///
    /// Returns `BridgeError::Adapter` if the host fails.
    pub fn rate(&self) -> Result<f64> {
        let rate = self.adapter.rate().or_fallback("rate", self.config.default_rate)?;
        Ok(finite_or(player::RATE, rate, self.config.default_rate))
    }

    /// Change the playback rate. A rate of 0.0 pauses instead.
    ///
    /// # Errors
    ///
    /// Returns `BridgeError::InvalidValue` for a rate outside
    /// `[MinimumRate, MaximumRate]`, or `BridgeError::Adapter` if the host fails.
    pub fn set_rate(&self, rate: f64) -> Result<()> {
        if rate == 0.0 {
            return self.pause();
        }

        let (minimum, maximum) = (self.minimum_rate(), self.maximum_rate());
        if !rate.is_finite() || rate < minimum || rate > maximum {
            return Err(BridgeError::invalid_value(
                player::RATE,
                format!("{rate} is outside [{minimum}, {maximum}]"),
            ));
        }

        if !self.can_control()? {
            capability_denied("Rate");
            return Ok(());
        }
        if self.adapter.set_rate(rate).implemented("set_rate")?.is_some() {
            self.dispatcher.refresh(Interface::Player, RATE_CHANGED)?;
        }
        Ok(())
    }

    /// Lowest accepted rate.
    pub fn minimum_rate(&self) -> f64 {
        self.config.minimum_rate
    }

    /// Highest accepted rate.
    pub fn maximum_rate(&self) -> f64 {
        self.config.maximum_rate
    }

    /// # Errors
    ///
    /// Returns `BridgeError::Adapter` if the host fails.
    pub fn shuffle(&self) -> Result<bool> {
        self.adapter.shuffle().or_fallback("shuffle", false)
    }

    /// # Errors
    ///
    /// Returns `BridgeError::Adapter` if the host fails.
    pub fn set_shuffle(&self, shuffle: bool) -> Result<()> {
        if !self.can_control()? {
            capability_denied("Shuffle");
            return Ok(());
        }
        if self
            .adapter
            .set_shuffle(shuffle)
            .implemented("set_shuffle")?
            .is_some()
        {
            self.dispatcher.refresh(Interface::Player, SHUFFLE_CHANGED)?;
        }
        Ok(())
    }

    /// Current volume; a muted player reports 0.0.
    ///
    /// # Errors
    ///
    /// Returns `BridgeError::Adapter` if the host fails.
    pub fn volume(&self) -> Result<f64> {
        if self.adapter.is_mute().or_fallback("is_mute", false)? {
            return Ok(0.0);
        }
        let volume = self.adapter.volume().or_fallback("volume", 1.0)?;
        Ok(finite_or(player::VOLUME, volume, 1.0))
    }

    /// Change the volume. 0.0 mutes; a positive value unmutes first.
    ///
    /// # Errors
    ///
    /// Returns `BridgeError::InvalidValue` for a negative or non-finite volume,
    /// or `BridgeError::Adapter` if the host fails.
    pub fn set_volume(&self, volume: f64) -> Result<()> {
        if !volume.is_finite() || volume < 0.0 {
            return Err(BridgeError::invalid_value(
                player::VOLUME,
                format!("{volume} is not a non-negative number"),
            ));
        }

        if !self.can_control()? {
            capability_denied("Volume");
            return Ok(());
        }

        let applied = if volume == 0.0 {
            match self.adapter.set_mute(true).implemented("set_mute")? {
                Some(()) => true,
                None => self.adapter.set_volume(0.0).implemented("set_volume")?.is_some(),
            }
        } else {
            if self.adapter.is_mute().or_fallback("is_mute", false)? {
                self.adapter.set_mute(false).implemented("set_mute")?;
            }
            self.adapter
                .set_volume(volume)
                .implemented("set_volume")?
                .is_some()
        };

        if applied {
            self.dispatcher.refresh(Interface::Player, VOLUME_CHANGED)?;
        }
        Ok(())
    }

    /// Metadata of the current track.
    ///
    /// # Errors
    ///
    /// Returns `BridgeError::Adapter` if the host fails.
    pub fn metadata(&self) -> Result<Metadata> {
        if let Some(overridden) = self.adapter.metadata().implemented("metadata")? {
            return Ok(overridden);
        }

        let track = self
            .adapter
            .current_track()
            .or_fallback("current_track", None)?;

        build_metadata(track.as_ref(), self.adapter.as_ref())
    }

    /// Playback position in microseconds, always read live.
    ///
    /// # Errors
    ///
    /// Returns `BridgeError::Adapter` if the host fails.
    pub fn position(&self) -> Result<i64> {
        self.adapter.position().or_fallback("position", 0)
    }

    fn track_length(&self) -> Result<Option<i64>> {
        Ok(self.metadata()?.length().filter(|length| *length > 0))
    }

    /// # Errors
    ///
    /// Returns `BridgeError::Adapter` if the host fails.
    pub fn can_control(&self) -> Result<bool> {
        self.adapter.can_control().or_fallback("can_control", false)
    }

    fn gated(
        &self,
        operation: &'static str,
        predicate: impl FnOnce(&dyn PlayerAdapter) -> AdapterResult<bool>,
    ) -> Result<bool> {
        if !self.can_control()? {
            return Ok(false);
        }
        predicate(self.adapter.as_ref()).or_fallback(operation, false)
    }

    /// # Errors
    ///
    /// Returns `BridgeError::Adapter` if the host fails.
    pub fn can_go_next(&self) -> Result<bool> {
        self.gated("can_go_next", |adapter| adapter.can_go_next())
    }

    /// # Errors
    ///
    /// Returns `BridgeError::Adapter` if the host fails.
    pub fn can_go_previous(&self) -> Result<bool> {
        self.gated("can_go_previous", |adapter| adapter.can_go_previous())
    }

    /// # Errors
    ///
    /// Returns `BridgeError::Adapter` if the host fails.
    pub fn can_play(&self) -> Result<bool> {
        self.gated("can_play", |adapter| adapter.can_play())
    }

    /// # Errors
    ///
    /// Returns `BridgeError::Adapter` if the host fails.
    pub fn can_pause(&self) -> Result<bool> {
        self.gated("can_pause", |adapter| adapter.can_pause())
    }

    /// # Errors
    ///
    /// Returns `BridgeError::Adapter` if the host fails.
    pub fn can_seek(&self) -> Result<bool> {
        self.gated("can_seek", |adapter| adapter.can_seek())
    }

    pub(crate) fn property(&self, name: &str) -> Result<PropertyValue> {
        Ok(match name {
            player::PLAYBACK_STATUS => self.playback_status()?.as_str().to_string().into(),
            player::LOOP_STATUS => self.loop_status()?.as_str().to_string().into(),
            player::RATE => self.rate()?.into(),
            player::SHUFFLE => self.shuffle()?.into(),
            player::METADATA => self.metadata()?.into(),
            player::VOLUME => self.volume()?.into(),
            player::POSITION => self.position()?.into(),
            player::MINIMUM_RATE => self.minimum_rate().into(),
            player::MAXIMUM_RATE => self.maximum_rate().into(),
            player::CAN_GO_NEXT => self.can_go_next()?.into(),
            player::CAN_GO_PREVIOUS => self.can_go_previous()?.into(),
            player::CAN_PLAY => self.can_play()?.into(),
            player::CAN_PAUSE => self.can_pause()?.into(),
            player::CAN_SEEK => self.can_seek()?.into(),
            player::CAN_CONTROL => self.can_control()?.into(),
            _ => return Err(unknown_property(Interface::Player, name)),
        })
    }
}
