use std::sync::Arc;

use super::{capability_denied, unknown_property};
use crate::Result;
use crate::config::BridgeConfig;
use crate::services::mpris::{
    EventDispatcher, Interface, PropertyValue, RootAdapter, error::AdapterResultExt,
    properties::root,
};

const FULLSCREEN_CHANGED: &[&str] = &[root::FULLSCREEN];

/// Application identity and window controls.
#[derive(Clone)]
pub struct RootSurface {
    adapter: Arc<dyn RootAdapter>,
    config: Arc<BridgeConfig>,
    dispatcher: EventDispatcher,
    has_track_list: bool,
}

impl RootSurface {
    pub(crate) fn new(
        adapter: Arc<dyn RootAdapter>,
        config: Arc<BridgeConfig>,
        dispatcher: EventDispatcher,
        has_track_list: bool,
    ) -> Self {
        Self {
            adapter,
            config,
            dispatcher,
            has_track_list,
        }
    }

    /// Bring the player's window to the front, if it can.
    ///
    /// # Errors
    ///
    /// Returns `BridgeError::Adapter` if the host fails.
    pub fn raise(&self) -> Result<()> {
        if !self.can_raise()? {
            capability_denied("Raise");
            return Ok(());
        }
        self.adapter.raise().implemented("raise")?;
        Ok(())
    }

    /// Ask the player to exit, if it can.
    ///
    /// # Errors
    ///
    /// Returns `BridgeError::Adapter` if the host fails.
    pub fn quit(&self) -> Result<()> {
        if !self.can_quit()? {
            capability_denied("Quit");
            return Ok(());
        }
        self.adapter.quit().implemented("quit")?;
        Ok(())
    }

    /// # Errors
    ///
    /// Returns `BridgeError::Adapter` if the host fails.
    pub fn can_quit(&self) -> Result<bool> {
        self.adapter.can_quit().or_fallback("can_quit", false)
    }

    /// # Errors
    ///
    /// Returns `BridgeError::Adapter` if the host fails.
    pub fn can_raise(&self) -> Result<bool> {
        self.adapter.can_raise().or_fallback("can_raise", false)
    }

    /// # Errors
    ///
    /// Returns `BridgeError::Adapter` if the host fails.
    pub fn fullscreen(&self) -> Result<bool> {
        self.adapter.fullscreen().or_fallback("fullscreen", false)
    }

    /// Enter or leave fullscreen when `CanSetFullscreen` allows it.
    ///
    /// # Errors
    ///
    /// Returns `BridgeError::Adapter` if the host fails.
    pub fn set_fullscreen(&self, fullscreen: bool) -> Result<()> {
        if !self.can_set_fullscreen()? {
            capability_denied("Fullscreen");
            return Ok(());
        }
        if self
            .adapter
            .set_fullscreen(fullscreen)
            .implemented("set_fullscreen")?
            .is_some()
        {
            self.dispatcher.refresh(Interface::Root, FULLSCREEN_CHANGED)?;
        }
        Ok(())
    }

    /// # Errors
    ///
    /// Returns `BridgeError::Adapter` if the host fails.
    pub fn can_set_fullscreen(&self) -> Result<bool> {
        self.adapter
            .can_set_fullscreen()
            .or_fallback("can_set_fullscreen", false)
    }

    /// Whether a TrackList adapter is installed.
    pub fn has_track_list(&self) -> bool {
        self.has_track_list
    }

    /// Configured player name.
    pub fn identity(&self) -> String {
        self.config.identity.clone()
    }

    /// # Errors
    ///
    /// Returns `BridgeError::Adapter` if the host fails.
    pub fn desktop_entry(&self) -> Result<String> {
        self.adapter
            .desktop_entry()
            .or_fallback_with("desktop_entry", || self.config.desktop_entry.clone())
    }

    /// # Errors
    ///
    /// Returns `BridgeError::Adapter` if the host fails.
    pub fn supported_uri_schemes(&self) -> Result<Vec<String>> {
        self.adapter
            .uri_schemes()
            .or_fallback_with("uri_schemes", || self.config.supported_uri_schemes.clone())
    }

    /// # Errors
    ///
    /// Returns `BridgeError::Adapter` if the host fails.
    pub fn supported_mime_types(&self) -> Result<Vec<String>> {
        self.adapter
            .mime_types()
            .or_fallback_with("mime_types", || self.config.supported_mime_types.clone())
    }

    pub(crate) fn property(&self, name: &str) -> Result<PropertyValue> {
        Ok(match name {
            root::CAN_QUIT => self.can_quit()?.into(),
            root::CAN_RAISE => self.can_raise()?.into(),
            root::FULLSCREEN => self.fullscreen()?.into(),
            root::CAN_SET_FULLSCREEN => self.can_set_fullscreen()?.into(),
            root::HAS_TRACK_LIST => self.has_track_list().into(),
            root::IDENTITY => self.identity().into(),
            root::DESKTOP_ENTRY => self.desktop_entry()?.into(),
            root::SUPPORTED_URI_SCHEMES => self.supported_uri_schemes()?.into(),
            root::SUPPORTED_MIME_TYPES => self.supported_mime_types()?.into(),
            _ => return Err(unknown_property(Interface::Root, name)),
        })
    }
}
