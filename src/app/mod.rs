//! Application context
//!
//! [`ApplicationController`] owns the site chrome (manifest, title, logo,
//! navigation, icon set) and the page cache. It is built once and shared
//! behind an `Arc`; registering it as a [`SyncSubscriber`] keeps it current
//! as the mirrored stores change.

mod icons;
mod manifest;
mod navigation;

use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock, RwLockReadGuard};

use serde::Serialize;

use crate::config::{Config, CONFIG_RULE, CONTENT_RULE};
use crate::content::PagesManager;
use crate::data::{SyncNotice, SyncSubscriber};
use crate::error::QuireResult;

pub use icons::{Icon, IconDescriptor, IconRequest, IconResponse, IconServer};
pub use manifest::{ApplicationLogo, DisplayMode, ManifestIcon, Manifests, WebManifest};
pub use navigation::{Navigation, NavigationItem};

/// Lifecycle of the application context
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AppState {
    /// Built, chrome not loaded yet
    Initializing,
    /// Loaded by `initialize()`
    Ready,
    /// Reloaded at least once after a store changed
    Updated,
}

/// Where the controller finds its inputs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppSettings {
    /// Mirrored site configuration directory
    pub config_store: PathBuf,
    /// Manifest file or directory, relative to `config_store`
    pub manifest: String,
    /// Navigation directory, relative to `config_store`
    pub navigation: String,
    /// Application icons directory
    pub icons: Option<PathBuf>,
}

impl AppSettings {
    pub fn from_config(config: &Config) -> QuireResult<Self> {
        Ok(Self {
            config_store: config.data_path()?.join(CONFIG_RULE),
            manifest: config.manifest_name().to_string(),
            navigation: config.navigation_name().to_string(),
            icons: config.site.icons.clone(),
        })
    }

    pub fn manifest_path(&self) -> PathBuf {
        self.config_store.join(&self.manifest)
    }

    pub fn navigation_path(&self) -> PathBuf {
        self.config_store.join(&self.navigation)
    }
}

/// Subdirectory of the `content` store holding page files
pub const PAGES_DIR: &str = "pages";

/// Page cache over `<store>/content/pages`
pub fn pages_for(config: &Config) -> QuireResult<PagesManager> {
    let root = config.data_path()?.join(CONTENT_RULE).join(PAGES_DIR);
    Ok(PagesManager::new(vec![root], &config.content.extension).with_policy(config.content.refresh))
}

#[derive(Debug, Default)]
struct Chrome {
    manifests: Manifests,
    navigation: Navigation,
    icons: Vec<Icon>,
}

/// Shared application context
pub struct ApplicationController {
    settings: AppSettings,
    pages: Arc<PagesManager>,
    chrome: RwLock<Chrome>,
    state: RwLock<AppState>,
}

impl ApplicationController {
    pub fn new(settings: AppSettings, pages: Arc<PagesManager>) -> Self {
        Self {
            settings,
            pages,
            chrome: RwLock::new(Chrome::default()),
            state: RwLock::new(AppState::Initializing),
        }
    }

    /// Load chrome and pages, then mark the context ready
    pub fn initialize(&self) -> QuireResult<()> {
        self.reload_chrome()?;
        self.pages.load();
        self.set_state(AppState::Ready);
        tracing::info!(title = %self.title(), pages = self.pages.len(), "application ready");
        Ok(())
    }

    /// Reload chrome and refresh pages after a store changed
    ///
    /// Before `initialize()` this loads data but leaves the state alone.
    pub fn updated(&self) -> QuireResult<()> {
        self.reload_chrome()?;
        self.pages.refresh();
        if self.state() != AppState::Initializing {
            self.set_state(AppState::Updated);
        }
        Ok(())
    }

    pub fn state(&self) -> AppState {
        *self.state.read().unwrap_or_else(|e| e.into_inner())
    }

    pub fn settings(&self) -> &AppSettings {
        &self.settings
    }

    pub fn pages(&self) -> &Arc<PagesManager> {
        &self.pages
    }

    /// Default manifest name; empty until a manifest is loaded
    pub fn title(&self) -> String {
        self.chrome()
            .manifests
            .default_manifest()
            .map(|m| m.name.clone())
            .unwrap_or_default()
    }

    pub fn logo(&self) -> Option<ApplicationLogo> {
        self.chrome().manifests.default_manifest()?.logo()
    }

    pub fn manifest(&self, language: Option<&str>) -> Option<WebManifest> {
        self.chrome().manifests.get(language).cloned()
    }

    /// Items of a navigation section; empty when unknown
    pub fn navigation(&self, section: &str) -> Vec<NavigationItem> {
        self.chrome().navigation.section(section).to_vec()
    }

    pub fn sections(&self) -> Vec<String> {
        self.chrome().navigation.names()
    }

    pub fn icons(&self) -> Vec<Icon> {
        self.chrome().icons.clone()
    }

    fn reload_chrome(&self) -> QuireResult<()> {
        let manifest_path = self.settings.manifest_path();
        let manifests = or_missing(Manifests::load(&manifest_path), &manifest_path)?;

        let navigation_path = self.settings.navigation_path();
        let navigation = or_missing(Navigation::load(&navigation_path), &navigation_path)?;

        let icons = match &self.settings.icons {
            Some(dir) => or_missing(IconServer::new(dir).icons(), dir)?,
            None => Vec::new(),
        };

        tracing::debug!(
            sections = navigation.sections.len(),
            icons = icons.len(),
            "site chrome loaded"
        );
        *self.chrome.write().unwrap_or_else(|e| e.into_inner()) = Chrome {
            manifests,
            navigation,
            icons,
        };
        Ok(())
    }

    fn chrome(&self) -> RwLockReadGuard<'_, Chrome> {
        self.chrome.read().unwrap_or_else(|e| e.into_inner())
    }

    fn set_state(&self, state: AppState) {
        *self.state.write().unwrap_or_else(|e| e.into_inner()) = state;
    }
}

impl SyncSubscriber for ApplicationController {
    fn updated(&self, notice: &SyncNotice) -> QuireResult<()> {
        tracing::debug!(rule = %notice.rule, pass = notice.pass, "store changed, reloading");
        ApplicationController::updated(self)
    }
}

/// Treat a missing input as empty, logging it
fn or_missing<T: Default>(result: QuireResult<T>, path: &Path) -> QuireResult<T> {
    match result {
        Err(e) if e.is_not_found() => {
            tracing::warn!(path = %path.display(), "not found, leaving empty");
            Ok(T::default())
        }
        other => other,
    }
}
