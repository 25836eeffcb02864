//! In-memory UI surface with a virtual clock
//!
//! Records everything the coordinator does to the page so the CLI can
//! report it and tests can assert on it. Failure knobs let callers
//! simulate blocked popups, clipboard denial and the like.

use crate::controls::dropdown::MenuPlacement;
use crate::controls::theme::Theme;
use crate::controls::toast::ToastKind;
use crate::surface::{
    DropdownSurface, MetaField, PageActions, Rect, ThemeSurface, TimerHost, TimerId, ToastSurface, WindowHandle,
};
use crate::utils::error::{Result, WatchPageError};
use std::collections::{BTreeMap, HashMap};
use std::time::Duration;

/// Observable side effect on the page
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageEffect {
    Download { url: String, file_name: String },
    Clipboard { text: String, legacy: bool },
    OpenWindow { url: String },
}

/// What happens when the page tries to open a new window
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum WindowBehavior {
    #[default]
    Opens,
    /// No handle comes back
    Blocked,
    /// A handle comes back already closed
    ClosedImmediately,
    /// The call itself fails
    Fails,
}

#[derive(Debug, Clone)]
struct DropdownFixture {
    rect: Rect,
    menu_height: f64,
    items: usize,
    open: bool,
    focused: Option<usize>,
    placement: Option<MenuPlacement>,
}

#[derive(Debug)]
pub struct HeadlessSurface {
    page_url: String,
    now: Duration,
    next_timer: u64,
    timers: BTreeMap<TimerId, Duration>,

    has_toast: bool,
    toast: Option<(String, ToastKind)>,
    toast_history: Vec<(String, ToastKind)>,

    viewport_height: f64,
    dropdowns: HashMap<String, DropdownFixture>,
    trigger_focused: Option<String>,
    dismiss_listeners: bool,

    system_dark: Option<bool>,
    theme: Option<Theme>,
    chrome_color: Option<&'static str>,
    theme_icon: Option<(String, bool)>,
    announced: Vec<Theme>,

    file_name: Option<String>,
    year: Option<i32>,
    meta: BTreeMap<MetaField, String>,
    loading: bool,
    error_overlay: Option<String>,
    page_listeners: bool,

    clipboard_fails: bool,
    legacy_copy_fails: bool,
    download_fails: bool,
    window_behavior: WindowBehavior,
    effects: Vec<PageEffect>,
}

impl HeadlessSurface {
    pub fn new(page_url: impl Into<String>) -> Self {
        Self {
            page_url: page_url.into(),
            now: Duration::ZERO,
            next_timer: 1,
            timers: BTreeMap::new(),
            has_toast: true,
            toast: None,
            toast_history: Vec::new(),
            viewport_height: 800.0,
            dropdowns: HashMap::new(),
            trigger_focused: None,
            dismiss_listeners: false,
            system_dark: None,
            theme: None,
            chrome_color: None,
            theme_icon: None,
            announced: Vec::new(),
            file_name: Some(String::new()),
            year: None,
            meta: BTreeMap::new(),
            loading: false,
            error_overlay: None,
            page_listeners: false,
            clipboard_fails: false,
            legacy_copy_fails: false,
            download_fails: false,
            window_behavior: WindowBehavior::Opens,
            effects: Vec::new(),
        }
    }

    // Clock

    pub fn now(&self) -> Duration {
        self.now
    }

    /// Remove and return the earliest timer due at or before `until`,
    /// moving the clock to its deadline
    pub fn pop_due(&mut self, until: Duration) -> Option<TimerId> {
        let (&id, &deadline) = self
            .timers
            .iter()
            .filter(|(_, deadline)| **deadline <= until)
            .min_by_key(|(id, deadline)| (**deadline, **id))?;
        self.timers.remove(&id);
        self.now = self.now.max(deadline);
        Some(id)
    }

    /// Move the clock forward without firing anything
    pub fn set_now(&mut self, now: Duration) {
        self.now = self.now.max(now);
    }

    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }

    // Fixtures and knobs

    pub fn remove_toast_element(&mut self) {
        self.has_toast = false;
    }

    pub fn add_dropdown(&mut self, id: &str, rect: Rect, menu_height: f64, items: usize) {
        self.dropdowns.insert(
            id.to_string(),
            DropdownFixture {
                rect,
                menu_height,
                items,
                open: false,
                focused: None,
                placement: None,
            },
        );
    }

    /// Focus leaves the menu items without closing the menu
    pub fn blur_menu(&mut self, id: &str) {
        if let Some(d) = self.dropdowns.get_mut(id) {
            d.focused = None;
        }
    }

    pub fn set_viewport_height(&mut self, height: f64) {
        self.viewport_height = height;
    }

    pub fn set_system_prefers_dark(&mut self, dark: Option<bool>) {
        self.system_dark = dark;
    }

    pub fn set_file_name_text(&mut self, name: Option<&str>) {
        self.file_name = name.map(str::to_string);
    }

    pub fn fail_clipboard(&mut self, fail: bool) {
        self.clipboard_fails = fail;
    }

    pub fn fail_legacy_copy(&mut self, fail: bool) {
        self.legacy_copy_fails = fail;
    }

    pub fn fail_download(&mut self, fail: bool) {
        self.download_fails = fail;
    }

    pub fn set_window_behavior(&mut self, behavior: WindowBehavior) {
        self.window_behavior = behavior;
    }

    // Observations

    /// Visible toast
    pub fn toast(&self) -> Option<(&str, ToastKind)> {
        self.toast.as_ref().map(|(m, k)| (m.as_str(), *k))
    }

    /// Every toast shown so far, oldest first
    pub fn toast_history(&self) -> &[(String, ToastKind)] {
        &self.toast_history
    }

    pub fn toasts_of_kind(&self, kind: ToastKind) -> usize {
        self.toast_history.iter().filter(|(_, k)| *k == kind).count()
    }

    pub fn dropdown_open(&self, id: &str) -> bool {
        self.dropdowns.get(id).is_some_and(|d| d.open)
    }

    pub fn placement(&self, id: &str) -> Option<MenuPlacement> {
        self.dropdowns.get(id).and_then(|d| d.placement)
    }

    pub fn trigger_focused(&self) -> Option<&str> {
        self.trigger_focused.as_deref()
    }

    pub fn dismiss_listeners_active(&self) -> bool {
        self.dismiss_listeners
    }

    pub fn theme(&self) -> Option<Theme> {
        self.theme
    }

    /// Value of the theme-color meta tag
    pub fn chrome_color(&self) -> Option<&str> {
        self.chrome_color
    }

    pub fn theme_icon(&self) -> Option<(&str, bool)> {
        self.theme_icon.as_ref().map(|(icon, pressed)| (icon.as_str(), *pressed))
    }

    pub fn announced_themes(&self) -> &[Theme] {
        &self.announced
    }

    pub fn file_name_text(&self) -> Option<&str> {
        self.file_name.as_deref()
    }

    pub fn year(&self) -> Option<i32> {
        self.year
    }

    pub fn meta(&self, field: MetaField) -> Option<&str> {
        self.meta.get(&field).map(String::as_str)
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error_overlay(&self) -> Option<&str> {
        self.error_overlay.as_deref()
    }

    pub fn page_listeners_active(&self) -> bool {
        self.page_listeners
    }

    pub fn effects(&self) -> &[PageEffect] {
        &self.effects
    }
}

impl TimerHost for HeadlessSurface {
    fn set_timeout(&mut self, delay: Duration) -> TimerId {
        let id = TimerId(self.next_timer);
        self.next_timer += 1;
        self.timers.insert(id, self.now + delay);
        id
    }

    fn clear_timeout(&mut self, id: TimerId) {
        self.timers.remove(&id);
    }
}

impl ToastSurface for HeadlessSurface {
    fn has_toast(&self) -> bool {
        self.has_toast
    }

    fn show_toast(&mut self, message: &str, kind: ToastKind) {
        self.toast = Some((message.to_string(), kind));
        self.toast_history.push((message.to_string(), kind));
    }

    fn hide_toast(&mut self) {
        self.toast = None;
    }
}

impl DropdownSurface for HeadlessSurface {
    fn has_dropdown(&self, id: &str) -> bool {
        self.dropdowns.contains_key(id)
    }

    fn container_rect(&self, id: &str) -> Option<Rect> {
        self.dropdowns.get(id).map(|d| d.rect)
    }

    fn viewport_height(&self) -> f64 {
        self.viewport_height
    }

    fn menu_height(&self, id: &str) -> f64 {
        self.dropdowns.get(id).map_or(0.0, |d| d.menu_height)
    }

    fn set_dropdown_open(&mut self, id: &str, open: bool) {
        if let Some(d) = self.dropdowns.get_mut(id) {
            d.open = open;
            if !open {
                d.focused = None;
            }
        }
    }

    fn place_menu(&mut self, id: &str, placement: MenuPlacement) {
        if let Some(d) = self.dropdowns.get_mut(id) {
            d.placement = Some(placement);
        }
    }

    fn menu_item_count(&self, id: &str) -> usize {
        self.dropdowns.get(id).map_or(0, |d| d.items)
    }

    fn focused_menu_item(&self, id: &str) -> Option<usize> {
        self.dropdowns.get(id).and_then(|d| d.focused)
    }

    fn focus_menu_item(&mut self, id: &str, index: usize) {
        if let Some(d) = self.dropdowns.get_mut(id) {
            if index < d.items {
                d.focused = Some(index);
                self.trigger_focused = None;
            }
        }
    }

    fn focus_trigger(&mut self, id: &str) {
        self.trigger_focused = Some(id.to_string());
    }

    fn set_dismiss_listeners(&mut self, active: bool) {
        self.dismiss_listeners = active;
    }
}

impl ThemeSurface for HeadlessSurface {
    fn apply_theme(&mut self, theme: Theme) {
        self.theme = Some(theme);
        self.chrome_color = Some(theme.chrome_color());
    }

    fn set_theme_icon(&mut self, icon: &str, pressed: bool) {
        self.theme_icon = Some((icon.to_string(), pressed));
    }

    fn announce_theme(&mut self, theme: Theme) {
        self.announced.push(theme);
    }

    fn system_prefers_dark(&self) -> Option<bool> {
        self.system_dark
    }
}

impl PageActions for HeadlessSurface {
    fn page_url(&self) -> String {
        self.page_url.clone()
    }

    fn file_name(&self) -> Option<String> {
        self.file_name.clone()
    }

    fn set_file_name(&mut self, name: &str) {
        self.file_name = Some(name.to_string());
    }

    fn set_year(&mut self, year: i32) {
        self.year = Some(year);
    }

    fn write_clipboard(&mut self, text: &str) -> Result<()> {
        if self.clipboard_fails {
            return Err(WatchPageError::Clipboard("permission denied".to_string()));
        }
        self.effects.push(PageEffect::Clipboard { text: text.to_string(), legacy: false });
        Ok(())
    }

    fn legacy_copy(&mut self, text: &str) -> Result<()> {
        if self.legacy_copy_fails {
            return Err(WatchPageError::Clipboard("copy command unsupported".to_string()));
        }
        self.effects.push(PageEffect::Clipboard { text: text.to_string(), legacy: true });
        Ok(())
    }

    fn trigger_download(&mut self, url: &str, file_name: &str) -> Result<()> {
        if self.download_fails {
            return Err(WatchPageError::Download("link click rejected".to_string()));
        }
        self.effects.push(PageEffect::Download {
            url: url.to_string(),
            file_name: file_name.to_string(),
        });
        Ok(())
    }

    fn open_window(&mut self, url: &str) -> Result<Option<WindowHandle>> {
        match self.window_behavior {
            WindowBehavior::Fails => Err(WatchPageError::Navigation("window.open threw".to_string())),
            WindowBehavior::Blocked => Ok(None),
            behavior => {
                self.effects.push(PageEffect::OpenWindow { url: url.to_string() });
                Ok(Some(WindowHandle {
                    closed: behavior == WindowBehavior::ClosedImmediately,
                }))
            }
        }
    }

    fn set_meta(&mut self, field: MetaField, text: &str) {
        self.meta.insert(field, text.to_string());
    }

    fn set_loading(&mut self, visible: bool) {
        self.loading = visible;
    }

    fn set_error_overlay(&mut self, message: Option<&str>) {
        self.error_overlay = message.map(str::to_string);
    }

    fn set_page_listeners(&mut self, active: bool) {
        self.page_listeners = active;
    }
}
