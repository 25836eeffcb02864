//! Dropdown menus
//!
//! Only one dropdown is open at a time: opening a container closes every
//! other one first. While a menu is open the manager owns the dismiss
//! listeners (outside click, keyboard) and releases them on close.

use crate::surface::{DropdownSurface, EventResponse, Key, Rect};
use log::debug;

/// Where the menu is placed relative to its container
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuPlacement {
    Below,
    Above,
}

/// Decide whether a menu opens below or above its container
///
/// Below is preferred; the menu flips above only when it does not fit
/// below and does fit above. A menu measuring zero height has not been
/// laid out yet, so `fallback_height` stands in for it.
pub fn compute_placement(rect: Rect, viewport_height: f64, menu_height: f64, fallback_height: f64) -> MenuPlacement {
    let height = if menu_height > 0.0 { menu_height } else { fallback_height };
    let space_above = rect.top;
    let space_below = viewport_height - rect.bottom;

    if space_above > height && space_below < height {
        MenuPlacement::Above
    } else {
        MenuPlacement::Below
    }
}

/// Open/close state for the page's dropdown containers
#[derive(Debug)]
pub struct DropdownManager {
    open: Option<String>,
    fallback_height: f64,
}

impl DropdownManager {
    pub fn new(fallback_height: f64) -> Self {
        Self {
            open: None,
            fallback_height,
        }
    }

    /// Container currently open
    pub fn open_container(&self) -> Option<&str> {
        self.open.as_deref()
    }

    pub fn is_open(&self, id: &str) -> bool {
        self.open.as_deref() == Some(id)
    }

    /// Flip the named container. Returns whether it is open afterwards.
    pub fn toggle<S: DropdownSurface + ?Sized>(&mut self, surface: &mut S, id: &str) -> bool {
        if !surface.has_dropdown(id) {
            debug!("Dropdown '{}' not present on page", id);
            return false;
        }

        if self.is_open(id) {
            self.close_all(surface);
            return false;
        }

        self.close_all(surface);
        self.open(surface, id);
        true
    }

    fn open<S: DropdownSurface + ?Sized>(&mut self, surface: &mut S, id: &str) {
        surface.set_dropdown_open(id, true);

        let placement = match surface.container_rect(id) {
            Some(rect) => compute_placement(
                rect,
                surface.viewport_height(),
                surface.menu_height(id),
                self.fallback_height,
            ),
            None => MenuPlacement::Below,
        };
        surface.place_menu(id, placement);

        if surface.menu_item_count(id) > 0 {
            surface.focus_menu_item(id, 0);
        }
        surface.set_dismiss_listeners(true);

        debug!("Dropdown '{}' opened ({:?})", id, placement);
        self.open = Some(id.to_string());
    }

    /// Close whatever is open and hand focus back to its trigger
    pub fn close_all<S: DropdownSurface + ?Sized>(&mut self, surface: &mut S) {
        if let Some(id) = self.open.take() {
            surface.set_dropdown_open(&id, false);
            surface.focus_trigger(&id);
            surface.set_dismiss_listeners(false);
            debug!("Dropdown '{}' closed", id);
        }
    }

    /// Document click while a menu is open. `inside` names the container hit, if any.
    pub fn handle_outside_click<S: DropdownSurface + ?Sized>(&mut self, surface: &mut S, inside: Option<&str>) {
        match (&self.open, inside) {
            (Some(open), Some(hit)) if open == hit => {}
            (Some(_), _) => self.close_all(surface),
            (None, _) => {}
        }
    }

    /// Keyboard navigation inside the open menu
    pub fn handle_key<S: DropdownSurface + ?Sized>(&mut self, surface: &mut S, key: Key) -> EventResponse {
        let Some(id) = self.open.clone() else {
            return EventResponse::Pass;
        };

        let count = surface.menu_item_count(&id);
        if count == 0 {
            return EventResponse::Pass;
        }
        let active = surface.focused_menu_item(&id);

        match key {
            Key::Escape => {
                self.close_all(surface);
                EventResponse::Consume
            }
            Key::Down => {
                let next = active.map_or(0, |i| (i + 1) % count);
                surface.focus_menu_item(&id, next);
                EventResponse::Consume
            }
            Key::Up => {
                let prev = active.map_or(count - 1, |i| (i + count - 1) % count);
                surface.focus_menu_item(&id, prev);
                EventResponse::Consume
            }
            Key::Home => {
                surface.focus_menu_item(&id, 0);
                EventResponse::Consume
            }
            Key::End => {
                surface.focus_menu_item(&id, count - 1);
                EventResponse::Consume
            }
            Key::Tab => {
                // Focus leaves the menu; let the browser move it
                self.close_all(surface);
                EventResponse::Pass
            }
            _ => EventResponse::Pass,
        }
    }
}
