//! Slot selection over the three buttons below the status display.

use auton_format::{Section, SlotId, SlotNumber, TICK};

use crate::SlotStore;
use crate::rig::{StatusDisplay, Ticker};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Buttons {
    pub left: bool,
    pub center: bool,
    pub right: bool,
}

pub trait ButtonPanel {
    fn buttons(&mut self) -> Buttons;
}

/// Ordered menu entries with a wrapping cursor.
#[derive(Debug, Clone)]
pub struct Menu {
    entries: Vec<SlotId>,
    cursor: usize,
}

impl Menu {
    /// `None`, slots 1..=10 and programming skills; with `sections` also each
    /// skills section and the hard-coded fallback.
    pub fn new(sections: bool) -> Self {
        let mut entries = vec![SlotId::None];
        entries.extend(SlotNumber::all().map(SlotId::Regular));
        entries.push(SlotId::Skills);
        if sections {
            entries.extend(Section::all().map(SlotId::Section));
            entries.push(SlotId::Fallback);
        }
        Self { entries, cursor: 0 }
    }

    pub fn current(&self) -> SlotId {
        self.entries[self.cursor]
    }

    pub fn next(&mut self) {
        self.cursor = (self.cursor + 1) % self.entries.len();
    }

    pub fn prev(&mut self) {
        self.cursor = self.cursor.checked_sub(1).unwrap_or(self.entries.len() - 1);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Display label for a menu entry, marking slots that have no file.
pub fn label(slot: SlotId, store: &SlotStore) -> String {
    match slot {
        SlotId::None => "None".to_string(),
        SlotId::Skills => "Programming skills".to_string(),
        SlotId::Fallback => "Hardcoded Skills".to_string(),
        SlotId::Regular(n) => empty_marker(format!("Slot: {}", n.get()), slot, store),
        SlotId::Section(s) => empty_marker(format!("Skills Part: {}", s.index() + 1), slot, store),
    }
}

fn empty_marker(text: String, slot: SlotId, store: &SlotStore) -> String {
    if store.exists(slot) {
        text
    } else {
        format!("{text} (EMPTY)")
    }
}

/// Lets the operator pick a slot. Left and right move on their rising edge,
/// center confirms on its rising edge. Buttons are polled once per tick.
pub fn select<P>(panel: &mut P, store: &SlotStore, prompt: &str, sections: bool) -> SlotId
where
    P: ButtonPanel + StatusDisplay + Ticker,
{
    let mut menu = Menu::new(sections);
    let mut prev = panel.buttons();
    panel.show(prompt, &label(menu.current(), store));
    loop {
        let buttons = panel.buttons();
        if buttons.center && !prev.center {
            return menu.current();
        }
        if buttons.right && !prev.right {
            menu.next();
            panel.show(prompt, &label(menu.current(), store));
        } else if buttons.left && !prev.left {
            menu.prev();
            panel.show(prompt, &label(menu.current(), store));
        }
        prev = buttons;
        panel.sleep(TICK);
    }
}

#[cfg(test)]
mod tests {
    use super::{Buttons, Menu, label, select};
    use crate::SlotStore;
    use crate::bench::BenchRig;
    use auton_format::SlotId;

    #[test]
    fn menu_wraps_both_ways() {
        let mut menu = Menu::new(false);
        assert_eq!(menu.len(), 12);
        assert_eq!(menu.current(), SlotId::None);

        menu.prev();
        assert_eq!(menu.current(), SlotId::Skills);
        menu.next();
        assert_eq!(menu.current(), SlotId::None);
        menu.next();
        assert_eq!(menu.current(), SlotId::regular(1).unwrap());
    }

    #[test]
    fn fine_grained_menu_exposes_sections_and_fallback() {
        let mut menu = Menu::new(true);
        assert_eq!(menu.len(), 17);
        menu.prev();
        assert_eq!(menu.current(), SlotId::Fallback);
        menu.prev();
        assert_eq!(menu.current(), SlotId::section(3).unwrap());
    }

    #[test]
    fn select_moves_on_edges_and_confirms_on_center() {
        let dir = tempfile::tempdir().unwrap();
        let store = SlotStore::new(dir.path());
        let right = Buttons {
            right: true,
            ..Buttons::default()
        };
        let left = Buttons {
            left: true,
            ..Buttons::default()
        };
        let center = Buttons {
            center: true,
            ..Buttons::default()
        };
        let up = Buttons::default();
        let mut rig = BenchRig::idle();
        rig.push_buttons([up, right, right, up, right, up, left, up, right, up, right, center]);

        let chosen = select(&mut rig, &store, "Load from?", false);

        assert_eq!(chosen, SlotId::regular(3).unwrap());
        assert_eq!(
            rig.last_screen(),
            Some(&("Load from?".to_string(), "Slot: 3 (EMPTY)".to_string()))
        );
    }

    #[test]
    fn held_center_does_not_confirm_immediately() {
        let dir = tempfile::tempdir().unwrap();
        let store = SlotStore::new(dir.path());
        let center = Buttons {
            center: true,
            ..Buttons::default()
        };
        let right = Buttons {
            right: true,
            ..Buttons::default()
        };
        let mut rig = BenchRig::idle();
        rig.push_buttons([center, center, right, Buttons::default(), center]);

        assert_eq!(
            select(&mut rig, &store, "Save to?", false),
            SlotId::regular(1).unwrap()
        );
    }

    #[test]
    fn labels_mark_empty_slots() {
        let dir = tempfile::tempdir().unwrap();
        let store = SlotStore::new(dir.path());
        let slot = SlotId::regular(6).unwrap();

        assert_eq!(label(slot, &store), "Slot: 6 (EMPTY)");
        store.replace(slot, &[0]).unwrap();
        assert_eq!(label(slot, &store), "Slot: 6");
        assert_eq!(label(SlotId::section(0).unwrap(), &store), "Skills Part: 1 (EMPTY)");
        assert_eq!(label(SlotId::None, &store), "None");
    }
}
