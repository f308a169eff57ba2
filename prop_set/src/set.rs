//! The property collection: insertion-ordered storage with an id index,
//! closure-based mutation that drives change notification, and whole-set
//! merge/assign.

use prop_types::FourCC;
use prop_value::{Property, RefTarget};
use std::collections::HashMap;
use std::rc::{Rc, Weak};

/// Observes mutations made through a [`PropertySet`].
///
/// Held weakly; the registering caller keeps the listener alive. Fires once
/// per mutated property, after the mutation has been applied.
pub trait ChangeListener {
    fn property_changed(&self, prop: &Property);
}

/// An ordered collection of properties, unique by id.
///
/// Name lookups are case-insensitive and return the first match in
/// insertion order; names are not required to be unique.
#[derive(Default)]
pub struct PropertySet {
    props: Vec<Property>,
    index: HashMap<FourCC, usize>,
    listener: Option<Weak<dyn ChangeListener>>,
}

impl PropertySet {
    pub fn new() -> Self {
        PropertySet::default()
    }

    /// Registers (or clears) the change listener. Only mutations made
    /// through the set's own mutating calls notify it; direct edits via
    /// a borrowed `&mut Property` do not.
    pub fn set_change_listener(&mut self, listener: Option<&Rc<dyn ChangeListener>>) {
        self.listener = listener.map(Rc::downgrade);
    }

    fn notify(&self, idx: usize) {
        if let Some(listener) = self.listener.as_ref().and_then(Weak::upgrade) {
            listener.property_changed(&self.props[idx]);
        }
    }

    /// Finds or creates the property with `id`. An existing property keeps
    /// its name and value (a notification fires for it); a new one starts
    /// untyped.
    pub fn create_property(&mut self, name: &str, id: FourCC) -> &mut Property {
        if let Some(&idx) = self.index.get(&id) {
            self.notify(idx);
            return &mut self.props[idx];
        }
        let idx = self.props.len();
        self.props.push(Property::new(name, id));
        self.index.insert(id, idx);
        self.notify(idx);
        &mut self.props[idx]
    }

    /// Creates a reference property viewing caller-owned memory. A
    /// duplicate `id` returns the existing property unchanged; the new
    /// target is ignored.
    pub fn create_reference_property(
        &mut self,
        name: &str,
        id: FourCC,
        target: RefTarget,
    ) -> &mut Property {
        if let Some(&idx) = self.index.get(&id) {
            self.notify(idx);
            return &mut self.props[idx];
        }
        let idx = self.props.len();
        self.props.push(Property::new_reference(name, id, target));
        self.index.insert(id, idx);
        self.notify(idx);
        &mut self.props[idx]
    }

    pub fn property_count(&self) -> usize {
        self.props.len()
    }

    pub fn property(&self, idx: usize) -> Option<&Property> {
        self.props.get(idx)
    }

    pub fn property_by_id(&self, id: FourCC) -> Option<&Property> {
        self.index.get(&id).map(|&idx| &self.props[idx])
    }

    pub fn property_by_name(&self, name: &str) -> Option<&Property> {
        self.props.iter().find(|p| p.name().eq_ignore_ascii_case(name))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Property> {
        self.props.iter()
    }

    /// Mutates the property at `idx` through `f`, then notifies. Returns
    /// whether the property existed. An id change that collides with
    /// another property's id is undone; ids stay unique within the set.
    pub fn modify_by_index(&mut self, idx: usize, f: impl FnOnce(&mut Property)) -> bool {
        if idx >= self.props.len() {
            return false;
        }
        let prior_id = self.props[idx].id();
        f(&mut self.props[idx]);
        let new_id = self.props[idx].id();
        if new_id != prior_id {
            if self.index.get(&new_id).is_some_and(|&other| other != idx) {
                self.props[idx].set_id(prior_id);
            } else {
                if self.index.get(&prior_id) == Some(&idx) {
                    self.index.remove(&prior_id);
                }
                self.index.insert(new_id, idx);
            }
        }
        self.notify(idx);
        true
    }

    /// Mutates the property with `id` through `f`, then notifies.
    pub fn modify_by_id(&mut self, id: FourCC, f: impl FnOnce(&mut Property)) -> bool {
        match self.index.get(&id) {
            Some(&idx) => self.modify_by_index(idx, f),
            None => false,
        }
    }

    /// Mutates the first property whose name matches case-insensitively.
    pub fn modify_by_name(&mut self, name: &str, f: impl FnOnce(&mut Property)) -> bool {
        match self
            .props
            .iter()
            .position(|p| p.name().eq_ignore_ascii_case(name))
        {
            Some(idx) => self.modify_by_index(idx, f),
            None => false,
        }
    }

    /// Find-or-create for the decoder. Notification is deferred to the
    /// caller, which fires it after the decoded bytes land.
    pub(crate) fn slot_for_decode(&mut self, id: FourCC) -> &mut Property {
        let idx = match self.index.get(&id) {
            Some(&idx) => idx,
            None => {
                let idx = self.props.len();
                self.props.push(Property::new("", id));
                self.index.insert(id, idx);
                idx
            }
        };
        &mut self.props[idx]
    }

    pub(crate) fn notify_id(&self, id: FourCC) {
        if let Some(&idx) = self.index.get(&id) {
            self.notify(idx);
        }
    }

    pub fn delete_property(&mut self, idx: usize) -> bool {
        if idx >= self.props.len() {
            return false;
        }
        self.props.remove(idx);
        self.rebuild_index();
        true
    }

    pub fn delete_property_by_id(&mut self, id: FourCC) -> bool {
        match self.index.get(&id) {
            Some(&idx) => self.delete_property(idx),
            None => false,
        }
    }

    /// Deletes the first property whose name matches case-insensitively.
    pub fn delete_property_by_name(&mut self, name: &str) -> bool {
        match self
            .props
            .iter()
            .position(|p| p.name().eq_ignore_ascii_case(name))
        {
            Some(idx) => self.delete_property(idx),
            None => false,
        }
    }

    pub fn delete_all(&mut self) {
        self.props.clear();
        self.index.clear();
    }

    fn rebuild_index(&mut self) {
        self.index.clear();
        for (idx, p) in self.props.iter().enumerate() {
            self.index.entry(p.id()).or_insert(idx);
        }
    }

    /// Merges `other` into self: every property of `other` is copied in via
    /// [`Property::set_from_property`], creating missing ids. Properties
    /// only in self are untouched. One notification fires per merged
    /// property.
    pub fn append_property_set(&mut self, other: &PropertySet, overwrite_flags: bool) {
        for src in &other.props {
            let idx = match self.index.get(&src.id()) {
                Some(&idx) => idx,
                None => {
                    let idx = self.props.len();
                    self.props.push(Property::new(src.name(), src.id()));
                    self.index.insert(src.id(), idx);
                    idx
                }
            };
            self.props[idx].set_from_property(src, overwrite_flags);
            self.notify(idx);
        }
    }

    /// Replaces self's contents with a copy of `other`. The listener
    /// registration survives and fires for each copied property.
    pub fn assign(&mut self, other: &PropertySet) {
        self.delete_all();
        for src in &other.props {
            let idx = self.props.len();
            self.props.push(src.clone());
            self.index.entry(src.id()).or_insert(idx);
            self.notify(idx);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use prop_types::{fourcc, Flags, PropertyType};
    use std::cell::RefCell;
    use std::ptr::NonNull;

    struct Recorder {
        seen: RefCell<Vec<FourCC>>,
    }

    impl Recorder {
        fn new() -> Rc<Self> {
            Rc::new(Recorder {
                seen: RefCell::new(Vec::new()),
            })
        }
    }

    impl ChangeListener for Recorder {
        fn property_changed(&self, prop: &Property) {
            self.seen.borrow_mut().push(prop.id());
        }
    }

    #[test]
    fn create_is_find_or_create() {
        let mut set = PropertySet::new();
        set.create_property("first", 1).set_int(10);
        set.create_property("renamed", 1);

        assert_eq!(set.property_count(), 1);
        let p = set.property_by_id(1).unwrap();
        assert_eq!(p.name(), "first");
        assert_eq!(p.as_int(), 10);
    }

    #[test]
    fn name_lookup_is_case_insensitive_first_match() {
        let mut set = PropertySet::new();
        set.create_property("Alpha", 1).set_int(1);
        set.create_property("alpha", 2).set_int(2);

        assert_eq!(set.property_by_name("ALPHA").unwrap().id(), 1);
        assert!(set.delete_property_by_name("aLpHa"));
        assert_eq!(set.property_by_name("alpha").unwrap().id(), 2);
    }

    #[test]
    fn delete_keeps_order_and_index() {
        let mut set = PropertySet::new();
        set.create_property("a", 1);
        set.create_property("b", 2);
        set.create_property("c", 3);

        assert!(set.delete_property_by_id(2));
        assert!(!set.delete_property_by_id(2));
        assert_eq!(set.property_count(), 2);
        assert_eq!(set.property(0).unwrap().id(), 1);
        assert_eq!(set.property(1).unwrap().id(), 3);
        assert_eq!(set.property_by_id(3).unwrap().name(), "c");

        set.delete_all();
        assert_eq!(set.property_count(), 0);
        assert!(set.property_by_id(1).is_none());
    }

    #[test]
    fn modify_fires_listener_after_mutation() {
        let recorder = Recorder::new();
        let mut set = PropertySet::new();
        set.create_property("a", 1);

        let listener: Rc<dyn ChangeListener> = recorder.clone();
        set.set_change_listener(Some(&listener));

        assert!(set.modify_by_id(1, |p| p.set_int(5)));
        assert!(set.modify_by_name("A", |p| p.set_int(6)));
        assert!(!set.modify_by_id(99, |p| p.set_int(7)));

        assert_eq!(recorder.seen.borrow().as_slice(), &[1, 1]);
        assert_eq!(set.property_by_id(1).unwrap().as_int(), 6);
    }

    #[test]
    fn create_notifies_even_for_existing_id() {
        let recorder = Recorder::new();
        let mut set = PropertySet::new();
        let listener: Rc<dyn ChangeListener> = recorder.clone();
        set.set_change_listener(Some(&listener));

        set.create_property("a", 7).set_int(1);
        set.create_property("a", 7);
        assert_eq!(recorder.seen.borrow().as_slice(), &[7, 7]);
    }

    #[test]
    fn dropped_listener_is_ignored() {
        let mut set = PropertySet::new();
        {
            let listener: Rc<dyn ChangeListener> = Recorder::new();
            set.set_change_listener(Some(&listener));
        }
        set.create_property("a", 1);
        assert!(set.modify_by_id(1, |p| p.set_int(3)));
    }

    #[test]
    fn modify_can_change_id() {
        let mut set = PropertySet::new();
        set.create_property("a", 1).set_int(4);
        assert!(set.modify_by_id(1, |p| p.set_id(2)));
        assert!(set.property_by_id(1).is_none());
        assert_eq!(set.property_by_id(2).unwrap().as_int(), 4);
    }

    #[test]
    fn reference_creation_returns_existing_on_duplicate_id() {
        let mut backing = 5i64;
        let mut set = PropertySet::new();
        set.create_property("plain", 1).set_int(1);

        let existing =
            set.create_reference_property("ref", 1, RefTarget::Int(NonNull::from(&mut backing)));
        assert!(!existing.is_reference());
        assert_eq!(existing.name(), "plain");
        assert_eq!(existing.as_int(), 1);
        assert_eq!(set.property_count(), 1);

        let created =
            set.create_reference_property("ref", 2, RefTarget::Int(NonNull::from(&mut backing)));
        assert!(created.is_reference());
        assert_eq!(created.as_int(), 5);
    }

    #[test]
    fn id_change_to_occupied_id_is_undone() {
        let mut set = PropertySet::new();
        set.create_property("a", 1).set_int(4);
        set.create_property("b", 2).set_int(5);

        assert!(set.modify_by_id(1, |p| p.set_id(2)));
        assert_eq!(set.property_by_id(1).unwrap().as_int(), 4);
        assert_eq!(set.property_by_id(2).unwrap().as_int(), 5);
        assert_eq!(set.property_count(), 2);
    }

    #[test]
    fn append_merges_and_creates() {
        let mut dst = PropertySet::new();
        dst.create_property("keep", 1).set_int(100);
        dst.create_property("shared", 2).set_int(0);

        let mut src = PropertySet::new();
        src.create_property("shared", 2).set_int(22);
        src.create_property("new", 3).set_string("hi");

        dst.append_property_set(&src, false);
        assert_eq!(dst.property_count(), 3);
        assert_eq!(dst.property_by_id(1).unwrap().as_int(), 100);
        assert_eq!(dst.property_by_id(2).unwrap().as_int(), 22);
        assert_eq!(dst.property_by_id(3).unwrap().as_string(), "hi");
    }

    #[test]
    fn append_respects_locked_targets() {
        let mut dst = PropertySet::new();
        dst.create_property("n", 1).set_int(0);
        dst.modify_by_id(1, |p| {
            p.flags_mut().set(Flags::TYPE_LOCKED);
        });

        let mut src = PropertySet::new();
        src.create_property("n", 1).set_string("41");

        dst.append_property_set(&src, false);
        let merged = dst.property_by_id(1).unwrap();
        assert_eq!(merged.property_type(), PropertyType::Int);
        assert_eq!(merged.as_int(), 41);
    }

    #[test]
    fn assign_replaces_contents_and_notifies() {
        let recorder = Recorder::new();
        let mut dst = PropertySet::new();
        dst.create_property("old", fourcc(*b"OLD1")).set_int(1);

        let mut src = PropertySet::new();
        src.create_property("a", 1).set_int(10);
        src.create_property("b", 2).set_int(20);

        let listener: Rc<dyn ChangeListener> = recorder.clone();
        dst.set_change_listener(Some(&listener));
        dst.assign(&src);

        assert_eq!(dst.property_count(), 2);
        assert!(dst.property_by_id(fourcc(*b"OLD1")).is_none());
        assert_eq!(dst.property_by_id(2).unwrap().as_int(), 20);
        assert_eq!(recorder.seen.borrow().as_slice(), &[1, 2]);
    }
}
