//! The property value itself: identity, flags, aspect, and one tagged
//! payload. Changing the payload's tag goes through the typed setters or
//! [`Property::convert_to`]; dropping the old payload is handled by the
//! variant swap.

use crate::enums::{split_candidates, EnumData, EnumProvider, EnumSource};
use crate::reference::RefTarget;
use crate::scan;
use prop_types::{
    Aspect, Flags, FourCC, Guid, Mat3F, Mat4F, PropertyType, Vec2F, Vec2I, Vec3F, Vec3I, Vec4F,
    Vec4I,
};
use std::borrow::Cow;
use std::rc::Rc;

/// The active payload of a property. Exactly one case is live at a time;
/// the case *is* the property's type, except for `Reference`, which takes
/// its type from the target.
#[derive(Clone, Debug)]
pub(crate) enum Payload {
    None,
    String(String),
    Int(i64),
    Int2(Vec2I),
    Int3(Vec3I),
    Int4(Vec4I),
    Float(f32),
    Float2(Vec2F),
    Float3(Vec3F),
    Float4(Vec4F),
    Float3x3(Mat3F),
    Float4x4(Mat4F),
    Guid(Guid),
    Enum(EnumData),
    Bool(bool),
    Reference(RefTarget),
}

impl Payload {
    pub(crate) fn property_type(&self) -> PropertyType {
        match self {
            Payload::None => PropertyType::None,
            Payload::String(_) => PropertyType::String,
            Payload::Int(_) => PropertyType::Int,
            Payload::Int2(_) => PropertyType::Int2,
            Payload::Int3(_) => PropertyType::Int3,
            Payload::Int4(_) => PropertyType::Int4,
            Payload::Float(_) => PropertyType::Float,
            Payload::Float2(_) => PropertyType::Float2,
            Payload::Float3(_) => PropertyType::Float3,
            Payload::Float4(_) => PropertyType::Float4,
            Payload::Float3x3(_) => PropertyType::Float3x3,
            Payload::Float4x4(_) => PropertyType::Float4x4,
            Payload::Guid(_) => PropertyType::Guid,
            Payload::Enum(_) => PropertyType::Enum,
            Payload::Bool(_) => PropertyType::Bool,
            Payload::Reference(t) => t.property_type(),
        }
    }
}

/// A typed, self-describing property value.
///
/// Identity is a 32-bit four-character id (unique within a set) plus a
/// display name (not necessarily unique). Payload validity is governed
/// solely by the type tag; setters for a different type release the old
/// payload first. See the crate docs for the conversion behavior.
#[derive(Clone, Debug)]
pub struct Property {
    id: FourCC,
    name: String,
    aspect: Aspect,
    flags: Flags,
    pub(crate) payload: Payload,
}

macro_rules! typed_setter {
    ($(#[$meta:meta])* $fn_name:ident, $ty:ty, $pt:ident, $rt:ident) => {
        $(#[$meta])*
        pub fn $fn_name(&mut self, val: $ty) {
            if let Payload::Reference(target) = &self.payload {
                if let RefTarget::$rt(p) = target {
                    // SAFETY: target validity was guaranteed by the caller
                    // when the reference was installed.
                    unsafe { *p.as_ptr() = val };
                }
                return;
            }
            if self.flags.is_set(Flags::TYPE_LOCKED)
                && self.property_type() != PropertyType::$pt
            {
                return;
            }
            self.payload = Payload::$pt(val);
            self.sync_storage_flags();
        }
    };
}

impl Property {
    /// Creates an untyped (`PropertyType::None`) property. Usually reached
    /// through a set's factory call rather than directly.
    pub fn new(name: &str, id: FourCC) -> Self {
        Property {
            id,
            name: name.to_owned(),
            aspect: Aspect::Generic,
            flags: Flags::default(),
            payload: Payload::None,
        }
    }

    /// Creates a property viewing caller-owned memory. The result is
    /// reference- and type-locked to the target's type.
    pub fn new_reference(name: &str, id: FourCC, target: RefTarget) -> Self {
        let mut flags = Flags::default();
        flags.set(Flags::REFERENCE | Flags::TYPE_LOCKED);
        Property {
            id,
            name: name.to_owned(),
            aspect: Aspect::Generic,
            flags,
            payload: Payload::Reference(target),
        }
    }

    pub fn id(&self) -> FourCC {
        self.id
    }

    pub fn set_id(&mut self, id: FourCC) {
        self.id = id;
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: &str) {
        self.name.clear();
        self.name.push_str(name);
    }

    pub fn flags(&self) -> Flags {
        self.flags
    }

    pub fn flags_mut(&mut self) -> &mut Flags {
        &mut self.flags
    }

    pub fn aspect(&self) -> Aspect {
        self.aspect
    }

    /// Silent no-op under `ASPECT_LOCKED`.
    pub fn set_aspect(&mut self, aspect: Aspect) {
        if self.flags.is_set(Flags::ASPECT_LOCKED) {
            return;
        }
        self.aspect = aspect;
    }

    pub fn property_type(&self) -> PropertyType {
        self.payload.property_type()
    }

    pub fn is_reference(&self) -> bool {
        matches!(self.payload, Payload::Reference(_))
    }

    /// Keeps the storage-mode flag bits in step with the payload variant.
    pub(crate) fn sync_storage_flags(&mut self) {
        if matches!(self.payload, Payload::Reference(_)) {
            self.flags.set(Flags::REFERENCE);
        } else {
            self.flags.clear(Flags::REFERENCE);
        }
        let provider_backed = matches!(
            &self.payload,
            Payload::Enum(EnumData {
                source: EnumSource::Provider(_),
                ..
            })
        );
        if provider_backed {
            self.flags.set(Flags::ENUM_PROVIDER);
        } else {
            self.flags.clear(Flags::ENUM_PROVIDER);
        }
    }

    /// The payload with any reference target resolved to an owned copy.
    pub(crate) fn resolved(&self) -> Cow<'_, Payload> {
        match &self.payload {
            Payload::Reference(t) => Cow::Owned(t.read()),
            p => Cow::Borrowed(p),
        }
    }

    // --- typed setters --------------------------------------------------
    //
    // Uniform contract: under TYPE_LOCKED with a different current type the
    // call is silently ignored; a reference property writes through its
    // target when the type matches and is silently ignored otherwise.

    typed_setter!(set_int, i64, Int, Int);
    typed_setter!(set_int2, Vec2I, Int2, Int2);
    typed_setter!(set_int3, Vec3I, Int3, Int3);
    typed_setter!(set_int4, Vec4I, Int4, Int4);
    typed_setter!(set_float, f32, Float, Float);
    typed_setter!(set_float2, Vec2F, Float2, Float2);
    typed_setter!(set_float3, Vec3F, Float3, Float3);
    typed_setter!(set_float4, Vec4F, Float4, Float4);
    typed_setter!(set_float3x3, Mat3F, Float3x3, Float3x3);
    typed_setter!(set_float4x4, Mat4F, Float4x4, Float4x4);
    typed_setter!(set_guid, Guid, Guid, Guid);
    typed_setter!(set_bool, bool, Bool, Bool);

    pub fn set_string(&mut self, val: &str) {
        if self.is_reference() {
            return;
        }
        if self.flags.is_set(Flags::TYPE_LOCKED) && self.property_type() != PropertyType::String {
            return;
        }
        self.payload = Payload::String(val.to_owned());
        self.sync_storage_flags();
    }

    // --- coercing readers -----------------------------------------------
    //
    // Non-mutating; types with no defined coercion read as zero/empty.

    pub fn as_int(&self) -> i64 {
        match self.resolved().as_ref() {
            Payload::String(s) => scan::int_prefix(s),
            Payload::Int(v) => *v,
            Payload::Float(v) => *v as i64,
            Payload::Float3(v) if self.aspect == Aspect::ColorRgb => pack_rgb(v),
            Payload::Guid(_) => 0,
            Payload::Enum(e) => e.selection as i64,
            _ => 0,
        }
    }

    pub fn as_int2(&self) -> Vec2I {
        match self.resolved().as_ref() {
            Payload::String(s) => {
                let [x, y] = scan::int_list::<2>(s);
                Vec2I::new(x, y)
            }
            Payload::Int(v) => Vec2I::new(*v, 0),
            Payload::Int2(v) => *v,
            Payload::Int3(v) => Vec2I::new(v.x, v.y),
            Payload::Int4(v) => Vec2I::new(v.x, v.y),
            Payload::Float(v) => Vec2I::new(*v as i64, 0),
            Payload::Float2(v) => Vec2I::new(v.x as i64, v.y as i64),
            Payload::Float3(v) => Vec2I::new(v.x as i64, v.y as i64),
            Payload::Float4(v) => Vec2I::new(v.x as i64, v.y as i64),
            _ => Vec2I::default(),
        }
    }

    pub fn as_int3(&self) -> Vec3I {
        match self.resolved().as_ref() {
            Payload::String(s) => {
                let [x, y, z] = scan::int_list::<3>(s);
                Vec3I::new(x, y, z)
            }
            Payload::Int(v) => Vec3I::new(*v, 0, 0),
            Payload::Int2(v) => Vec3I::from(*v),
            Payload::Int3(v) => *v,
            Payload::Int4(v) => Vec3I::new(v.x, v.y, v.z),
            Payload::Float(v) => Vec3I::new(*v as i64, 0, 0),
            Payload::Float3(v) => Vec3I::new(v.x as i64, v.y as i64, v.z as i64),
            Payload::Float4(v) => Vec3I::new(v.x as i64, v.y as i64, v.z as i64),
            _ => Vec3I::default(),
        }
    }

    pub fn as_int4(&self) -> Vec4I {
        match self.resolved().as_ref() {
            Payload::String(s) => {
                let [x, y, z, w] = scan::int_list::<4>(s);
                Vec4I::new(x, y, z, w)
            }
            Payload::Int(v) => Vec4I::new(*v, 0, 0, 0),
            Payload::Int2(v) => Vec4I::from(*v),
            Payload::Int3(v) => Vec4I::from(*v),
            Payload::Int4(v) => *v,
            Payload::Float(v) => Vec4I::new(*v as i64, 0, 0, 0),
            Payload::Float4(v) => {
                Vec4I::new(v.x as i64, v.y as i64, v.z as i64, v.w as i64)
            }
            _ => Vec4I::default(),
        }
    }

    pub fn as_float(&self) -> f32 {
        match self.resolved().as_ref() {
            Payload::String(s) => scan::float_prefix(s),
            Payload::Int(v) => *v as f32,
            Payload::Float(v) => *v,
            Payload::Guid(_) => 0.0,
            _ => 0.0,
        }
    }

    pub fn as_float2(&self) -> Vec2F {
        match self.resolved().as_ref() {
            Payload::String(s) => {
                let [x, y] = scan::float_list::<2>(s);
                Vec2F::new(x, y)
            }
            Payload::Int(v) => Vec2F::new(*v as f32, 0.0),
            Payload::Int2(v) => Vec2F::new(v.x as f32, v.y as f32),
            Payload::Int3(v) => Vec2F::new(v.x as f32, v.y as f32),
            Payload::Int4(v) => Vec2F::new(v.x as f32, v.y as f32),
            Payload::Float(v) => Vec2F::new(*v, 0.0),
            Payload::Float2(v) => *v,
            Payload::Float3(v) => Vec2F::new(v.x, v.y),
            Payload::Float4(v) => Vec2F::new(v.x, v.y),
            _ => Vec2F::default(),
        }
    }

    pub fn as_float3(&self) -> Vec3F {
        match self.resolved().as_ref() {
            Payload::String(s) => {
                let [x, y, z] = scan::float_list::<3>(s);
                Vec3F::new(x, y, z)
            }
            Payload::Int(v) => Vec3F::new(*v as f32, 0.0, 0.0),
            Payload::Int3(v) => Vec3F::new(v.x as f32, v.y as f32, v.z as f32),
            Payload::Int4(v) => Vec3F::new(v.x as f32, v.y as f32, v.z as f32),
            Payload::Float(v) => Vec3F::new(*v, 0.0, 0.0),
            Payload::Float2(v) => Vec3F::from(*v),
            Payload::Float3(v) => *v,
            Payload::Float4(v) => Vec3F::new(v.x, v.y, v.z),
            _ => Vec3F::default(),
        }
    }

    pub fn as_float4(&self) -> Vec4F {
        match self.resolved().as_ref() {
            Payload::String(s) => {
                let [x, y, z, w] = scan::float_list::<4>(s);
                Vec4F::new(x, y, z, w)
            }
            Payload::Int(v) => Vec4F::new(*v as f32, 0.0, 0.0, 0.0),
            Payload::Int4(v) => {
                Vec4F::new(v.x as f32, v.y as f32, v.z as f32, v.w as f32)
            }
            Payload::Float(v) => Vec4F::new(*v, 0.0, 0.0, 0.0),
            Payload::Float2(v) => Vec4F::from(*v),
            Payload::Float3(v) => Vec4F::from(*v),
            Payload::Float4(v) => *v,
            _ => Vec4F::default(),
        }
    }

    pub fn as_float3x3(&self) -> Mat3F {
        match self.resolved().as_ref() {
            Payload::String(s) => Mat3F(scan::float_list::<9>(s)),
            Payload::Float3x3(m) => *m,
            _ => Mat3F::default(),
        }
    }

    pub fn as_float4x4(&self) -> Mat4F {
        match self.resolved().as_ref() {
            Payload::String(s) => Mat4F(scan::float_list::<16>(s)),
            Payload::Float4x4(m) => *m,
            _ => Mat4F::default(),
        }
    }

    pub fn as_guid(&self) -> Guid {
        match self.resolved().as_ref() {
            Payload::String(s) => Guid::parse_braced(s).unwrap_or_default(),
            Payload::Guid(g) => *g,
            _ => Guid::default(),
        }
    }

    pub fn as_bool(&self) -> bool {
        match self.resolved().as_ref() {
            Payload::String(s) => scan::bool_word(s).unwrap_or(false),
            Payload::Int(v) => *v != 0,
            Payload::Bool(b) => *b,
            _ => false,
        }
    }

    /// The textual form of the current value (see the conversion matrix in
    /// the crate docs). An untyped property reads as the empty string.
    pub fn as_string(&self) -> String {
        self.to_display_string().unwrap_or_default()
    }

    // --- enum sub-protocol ----------------------------------------------

    /// Replaces the payload with an enum whose candidates come from the
    /// comma-delimited `csv`. Any previous provider is discarded and the
    /// selection resets to 0. Subject to the usual type-lock rules.
    pub fn set_enum_strings(&mut self, csv: &str) {
        if self.is_reference() {
            return;
        }
        if self.flags.is_set(Flags::TYPE_LOCKED) && self.property_type() != PropertyType::Enum {
            return;
        }
        self.payload = Payload::Enum(EnumData::from_candidates(split_candidates(csv)));
        self.sync_storage_flags();
    }

    /// Installs a borrowed provider as the enum candidate source and resets
    /// the selection to 0. The provider is held weakly; the caller keeps it
    /// alive for the property's lifetime.
    pub fn set_enum_provider(&mut self, provider: &Rc<dyn EnumProvider>) {
        if self.is_reference() {
            return;
        }
        if self.flags.is_set(Flags::TYPE_LOCKED) && self.property_type() != PropertyType::Enum {
            return;
        }
        self.payload = Payload::Enum(EnumData {
            source: EnumSource::Provider(Rc::downgrade(provider)),
            selection: 0,
        });
        self.sync_storage_flags();
    }

    /// The installed provider, if this is a provider-backed enum whose
    /// provider is still alive.
    pub fn enum_provider(&self) -> Option<Rc<dyn EnumProvider>> {
        match &self.payload {
            Payload::Enum(EnumData {
                source: EnumSource::Provider(w),
                ..
            }) => w.upgrade(),
            _ => None,
        }
    }

    /// Selects a candidate by index. Fails when this is not an enum or the
    /// index is out of range against the active candidate source.
    pub fn set_enum_val(&mut self, val: u64) -> bool {
        if self.property_type() != PropertyType::Enum {
            return false;
        }
        if (val as usize) >= self.max_enum_val() {
            return false;
        }
        if let Payload::Enum(e) = &mut self.payload {
            e.selection = val;
        }
        true
    }

    /// Selects the first candidate matching `s` case-insensitively.
    pub fn set_enum_val_by_string(&mut self, s: &str) -> bool {
        if self.property_type() != PropertyType::Enum {
            return false;
        }
        let found = self
            .enum_candidates()
            .iter()
            .position(|c| c.eq_ignore_ascii_case(s));
        match found {
            Some(idx) => {
                if let Payload::Enum(e) = &mut self.payload {
                    e.selection = idx as u64;
                }
                true
            }
            None => false,
        }
    }

    /// The candidate at `idx`, from whichever source is active.
    pub fn enum_string(&self, idx: usize) -> Option<String> {
        match &self.payload {
            Payload::Enum(e) => match &e.source {
                EnumSource::Strings(v) => v.get(idx).cloned(),
                EnumSource::Provider(w) => w.upgrade()?.value_at(self, idx),
            },
            _ => None,
        }
    }

    /// The full comma-delimited candidate string, or `None` when this is
    /// not an enum property.
    pub fn enum_strings(&self) -> Option<String> {
        if self.property_type() != PropertyType::Enum {
            return None;
        }
        Some(self.enum_candidates().join(","))
    }

    /// Number of candidates in the active source; 0 for non-enums and for
    /// dropped providers.
    pub fn max_enum_val(&self) -> usize {
        match &self.payload {
            Payload::Enum(e) => match &e.source {
                EnumSource::Strings(v) => v.len(),
                EnumSource::Provider(w) => w.upgrade().map_or(0, |p| p.count(self)),
            },
            _ => 0,
        }
    }

    pub(crate) fn enum_candidates(&self) -> Vec<String> {
        match &self.payload {
            Payload::Enum(e) => match &e.source {
                EnumSource::Strings(v) => v.clone(),
                EnumSource::Provider(w) => match w.upgrade() {
                    Some(p) => (0..p.count(self))
                        .filter_map(|i| p.value_at(self, i))
                        .collect(),
                    None => Vec::new(),
                },
            },
            _ => Vec::new(),
        }
    }

    pub(crate) fn enum_selection(&self) -> u64 {
        match &self.payload {
            Payload::Enum(e) => e.selection,
            _ => 0,
        }
    }

    // --- whole-value operations -----------------------------------------

    /// Copies `source`'s value into self.
    ///
    /// If self is reference-flagged or type-locked the copy is coerced to
    /// self's current type; otherwise self adopts the source's type. Enum
    /// sources carry their provider-or-list across unchanged. When
    /// `overwrite_flags` is set, self's flags are replaced wholesale except
    /// the storage-mode bits, which always describe self.
    pub fn set_from_property(&mut self, source: &Property, overwrite_flags: bool) {
        if self.flags.any_set(Flags::REFERENCE | Flags::TYPE_LOCKED) {
            match self.property_type() {
                PropertyType::None => {}
                PropertyType::String => {
                    let s = source.as_string();
                    self.set_string(&s);
                }
                PropertyType::Int => self.set_int(source.as_int()),
                PropertyType::Int2 => self.set_int2(source.as_int2()),
                PropertyType::Int3 => self.set_int3(source.as_int3()),
                PropertyType::Int4 => self.set_int4(source.as_int4()),
                PropertyType::Float => self.set_float(source.as_float()),
                PropertyType::Float2 => self.set_float2(source.as_float2()),
                PropertyType::Float3 => self.set_float3(source.as_float3()),
                PropertyType::Float4 => self.set_float4(source.as_float4()),
                PropertyType::Float3x3 => self.set_float3x3(source.as_float3x3()),
                PropertyType::Float4x4 => self.set_float4x4(source.as_float4x4()),
                PropertyType::Guid => self.set_guid(source.as_guid()),
                PropertyType::Bool => self.set_bool(source.as_bool()),
                PropertyType::Enum => {
                    let text = source.as_string();
                    self.payload = Payload::Enum(EnumData::from_wire_text(&text));
                }
            }
        } else {
            self.payload = match &source.payload {
                Payload::Reference(t) => t.read(),
                p => p.clone(),
            };
        }

        if overwrite_flags {
            let merged = (source.flags.bits() & !Flags::STORAGE_MASK)
                | (self.flags.bits() & Flags::STORAGE_MASK);
            self.flags.set_all(merged);
        }
        if !self.flags.is_set(Flags::ASPECT_LOCKED) {
            self.aspect = source.aspect;
        }
        self.sync_storage_flags();
    }

    /// Turns a reference or provider-backed property into a fully owned,
    /// self-contained one. Idempotent.
    pub fn externalize_reference(&mut self) {
        if let Payload::Reference(t) = &self.payload {
            self.payload = t.read();
        }

        let owned_candidates = match &self.payload {
            Payload::Enum(EnumData {
                source: EnumSource::Provider(_),
                ..
            }) => Some(self.enum_candidates()),
            _ => None,
        };
        if let Some(candidates) = owned_candidates {
            if let Payload::Enum(e) = &mut self.payload {
                e.source = EnumSource::Strings(candidates);
            }
        }

        self.sync_storage_flags();
    }

    /// Value equality: same id, same type, equal payload. String compare is
    /// case-sensitive; enums compare selection index only. Flags and aspect
    /// do not participate.
    pub fn is_same_as(&self, other: &Property) -> bool {
        if self.id != other.id || self.property_type() != other.property_type() {
            return false;
        }
        let a = self.resolved();
        let b = other.resolved();
        match (a.as_ref(), b.as_ref()) {
            (Payload::None, Payload::None) => true,
            (Payload::String(x), Payload::String(y)) => x == y,
            (Payload::Int(x), Payload::Int(y)) => x == y,
            (Payload::Int2(x), Payload::Int2(y)) => x == y,
            (Payload::Int3(x), Payload::Int3(y)) => x == y,
            (Payload::Int4(x), Payload::Int4(y)) => x == y,
            (Payload::Float(x), Payload::Float(y)) => x == y,
            (Payload::Float2(x), Payload::Float2(y)) => x == y,
            (Payload::Float3(x), Payload::Float3(y)) => x == y,
            (Payload::Float4(x), Payload::Float4(y)) => x == y,
            (Payload::Float3x3(x), Payload::Float3x3(y)) => x == y,
            (Payload::Float4x4(x), Payload::Float4x4(y)) => x == y,
            (Payload::Guid(x), Payload::Guid(y)) => x == y,
            (Payload::Enum(x), Payload::Enum(y)) => x.selection == y.selection,
            (Payload::Bool(x), Payload::Bool(y)) => x == y,
            _ => false,
        }
    }
}

/// Packs an RGB-aspect float triple into the 0-255-per-channel integer
/// form, `r | g << 8 | b << 16`. Channels clamp to [0, 1] first.
pub(crate) fn pack_rgb(v: &Vec3F) -> i64 {
    let channel = |c: f32| (c.clamp(0.0, 1.0) * 255.0) as i64;
    channel(v.x) | channel(v.y) << 8 | channel(v.z) << 16
}
