//! Type conversion and textual rendering.
//!
//! `convert_to` re-tags the payload in place, going through the coercing
//! readers so the value carries over. Only the pairs listed in the match
//! below convert; anything else fails and leaves the property untouched.

use crate::enums::EnumData;
use crate::property::{Payload, Property};
use prop_types::{Aspect, Flags, Guid, PropertyType};

impl Property {
    /// Converts the stored value to `new_type` in place. Returns whether the
    /// conversion happened; on failure the property is untouched. Always
    /// fails for type-locked and reference properties (unless the type
    /// already matches) and for untyped properties.
    pub fn convert_to(&mut self, new_type: PropertyType) -> bool {
        let current = self.property_type();
        if current == new_type {
            return true;
        }
        if self.flags().any_set(Flags::TYPE_LOCKED | Flags::REFERENCE) {
            return false;
        }
        if current == PropertyType::None {
            return false;
        }

        use PropertyType as T;
        let converted = match (current, new_type) {
            (T::String | T::Int, T::Bool) => Payload::Bool(self.as_bool()),

            (T::String | T::Float | T::Guid | T::Enum, T::Int) => Payload::Int(self.as_int()),
            (T::Float3, T::Int) if self.aspect() == Aspect::ColorRgb => {
                Payload::Int(self.as_int())
            }

            (
                T::String | T::Int | T::Int3 | T::Int4 | T::Float2 | T::Float3 | T::Float4,
                T::Int2,
            ) => Payload::Int2(self.as_int2()),
            (T::String | T::Int | T::Int2 | T::Int4 | T::Float3 | T::Float4, T::Int3) => {
                Payload::Int3(self.as_int3())
            }
            (T::String | T::Int | T::Int2 | T::Int3 | T::Float4, T::Int4) => {
                Payload::Int4(self.as_int4())
            }

            (T::String | T::Int | T::Guid, T::Float) => Payload::Float(self.as_float()),
            (
                T::String | T::Float | T::Int | T::Int2 | T::Int3 | T::Int4 | T::Float3
                | T::Float4,
                T::Float2,
            ) => Payload::Float2(self.as_float2()),
            (
                T::String | T::Float | T::Int | T::Int3 | T::Int4 | T::Float2 | T::Float4,
                T::Float3,
            ) => Payload::Float3(self.as_float3()),
            (T::String | T::Float | T::Int | T::Int4 | T::Float2 | T::Float3, T::Float4) => {
                Payload::Float4(self.as_float4())
            }

            (T::String, T::Float3x3) => Payload::Float3x3(self.as_float3x3()),
            (T::String, T::Float4x4) => Payload::Float4x4(self.as_float4x4()),

            (T::String, T::Guid) => Payload::Guid(self.as_guid()),
            (T::Int | T::Float | T::Bool, T::Guid) => Payload::Guid(Guid::default()),

            (T::String, T::Enum) => Payload::Enum(EnumData::from_wire_text(&self.as_string())),

            (_, T::String) => match self.to_display_string() {
                Some(s) => Payload::String(s),
                None => return false,
            },

            _ => return false,
        };

        self.payload = converted;
        self.sync_storage_flags();
        true
    }

    /// Renders the value as text, or `None` for an untyped property.
    ///
    /// Float components use six fractional digits; vector and matrix
    /// components are comma-joined. Booleans honor the word-pair aspects
    /// and otherwise render as `1`/`0`. Enums render the full wire form
    /// `candidates:selection`.
    pub fn to_display_string(&self) -> Option<String> {
        let rendered = match self.resolved().as_ref() {
            Payload::None => return None,
            Payload::String(s) => s.clone(),
            Payload::Int(v) => v.to_string(),
            Payload::Int2(v) => format!("{},{}", v.x, v.y),
            Payload::Int3(v) => format!("{},{},{}", v.x, v.y, v.z),
            Payload::Int4(v) => format!("{},{},{},{}", v.x, v.y, v.z, v.w),
            Payload::Float(v) => format!("{v:.6}"),
            Payload::Float2(v) => format!("{:.6},{:.6}", v.x, v.y),
            Payload::Float3(v) => format!("{:.6},{:.6},{:.6}", v.x, v.y, v.z),
            Payload::Float4(v) => format!("{:.6},{:.6},{:.6},{:.6}", v.x, v.y, v.z, v.w),
            Payload::Float3x3(m) => join_floats(&m.0),
            Payload::Float4x4(m) => join_floats(&m.0),
            Payload::Guid(g) => g.to_string(),
            Payload::Enum(e) => {
                format!("{}:{}", self.enum_candidates().join(","), e.selection)
            }
            Payload::Bool(b) => bool_text(*b, self.aspect()).to_owned(),
            // resolved() never yields a reference
            Payload::Reference(_) => return None,
        };
        Some(rendered)
    }
}

fn join_floats(vals: &[f32]) -> String {
    let mut out = String::new();
    for (i, v) in vals.iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        out.push_str(&format!("{v:.6}"));
    }
    out
}

fn bool_text(val: bool, aspect: Aspect) -> &'static str {
    match aspect {
        Aspect::BoolOnOff => {
            if val {
                "on"
            } else {
                "off"
            }
        }
        Aspect::BoolYesNo => {
            if val {
                "yes"
            } else {
                "no"
            }
        }
        Aspect::BoolTrueFalse => {
            if val {
                "true"
            } else {
                "false"
            }
        }
        Aspect::BoolEnabled => {
            if val {
                "enabled"
            } else {
                "disabled"
            }
        }
        _ => {
            if val {
                "1"
            } else {
                "0"
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::property::pack_rgb;
    use prop_types::{Vec2I, Vec3F, Vec4F};

    fn int_prop(v: i64) -> Property {
        let mut p = Property::new("p", 1);
        p.set_int(v);
        p
    }

    #[test]
    fn int_string_round_trip() {
        let mut p = int_prop(-42);
        assert!(p.convert_to(PropertyType::String));
        assert_eq!(p.as_string(), "-42");
        assert!(p.convert_to(PropertyType::Int));
        assert_eq!(p.as_int(), -42);
    }

    #[test]
    fn float_renders_six_decimals() {
        let mut p = Property::new("p", 1);
        p.set_float(1.5);
        assert_eq!(p.as_string(), "1.500000");

        p.set_float2(prop_types::Vec2F::new(0.25, -3.0));
        assert_eq!(p.as_string(), "0.250000,-3.000000");
    }

    #[test]
    fn untyped_never_converts() {
        let mut p = Property::new("p", 1);
        assert!(!p.convert_to(PropertyType::Int));
        assert!(!p.convert_to(PropertyType::String));
        assert_eq!(p.property_type(), PropertyType::None);
        assert_eq!(p.to_display_string(), None);
    }

    #[test]
    fn same_type_conversion_is_a_no_op() {
        let mut p = int_prop(7);
        assert!(p.convert_to(PropertyType::Int));
        assert_eq!(p.as_int(), 7);
    }

    #[test]
    fn locked_property_refuses_conversion() {
        let mut p = int_prop(7);
        p.flags_mut().set(Flags::TYPE_LOCKED);
        assert!(!p.convert_to(PropertyType::Float));
        assert_eq!(p.property_type(), PropertyType::Int);
        // matching type still reports success
        assert!(p.convert_to(PropertyType::Int));
    }

    #[test]
    fn undefined_pair_fails_without_touching_value() {
        let mut p = Property::new("p", 1);
        p.set_bool(true);
        assert!(!p.convert_to(PropertyType::Float));
        assert_eq!(p.property_type(), PropertyType::Bool);
        assert!(p.as_bool());
    }

    #[test]
    fn vector_narrowing_and_widening() {
        let mut p = Property::new("p", 1);
        p.set_float4(Vec4F::new(1.5, 2.5, 3.5, 4.5));
        assert!(p.convert_to(PropertyType::Int2));
        assert_eq!(p.as_int2(), Vec2I::new(1, 2));

        // int2 widens back out only through float2
        assert!(!p.convert_to(PropertyType::Float4));
        assert!(p.convert_to(PropertyType::Float2));
        assert!(p.convert_to(PropertyType::Float4));
        assert_eq!(p.as_float4(), Vec4F::new(1.0, 2.0, 0.0, 0.0));
    }

    #[test]
    fn rgb_float3_converts_to_packed_int() {
        let mut p = Property::new("p", 1);
        p.set_float3(Vec3F::new(1.0, 0.0, 1.0));
        p.set_aspect(Aspect::ColorRgb);
        assert!(p.convert_to(PropertyType::Int));
        assert_eq!(p.as_int(), 255 | 255 << 16);

        // without the aspect the pair is undefined
        let mut q = Property::new("q", 2);
        q.set_float3(Vec3F::new(1.0, 0.0, 1.0));
        assert!(!q.convert_to(PropertyType::Int));
    }

    #[test]
    fn guid_from_string_and_zero_fallbacks() {
        let mut p = Property::new("p", 1);
        p.set_string("{00112233-4455-6677-8899-AABBCCDDEEFF}");
        assert!(p.convert_to(PropertyType::Guid));
        assert_eq!(p.as_string(), "{00112233-4455-6677-8899-AABBCCDDEEFF}");

        let mut q = int_prop(99);
        assert!(q.convert_to(PropertyType::Guid));
        assert!(q.as_guid().is_zero());
    }

    #[test]
    fn enum_from_wire_text() {
        let mut p = Property::new("p", 1);
        p.set_string("a,b,c:2");
        assert!(p.convert_to(PropertyType::Enum));
        assert_eq!(p.property_type(), PropertyType::Enum);
        assert_eq!(p.max_enum_val(), 3);
        assert_eq!(p.as_int(), 2);
        assert_eq!(p.as_string(), "a,b,c:2");
    }

    #[test]
    fn bool_words_follow_aspect() {
        let mut p = Property::new("p", 1);
        p.set_bool(true);
        assert_eq!(p.as_string(), "1");
        p.set_aspect(Aspect::BoolYesNo);
        assert_eq!(p.as_string(), "yes");
        p.set_aspect(Aspect::BoolEnabled);
        p.set_bool(false);
        assert_eq!(p.as_string(), "disabled");

        assert!(p.convert_to(PropertyType::String));
        assert_eq!(p.as_string(), "disabled");
        assert!(p.convert_to(PropertyType::Bool));
        assert!(!p.as_bool());
    }

    #[test]
    fn matrix_string_round_trip() {
        let mut p = Property::new("p", 1);
        let m = prop_types::Mat3F([1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0]);
        p.set_float3x3(m);
        assert!(p.convert_to(PropertyType::String));
        assert!(p.convert_to(PropertyType::Float3x3));
        assert_eq!(p.as_float3x3(), m);
    }

    #[test]
    fn rgb_packing_clamps() {
        assert_eq!(pack_rgb(&Vec3F::new(0.0, 0.0, 0.0)), 0);
        assert_eq!(pack_rgb(&Vec3F::new(1.0, 1.0, 1.0)), 0x00FF_FFFF);
    }
}
