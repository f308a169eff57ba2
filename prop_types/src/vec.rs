//! Fixed-arity vector and matrix payload types.
//!
//! All of these are `#[repr(C)]` Pod structs so the binary codec can move
//! them to and from the wire with `bytemuck` instead of per-field shuffling.

use bytemuck_derive::{Pod, Zeroable};

/// 2-component integer vector.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Pod, Zeroable)]
pub struct Vec2I {
    pub x: i64,
    pub y: i64,
}

/// 3-component integer vector.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Pod, Zeroable)]
pub struct Vec3I {
    pub x: i64,
    pub y: i64,
    pub z: i64,
}

/// 4-component integer vector.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Pod, Zeroable)]
pub struct Vec4I {
    pub x: i64,
    pub y: i64,
    pub z: i64,
    pub w: i64,
}

/// 2-component float vector.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct Vec2F {
    pub x: f32,
    pub y: f32,
}

/// 3-component float vector.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct Vec3F {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

/// 4-component float vector.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct Vec4F {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub w: f32,
}

/// Row-major 3x3 float matrix.
#[repr(transparent)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct Mat3F(pub [f32; 9]);

/// Row-major 4x4 float matrix.
#[repr(transparent)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct Mat4F(pub [f32; 16]);

impl Vec2I {
    pub const fn new(x: i64, y: i64) -> Self {
        Vec2I { x, y }
    }
}

impl Vec3I {
    pub const fn new(x: i64, y: i64, z: i64) -> Self {
        Vec3I { x, y, z }
    }
}

impl Vec4I {
    pub const fn new(x: i64, y: i64, z: i64, w: i64) -> Self {
        Vec4I { x, y, z, w }
    }
}

impl Vec2F {
    pub const fn new(x: f32, y: f32) -> Self {
        Vec2F { x, y }
    }
}

impl Vec3F {
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Vec3F { x, y, z }
    }
}

impl Vec4F {
    pub const fn new(x: f32, y: f32, z: f32, w: f32) -> Self {
        Vec4F { x, y, z, w }
    }
}

impl Default for Mat3F {
    fn default() -> Self {
        Mat3F([0.0; 9])
    }
}

impl Default for Mat4F {
    fn default() -> Self {
        Mat4F([0.0; 16])
    }
}

// Widening conversions pad new components with zero.

impl From<Vec2I> for Vec3I {
    fn from(v: Vec2I) -> Self {
        Vec3I::new(v.x, v.y, 0)
    }
}

impl From<Vec2I> for Vec4I {
    fn from(v: Vec2I) -> Self {
        Vec4I::new(v.x, v.y, 0, 0)
    }
}

impl From<Vec3I> for Vec4I {
    fn from(v: Vec3I) -> Self {
        Vec4I::new(v.x, v.y, v.z, 0)
    }
}

impl From<Vec2F> for Vec3F {
    fn from(v: Vec2F) -> Self {
        Vec3F::new(v.x, v.y, 0.0)
    }
}

impl From<Vec2F> for Vec4F {
    fn from(v: Vec2F) -> Self {
        Vec4F::new(v.x, v.y, 0.0, 0.0)
    }
}

impl From<Vec3F> for Vec4F {
    fn from(v: Vec3F) -> Self {
        Vec4F::new(v.x, v.y, v.z, 0.0)
    }
}
