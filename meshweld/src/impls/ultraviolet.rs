use super::impl_from_fields;

impl_from_fields!(ultraviolet::Vec2, [f32; 2], x, y);
impl_from_fields!(ultraviolet::Vec3, [f32; 3], x, y, z);
impl_from_fields!(ultraviolet::Vec4, [f32; 4], x, y, z, w);
impl_from_fields!(ultraviolet::DVec2, [f64; 2], x, y);
impl_from_fields!(ultraviolet::DVec3, [f64; 3], x, y, z);
impl_from_fields!(ultraviolet::DVec4, [f64; 4], x, y, z, w);
