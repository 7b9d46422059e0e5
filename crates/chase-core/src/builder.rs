//! Static scene descriptors: actor models, terrain and props.
//!
//! These are plain data. Mirrored or repeated parts hold clones of the same
//! `Arc<Geometry>` / `Arc<Material>`, so a model with four wheels carries one
//! wheel description and four placements.

use std::f32::consts::{FRAC_PI_2, PI, TAU};
use std::sync::Arc;

use glam::{EulerRot, Mat4, Quat, Vec3};
use rand::Rng;

#[derive(Clone, Debug, PartialEq)]
pub enum Geometry {
    Box { width: f32, height: f32, depth: f32 },
    Cylinder { radius_top: f32, radius_bottom: f32, height: f32 },
    Sphere { radius: f32 },
    Cone { radius: f32, height: f32 },
    Icosahedron { radius: f32 },
    /// Lies in the local XY plane.
    Plane { width: f32, height: f32 },
    Torus { radius: f32, tube: f32 },
    Circle { radius: f32 },
}

impl Geometry {
    /// Radius of a sphere centred on the local origin that contains the shape.
    pub fn bounding_radius(&self) -> f32 {
        match *self {
            Geometry::Box {
                width,
                height,
                depth,
            } => 0.5 * Vec3::new(width, height, depth).length(),
            Geometry::Cylinder {
                radius_top,
                radius_bottom,
                height,
            } => radius_top.max(radius_bottom).hypot(0.5 * height),
            Geometry::Sphere { radius }
            | Geometry::Icosahedron { radius }
            | Geometry::Circle { radius } => radius,
            Geometry::Cone { radius, height } => radius.hypot(0.5 * height),
            Geometry::Plane { width, height } => 0.5 * width.hypot(height),
            Geometry::Torus { radius, tube } => radius + tube,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Material {
    pub color: [f32; 3],
    pub roughness: f32,
    pub metalness: f32,
    pub emissive: [f32; 3],
    pub emissive_intensity: f32,
    pub opacity: f32,
}

#[inline]
pub fn rgb(hex: u32) -> [f32; 3] {
    [
        ((hex >> 16) & 0xff) as f32 / 255.0,
        ((hex >> 8) & 0xff) as f32 / 255.0,
        (hex & 0xff) as f32 / 255.0,
    ]
}

impl Material {
    pub fn standard(hex: u32, roughness: f32, metalness: f32) -> Self {
        Self {
            color: rgb(hex),
            roughness,
            metalness,
            emissive: [0.0; 3],
            emissive_intensity: 0.0,
            opacity: 1.0,
        }
    }

    pub fn with_emissive(mut self, hex: u32, intensity: f32) -> Self {
        self.emissive = rgb(hex);
        self.emissive_intensity = intensity;
        self
    }

    pub fn with_opacity(mut self, opacity: f32) -> Self {
        self.opacity = opacity;
        self
    }

    /// Base colour with emission added, as a renderer without lighting sees it.
    pub fn flat_color(&self) -> [f32; 3] {
        let mut c = self.color;
        for (ch, e) in c.iter_mut().zip(self.emissive) {
            *ch = (*ch + e * self.emissive_intensity).min(1.0);
        }
        c
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Placement {
    pub translation: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
}

impl Placement {
    pub fn at(x: f32, y: f32, z: f32) -> Self {
        Self {
            translation: Vec3::new(x, y, z),
            rotation: Quat::IDENTITY,
            scale: Vec3::ONE,
        }
    }

    pub fn rotated(mut self, x: f32, y: f32, z: f32) -> Self {
        self.rotation = Quat::from_euler(EulerRot::XYZ, x, y, z);
        self
    }

    pub fn scaled(mut self, s: f32) -> Self {
        self.scale = Vec3::splat(s);
        self
    }

    pub fn to_mat4(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.rotation, self.translation)
    }
}

#[derive(Clone, Debug)]
pub struct Part {
    pub name: &'static str,
    pub geometry: Arc<Geometry>,
    pub material: Arc<Material>,
    pub placement: Placement,
    /// Wheels spin about their local Z axle by the actor's `wheel_angle`.
    pub spins: bool,
}

impl Part {
    fn new(
        name: &'static str,
        geometry: &Arc<Geometry>,
        material: &Arc<Material>,
        placement: Placement,
    ) -> Self {
        Self {
            name,
            geometry: Arc::clone(geometry),
            material: Arc::clone(material),
            placement,
            spins: false,
        }
    }

    pub fn local_transform(&self, wheel_angle: f32) -> Mat4 {
        let mut placement = self.placement;
        if self.spins {
            placement.rotation = Quat::from_rotation_z(wheel_angle) * placement.rotation;
        }
        placement.to_mat4()
    }

    /// World-space centre and bounding radius under `root`.
    pub fn world_bounds(&self, root: Mat4, wheel_angle: f32) -> (Vec3, f32) {
        let m = root * self.local_transform(wheel_angle);
        let centre = m.transform_point3(Vec3::ZERO);
        let scale = self.placement.scale.max_element();
        (centre, self.geometry.bounding_radius() * scale)
    }
}

#[derive(Clone, Debug)]
pub struct Model {
    pub name: &'static str,
    pub parts: Vec<Part>,
}

#[inline]
fn shared<T>(v: T) -> Arc<T> {
    Arc::new(v)
}

pub fn build_jax() -> Model {
    let body_mat = shared(Material::standard(0xc4282e, 0.3, 0.5));
    let cabin_mat = shared(Material::standard(0xf36848, 0.25, 0.35).with_opacity(0.95));
    let eye_mat = shared(Material::standard(0xffffff, 0.5, 0.0).with_emissive(0xfff1c5, 0.7));
    let pupil_mat = shared(Material::standard(0x1c2633, 0.5, 0.0));
    let bumper_mat = shared(Material::standard(0x582f1b, 0.8, 0.2));
    let mud_mat = shared(Material::standard(0x433020, 1.0, 0.0));
    let wheel_mat = shared(Material::standard(0x1b1d1f, 0.4, 0.2));

    let body = shared(Geometry::Box {
        width: 0.9,
        height: 0.35,
        depth: 0.55,
    });
    let cabin = shared(Geometry::Box {
        width: 0.55,
        height: 0.28,
        depth: 0.45,
    });
    let headlight = shared(Geometry::Cylinder {
        radius_top: 0.08,
        radius_bottom: 0.08,
        height: 0.02,
    });
    let pupil = shared(Geometry::Sphere { radius: 0.04 });
    let bumper = shared(Geometry::Box {
        width: 0.8,
        height: 0.12,
        depth: 0.56,
    });
    let mud = shared(Geometry::Plane {
        width: 0.25,
        height: 0.12,
    });
    let wheel = shared(Geometry::Cylinder {
        radius_top: 0.18,
        radius_bottom: 0.18,
        height: 0.1,
    });

    let mut parts = vec![
        Part::new("body", &body, &body_mat, Placement::at(0.0, 0.65, 0.0)),
        Part::new("cabin", &cabin, &cabin_mat, Placement::at(0.05, 0.74, 0.0)),
        Part::new("bumper", &bumper, &bumper_mat, Placement::at(0.33, 0.3, 0.0)),
        Part::new(
            "mud",
            &mud,
            &mud_mat,
            Placement::at(0.42, 0.33, 0.28).rotated(-PI / 12.0, PI / 8.0, 0.0),
        ),
    ];
    for z in [0.18, -0.18] {
        parts.push(Part::new(
            "headlight",
            &headlight,
            &eye_mat,
            Placement::at(0.38, 0.58, z).rotated(0.0, 0.0, FRAC_PI_2),
        ));
        parts.push(Part::new(
            "pupil",
            &pupil,
            &pupil_mat,
            Placement::at(0.42, 0.59, z),
        ));
    }
    for [x, y, z] in [
        [-0.25, 0.26, 0.25],
        [-0.25, 0.26, -0.25],
        [0.35, 0.26, 0.25],
        [0.35, 0.26, -0.25],
    ] {
        let mut w = Part::new(
            "wheel",
            &wheel,
            &wheel_mat,
            Placement::at(x, y, z).rotated(FRAC_PI_2, 0.0, 0.0),
        );
        w.spins = true;
        parts.push(w);
    }
    parts.push(Part::new(
        "spare_tire",
        &wheel,
        &wheel_mat,
        Placement::at(-0.45, 0.55, 0.0)
            .rotated(0.0, 0.0, FRAC_PI_2)
            .scaled(0.75),
    ));

    Model { name: "Jax", parts }
}

pub fn build_nino() -> Model {
    let metal = shared(Material::standard(0x4b7bd9, 0.35, 0.6).with_emissive(0x12314f, 0.3));
    let accent = shared(Material::standard(0x8cc6ff, 0.2, 0.4));
    let dark = shared(Material::standard(0x0f1d2e, 0.6, 0.3));
    let eye_mat = shared(Material::standard(0xffffff, 0.5, 0.0).with_emissive(0x9cc9ff, 0.5));
    let pupil_mat = shared(Material::standard(0x1a2636, 0.5, 0.0));
    let strap_mat = shared(Material::standard(0x182635, 0.7, 0.0));

    let torso = shared(Geometry::Box {
        width: 0.3,
        height: 0.4,
        depth: 0.18,
    });
    let head = shared(Geometry::Box {
        width: 0.26,
        height: 0.22,
        depth: 0.2,
    });
    let antenna = shared(Geometry::Cylinder {
        radius_top: 0.01,
        radius_bottom: 0.015,
        height: 0.16,
    });
    let tip = shared(Geometry::Sphere { radius: 0.03 });
    let eye = shared(Geometry::Circle { radius: 0.04 });
    let pupil = shared(Geometry::Circle { radius: 0.02 });
    let arm = shared(Geometry::Cylinder {
        radius_top: 0.03,
        radius_bottom: 0.035,
        height: 0.32,
    });
    let leg = shared(Geometry::Cylinder {
        radius_top: 0.04,
        radius_bottom: 0.05,
        height: 0.28,
    });
    let backpack = shared(Geometry::Box {
        width: 0.2,
        height: 0.28,
        depth: 0.12,
    });
    let strap = shared(Geometry::Torus {
        radius: 0.22,
        tube: 0.02,
    });

    let mut parts = vec![
        Part::new("torso", &torso, &metal, Placement::at(0.0, 0.53, 0.0)),
        Part::new("head", &head, &metal, Placement::at(0.0, 0.78, 0.0)),
        Part::new("antenna", &antenna, &accent, Placement::at(0.0, 0.93, 0.0)),
        Part::new("antenna_tip", &tip, &accent, Placement::at(0.0, 1.02, 0.0)),
        Part::new(
            "left_arm",
            &arm,
            &accent,
            Placement::at(0.23, 0.48, 0.0).rotated(0.0, 0.0, PI / 3.0),
        ),
        Part::new(
            "right_arm",
            &arm,
            &accent,
            Placement::at(-0.23, 0.52, 0.0).rotated(0.0, 0.0, -PI / 2.4),
        ),
        Part::new("backpack", &backpack, &dark, Placement::at(0.0, 0.52, -0.16)),
        Part::new(
            "strap",
            &strap,
            &strap_mat,
            Placement::at(0.0, 0.54, -0.08).rotated(FRAC_PI_2, 0.0, 0.0),
        ),
    ];
    for x in [0.05, -0.05] {
        parts.push(Part::new(
            "eye",
            &eye,
            &eye_mat,
            Placement::at(x, 0.8, 0.105).rotated(0.0, -FRAC_PI_2, 0.0),
        ));
        parts.push(Part::new(
            "pupil",
            &pupil,
            &pupil_mat,
            Placement::at(x, 0.8, 0.11).rotated(0.0, -FRAC_PI_2, 0.0),
        ));
    }
    for x in [0.08, -0.08] {
        parts.push(Part::new("leg", &leg, &dark, Placement::at(x, 0.2, 0.0)));
    }

    Model { name: "Nino", parts }
}

/// Ground heightfield on the XZ plane, centred on the origin.
#[derive(Clone, Debug)]
pub struct Terrain {
    pub width: f32,
    pub depth: f32,
    pub segments_x: usize,
    pub segments_z: usize,
    /// Row-major, `(segments_x + 1) * (segments_z + 1)` samples.
    pub heights: Vec<f32>,
}

impl Terrain {
    pub fn generate<R: Rng>(
        rng: &mut R,
        width: f32,
        depth: f32,
        segments_x: usize,
        segments_z: usize,
    ) -> Self {
        let segments_x = segments_x.max(1);
        let segments_z = segments_z.max(1);
        let mut heights = Vec::with_capacity((segments_x + 1) * (segments_z + 1));
        for j in 0..=segments_z {
            let z = -0.5 * depth + depth * j as f32 / segments_z as f32;
            for _ in 0..=segments_x {
                let ripple = (z * 3.0).sin() * 0.05;
                let grit = (rng.gen::<f32>() - 0.5) * 0.02;
                heights.push(ripple + grit);
            }
        }
        Self {
            width,
            depth,
            segments_x,
            segments_z,
            heights,
        }
    }

    pub fn vertex(&self, i: usize, j: usize) -> Vec3 {
        let x = -0.5 * self.width + self.width * i as f32 / self.segments_x as f32;
        let z = -0.5 * self.depth + self.depth * j as f32 / self.segments_z as f32;
        Vec3::new(x, self.heights[j * (self.segments_x + 1) + i], z)
    }

    pub fn vertices(&self) -> impl Iterator<Item = Vec3> + '_ {
        (0..=self.segments_z)
            .flat_map(move |j| (0..=self.segments_x).map(move |i| self.vertex(i, j)))
    }

    /// Spacing between neighbouring samples along X.
    pub fn cell_size(&self) -> f32 {
        self.width / self.segments_x as f32
    }
}

pub struct Landscape {
    pub terrain: Terrain,
    pub ground: Arc<Material>,
    pub props: Vec<Part>,
}

pub fn build_landscape<R: Rng>(rng: &mut R) -> Landscape {
    let terrain = Terrain::generate(rng, 12.0, 6.0, 60, 30);
    let ground = shared(Material::standard(0x496431, 0.9, 0.05).with_emissive(0x102512, 0.2));

    let road_mat = shared(Material::standard(0x7d5234, 0.95, 0.01));
    let stone_mat = shared(Material::standard(0xb7b1a2, 0.85, 0.1));
    let grass_mat = shared(Material::standard(0x6faa4a, 1.0, 0.0));
    let road = shared(Geometry::Plane {
        width: 12.0,
        height: 1.15,
    });
    let stone = shared(Geometry::Icosahedron { radius: 0.12 });
    let blade = shared(Geometry::Cone {
        radius: 0.03,
        height: 0.24,
    });

    let mut props = vec![Part::new(
        "road",
        &road,
        &road_mat,
        Placement::at(0.0, 0.01, 0.0).rotated(-FRAC_PI_2, 0.0, 0.0),
    )];
    for _ in 0..24 {
        let side = if rng.gen::<f32>() > 0.5 { 1.0 } else { -1.0 };
        let placement = Placement::at(
            -4.0 + rng.gen::<f32>() * 8.0,
            0.06,
            side * (1.4 + rng.gen::<f32>() * 1.2),
        )
        .rotated(rng.gen(), rng.gen(), rng.gen())
        .scaled(0.7 + rng.gen::<f32>() * 0.6);
        props.push(Part::new("stone", &stone, &stone_mat, placement));
    }
    for _ in 0..120 {
        let radius = 2.5 + rng.gen::<f32>() * 2.0;
        let angle = rng.gen::<f32>() * TAU;
        let placement = Placement::at(
            angle.cos() * radius - 0.6,
            0.1,
            angle.sin() * radius * 0.6,
        )
        .rotated(0.0, rng.gen::<f32>() * PI, (rng.gen::<f32>() - 0.5) * 0.5)
        .scaled(0.8 + rng.gen::<f32>() * 0.4);
        props.push(Part::new("grass", &blade, &grass_mat, placement));
    }

    Landscape {
        terrain,
        ground,
        props,
    }
}
