use glam::Mat4;
use reactor_common::{Color, Transform};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Addressable nodes of the reactor assembly.
///
/// `Assembly` is the parent group; the rings and the core are its children.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ReactorPart {
    Assembly,
    OuterRing,
    MidRing,
    InnerRing,
    Core,
}

impl ReactorPart {
    pub const ALL: [ReactorPart; 5] = [
        ReactorPart::Assembly,
        ReactorPart::OuterRing,
        ReactorPart::MidRing,
        ReactorPart::InnerRing,
        ReactorPart::Core,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ReactorPart::Assembly => "assembly",
            ReactorPart::OuterRing => "outer-ring",
            ReactorPart::MidRing => "mid-ring",
            ReactorPart::InnerRing => "inner-ring",
            ReactorPart::Core => "core",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.name() == name)
    }
}

impl fmt::Display for ReactorPart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Geometry a node is drawn with.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Shape {
    /// Transform-only grouping node.
    Group,
    Torus { radius: f32, tube: f32 },
    Sphere { radius: f32 },
}

/// Surface parameters for a lit mesh.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Material {
    pub base_color: Color,
    pub emissive: Color,
    pub emissive_intensity: f32,
    pub roughness: f32,
    pub metalness: f32,
    /// False for surfaces that should bypass tone mapping and read as pure light.
    pub tone_mapped: bool,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            base_color: Color::WHITE,
            emissive: Color::BLACK,
            emissive_intensity: 1.0,
            roughness: 1.0,
            metalness: 0.0,
            tone_mapped: true,
        }
    }
}

impl Material {
    /// Dark polished metal shared by the three rings.
    pub fn ring() -> Self {
        Self {
            base_color: Color::from_rgb8(0x11, 0x11, 0x11),
            emissive_intensity: 1.5,
            roughness: 0.2,
            metalness: 0.9,
            ..Self::default()
        }
    }

    pub fn core() -> Self {
        Self {
            base_color: Color::WHITE,
            emissive_intensity: 3.0,
            tone_mapped: false,
            ..Self::default()
        }
    }
}

/// One node of the reactor scene graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneNode {
    pub shape: Shape,
    pub transform: Transform,
    pub material: Material,
}

impl SceneNode {
    /// The node as the reactor is first assembled.
    pub fn initial(part: ReactorPart) -> Self {
        let (shape, material) = match part {
            ReactorPart::Assembly => (Shape::Group, Material::default()),
            ReactorPart::OuterRing => (
                Shape::Torus {
                    radius: 5.0,
                    tube: 0.2,
                },
                Material::ring(),
            ),
            ReactorPart::MidRing => (
                Shape::Torus {
                    radius: 4.0,
                    tube: 0.3,
                },
                Material::ring(),
            ),
            ReactorPart::InnerRing => (
                Shape::Torus {
                    radius: 3.0,
                    tube: 0.5,
                },
                Material::ring(),
            ),
            ReactorPart::Core => (Shape::Sphere { radius: 1.5 }, Material::core()),
        };
        Self {
            shape,
            transform: Transform::default(),
            material,
        }
    }
}

/// The render graph the animator writes into.
///
/// Nodes are mounted and unmounted independently. A part that is not mounted
/// is simply absent; writers skip it rather than fail.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SceneGraph {
    nodes: BTreeMap<ReactorPart, SceneNode>,
}

impl SceneGraph {
    /// An empty graph with nothing mounted.
    pub fn new() -> Self {
        Self::default()
    }

    /// A graph with every part mounted in its initial state.
    pub fn assembled() -> Self {
        let mut graph = Self::new();
        for part in ReactorPart::ALL {
            graph.mount(part, SceneNode::initial(part));
        }
        graph
    }

    /// Mount `node` at `part`, returning whatever was mounted there before.
    pub fn mount(&mut self, part: ReactorPart, node: SceneNode) -> Option<SceneNode> {
        tracing::debug!(%part, "mounted scene node");
        self.nodes.insert(part, node)
    }

    pub fn unmount(&mut self, part: ReactorPart) -> Option<SceneNode> {
        let node = self.nodes.remove(&part);
        if node.is_some() {
            tracing::debug!(%part, "unmounted scene node");
        }
        node
    }

    pub fn is_mounted(&self, part: ReactorPart) -> bool {
        self.nodes.contains_key(&part)
    }

    pub fn get(&self, part: ReactorPart) -> Option<&SceneNode> {
        self.nodes.get(&part)
    }

    pub fn get_mut(&mut self, part: ReactorPart) -> Option<&mut SceneNode> {
        self.nodes.get_mut(&part)
    }

    /// Mounted parts in canonical order.
    pub fn mounted_parts(&self) -> impl Iterator<Item = ReactorPart> + '_ {
        self.nodes.keys().copied()
    }

    pub fn nodes(&self) -> impl Iterator<Item = (ReactorPart, &SceneNode)> {
        self.nodes.iter().map(|(p, n)| (*p, n))
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// World matrix of a mounted part. Children inherit the assembly's
    /// transform when it is mounted and the identity otherwise.
    pub fn world_matrix(&self, part: ReactorPart) -> Option<Mat4> {
        let local = self.get(part)?.transform.matrix();
        if part == ReactorPart::Assembly {
            return Some(local);
        }
        let parent = self
            .get(ReactorPart::Assembly)
            .map(|n| n.transform.matrix())
            .unwrap_or(Mat4::IDENTITY);
        Some(parent * local)
    }
}
