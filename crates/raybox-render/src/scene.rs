//! Scene storage and brute-force ray queries.

use raybox_geom::{Geometry, IntersectionInfo};
use raybox_math::{Point3, Ray};
use raybox_shade::{Lighting, Occlusion, Shader, ShadingContext, Texture, TextureId};
use slotmap::{new_key_type, SlotMap};

new_key_type! {
    /// Handle of a geometry in a [`Scene`].
    pub struct GeometryId;
    /// Handle of a shader in a [`Scene`].
    pub struct ShaderId;
}

/// Distance a shadow-ray blocker must lie in front of the shaded point.
const SHADOW_EPSILON: f64 = 1e-6;

/// A visible object: one geometry drawn with one shader.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Node {
    /// The shape.
    pub geometry: GeometryId,
    /// How the shape is shaded.
    pub shader: ShaderId,
}

/// A nearest-hit query result.
#[derive(Debug, Clone, Copy)]
pub struct SceneHit<'a> {
    /// The intersection.
    pub info: IntersectionInfo<'a>,
    /// The node whose geometry was hit.
    pub node: &'a Node,
    /// The node's geometry. For CSG nodes `info.geometry` is the primitive
    /// that was crossed and this is the composed solid.
    pub geometry: &'a Geometry,
    /// The node's shader.
    pub shader: &'a Shader,
}

/// Everything that is rendered: geometries, shaders, textures, the nodes
/// pairing them, and the lighting.
///
/// Nodes are kept in insertion order. Queries test every node.
#[derive(Debug, Clone)]
pub struct Scene {
    /// Light and ambient term.
    pub lighting: Lighting,
    geometries: SlotMap<GeometryId, Geometry>,
    shaders: SlotMap<ShaderId, Shader>,
    textures: SlotMap<TextureId, Texture>,
    nodes: Vec<Node>,
}

impl Scene {
    /// Create an empty scene.
    pub fn new(lighting: Lighting) -> Self {
        Self {
            lighting,
            geometries: SlotMap::with_key(),
            shaders: SlotMap::with_key(),
            textures: SlotMap::with_key(),
            nodes: Vec::new(),
        }
    }

    /// Store a geometry.
    pub fn add_geometry(&mut self, geometry: impl Into<Geometry>) -> GeometryId {
        self.geometries.insert(geometry.into())
    }

    /// Store a shader.
    pub fn add_shader(&mut self, shader: impl Into<Shader>) -> ShaderId {
        self.shaders.insert(shader.into())
    }

    /// Store a texture for shaders to bind.
    pub fn add_texture(&mut self, texture: impl Into<Texture>) -> TextureId {
        self.textures.insert(texture.into())
    }

    /// Append a node drawing `geometry` with `shader`.
    pub fn add_node(&mut self, geometry: GeometryId, shader: ShaderId) -> &Node {
        self.nodes.push(Node { geometry, shader });
        &self.nodes[self.nodes.len() - 1]
    }

    /// Store a geometry and a shader and append a node pairing them.
    pub fn add(&mut self, geometry: impl Into<Geometry>, shader: impl Into<Shader>) -> Node {
        let geometry = self.add_geometry(geometry);
        let shader = self.add_shader(shader);
        *self.add_node(geometry, shader)
    }

    /// The nodes, in insertion order.
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Look up a geometry.
    pub fn geometry(&self, id: GeometryId) -> Option<&Geometry> {
        self.geometries.get(id)
    }

    /// Look up a shader.
    pub fn shader(&self, id: ShaderId) -> Option<&Shader> {
        self.shaders.get(id)
    }

    /// Nodes whose geometry and shader both exist.
    fn resolved(&self) -> impl Iterator<Item = (&Node, &Geometry, &Shader)> + '_ {
        self.nodes.iter().filter_map(|node| {
            let geometry = self.geometries.get(node.geometry)?;
            let shader = self.shaders.get(node.shader)?;
            Some((node, geometry, shader))
        })
    }

    /// Find the nearest node hit by `ray`.
    ///
    /// On an exact distance tie the node added first wins.
    pub fn closest_hit(&self, ray: &Ray) -> Option<SceneHit<'_>> {
        let mut closest: Option<SceneHit<'_>> = None;

        for (node, geometry, shader) in self.resolved() {
            let Some(info) = geometry.intersect(ray) else {
                continue;
            };
            if closest.map_or(true, |c| info.distance < c.info.distance) {
                closest = Some(SceneHit {
                    info,
                    node,
                    geometry,
                    shader,
                });
            }
        }

        if ray.debug {
            match &closest {
                Some(hit) => {
                    log::debug!(
                        "    closest node is a {} at distance {:.3}",
                        hit.geometry.name(),
                        hit.info.distance
                    );
                    log::debug!("      ip   = {:?}", hit.info.point);
                    log::debug!("      norm = {:?}", hit.info.normal);
                }
                None => log::debug!("    no node hit"),
            }
        }

        closest
    }

    /// Lighting, textures and this scene as the shadow test, bundled for
    /// shaders.
    pub fn shading_context(&self) -> ShadingContext<'_> {
        ShadingContext {
            lighting: &self.lighting,
            textures: &self.textures,
            occlusion: self,
        }
    }
}

impl Occlusion for Scene {
    /// Cast a ray from the light toward `point`; any geometry hit closer
    /// than `point` puts it in shadow.
    fn light_is_visible(&self, point: &Point3, light: &Point3) -> bool {
        let to_point = point - light;
        let len = to_point.norm();
        let ray = Ray::new(*light, to_point);

        !self.resolved().any(|(_, geometry, _)| {
            geometry
                .intersect(&ray)
                .is_some_and(|info| info.distance < len - SHADOW_EPSILON)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use raybox_geom::{Plane, Sphere};
    use raybox_math::Vec3;
    use raybox_shade::{Color, Lambert, Phong};

    fn lighting() -> Lighting {
        Lighting::new(Point3::new(0.0, 100.0, 0.0), Color::splat(1e4))
    }

    #[test]
    fn test_closest_hit_picks_nearest_node() {
        let mut scene = Scene::new(lighting());
        scene.add(Plane::horizontal(0.0), Lambert::new(Color::WHITE));
        let near = scene.add(
            Sphere::new(Point3::new(0.0, 1.0, 0.0), 1.0),
            Phong::new(Color::WHITE, 10.0),
        );

        let down = Ray::new(Point3::new(0.0, 10.0, 0.0), -Vec3::y());
        let hit = scene.closest_hit(&down).unwrap();
        assert_eq!(*hit.node, near);
        assert_eq!(hit.shader.name(), "Phong");
        assert!((hit.info.distance - 8.0).abs() < 1e-10);

        let beside = Ray::new(Point3::new(5.0, 10.0, 0.0), -Vec3::y());
        let hit = scene.closest_hit(&beside).unwrap();
        assert_eq!(hit.geometry.name(), "Plane");

        let up = Ray::new(Point3::new(5.0, 10.0, 0.0), Vec3::y());
        assert!(scene.closest_hit(&up).is_none());
    }

    #[test]
    fn test_tie_goes_to_first_node() {
        let mut scene = Scene::new(lighting());
        let first = scene.add(Plane::horizontal(0.0), Lambert::new(Color::WHITE));
        scene.add(Plane::horizontal(0.0), Phong::new(Color::WHITE, 2.0));

        let down = Ray::new(Point3::new(0.0, 3.0, 0.0), -Vec3::y());
        assert_eq!(*scene.closest_hit(&down).unwrap().node, first);
    }

    #[test]
    fn test_add_node_from_ids() {
        let mut scene = Scene::new(lighting());
        let ball = scene.add_geometry(Sphere::new(Point3::origin(), 1.0));
        let red = scene.add_shader(Lambert::new(Color::new(1.0, 0.0, 0.0)));
        let node = *scene.add_node(ball, red);

        assert_eq!(scene.nodes(), &[node]);
        assert!(scene.geometry(ball).is_some());
        assert!(scene.shader(red).is_some());
    }

    #[test]
    fn test_shadow_test() {
        let mut scene = Scene::new(lighting());
        scene.add(Plane::horizontal(0.0), Lambert::new(Color::WHITE));
        scene.add(
            Sphere::new(Point3::new(0.0, 50.0, 0.0), 5.0),
            Lambert::new(Color::WHITE),
        );
        let light = scene.lighting.light.position;

        // the plane itself never shadows its own points
        assert!(scene.light_is_visible(&Point3::new(30.0, 0.0, 0.0), &light));
        // the sphere sits between the light and the origin
        assert!(!scene.light_is_visible(&Point3::origin(), &light));
        // the top of the sphere is lit
        assert!(scene.light_is_visible(&Point3::new(0.0, 55.0, 0.0), &light));
    }
}
