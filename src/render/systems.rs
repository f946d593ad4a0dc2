use super::*;
use bevy::prelude::*;
use bevy_asset::RenderAssetUsages;
use bevy_mesh::PrimitiveTopology;

/// Spawn the plane entity around an empty mesh; `rebuild_plane` fills it
/// before the first frame renders.
pub fn setup_plane(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let mesh = meshes.add(Mesh::new(
        PrimitiveTopology::TriangleList,
        RenderAssetUsages::default(),
    ));
    // White base so the vertex colors come through unchanged
    let material = materials.add(StandardMaterial {
        base_color: Color::WHITE,
        perceptual_roughness: 0.9,
        cull_mode: None,
        double_sided: true,
        ..default()
    });

    commands.spawn((
        PlaneMesh,
        Mesh3d(mesh.clone()),
        MeshMaterial3d(material),
        Transform::IDENTITY,
    ));
    commands.insert_resource(PlaneHandle(mesh));
}

/// Regenerate the plane from the current grid configuration. Replaces the
/// mesh data, the color buffer and the picking copy together.
pub fn rebuild_plane(
    grid: Res<GridRes>,
    settings: Res<SettingsRes>,
    handle: Res<PlaneHandle>,
    mut rng: ResMut<NoiseRng>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut geometry: ResMut<PlaneGeometry>,
    mut colors: ResMut<ColorBuffer>,
    mut fades: ResMut<FadeAnimations>,
) {
    let mesh = generate_grid(&grid.0, &mut rng.0);
    let base = mesh.base_colors(settings.0.base_color);

    let Some(asset) = meshes.get_mut(&handle.0) else {
        warn!("plane mesh asset missing, skipping rebuild");
        return;
    };
    *asset = mesh.to_bevy_mesh(&base);

    debug!(
        "rebuilt plane {}x{} ({}x{} segments): {} vertices, {} faces",
        grid.0.width,
        grid.0.height,
        grid.0.width_segments,
        grid.0.height_segments,
        mesh.vertex_count(),
        mesh.face_count(),
    );

    // Old fades index the previous mesh
    fades.clear();
    *colors = base;
    colors.mark_clean();
    geometry.0 = mesh;
}

/// Copy the color buffer into the mesh when it changed this frame.
pub fn upload_colors(
    handle: Res<PlaneHandle>,
    geometry: Res<PlaneGeometry>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut colors: ResMut<ColorBuffer>,
) {
    if !colors.is_dirty() {
        return;
    }
    if let Some(mesh) = meshes.get_mut(&handle.0) {
        mesh.insert_attribute(Mesh::ATTRIBUTE_COLOR, geometry.0.corner_colors(&colors));
    }
    colors.mark_clean();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Color, GridField, PlaneSettings};
    use bevy_mesh::VertexAttributeValues;

    fn plane_app() -> App {
        let settings = PlaneSettings::default();
        let mut app = App::new();
        app.add_plugins((MinimalPlugins, AssetPlugin::default()))
            .init_asset::<Mesh>()
            .insert_resource(GridRes(settings.grid))
            .insert_resource(NoiseRng::new(Some(11)))
            .insert_resource(FadeAnimations::new(settings.fade.overlap))
            .insert_resource(SettingsRes::new(settings))
            .init_resource::<ColorBuffer>()
            .init_resource::<PlaneGeometry>()
            .add_systems(
                Update,
                (
                    rebuild_plane.run_if(resource_changed::<GridRes>),
                    upload_colors,
                )
                    .chain(),
            );

        let handle = app
            .world_mut()
            .resource_mut::<Assets<Mesh>>()
            .add(Mesh::new(
                PrimitiveTopology::TriangleList,
                RenderAssetUsages::default(),
            ));
        app.insert_resource(PlaneHandle(handle));
        app
    }

    fn mesh_colors(app: &App) -> Vec<[f32; 4]> {
        let handle = &app.world().resource::<PlaneHandle>().0;
        let mesh = app.world().resource::<Assets<Mesh>>().get(handle).unwrap();
        match mesh.attribute(Mesh::ATTRIBUTE_COLOR) {
            Some(VertexAttributeValues::Float32x4(colors)) => colors.clone(),
            other => panic!("unexpected color attribute {other:?}"),
        }
    }

    fn start_hover_fade(app: &mut App) {
        let settings = app.world().resource::<SettingsRes>().0.clone();
        let world = app.world_mut();
        world
            .resource_mut::<ColorBuffer>()
            .set_vertex_color(0, settings.hover_color);
        world.resource_mut::<FadeAnimations>().start(Fade::new(
            settings.hover_color,
            settings.base_color,
            [0, 1, 2],
            &settings.fade,
        ));
    }

    #[test]
    fn first_update_builds_plane() {
        let mut app = plane_app();
        app.update();

        let world = app.world();
        assert_eq!(world.resource::<PlaneGeometry>().0.vertex_count(), 31 * 31);
        assert_eq!(world.resource::<ColorBuffer>().len(), 31 * 31);
        assert!(!world.resource::<ColorBuffer>().is_dirty());
        assert_eq!(mesh_colors(&app).len(), 30 * 30 * 2 * 3);
    }

    #[test]
    fn grid_change_replaces_mesh_colors_and_fades() {
        let mut app = plane_app();
        app.update();
        start_hover_fade(&mut app);

        {
            let limits = app.world().resource::<SettingsRes>().0.limits;
            let mut grid = app.world_mut().resource_mut::<GridRes>();
            assert!(grid.0.step(GridField::WidthSegments, -1, &limits));
        }
        app.update();

        let world = app.world();
        let geometry = &world.resource::<PlaneGeometry>().0;
        assert_eq!(geometry.vertex_count(), 30 * 31);
        assert_eq!(geometry.face_count(), 29 * 30 * 2);
        let colors = world.resource::<ColorBuffer>();
        assert_eq!(colors.len(), 30 * 31);
        assert_eq!(colors.get(0), Some(Color::BASE));
        assert!(world.resource::<FadeAnimations>().is_empty());

        let uploaded = mesh_colors(&app);
        assert_eq!(uploaded.len(), 29 * 30 * 2 * 3);
        assert!(uploaded.iter().all(|c| *c == Color::BASE.to_array()));
    }

    #[test]
    fn unchanged_grid_is_not_rebuilt() {
        let mut app = plane_app();
        app.update();
        let before = app.world().resource::<PlaneGeometry>().0.clone();
        start_hover_fade(&mut app);

        app.update();
        app.update();

        let world = app.world();
        // A rebuild would roll fresh noise
        assert_eq!(world.resource::<PlaneGeometry>().0, before);
        assert_eq!(world.resource::<FadeAnimations>().len(), 1);
    }

    #[test]
    fn dirty_colors_are_uploaded_once() {
        let mut app = plane_app();
        app.update();
        start_hover_fade(&mut app);
        assert!(app.world().resource::<ColorBuffer>().is_dirty());

        app.update();
        assert!(!app.world().resource::<ColorBuffer>().is_dirty());
        // Vertex 0 is the first corner of the first face
        let uploaded = mesh_colors(&app);
        assert_eq!(uploaded[0], Color::HOVER.to_array());
        assert_eq!(uploaded[1], Color::BASE.to_array());
    }
}
