//! Simple ray tracer example.
//!
//! Renders a small scene with patterns, glass, a CSG lens, a group of
//! spheres and an area light, then saves it as a PNG.
//!
//! Run with `RUST_LOG=debug` to see per-bucket progress.

use std::f64::consts::PI;
use std::time::Instant;

use anyhow::Result;
use lumen_renderer::{
    color, colors, point, render_parallel, rotation_x, scaling, translation, vector,
    view_transform, Camera, CsgOperation, Light, Material, Pattern, RenderConfig, Sequence, Shape,
    World,
};

fn main() -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let start = Instant::now();
    let world = build_scene()?;
    log::info!(
        "Scene built in {:?}: {} shapes, {} lights",
        start.elapsed(),
        world.shapes.len(),
        world.lights.len()
    );

    let camera = Camera::new(400, 225, PI / 3.0).with_transform(view_transform(
        point(0.0, 1.8, -6.0),
        point(0.0, 0.8, 0.0),
        vector(0.0, 1.0, 0.0),
    ))?;

    let config = RenderConfig {
        max_depth: 5,
        report_progress: true,
        ..RenderConfig::default()
    };
    let image = render_parallel(&camera, &world, &config);

    let filename = "output.png";
    image.to_rgb_image().save(filename)?;
    log::info!("Saved to {}", filename);
    Ok(())
}

fn build_scene() -> Result<World> {
    let mut world = World::new();

    let floor = Material {
        reflective: 0.2,
        specular: 0.0,
        ..Material::default()
    }
    .with_pattern(Pattern::checker(colors::WHITE, color(0.3, 0.3, 0.35)));
    world.add_object(Shape::plane().with_material(floor));

    let wall = Material {
        ambient: 0.2,
        diffuse: 0.6,
        specular: 0.0,
        ..Material::default()
    }
    .with_pattern(
        Pattern::stripe(color(0.9, 0.85, 0.7), color(0.7, 0.6, 0.5))
            .with_transform(scaling(0.5, 0.5, 0.5))?,
    );
    world.add_object(
        Shape::plane()
            .with_transform(translation(0.0, 0.0, 8.0) * rotation_x(PI / 2.0))?
            .with_material(wall),
    );

    // Glass sphere in the middle; it should not darken the floor
    world.add_object(
        Shape::glass_sphere()
            .with_transform(translation(0.0, 1.0, 0.0))?
            .with_casts_shadow(false),
    );

    // A lens: intersection of two offset spheres
    let lens_material = Material {
        color: color(0.2, 0.4, 0.9),
        reflective: 0.3,
        ..Material::default()
    };
    let left = world.shapes.add(
        Shape::sphere()
            .with_transform(translation(-2.2, 0.8, 0.0) * scaling(0.8, 0.8, 0.8))?
            .with_material(lens_material.clone()),
    );
    let right = world.shapes.add(
        Shape::sphere()
            .with_transform(translation(-1.7, 0.8, 0.0) * scaling(0.8, 0.8, 0.8))?
            .with_material(lens_material),
    );
    let lens = world
        .shapes
        .add_csg(CsgOperation::Intersection, left, right)?;
    world.add_root(lens)?;

    // A row of small spheres, split into subgroups for faster intersection
    let row = world.shapes.add(Shape::group());
    for i in 0..8 {
        let x = 1.4 + f64::from(i) * 0.3;
        let hue = f64::from(i) / 7.0;
        let z = -0.5 + f64::from(i % 2) * 0.4;
        let sphere = world.shapes.add(
            Shape::sphere()
                .with_transform(translation(x, 0.15, z) * scaling(0.15, 0.15, 0.15))?
                .with_material(Material::default().with_color(color(1.0 - hue, 0.3, hue))),
        );
        world.shapes.add_child(row, sphere)?;
    }
    world.shapes.divide(row, 2)?;
    world.add_root(row)?;

    world.add_light(
        Light::area(
            point(-4.0, 6.0, -6.0),
            vector(2.0, 0.0, 0.0),
            4,
            vector(0.0, 2.0, 0.0),
            4,
            colors::WHITE,
        )
        .with_jitter(Sequence::random(64, 7)),
    );

    Ok(world)
}
